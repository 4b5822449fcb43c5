//! ICS export for card calendars.
//!
//! This module writes a card's events as an .ics file (RFC 5545 subset) so a
//! schedule can be shared with external calendar apps.

mod generate;

pub use generate::{CardMetadata, generate_calendar_ics};
