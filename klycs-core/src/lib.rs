//! Core types and scheduling logic for klycs card calendars.
//!
//! This crate provides the pieces shared by the klycs CLI and anything else
//! that needs to work with card schedules:
//! - `Event` and related types for card events
//! - `recurrence` for expanding recurring masters into concrete instances
//! - `Card` / `Klycs` for the on-disk event store (one JSON document per event)
//! - `ics` for exporting a card's schedule

pub mod card;
pub mod card_config;
pub mod constants;
pub mod date_range;
pub mod error;
pub mod event;
pub mod ics;
pub mod klycs;
pub mod klycs_config;
pub mod recurrence;
pub mod schedule;
pub mod stored_event;

pub use error::{KlycsError, KlycsResult};

// Re-export all event types at crate root for convenience
pub use event::*;
