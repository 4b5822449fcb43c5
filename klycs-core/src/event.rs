//! Card-neutral event types.
//!
//! These types represent calendar events the way klycs stores them: one JSON
//! document per event inside a card's directory. The scheduling logic and the
//! CLI work exclusively with them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recurrence::RecurrenceRule;

/// A calendar event belonging to a card.
///
/// Master events and expanded recurring instances share this struct; an
/// instance carries `is_recurring_instance = true`, a `parent_event_id`, and
/// no `recurring` rule of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start: EventTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<EventTime>,
    #[serde(default)]
    pub status: EventStatus,

    /// People invited to this event (card team members or external clients).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<Attendee>,

    /// Display color in the card's calendar view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Recurrence rule, present on master events only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<RecurrenceRule>,
    /// True for events produced by recurrence expansion.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_recurring_instance: bool,
    /// Id of the master event this instance was expanded from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_event_id: Option<String>,

    /// Last modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

fn is_false(b: &bool) -> bool {
    !b
}

impl Event {
    /// Create a fresh event with a generated id.
    pub fn new(
        title: String,
        start: EventTime,
        end: Option<EventTime>,
        description: Option<String>,
        location: Option<String>,
    ) -> Self {
        Event {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            location,
            start,
            end,
            status: EventStatus::Confirmed,
            attendees: Vec::new(),
            color: None,
            recurring: None,
            is_recurring_instance: false,
            parent_event_id: None,
            updated: Some(Utc::now()),
        }
    }

    /// Whether this event is a recurring master with at least one weekday.
    pub fn is_recurring(&self) -> bool {
        self.recurring.as_ref().is_some_and(|r| r.is_active())
    }
}

/// Someone invited to an event (a team member or an external client).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
}

/// Booking status of an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Confirmed,
    Pending,
    Cancelled,
}

/// Start or end of an event: a point in time, or a whole calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventTime {
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
}

impl EventTime {
    /// The calendar day this time falls on.
    pub fn date_naive(&self) -> NaiveDate {
        match self {
            EventTime::DateTime(dt) => dt.date_naive(),
            EventTime::Date(d) => *d,
        }
    }

    /// Resolve to an instant, treating all-day values as midnight UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            EventTime::DateTime(dt) => *dt,
            EventTime::Date(d) => d.and_hms_opt(0, 0, 0).unwrap().and_utc(),
        }
    }

    /// Milliseconds since the Unix epoch (all-day values at midnight UTC).
    pub fn timestamp_millis(&self) -> i64 {
        self.to_utc().timestamp_millis()
    }
}
