//! ICS file generation.

use icalendar::{Calendar, Component, EventLike, Property, ValueType};

use crate::error::{KlycsError, KlycsResult};
use crate::event::{Event, EventStatus, EventTime};
use crate::recurrence::{MAX_CYCLE_COUNT, RecurrenceRule};

/// Calendar-level fields emitted on export.
pub struct CardMetadata {
    pub card_slug: String,
    pub card_title: String,
}

/// Generate .ics content containing every event in `events`.
pub fn generate_calendar_ics(events: &[Event], metadata: &CardMetadata) -> KlycsResult<String> {
    let mut cal = Calendar::new();
    cal.name(&metadata.card_title);
    cal.append_property(Property::new("X-KLYCS-CARD", &metadata.card_slug));

    for event in events {
        cal.push(build_vevent(event)?);
    }

    let cal = cal.done();

    // Post-process to remove unnecessary bloat from the icalendar crate's output
    let output = strip_ics_bloat(&cal.to_string());

    Ok(output)
}

fn build_vevent(event: &Event) -> KlycsResult<icalendar::Event> {
    let mut vevent = icalendar::Event::new();
    vevent.uid(&event.id);
    vevent.summary(&event.title);

    // DTSTAMP - required by RFC 5545, use updated timestamp or current time
    let dtstamp = event
        .updated
        .unwrap_or_else(chrono::Utc::now)
        .format("%Y%m%dT%H%M%SZ")
        .to_string();
    vevent.add_property("DTSTAMP", &dtstamp);

    add_datetime_property(&mut vevent, "DTSTART", &event.start);
    if let Some(ref end) = event.end {
        add_datetime_property(&mut vevent, "DTEND", end);
    }

    if let Some(ref desc) = event.description {
        vevent.description(desc);
    }

    if let Some(ref loc) = event.location {
        vevent.location(loc);
    }

    // Status - only emit if not CONFIRMED (the implied default).
    // Pending bookings map to TENTATIVE.
    match event.status {
        EventStatus::Confirmed => {}
        EventStatus::Pending => {
            vevent.add_property("STATUS", "TENTATIVE");
        }
        EventStatus::Cancelled => {
            vevent.add_property("STATUS", "CANCELLED");
        }
    }

    // Recurrence rule (for master events)
    if let Some(rule) = event.recurring.as_ref().filter(|r| r.is_active()) {
        vevent.add_property("RRULE", build_rrule_string(rule)?);
        for exdate in &rule.exceptions {
            add_exdate_property(&mut vevent, exdate);
        }
    }

    // ATTENDEE (multi-property - can appear multiple times)
    for attendee in &event.attendees {
        let mut prop = Property::new("ATTENDEE", format!("mailto:{}", attendee.email));
        if let Some(ref name) = attendee.name {
            prop.add_parameter("CN", name);
        }
        vevent.append_multi_property(prop);
    }

    if let Some(ref color) = event.color {
        vevent.add_property("X-KLYCS-COLOR", color);
    }

    // Expanded instances point back to their master
    if let Some(ref parent) = event.parent_event_id {
        vevent.add_property("X-KLYCS-PARENT", parent);
    }

    Ok(vevent.done())
}

/// Build an RFC 5545 RRULE value from a weekly recurrence rule.
fn build_rrule_string(rule: &RecurrenceRule) -> KlycsResult<String> {
    let mut days = Vec::with_capacity(rule.weekdays.len());
    for weekday in &rule.weekdays {
        days.push(byday_code(*weekday)?);
    }

    let mut parts = vec!["FREQ=WEEKLY".to_string()];
    if rule.interval > 1 {
        parts.push(format!("INTERVAL={}", rule.interval));
    }
    parts.push(format!("BYDAY={}", days.join(",")));

    if let Some(end) = rule.end_date {
        parts.push(format!("UNTIL={}T235959Z", end.format("%Y%m%d")));
    } else if let Some(count) = rule.count {
        // RRULE COUNT counts occurrences, not weeks
        let occurrences = count.min(MAX_CYCLE_COUNT) * rule.weekdays.len() as u32;
        parts.push(format!("COUNT={}", occurrences));
    }

    Ok(parts.join(";"))
}

/// Two-letter RFC 5545 weekday code for a 0 = Sunday index.
fn byday_code(weekday: u8) -> KlycsResult<&'static str> {
    Ok(match weekday {
        0 => "SU",
        1 => "MO",
        2 => "TU",
        3 => "WE",
        4 => "TH",
        5 => "FR",
        6 => "SA",
        _ => {
            return Err(KlycsError::IcsGenerate(format!(
                "Invalid weekday index: {weekday}"
            )));
        }
    })
}

/// Add a datetime property with proper formatting based on EventTime variant
fn add_datetime_property(vevent: &mut icalendar::Event, name: &str, time: &EventTime) {
    match time {
        EventTime::Date(d) => {
            let mut prop = Property::new(name, d.format("%Y%m%d").to_string());
            prop.append_parameter(ValueType::Date);
            vevent.append_property(prop);
        }
        EventTime::DateTime(dt) => {
            vevent.add_property(name, dt.format("%Y%m%dT%H%M%SZ").to_string());
        }
    }
}

/// Add an EXDATE property for a single exception date
fn add_exdate_property(vevent: &mut icalendar::Event, time: &EventTime) {
    match time {
        EventTime::Date(d) => {
            let mut prop = Property::new("EXDATE", d.format("%Y%m%d").to_string());
            prop.append_parameter(ValueType::Date);
            vevent.append_multi_property(prop);
        }
        EventTime::DateTime(dt) => {
            let prop = Property::new("EXDATE", dt.format("%Y%m%dT%H%M%SZ").to_string());
            vevent.append_multi_property(prop);
        }
    }
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with KLYCS (we post-process the output)
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:KLYCS\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
