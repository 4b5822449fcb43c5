//! Window assembly for a card's calendar.
//!
//! Combines plain events with expanded recurring instances for a date window.

use crate::date_range::DateRange;
use crate::event::Event;
use crate::recurrence::expand_recurring_event;

/// Events visible in `range`: non-recurring events whose start falls inside
/// the window, plus expanded instances of recurring masters. The masters
/// themselves are not included. Sorted by start.
pub fn events_in_range(events: Vec<Event>, range: &DateRange) -> Vec<Event> {
    let mut visible = Vec::new();

    for event in events {
        if event.is_recurring() {
            visible.extend(expand_recurring_event(
                &event,
                range.start_date(),
                range.end_date(),
            ));
        } else if range.contains(event.start.to_utc()) {
            visible.push(event);
        }
    }

    visible.sort_by_key(|e| e.start.to_utc());
    visible
}
