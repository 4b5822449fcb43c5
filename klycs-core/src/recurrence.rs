//! Recurring event expansion.
//!
//! Expands a recurring master event into the concrete instances that fall
//! inside a date window, honoring exception dates and a hard cap on the
//! number of weekly cycles examined.

use chrono::{Datelike, Days, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::event::{Event, EventTime};

/// Weekly cycles examined when a rule does not say how many.
pub const DEFAULT_CYCLE_COUNT: u32 = 12;

/// Absolute ceiling on weekly cycles, regardless of what the rule asks for.
pub const MAX_CYCLE_COUNT: u32 = 52;

/// Weekly recurrence rule embedded in a master event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    /// Weekday indices the event repeats on (0 = Sunday .. 6 = Saturday).
    #[serde(default)]
    pub weekdays: Vec<u8>,
    /// Weeks between cycles. A stored 0 is treated as 1.
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Weekly cycles to examine, capped at [`MAX_CYCLE_COUNT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// No instances are generated after this date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Dates to skip, matched at calendar-day granularity.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exceptions: Vec<EventTime>,
}

fn default_interval() -> u32 {
    1
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        RecurrenceRule {
            weekdays: Vec::new(),
            interval: 1,
            count: None,
            end_date: None,
            exceptions: Vec::new(),
        }
    }
}

impl RecurrenceRule {
    /// A rule only recurs if it names at least one weekday.
    pub fn is_active(&self) -> bool {
        !self.weekdays.is_empty()
    }

    /// Whether `day` is suppressed, ignoring any stored time-of-day.
    fn is_exception(&self, day: NaiveDate) -> bool {
        self.exceptions.iter().any(|e| e.date_naive() == day)
    }
}

/// Expand a recurring master event into instances within
/// `[window_start, window_end]` (both inclusive, calendar-day granularity).
///
/// Returns an empty Vec for non-recurring masters; the master itself is never
/// included. Every returned instance has an id of the form
/// `{master_id}_{start_millis}`, carries the master's payload with the
/// recurrence cleared, and keeps the master's wall-clock time-of-day and
/// duration. Output is chronological.
///
/// The function is pure and never errors: degenerate rules produce an empty
/// result, and the cycle ceiling bounds work at 7 × [`MAX_CYCLE_COUNT`]
/// day-checks per call.
pub fn expand_recurring_event(
    master: &Event,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<Event> {
    let rule = match &master.recurring {
        Some(r) if r.is_active() => r,
        _ => return Vec::new(),
    };

    // Horizon: the rule's own end date, never past the requested window.
    let horizon = match rule.end_date {
        Some(d) => d.min(window_end),
        None => window_end,
    };

    let cycles = rule.count.unwrap_or(DEFAULT_CYCLE_COUNT).min(MAX_CYCLE_COUNT);
    // A stored interval of 0 would never advance the cursor.
    let interval = rule.interval.max(1);

    let duration = master_duration(master);

    let mut instances = Vec::new();
    let mut cursor = master.start.date_naive();

    'cycles: for _ in 0..cycles {
        for offset in 0..7 {
            let day = cursor + Days::new(offset);

            if day > horizon {
                break 'cycles;
            }
            if !rule.weekdays.contains(&weekday_index(day)) || day < window_start {
                continue;
            }
            if rule.is_exception(day) {
                continue;
            }

            instances.push(materialize_instance(master, day, duration));
        }

        cursor = cursor + Days::new(u64::from(interval) * 7);
    }

    instances
}

/// Weekday index with 0 = Sunday .. 6 = Saturday, matching `RecurrenceRule`.
fn weekday_index(day: NaiveDate) -> u8 {
    day.weekday().num_days_from_sunday() as u8
}

/// The master's duration, if it has a positive one.
fn master_duration(master: &Event) -> Option<Duration> {
    let end = master.end.as_ref()?;
    let duration = end.to_utc() - master.start.to_utc();
    (duration > Duration::zero()).then_some(duration)
}

/// Build the concrete instance of `master` that falls on `day`.
fn materialize_instance(master: &Event, day: NaiveDate, duration: Option<Duration>) -> Event {
    let start = match &master.start {
        EventTime::DateTime(dt) => EventTime::DateTime(day.and_time(dt.time()).and_utc()),
        EventTime::Date(_) => EventTime::Date(day),
    };

    let end = duration.map(|d| match &start {
        EventTime::DateTime(dt) => EventTime::DateTime(*dt + d),
        EventTime::Date(start_day) => {
            EventTime::Date(*start_day + Days::new(d.num_days() as u64))
        }
    });

    Event {
        id: format!("{}_{}", master.id, start.timestamp_millis()),
        title: master.title.clone(),
        description: master.description.clone(),
        location: master.location.clone(),
        start,
        end,
        status: master.status.clone(),
        attendees: master.attendees.clone(),
        color: master.color.clone(),
        recurring: None,
        is_recurring_instance: true,
        parent_event_id: Some(master.id.clone()),
        updated: master.updated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike, Utc};

    fn window(from: (i32, u32, u32), to: (i32, u32, u32)) -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(from.0, from.1, from.2).unwrap(),
            NaiveDate::from_ymd_opt(to.0, to.1, to.2).unwrap(),
        )
    }

    /// Master starting Monday 2024-01-01 09:00-10:00 UTC.
    fn weekly_master(rule: RecurrenceRule) -> Event {
        Event {
            id: "evt-1".to_string(),
            title: "Team sync".to_string(),
            description: None,
            location: None,
            start: EventTime::DateTime(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()),
            end: Some(EventTime::DateTime(
                Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            )),
            status: crate::event::EventStatus::Confirmed,
            attendees: vec![],
            color: None,
            recurring: Some(rule),
            is_recurring_instance: false,
            parent_event_id: None,
            updated: None,
        }
    }

    fn dates_of(instances: &[Event]) -> Vec<NaiveDate> {
        instances.iter().map(|e| e.start.date_naive()).collect()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // --- basic expansion ---

    #[test]
    fn two_cycles_of_monday_and_wednesday() {
        let master = weekly_master(RecurrenceRule {
            weekdays: vec![1, 3],
            count: Some(2),
            ..RecurrenceRule::default()
        });
        let (from, to) = window((2024, 1, 1), (2024, 1, 31));

        let instances = expand_recurring_event(&master, from, to);

        assert_eq!(
            dates_of(&instances),
            vec![ymd(2024, 1, 1), ymd(2024, 1, 3), ymd(2024, 1, 8), ymd(2024, 1, 10)]
        );
    }

    #[test]
    fn instances_keep_wall_clock_time_and_duration() {
        let master = weekly_master(RecurrenceRule {
            weekdays: vec![1, 3],
            count: Some(2),
            ..RecurrenceRule::default()
        });
        let (from, to) = window((2024, 1, 1), (2024, 1, 31));

        for instance in expand_recurring_event(&master, from, to) {
            let start = instance.start.to_utc();
            assert_eq!((start.hour(), start.minute()), (9, 0));

            let end = instance.end.expect("instance should keep the end").to_utc();
            assert_eq!(end - start, Duration::hours(1));
        }
    }

    #[test]
    fn instance_ids_are_parent_plus_start_millis() {
        let master = weekly_master(RecurrenceRule {
            weekdays: vec![1],
            count: Some(1),
            ..RecurrenceRule::default()
        });
        let (from, to) = window((2024, 1, 1), (2024, 1, 31));

        let instances = expand_recurring_event(&master, from, to);
        assert_eq!(instances.len(), 1);

        let instance = &instances[0];
        assert_eq!(
            instance.id,
            format!("evt-1_{}", instance.start.timestamp_millis())
        );
        assert_eq!(instance.parent_event_id.as_deref(), Some("evt-1"));
        assert!(instance.is_recurring_instance);
        assert!(instance.recurring.is_none(), "instances do not recur themselves");
    }

    #[test]
    fn point_event_master_yields_point_instances() {
        let mut master = weekly_master(RecurrenceRule {
            weekdays: vec![1],
            count: Some(2),
            ..RecurrenceRule::default()
        });
        master.end = None;
        let (from, to) = window((2024, 1, 1), (2024, 1, 31));

        for instance in expand_recurring_event(&master, from, to) {
            assert!(instance.end.is_none());
        }
    }

    #[test]
    fn all_day_master_yields_all_day_instances() {
        let mut master = weekly_master(RecurrenceRule {
            weekdays: vec![1],
            count: Some(2),
            ..RecurrenceRule::default()
        });
        master.start = EventTime::Date(ymd(2024, 1, 1));
        master.end = Some(EventTime::Date(ymd(2024, 1, 2)));
        let (from, to) = window((2024, 1, 1), (2024, 1, 31));

        let instances = expand_recurring_event(&master, from, to);
        assert_eq!(
            instances
                .iter()
                .map(|e| (e.start.clone(), e.end.clone()))
                .collect::<Vec<_>>(),
            vec![
                (EventTime::Date(ymd(2024, 1, 1)), Some(EventTime::Date(ymd(2024, 1, 2)))),
                (EventTime::Date(ymd(2024, 1, 8)), Some(EventTime::Date(ymd(2024, 1, 9)))),
            ]
        );
    }

    // --- no-op inputs ---

    #[test]
    fn empty_weekday_set_produces_nothing() {
        let master = weekly_master(RecurrenceRule {
            weekdays: vec![],
            count: Some(10),
            ..RecurrenceRule::default()
        });
        let (from, to) = window((2024, 1, 1), (2024, 12, 31));

        assert!(expand_recurring_event(&master, from, to).is_empty());
    }

    #[test]
    fn non_recurring_master_produces_nothing() {
        let mut master = weekly_master(RecurrenceRule::default());
        master.recurring = None;
        let (from, to) = window((2024, 1, 1), (2024, 12, 31));

        assert!(expand_recurring_event(&master, from, to).is_empty());
    }

    // --- exceptions ---

    #[test]
    fn exception_date_suppresses_instance() {
        let master = weekly_master(RecurrenceRule {
            weekdays: vec![1, 3],
            count: Some(2),
            exceptions: vec![EventTime::Date(ymd(2024, 1, 3))],
            ..RecurrenceRule::default()
        });
        let (from, to) = window((2024, 1, 1), (2024, 1, 31));

        let instances = expand_recurring_event(&master, from, to);
        assert_eq!(
            dates_of(&instances),
            vec![ymd(2024, 1, 1), ymd(2024, 1, 8), ymd(2024, 1, 10)]
        );
    }

    #[test]
    fn timed_exception_matches_at_day_granularity() {
        let master = weekly_master(RecurrenceRule {
            weekdays: vec![1, 3],
            count: Some(2),
            exceptions: vec![EventTime::DateTime(
                Utc.with_ymd_and_hms(2024, 1, 3, 23, 59, 0).unwrap(),
            )],
            ..RecurrenceRule::default()
        });
        let (from, to) = window((2024, 1, 1), (2024, 1, 31));

        let instances = expand_recurring_event(&master, from, to);
        assert!(
            !dates_of(&instances).contains(&ymd(2024, 1, 3)),
            "an exception stored with a time-of-day still suppresses the whole day"
        );
    }

    // --- window and horizon bounds ---

    #[test]
    fn window_start_excludes_earlier_occurrences() {
        let master = weekly_master(RecurrenceRule {
            weekdays: vec![1, 3],
            count: Some(2),
            ..RecurrenceRule::default()
        });
        let (from, to) = window((2024, 1, 2), (2024, 1, 31));

        let instances = expand_recurring_event(&master, from, to);
        assert_eq!(
            dates_of(&instances),
            vec![ymd(2024, 1, 3), ymd(2024, 1, 8), ymd(2024, 1, 10)]
        );
    }

    #[test]
    fn rule_end_date_caps_the_horizon() {
        let master = weekly_master(RecurrenceRule {
            weekdays: vec![1],
            count: Some(12),
            end_date: Some(ymd(2024, 1, 9)),
            ..RecurrenceRule::default()
        });
        let (from, to) = window((2024, 1, 1), (2024, 3, 31));

        let instances = expand_recurring_event(&master, from, to);
        assert_eq!(dates_of(&instances), vec![ymd(2024, 1, 1), ymd(2024, 1, 8)]);
    }

    #[test]
    fn window_end_caps_the_horizon_when_rule_has_none() {
        let master = weekly_master(RecurrenceRule {
            weekdays: vec![1],
            count: Some(12),
            ..RecurrenceRule::default()
        });
        let (from, to) = window((2024, 1, 1), (2024, 1, 15));

        let instances = expand_recurring_event(&master, from, to);
        assert_eq!(
            dates_of(&instances),
            vec![ymd(2024, 1, 1), ymd(2024, 1, 8), ymd(2024, 1, 15)]
        );
    }

    // --- cycle cap and interval ---

    #[test]
    fn cycle_count_is_capped_at_fifty_two() {
        let master = weekly_master(RecurrenceRule {
            weekdays: vec![1],
            count: Some(100),
            ..RecurrenceRule::default()
        });
        let (from, to) = window((2024, 1, 1), (2025, 12, 31));

        let instances = expand_recurring_event(&master, from, to);
        assert_eq!(instances.len(), 52, "the hard ceiling wins over the rule's count");
    }

    #[test]
    fn count_defaults_to_twelve_cycles() {
        let master = weekly_master(RecurrenceRule {
            weekdays: vec![1],
            ..RecurrenceRule::default()
        });
        let (from, to) = window((2024, 1, 1), (2025, 12, 31));

        assert_eq!(expand_recurring_event(&master, from, to).len(), 12);
    }

    #[test]
    fn count_bounds_cycles_not_instances() {
        // One cycle with two matching weekdays yields two instances.
        let master = weekly_master(RecurrenceRule {
            weekdays: vec![1, 3],
            count: Some(1),
            ..RecurrenceRule::default()
        });
        let (from, to) = window((2024, 1, 1), (2024, 12, 31));

        assert_eq!(expand_recurring_event(&master, from, to).len(), 2);
    }

    #[test]
    fn interval_skips_whole_weeks() {
        let master = weekly_master(RecurrenceRule {
            weekdays: vec![1],
            interval: 2,
            count: Some(2),
            ..RecurrenceRule::default()
        });
        let (from, to) = window((2024, 1, 1), (2024, 2, 29));

        let instances = expand_recurring_event(&master, from, to);
        assert_eq!(dates_of(&instances), vec![ymd(2024, 1, 1), ymd(2024, 1, 15)]);
    }

    #[test]
    fn zero_interval_is_clamped_to_one() {
        let master = weekly_master(RecurrenceRule {
            weekdays: vec![1],
            interval: 0,
            count: Some(2),
            ..RecurrenceRule::default()
        });
        let (from, to) = window((2024, 1, 1), (2024, 1, 31));

        let instances = expand_recurring_event(&master, from, to);
        assert_eq!(dates_of(&instances), vec![ymd(2024, 1, 1), ymd(2024, 1, 8)]);
    }

    // --- determinism and ordering ---

    #[test]
    fn expansion_is_deterministic() {
        let master = weekly_master(RecurrenceRule {
            weekdays: vec![1, 3, 5],
            count: Some(4),
            exceptions: vec![EventTime::Date(ymd(2024, 1, 10))],
            ..RecurrenceRule::default()
        });
        let (from, to) = window((2024, 1, 1), (2024, 2, 29));

        let first = expand_recurring_event(&master, from, to);
        let second = expand_recurring_event(&master, from, to);
        assert_eq!(first, second);
    }

    #[test]
    fn output_is_chronological() {
        let master = weekly_master(RecurrenceRule {
            weekdays: vec![5, 1, 3],
            count: Some(3),
            ..RecurrenceRule::default()
        });
        let (from, to) = window((2024, 1, 1), (2024, 2, 29));

        let instances = expand_recurring_event(&master, from, to);
        let starts: Vec<_> = instances.iter().map(|e| e.start.to_utc()).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted, "unsorted weekday lists still expand in date order");
    }
}
