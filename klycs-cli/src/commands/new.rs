use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use klycs_core::card::Card;
use klycs_core::event::{Event, EventTime};
use klycs_core::recurrence::RecurrenceRule;
use owo_colors::OwoColorize;

pub struct NewEventArgs {
    pub title: String,
    pub start: String,
    pub end: Option<String>,
    pub duration: Option<String>,
    pub location: Option<String>,
    pub repeat: Option<String>,
    pub every: Option<u32>,
    pub weeks: Option<u32>,
    pub until: Option<String>,
}

pub fn run(card: Card, args: NewEventArgs) -> Result<()> {
    let start_time = parse_cli_datetime(&args.start)?;

    let end_time = if let Some(ref end) = args.end {
        Some(parse_cli_datetime(end)?)
    } else if let Some(ref dur) = args.duration {
        Some(apply_duration(&start_time, dur)?)
    } else {
        None
    };

    let mut event = Event::new(
        args.title,
        start_time,
        end_time,
        None,
        args.location.filter(|l| !l.is_empty()),
    );

    if let Some(ref repeat) = args.repeat {
        event.recurring = Some(build_rule(repeat, args.every, args.weeks, args.until.as_deref())?);
    }

    card.create_event(&event)?;

    let label = if event.is_recurring() {
        format!("Created recurring event: {}", event.title)
    } else {
        format!("Created: {}", event.title)
    };
    println!("{}", label.green());

    Ok(())
}

/// Parse a CLI date/time string into an EventTime.
/// Accepts "YYYY-MM-DDTHH:MM", "YYYY-MM-DD HH:MM", or "YYYY-MM-DD" (all-day).
fn parse_cli_datetime(input: &str) -> Result<EventTime> {
    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(EventTime::DateTime(dt.and_utc()));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(EventTime::Date(date));
    }

    anyhow::bail!(
        "Could not parse date/time '{}'. Expected YYYY-MM-DD or YYYY-MM-DDTHH:MM",
        input
    )
}

/// Apply a duration string (e.g. "45m", "2h") to a start time.
fn apply_duration(start: &EventTime, dur_input: &str) -> Result<EventTime> {
    let std_dur = humantime::parse_duration(dur_input)
        .map_err(|e| anyhow::anyhow!("Could not parse duration '{}': {}", dur_input, e))?;
    let chrono_dur = Duration::from_std(std_dur).context("Duration too large")?;

    match start {
        EventTime::DateTime(dt) => Ok(EventTime::DateTime(*dt + chrono_dur)),
        EventTime::Date(d) => {
            let days = chrono_dur.num_days().max(1);
            Ok(EventTime::Date(*d + Duration::days(days)))
        }
    }
}

/// Build a recurrence rule from the --repeat/--every/--weeks/--until flags.
fn build_rule(
    repeat: &str,
    every: Option<u32>,
    weeks: Option<u32>,
    until: Option<&str>,
) -> Result<RecurrenceRule> {
    let weekdays = parse_weekdays(repeat)?;

    let end_date = until
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| anyhow::anyhow!("Invalid --until date '{}'. Expected YYYY-MM-DD", s))
        })
        .transpose()?;

    Ok(RecurrenceRule {
        weekdays,
        interval: every.unwrap_or(1).max(1),
        count: weeks,
        end_date,
        exceptions: Vec::new(),
    })
}

/// Parse a comma-separated weekday list ("mon,wed,fri") into indices
/// (0 = Sunday .. 6 = Saturday).
fn parse_weekdays(input: &str) -> Result<Vec<u8>> {
    let mut weekdays = Vec::new();

    for name in input.split(',') {
        let index = match name.trim().to_lowercase().as_str() {
            "sun" | "sunday" => 0,
            "mon" | "monday" => 1,
            "tue" | "tues" | "tuesday" => 2,
            "wed" | "wednesday" => 3,
            "thu" | "thur" | "thurs" | "thursday" => 4,
            "fri" | "friday" => 5,
            "sat" | "saturday" => 6,
            other => anyhow::bail!("Unknown weekday '{}'", other),
        };
        if !weekdays.contains(&index) {
            weekdays.push(index);
        }
    }

    if weekdays.is_empty() {
        anyhow::bail!("--repeat needs at least one weekday (e.g. \"mon,wed\")");
    }

    Ok(weekdays)
}
