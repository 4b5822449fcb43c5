use anyhow::Result;
use klycs_core::card::Card;
use klycs_core::date_range::DateRange;
use klycs_core::event::{Event, EventTime};
use owo_colors::OwoColorize;

pub fn run(cards: Vec<Card>, range: DateRange) -> Result<()> {
    let mut all_events: Vec<(String, Event)> = Vec::new();

    for card in &cards {
        let events = card.events_in_range(&range)?;
        for event in events {
            all_events.push((card.slug.clone(), event));
        }
    }

    // Sort by start time across cards
    all_events.sort_by_key(|(_, event)| event.start.to_utc());

    if all_events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    // Group events by day and print
    let mut current_date: Option<String> = None;

    for (card_slug, event) in &all_events {
        let date_label = format_date_label(&event.start);

        if current_date.as_ref() != Some(&date_label) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", date_label.bold());
            current_date = Some(date_label);
        }

        let time = format_time(&event.start);
        let card_tag = format!("[{}]", card_slug);
        let repeat_mark = if event.is_recurring_instance { " ↻" } else { "" };
        println!(
            "  {} {}{} {}",
            time,
            event.title,
            repeat_mark.dimmed(),
            card_tag.dimmed()
        );
    }

    Ok(())
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_date_label(time: &EventTime) -> String {
    let today = chrono::Local::now().date_naive();

    let date = match time {
        EventTime::Date(d) => *d,
        EventTime::DateTime(dt) => dt.with_timezone(&chrono::Local).date_naive(),
    };

    let diff = (date - today).num_days();
    match diff {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

/// Format the time portion of an event (e.g. "15:00" or "all-day")
fn format_time(time: &EventTime) -> String {
    match time {
        EventTime::Date(_) => "all-day".to_string(),
        EventTime::DateTime(dt) => {
            format!("{:>7}", dt.with_timezone(&chrono::Local).format("%H:%M"))
        }
    }
}
