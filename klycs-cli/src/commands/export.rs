use std::path::Path;

use anyhow::Result;
use klycs_core::card::Card;
use klycs_core::date_range::DateRange;
use klycs_core::ics::{CardMetadata, generate_calendar_ics};
use owo_colors::OwoColorize;

pub fn run(card: &Card, range: &DateRange, output: &Path) -> Result<()> {
    let events = card.events_in_range(range)?;

    if events.is_empty() {
        println!("{}", "No events in range, writing an empty calendar".dimmed());
    }

    let metadata = CardMetadata {
        card_slug: card.slug.clone(),
        card_title: card.display_title().to_string(),
    };

    let ics = generate_calendar_ics(&events, &metadata)?;
    std::fs::write(output, ics)?;

    println!(
        "{}",
        format!("Exported {} events to {}", events.len(), output.display()).green()
    );

    Ok(())
}
