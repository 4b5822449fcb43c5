use anyhow::Result;
use klycs_core::card::Card;
use owo_colors::OwoColorize;

pub fn run(cards: &[Card], event_id: &str) -> Result<()> {
    for card in cards {
        if card.delete_event(event_id)? {
            println!("{}", format!("Deleted {} from {}", event_id, card).green());
            return Ok(());
        }
    }

    anyhow::bail!("Event '{}' not found", event_id)
}
