use anyhow::Result;
use klycs_core::card::Card;
use klycs_core::klycs::Klycs;
use owo_colors::OwoColorize;

pub fn run(slug: &str, title: Option<String>) -> Result<()> {
    let card = Card::create(slug, title)?;

    println!(
        "{}",
        format!("Created card '{}' at {}", card.slug, card.data_dir()?.display()).green()
    );

    let mut klycs = Klycs::load()?;
    if klycs.set_default_card_if_unset(&card.slug)? {
        println!("{}", format!("'{}' is now your default card", card.slug).dimmed());
    }

    Ok(())
}
