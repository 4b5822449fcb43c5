mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use klycs_core::card::Card;
use klycs_core::date_range::DateRange;
use klycs_core::klycs::Klycs;

#[derive(Parser)]
#[command(name = "klycs")]
#[command(about = "Manage your klycs card calendars from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a card directory
    Init {
        /// Directory name for the card (e.g. "acme-design")
        slug: String,

        /// Display title for the card
        #[arg(long)]
        title: Option<String>,
    },
    /// Show events, with recurring events expanded
    Agenda {
        /// Only operate on this card (by slug)
        #[arg(short, long)]
        card: Option<String>,

        /// Show events from this date (YYYY-MM-DD, or "start" for all past events)
        #[arg(long)]
        from: Option<String>,

        /// Show events until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Create an event
    New {
        title: String,

        /// Start date/time (e.g. "2025-03-20T15:00" or "2025-03-20" for all-day)
        #[arg(short, long)]
        start: String,

        /// End date/time (same formats as --start)
        #[arg(long)]
        end: Option<String>,

        /// Duration from start (e.g. "45m", "2h")
        #[arg(short, long)]
        duration: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        /// Repeat weekly on these weekdays (e.g. "mon,wed,fri")
        #[arg(short, long)]
        repeat: Option<String>,

        /// Weeks between repetitions (with --repeat)
        #[arg(long)]
        every: Option<u32>,

        /// Number of weekly cycles to generate (with --repeat)
        #[arg(long)]
        weeks: Option<u32>,

        /// Last date to repeat on (YYYY-MM-DD, with --repeat)
        #[arg(long)]
        until: Option<String>,

        /// Card to create the event in (by slug)
        #[arg(short, long)]
        card: Option<String>,
    },
    /// Export events to an .ics file, with recurring events expanded
    Export {
        /// Only operate on this card (by slug)
        #[arg(short, long)]
        card: Option<String>,

        /// Export events from this date (YYYY-MM-DD, or "start" for all past events)
        #[arg(long)]
        from: Option<String>,

        /// Export events until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Output .ics file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Delete an event by id
    Delete {
        event_id: String,

        /// Only operate on this card (by slug)
        #[arg(short, long)]
        card: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { slug, title } => commands::init::run(&slug, title),
        Commands::Agenda { card, from, to } => {
            require_cards()?;
            let cards = resolve_cards(card.as_deref())?;
            let range = DateRange::from_args(from.as_deref(), to.as_deref())
                .map_err(|e| anyhow::anyhow!(e))?;
            commands::agenda::run(cards, range)
        }
        Commands::New {
            title,
            start,
            end,
            duration,
            location,
            repeat,
            every,
            weeks,
            until,
            card,
        } => {
            require_cards()?;
            let card = resolve_card(card.as_deref())?;
            commands::new::run(
                card,
                commands::new::NewEventArgs {
                    title,
                    start,
                    end,
                    duration,
                    location,
                    repeat,
                    every,
                    weeks,
                    until,
                },
            )
        }
        Commands::Export {
            card,
            from,
            to,
            output,
        } => {
            require_cards()?;
            let card = resolve_card(card.as_deref())?;
            let range = DateRange::from_args(from.as_deref(), to.as_deref())
                .map_err(|e| anyhow::anyhow!(e))?;
            commands::export::run(&card, &range, &output)
        }
        Commands::Delete { event_id, card } => {
            require_cards()?;
            let cards = resolve_cards(card.as_deref())?;
            commands::delete::run(&cards, &event_id)
        }
    }
}

fn require_cards() -> Result<()> {
    let klycs = Klycs::load()?;

    if klycs.cards().is_empty() {
        anyhow::bail!(
            "No cards found in {}.\nRun `klycs init <slug>` to create one.",
            klycs.display_path().display()
        );
    }

    Ok(())
}

/// All cards, or just the named one.
fn resolve_cards(slug: Option<&str>) -> Result<Vec<Card>> {
    let klycs = Klycs::load()?;
    let cards = klycs.cards();

    match slug {
        Some(slug) => {
            let card = cards.iter().find(|c| c.slug == slug).cloned();
            match card {
                Some(card) => Ok(vec![card]),
                None => {
                    let available: Vec<_> = cards.iter().map(|c| c.slug.as_str()).collect();
                    anyhow::bail!("Card '{}' not found. Available: {}", slug, available.join(", "))
                }
            }
        }
        None => Ok(cards),
    }
}

/// A single target card: the named one, else the default, else the only one.
fn resolve_card(slug: Option<&str>) -> Result<Card> {
    let klycs = Klycs::load()?;
    let cards = klycs.cards();

    if let Some(slug) = slug {
        return cards.into_iter().find(|c| c.slug == slug).ok_or_else(|| {
            anyhow::anyhow!("Card '{}' not found. Use `klycs init {}` to create it.", slug, slug)
        });
    }

    if let [card] = cards.as_slice() {
        return Ok(card.clone());
    }

    if let Some(default) = klycs.default_card() {
        return Ok(default);
    }

    let available: Vec<_> = cards.iter().map(|c| c.slug.as_str()).collect();
    anyhow::bail!(
        "Multiple cards found ({}). Use --card to specify one.",
        available.join(", ")
    )
}
