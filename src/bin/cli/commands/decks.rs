use anyhow::Result;

use flashdeck_lib::commands;
use flashdeck_lib::flashcards::DeckInput;

use crate::app::App;
use crate::render::terminal::{deck_details, deck_line};
use crate::OutputFormat;

pub fn run_list(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let decks = commands::list_decks(&app.state, app.user())?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&decks)?),
        OutputFormat::Plain => {
            if decks.is_empty() {
                println!("(no decks)");
            }
            for deck in &decks {
                println!("{}", deck_line(deck, use_color));
            }
        }
    }
    Ok(())
}

pub fn run_show(app: &App, id: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let deck = commands::get_deck(&app.state, app.user(), id)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&deck)?),
        OutputFormat::Plain => println!("{}", deck_details(&deck, use_color)),
    }
    Ok(())
}

pub fn run_create(app: &App, title: String, description: Option<String>, format: &OutputFormat) -> Result<()> {
    let deck = commands::create_deck(&app.state, app.user(), DeckInput { title, description })?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&deck)?),
        OutputFormat::Plain => {
            println!("Created deck \"{}\"", deck.title);
            println!("  ID: {}", deck.id);
        }
    }
    Ok(())
}

pub fn run_update(
    app: &App,
    id: &str,
    title: String,
    description: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let deck = commands::update_deck(&app.state, app.user(), id, DeckInput { title, description })?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&deck)?),
        OutputFormat::Plain => println!("Updated deck \"{}\"", deck.title),
    }
    Ok(())
}

pub fn run_delete(app: &App, id: &str, format: &OutputFormat) -> Result<()> {
    commands::delete_deck(&app.state, app.user(), id)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "deleted": id })),
        OutputFormat::Plain => println!("Deleted deck {}", id),
    }
    Ok(())
}

pub fn run_recount(app: &App, id: &str, format: &OutputFormat) -> Result<()> {
    let count = commands::recount_deck(&app.state, app.user(), id)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "id": id, "cardCount": count })),
        OutputFormat::Plain => println!("Deck {} has {} cards", id, count),
    }
    Ok(())
}
