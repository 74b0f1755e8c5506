use anyhow::Result;

use flashdeck_lib::commands;
use flashdeck_lib::flashcards::FlashcardInput;

use crate::app::App;
use crate::render::terminal::card_lines;
use crate::OutputFormat;

pub fn run_list(app: &App, deck_id: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let cards = commands::list_flashcards(&app.state, app.user(), deck_id)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cards)?),
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("(no cards)");
            }
            for (i, card) in cards.iter().enumerate() {
                println!("{}", card_lines(i, card, use_color));
            }
        }
    }
    Ok(())
}

pub fn run_add(app: &App, deck_id: &str, front: String, back: String, format: &OutputFormat) -> Result<()> {
    let card = commands::create_flashcard(&app.state, app.user(), deck_id, FlashcardInput { front, back })?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&card)?),
        OutputFormat::Plain => {
            println!("Added card \"{}\"", card.front);
            println!("  ID: {}", card.id);
        }
    }
    Ok(())
}

pub fn run_edit(app: &App, card_id: &str, front: String, back: String, format: &OutputFormat) -> Result<()> {
    let card = commands::update_flashcard(&app.state, app.user(), card_id, FlashcardInput { front, back })?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&card)?),
        OutputFormat::Plain => println!("Updated card \"{}\"", card.front),
    }
    Ok(())
}

pub fn run_rm(app: &App, card_id: &str, format: &OutputFormat) -> Result<()> {
    commands::delete_flashcard(&app.state, app.user(), card_id)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "deleted": card_id })),
        OutputFormat::Plain => println!("Deleted card {}", card_id),
    }
    Ok(())
}
