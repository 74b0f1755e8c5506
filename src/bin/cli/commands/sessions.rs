use anyhow::Result;

use flashdeck_lib::commands;
use flashdeck_lib::flashcards::StudySessionInput;

use crate::app::App;
use crate::render::terminal::session_line;
use crate::OutputFormat;

pub fn run_list(app: &App, deck_id: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let sessions = commands::list_study_sessions(&app.state, app.user(), deck_id)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sessions)?),
        OutputFormat::Plain => {
            if sessions.is_empty() {
                println!("(no sessions)");
            }
            for session in &sessions {
                println!("{}", session_line(session, use_color));
            }
        }
    }
    Ok(())
}

pub fn run_record(app: &App, deck_id: &str, score: i64, total_cards: i64, format: &OutputFormat) -> Result<()> {
    let session = commands::record_study_session(
        &app.state,
        app.user(),
        deck_id,
        StudySessionInput { score, total_cards },
    )?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&session)?),
        OutputFormat::Plain => println!("Recorded {}/{}", session.score, session.total_cards),
    }
    Ok(())
}
