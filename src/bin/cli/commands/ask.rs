use anyhow::Result;

use flashdeck_lib::commands::{self, ErrorKind, HistoryQuestion};
use flashdeck_lib::identity::UserId;

use crate::render::terminal::{error_line, paint, Color};
use crate::OutputFormat;

pub fn run(user: Option<&UserId>, question: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let result = commands::ask_history(
        user,
        HistoryQuestion {
            question: question.to_string(),
        },
    );

    // Print the suggestions before failing so the user knows what to ask instead
    let answer = match result {
        Ok(answer) => answer,
        Err(err) if err.kind == ErrorKind::NoAnswerFound && matches!(format, OutputFormat::Plain) => {
            eprintln!("{}", error_line(&err.message, use_color));
            if let Some(suggestions) = err.details.as_ref().and_then(|d| d["suggestions"].as_array()) {
                for suggestion in suggestions.iter().filter_map(|s| s.as_str()) {
                    eprintln!("  - {}", suggestion);
                }
            }
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&answer)?),
        OutputFormat::Plain => {
            println!("{}", paint(&answer.answer, Color::BOLD, use_color));
            println!("{}", paint(&format!("({})", answer.intent.as_str()), Color::GRAY, use_color));
        }
    }
    Ok(())
}
