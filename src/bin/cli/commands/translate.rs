use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use flashdeck_lib::commands;
use flashdeck_lib::translate::{supported_languages, TranslationRequest};

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run_translate(app: &App, text: String, from: String, to: String, format: &OutputFormat) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let request = TranslationRequest::new(text, from, to);
    let cancel = CancellationToken::new();
    let watcher = cancel.clone();
    let translation = runtime.block_on(async {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                watcher.cancel();
            }
        });
        commands::translate_text(&app.state, app.user(), request, &cancel).await
    })?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&translation)?),
        OutputFormat::Plain => println!("{}", translation.translation),
    }
    Ok(())
}

pub fn run_languages(format: &OutputFormat, use_color: bool) -> Result<()> {
    let languages = supported_languages();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&languages)?),
        OutputFormat::Plain => {
            for lang in &languages {
                println!("{}  {}", paint(lang.code, Color::CYAN, use_color), lang.name);
            }
        }
    }
    Ok(())
}
