mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use flashdeck_lib::identity::UserId;

#[derive(Parser)]
#[command(name = "flashdeck-cli", about = "Manage flashcard decks from the terminal", version)]
struct Cli {
    /// Act as this user
    #[arg(long, global = true, env = "FLASHDECK_USER")]
    user: Option<String>,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use this database file instead of the configured one
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List your decks
    Decks,

    /// Create, show, edit or delete a deck
    #[command(subcommand)]
    Deck(DeckCommand),

    /// Flashcards within a deck
    #[command(subcommand)]
    Cards(CardCommand),

    /// Study session history
    #[command(subcommand)]
    Sessions(SessionCommand),

    /// Ask a British history question
    Ask {
        /// The question, e.g. "When was Churchill born?"
        question: String,
    },

    /// Translate text between two supported languages
    Translate {
        /// Text to translate
        text: String,
        /// Source language code
        #[arg(long, default_value = "en")]
        from: String,
        /// Target language code
        #[arg(long)]
        to: String,
    },

    /// List supported translation languages
    Languages,
}

#[derive(Subcommand)]
enum DeckCommand {
    /// Show a deck
    Show { id: String },
    /// Create a deck
    Create {
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change a deck's title and description
    Update {
        id: String,
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a deck and all of its cards
    Delete { id: String },
    /// Rebuild the card count from the deck's cards
    Recount { id: String },
}

#[derive(Subcommand)]
enum CardCommand {
    /// List the cards in a deck
    List { deck: String },
    /// Add a card to a deck
    Add { deck: String, front: String, back: String },
    /// Replace a card's front and back
    Edit { id: String, front: String, back: String },
    /// Delete a card
    Rm { id: String },
}

#[derive(Subcommand)]
enum SessionCommand {
    /// List sessions for a deck, newest first
    List { deck: String },
    /// Record a finished study session
    Record { deck: String, score: i64, total: i64 },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let format = &cli.format;

    let open_app = || app::App::new(cli.config.as_deref(), cli.db.clone(), cli.user.as_deref());

    match cli.command {
        Command::Decks => commands::decks::run_list(&open_app()?, format, use_color)?,
        Command::Deck(DeckCommand::Show { id }) => commands::decks::run_show(&open_app()?, &id, format, use_color)?,
        Command::Deck(DeckCommand::Create { title, description }) => {
            commands::decks::run_create(&open_app()?, title, description, format)?
        }
        Command::Deck(DeckCommand::Update { id, title, description }) => {
            commands::decks::run_update(&open_app()?, &id, title, description, format)?
        }
        Command::Deck(DeckCommand::Delete { id }) => commands::decks::run_delete(&open_app()?, &id, format)?,
        Command::Deck(DeckCommand::Recount { id }) => commands::decks::run_recount(&open_app()?, &id, format)?,
        Command::Cards(CardCommand::List { deck }) => {
            commands::cards::run_list(&open_app()?, &deck, format, use_color)?
        }
        Command::Cards(CardCommand::Add { deck, front, back }) => {
            commands::cards::run_add(&open_app()?, &deck, front, back, format)?
        }
        Command::Cards(CardCommand::Edit { id, front, back }) => {
            commands::cards::run_edit(&open_app()?, &id, front, back, format)?
        }
        Command::Cards(CardCommand::Rm { id }) => commands::cards::run_rm(&open_app()?, &id, format)?,
        Command::Sessions(SessionCommand::List { deck }) => {
            commands::sessions::run_list(&open_app()?, &deck, format, use_color)?
        }
        Command::Sessions(SessionCommand::Record { deck, score, total }) => {
            commands::sessions::run_record(&open_app()?, &deck, score, total, format)?
        }
        Command::Ask { question } => {
            // Answers come from the built-in table; no database needed
            let user = cli.user.as_deref().and_then(UserId::parse);
            commands::ask::run(user.as_ref(), &question, format, use_color)?
        }
        Command::Translate { text, from, to } => {
            commands::translate::run_translate(&open_app()?, text, from, to, format)?
        }
        Command::Languages => commands::translate::run_languages(format, use_color)?,
    }

    Ok(())
}
