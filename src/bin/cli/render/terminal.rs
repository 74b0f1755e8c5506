use chrono::{DateTime, Local, Utc};

use flashdeck_lib::flashcards::{Deck, Flashcard, StudySession};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

pub fn local_time(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

pub fn deck_line(deck: &Deck, use_color: bool) -> String {
    format!(
        "{}  {}  {}",
        paint(&deck.title, Color::BOLD, use_color),
        paint(&plural(deck.card_count, "card"), Color::CYAN, use_color),
        paint(&deck.id.to_string(), Color::GRAY, use_color),
    )
}

pub fn deck_details(deck: &Deck, use_color: bool) -> String {
    let mut lines = vec![paint(&deck.title, Color::BOLD, use_color)];
    if let Some(description) = &deck.description {
        lines.push(format!("  {}", description));
    }
    lines.push(format!("  Cards:   {}", deck.card_count));
    lines.push(format!("  Created: {}", local_time(&deck.created_at)));
    lines.push(format!("  Updated: {}", local_time(&deck.updated_at)));
    lines.push(paint(&format!("  ID: {}", deck.id), Color::GRAY, use_color));
    lines.join("\n")
}

pub fn card_lines(index: usize, card: &Flashcard, use_color: bool) -> String {
    format!(
        "{:>3}. {}\n     {} {}\n     {}",
        index + 1,
        paint(&card.front, Color::BOLD, use_color),
        paint("->", Color::DIM, use_color),
        card.back,
        paint(&card.id.to_string(), Color::GRAY, use_color),
    )
}

pub fn session_line(session: &StudySession, use_color: bool) -> String {
    let color = if session.total_cards > 0 && session.score == session.total_cards {
        Color::GREEN
    } else {
        Color::YELLOW
    };
    format!(
        "{}  {}",
        local_time(&session.completed_at),
        paint(&format!("{}/{}", session.score, session.total_cards), color, use_color),
    )
}

pub fn error_line(message: &str, use_color: bool) -> String {
    paint(message, Color::RED, use_color)
}
