//! Question intent detection
//!
//! Rules are checked in order and the first match wins. Compound rules
//! ("when" + "born") come before the single question-word rules, and `Who` is the
//! fallback when nothing matches.

use serde::{Deserialize, Serialize};

/// What the question is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    WhenBorn,
    WhenDied,
    WhereBorn,
    FamousFor,
    When,
    Where,
    What,
    Who,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::WhenBorn => "when_born",
            Intent::WhenDied => "when_died",
            Intent::WhereBorn => "where_born",
            Intent::FamousFor => "famous_for",
            Intent::When => "when",
            Intent::Where => "where",
            Intent::What => "what",
            Intent::Who => "who",
        }
    }
}

struct IntentRule {
    intent: Intent,
    test: fn(&str) -> bool,
}

/// Precedence order
const RULES: &[IntentRule] = &[
    IntentRule { intent: Intent::WhenBorn, test: asks_when_born },
    IntentRule { intent: Intent::WhenDied, test: asks_when_died },
    IntentRule { intent: Intent::WhereBorn, test: asks_where_born },
    IntentRule { intent: Intent::FamousFor, test: asks_famous_for },
    IntentRule { intent: Intent::When, test: asks_when },
    IntentRule { intent: Intent::Where, test: asks_where },
    IntentRule { intent: Intent::What, test: asks_what },
    // "why" questions are answered with what the subject is famous for
    IntentRule { intent: Intent::FamousFor, test: asks_why },
    IntentRule { intent: Intent::Who, test: asks_who },
];

/// Lowercase and trim a question before matching
pub fn normalize(question: &str) -> String {
    question.trim().to_lowercase()
}

/// Classify a raw question
pub fn classify(question: &str) -> Intent {
    classify_normalized(&normalize(question))
}

/// Classify a question that has already gone through [`normalize`]
pub fn classify_normalized(question: &str) -> Intent {
    RULES
        .iter()
        .find(|rule| (rule.test)(question))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Who)
}

fn has_word(question: &str, word: &str) -> bool {
    question
        .split(|c: char| !c.is_alphanumeric())
        .any(|token| token == word)
}

fn mentions_birth(q: &str) -> bool {
    q.contains("born") || q.contains("birth")
}

fn mentions_death(q: &str) -> bool {
    q.contains("died") || q.contains("death") || has_word(q, "die")
}

fn question_word(q: &str, word: &str, phrases: &[&str]) -> bool {
    q.starts_with(&format!("{} ", word)) || phrases.iter().any(|p| q.contains(p))
}

fn asks_when_born(q: &str) -> bool {
    q.contains("when") && mentions_birth(q)
}

fn asks_when_died(q: &str) -> bool {
    q.contains("when") && mentions_death(q)
}

fn asks_where_born(q: &str) -> bool {
    q.contains("where") && mentions_birth(q)
}

fn asks_famous_for(q: &str) -> bool {
    q.contains("famous for") || q.contains("known for")
}

fn asks_when(q: &str) -> bool {
    question_word(q, "when", &["when was", "when did"])
}

fn asks_where(q: &str) -> bool {
    question_word(q, "where", &["where was", "where did"])
}

fn asks_what(q: &str) -> bool {
    question_word(q, "what", &["what was", "what did"])
}

fn asks_why(q: &str) -> bool {
    question_word(q, "why", &["why was", "why did"])
}

fn asks_who(q: &str) -> bool {
    question_word(q, "who", &["who was", "who is"])
}
