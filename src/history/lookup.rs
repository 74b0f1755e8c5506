//! Resolve a question against the knowledge table
//!
//! 1. Normalize and classify the question.
//! 2. Take the first table entry whose key or alias group appears in the question.
//! 3. Answer from the entry's facts, walking the intent's fallback chain.
//! 4. With no entry, try the keyword rules; otherwise fail with `NoAnswerFound`.

use serde::Serialize;
use thiserror::Error;

use super::classifier::{classify_normalized, normalize, Intent};
use super::knowledge::{find_entry, Fact, Facts};

pub const NO_ANSWER_HINT: &str = "I couldn't find an answer for that question. Try asking 'Who was...?', 'When was... born?', 'What did... do?', or 'Where was... born?'";

pub const SUGGESTIONS: &[&str] = &[
    "Try questions about famous battles (e.g., Waterloo, Hastings)",
    "Ask about monarchs (e.g., Henry VIII, Elizabeth I)",
    "Questions about historical events (e.g., Great Fire of London)",
    "Prime Ministers (e.g., Churchill, Thatcher)",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("{hint}")]
    NoAnswerFound {
        hint: String,
        suggestions: Vec<String>,
    },
}

impl LookupError {
    fn no_answer() -> Self {
        LookupError::NoAnswerFound {
            hint: NO_ANSWER_HINT.to_string(),
            suggestions: SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Where an answer came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "name", rename_all = "camelCase")]
pub enum AnswerSource {
    /// A knowledge table entry, by key
    Entry(&'static str),
    /// A keyword rule applied after the table found nothing
    KeywordRule(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub text: String,
    pub intent: Intent,
    pub source: AnswerSource,
    /// Record of the matched table entry; keyword rules have none
    pub facts: Option<&'static Facts>,
}

/// Ordered fact slots tried for an intent, then the text used when all are empty
struct FallbackChain {
    facts: &'static [Fact],
    placeholder: &'static str,
}

fn fallback_chain(intent: Intent) -> FallbackChain {
    let (facts, placeholder): (&'static [Fact], &'static str) = match intent {
        Intent::WhenBorn => (&[Fact::WhenBorn], "Birth date not available"),
        Intent::WhenDied => (&[Fact::WhenDied], "Death date not available"),
        Intent::WhereBorn => (&[Fact::WhereBorn], "Birthplace not available"),
        Intent::FamousFor => (&[Fact::FamousFor, Fact::What], "Information not available"),
        Intent::Who => (&[Fact::Who, Fact::WhoWon, Fact::What], "Information not available"),
        Intent::What => (&[Fact::What, Fact::FamousFor], "Information not available"),
        Intent::When => (&[Fact::When, Fact::WhenBorn], "Date not available"),
        Intent::Where => (&[Fact::Where, Fact::WhereBorn], "Location not available"),
    };
    FallbackChain { facts, placeholder }
}

/// Pick the answer text for an intent from a fact record
pub fn render_answer(facts: &Facts, intent: Intent) -> &'static str {
    let chain = fallback_chain(intent);
    chain
        .facts
        .iter()
        .find_map(|fact| facts.get(*fact))
        .unwrap_or(chain.placeholder)
}

/// Compound keyword rule consulted only when no table entry matched
struct KeywordRule {
    name: &'static str,
    keywords: &'static [&'static str],
    answers: &'static [(Intent, &'static str)],
}

const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        name: "waterloo-napoleon",
        keywords: &["waterloo", "napoleon"],
        answers: &[
            (Intent::Who, "Duke of Wellington"),
            (Intent::When, "18 June 1815"),
            (Intent::Where, "Waterloo, Belgium"),
        ],
    },
    KeywordRule {
        name: "hastings",
        keywords: &["hastings"],
        answers: &[
            (Intent::Who, "William the Conqueror"),
            (Intent::When, "14 October 1066"),
            (Intent::Where, "Hastings, East Sussex"),
        ],
    },
];

fn apply_keyword_rules(question: &str, intent: Intent) -> Option<Answer> {
    KEYWORD_RULES
        .iter()
        .filter(|rule| rule.keywords.iter().all(|k| question.contains(k)))
        .find_map(|rule| {
            rule.answers
                .iter()
                .find(|(answer_intent, _)| *answer_intent == intent)
                .map(|(_, text)| Answer {
                    text: text.to_string(),
                    intent,
                    source: AnswerSource::KeywordRule(rule.name),
                    facts: None,
                })
        })
}

/// Answer a free-form question
pub fn resolve(question: &str) -> Result<Answer, LookupError> {
    let normalized = normalize(question);
    let intent = classify_normalized(&normalized);

    if let Some(entry) = find_entry(&normalized) {
        log::debug!("Question matched '{}' as {}", entry.key, intent.as_str());
        return Ok(Answer {
            text: render_answer(&entry.facts, intent).to_string(),
            intent,
            source: AnswerSource::Entry(entry.key),
            facts: Some(&entry.facts),
        });
    }

    apply_keyword_rules(&normalized, intent).ok_or_else(LookupError::no_answer)
}
