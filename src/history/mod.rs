//! British history question answering
//!
//! Questions are classified by intent (who/what/when/where, born/died) and
//! answered from a built-in table of figures and events. Lookups are pure and
//! synchronous; there is no network or database access here.

pub mod classifier;
pub mod knowledge;
pub mod lookup;

use serde::Serialize;

pub use classifier::{classify, Intent};
pub use lookup::{resolve, Answer, AnswerSource, LookupError};

pub const SERVICE_NAME: &str = "British History Knowledge Base";

const EXAMPLE_QUESTIONS: &[&str] = &[
    "When was Churchill born?",
    "Where was Shakespeare born?",
    "What was Darwin famous for?",
    "Who defeated Napoleon at Waterloo?",
    "When did the Battle of Hastings happen?",
    "Who was the Iron Lady?",
];

const INTENTS: &[Intent] = &[
    Intent::Who,
    Intent::What,
    Intent::When,
    Intent::Where,
    Intent::WhenBorn,
    Intent::WhenDied,
    Intent::WhereBorn,
    Intent::FamousFor,
];

/// Description of what the lookup can answer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryServiceInfo {
    pub service: &'static str,
    pub supported_figures: Vec<&'static str>,
    pub supported_events: Vec<&'static str>,
    pub intents: Vec<Intent>,
    pub examples: Vec<&'static str>,
    pub status: &'static str,
}

pub fn service_info() -> HistoryServiceInfo {
    let (figures, events): (Vec<_>, Vec<_>) =
        knowledge::knowledge_base().iter().partition(|entry| entry.is_person());

    let display_name = |entry: &&knowledge::KnowledgeEntry| {
        entry
            .facts
            .get(knowledge::Fact::Who)
            .or_else(|| entry.facts.get(knowledge::Fact::What))
            .unwrap_or(entry.key)
    };

    HistoryServiceInfo {
        service: SERVICE_NAME,
        supported_figures: figures.iter().map(display_name).collect(),
        supported_events: events.iter().map(display_name).collect(),
        intents: INTENTS.to_vec(),
        examples: EXAMPLE_QUESTIONS.to_vec(),
        status: "active",
    }
}
