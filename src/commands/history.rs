use serde::{Deserialize, Serialize};

use crate::flashcards::validation::Validator;
use crate::history::knowledge::Facts;
use crate::history::{self, HistoryServiceInfo, Intent};
use crate::identity::UserId;

use super::{CommandError, CommandResult, ErrorKind};

pub const QUESTION_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryQuestion {
    pub question: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryAnswer {
    pub answer: String,
    pub question: String,
    pub intent: Intent,
    pub service: &'static str,
    pub confidence: &'static str,
    pub message: &'static str,
    /// Everything the table knows about the matched figure or event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facts: Option<&'static Facts>,
}

/// Answer a British history question from the built-in table
pub fn ask_history(user: Option<&UserId>, input: HistoryQuestion) -> CommandResult<HistoryAnswer> {
    let Some(user) = user else {
        return Err(CommandError::new(ErrorKind::Unauthenticated, "Authentication required"));
    };

    let mut v = Validator::new();
    let question = v.required("question", "Question", &input.question, QUESTION_MAX_CHARS);
    let question = v.finish(question)?;

    log::debug!("History question from {}: {}", user, question);
    let answer = history::resolve(&question)?;

    Ok(HistoryAnswer {
        answer: answer.text,
        question,
        intent: answer.intent,
        service: history::SERVICE_NAME,
        confidence: "high",
        message: "Answer generated from curated British History database",
        facts: answer.facts,
    })
}

pub fn history_info() -> HistoryServiceInfo {
    history::service_info()
}
