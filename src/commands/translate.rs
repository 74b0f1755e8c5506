use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::identity::UserId;
use crate::translate::{supported_languages, LanguageInfo, Translation, TranslationRequest};
use crate::AppState;

use super::{CommandError, CommandResult, ErrorKind};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationServiceInfo {
    pub supported_languages: Vec<LanguageInfo>,
    pub service: &'static str,
    pub language_count: usize,
    pub status: &'static str,
}

/// Translate text for a signed-in caller; cancelling `cancel` abandons the provider call
pub async fn translate_text(
    state: &AppState,
    user: Option<&UserId>,
    request: TranslationRequest,
    cancel: &CancellationToken,
) -> CommandResult<Translation> {
    if user.is_none() {
        return Err(CommandError::new(ErrorKind::Unauthenticated, "Authentication required"));
    }

    let translation = state.translator.translate(&request, cancel).await?;
    log::info!(
        "Translated {} -> {} via {}",
        translation.from_language,
        translation.to_language,
        translation.service
    );
    Ok(translation)
}

pub fn translation_info(state: &AppState) -> TranslationServiceInfo {
    let languages = supported_languages();
    TranslationServiceInfo {
        language_count: languages.len(),
        supported_languages: languages,
        service: state.translator.provider_name(),
        status: "active",
    }
}
