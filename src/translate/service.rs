use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::client::TranslationProvider;
use super::languages::Language;
use super::TranslateError;
use crate::flashcards::validation::Validator;

pub const TEXT_MAX_CHARS: usize = 1000;
const LANGUAGE_CODE_MAX_CHARS: usize = 16;

/// Incoming translation request; language codes are validated by the `Translator`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub text: String,
    pub from_language: String,
    pub to_language: String,
    /// Free-form hint from the caller; not sent to the provider
    #[serde(default)]
    pub context: Option<String>,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            from_language: from.into(),
            to_language: to.into(),
            context: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub translation: String,
    pub from_language: Language,
    pub to_language: Language,
    pub original_text: String,
    pub from_language_name: &'static str,
    pub to_language_name: &'static str,
    pub service: &'static str,
    pub message: String,
}

/// Runs translation requests against a provider
pub struct Translator {
    provider: Arc<dyn TranslationProvider>,
    timeout: Duration,
}

impl Translator {
    pub fn new(provider: Arc<dyn TranslationProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn translate(
        &self,
        request: &TranslationRequest,
        cancel: &CancellationToken,
    ) -> Result<Translation, TranslateError> {
        let (text, from, to) = validate_request(request)?;

        // Echo the caller's text as given; trimming is only for the checks
        if from == to {
            log::debug!("Same language pair ({}), skipping provider", from);
            return Ok(Translation {
                translation: request.text.clone(),
                from_language: from,
                to_language: to,
                original_text: request.text.clone(),
                from_language_name: from.name(),
                to_language_name: to.name(),
                service: "none",
                message: "Same language - no translation needed".to_string(),
            });
        }

        log::info!("Translation request: {} -> {} via {}", from, to, self.provider.name());

        let translated = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(TranslateError::Cancelled),
            result = tokio::time::timeout(self.timeout, self.provider.translate(&text, from, to)) => {
                result.map_err(|_| TranslateError::Timeout)??
            }
        };

        let translation = check_result(&text, translated)?;
        Ok(Translation {
            translation,
            from_language: from,
            to_language: to,
            original_text: request.text.clone(),
            from_language_name: from.name(),
            to_language_name: to.name(),
            service: self.provider.name(),
            message: format!("Translated using {}", self.provider.name()),
        })
    }
}

fn validate_request(request: &TranslationRequest) -> Result<(String, Language, Language), TranslateError> {
    let mut v = Validator::new();
    let text = v.required("text", "Text", &request.text, TEXT_MAX_CHARS);
    let from = v.required("fromLanguage", "Source language", &request.from_language, LANGUAGE_CODE_MAX_CHARS);
    let to = v.required("toLanguage", "Target language", &request.to_language, LANGUAGE_CODE_MAX_CHARS);
    let (text, from, to) = v.finish((text, from, to))?;

    let from_lang = Language::from_code(&from).ok_or(TranslateError::UnsupportedLanguage {
        role: "source",
        code: from,
    })?;
    let to_lang = Language::from_code(&to).ok_or(TranslateError::UnsupportedLanguage {
        role: "target",
        code: to,
    })?;

    Ok((text, from_lang, to_lang))
}

/// Reject provider output that is blank or just echoes the input
fn check_result(original: &str, translated: String) -> Result<String, TranslateError> {
    let translated = translated.trim();
    if translated.is_empty() {
        return Err(TranslateError::EmptyResult);
    }
    if translated.to_lowercase() == original.trim().to_lowercase() {
        return Err(TranslateError::IdenticalText);
    }
    Ok(translated.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubProvider {
        calls: AtomicUsize,
        delay: Option<Duration>,
        reply: fn(&str) -> Result<String, TranslateError>,
    }

    impl StubProvider {
        fn new(reply: fn(&str) -> Result<String, TranslateError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                delay: None,
                reply,
            })
        }

        fn slow(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                delay: Some(delay),
                reply: |_| Ok("late".to_string()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TranslationProvider for StubProvider {
        fn name(&self) -> &'static str {
            "Stub"
        }

        async fn translate(&self, text: &str, _from: Language, _to: Language) -> Result<String, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            (self.reply)(text)
        }
    }

    fn translator(provider: Arc<StubProvider>) -> Translator {
        Translator::new(provider, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_translates_through_provider() {
        let stub = StubProvider::new(|_| Ok(" Bonjour ".to_string()));
        let t = translator(stub.clone());

        let result = t
            .translate(&TranslationRequest::new("Hello", "en", "fr"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(result.translation, "Bonjour");
        assert_eq!(result.original_text, "Hello");
        assert_eq!(result.from_language, Language::En);
        assert_eq!(result.to_language_name, "French");
        assert_eq!(result.service, "Stub");
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_same_language_skips_provider() {
        let stub = StubProvider::new(|_| Ok("unused".to_string()));
        let t = translator(stub.clone());

        let result = t
            .translate(&TranslationRequest::new("Hola", "es", "es"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(result.translation, "Hola");
        assert_eq!(result.service, "none");
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_keeps_surrounding_whitespace_of_original_text() {
        let stub = StubProvider::new(|_| Ok("unused".to_string()));
        let t = translator(stub.clone());
        let cancel = CancellationToken::new();

        let same = t
            .translate(&TranslationRequest::new("  Hola  ", "es", "es"), &cancel)
            .await
            .unwrap();
        assert_eq!(same.translation, "  Hola  ");
        assert_eq!(same.original_text, "  Hola  ");
        assert_eq!(stub.calls(), 0);

        let fr = translator(StubProvider::new(|_| Ok("Bonjour".to_string())));
        let translated = fr
            .translate(&TranslationRequest::new(" Hello\n", "en", "fr"), &cancel)
            .await
            .unwrap();
        assert_eq!(translated.translation, "Bonjour");
        assert_eq!(translated.original_text, " Hello\n");
    }

    #[tokio::test]
    async fn test_rejects_bad_input_before_calling_provider() {
        let stub = StubProvider::new(|_| Ok("x".to_string()));
        let t = translator(stub.clone());
        let cancel = CancellationToken::new();

        let err = t.translate(&TranslationRequest::new("   ", "en", "fr"), &cancel).await.unwrap_err();
        assert!(matches!(err, TranslateError::Validation(ref v) if v.has_field("text")));

        let long = "a".repeat(TEXT_MAX_CHARS + 1);
        let err = t.translate(&TranslationRequest::new(long, "en", "fr"), &cancel).await.unwrap_err();
        assert!(matches!(err, TranslateError::Validation(_)));

        let err = t.translate(&TranslationRequest::new("Hello", "xx", "fr"), &cancel).await.unwrap_err();
        assert!(matches!(err, TranslateError::UnsupportedLanguage { role: "source", .. }));

        let err = t.translate(&TranslationRequest::new("Hello", "en", "klingon"), &cancel).await.unwrap_err();
        assert!(matches!(err, TranslateError::UnsupportedLanguage { role: "target", .. }));

        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_identical_and_empty_results_fail() {
        let cancel = CancellationToken::new();

        let echo = translator(StubProvider::new(|text| Ok(text.to_uppercase())));
        let err = echo.translate(&TranslationRequest::new("Hello", "en", "de"), &cancel).await.unwrap_err();
        assert!(matches!(err, TranslateError::IdenticalText));

        let blank = translator(StubProvider::new(|_| Ok("  ".to_string())));
        let err = blank.translate(&TranslationRequest::new("Hello", "en", "de"), &cancel).await.unwrap_err();
        assert!(matches!(err, TranslateError::EmptyResult));
    }

    #[tokio::test]
    async fn test_provider_errors_pass_through() {
        let t = translator(StubProvider::new(|_| Err(TranslateError::Http { status: 502 })));
        let err = t
            .translate(&TranslationRequest::new("Hello", "en", "ja"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::Http { status: 502 }));
    }

    #[tokio::test]
    async fn test_timeout() {
        let t = Translator::new(StubProvider::slow(Duration::from_secs(30)), Duration::from_millis(20));
        let err = t
            .translate(&TranslationRequest::new("Hello", "en", "fr"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::Timeout));
    }

    #[tokio::test]
    async fn test_cancelled() {
        let stub = StubProvider::slow(Duration::from_secs(30));
        let t = translator(stub);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = t
            .translate(&TranslationRequest::new("Hello", "en", "fr"), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::Cancelled));
    }
}
