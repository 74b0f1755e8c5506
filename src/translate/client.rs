use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;

use super::languages::Language;
use super::TranslateError;

pub const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";
pub const DEFAULT_USER_AGENT: &str = "FlashyCardy/1.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// A backend that turns text in one language into another
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Short name reported alongside results
    fn name(&self) -> &'static str;

    /// Translate `text`. Implementations return the provider's text as-is
    /// (trimmed); result checks happen in the `Translator`.
    async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String, TranslateError>;
}

/// Client for the free MyMemory translation API
pub struct MyMemoryClient {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    response_status: ResponseStatus,
    #[serde(default)]
    response_details: Option<String>,
    #[serde(default)]
    response_data: Option<ResponseData>,
}

/// MyMemory reports the status as either a number or a numeric string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResponseStatus {
    Code(u16),
    Text(String),
}

impl ResponseStatus {
    fn is_ok(&self) -> bool {
        match self {
            ResponseStatus::Code(code) => *code == 200,
            ResponseStatus::Text(text) => text.trim() == "200",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    #[serde(default)]
    translated_text: Option<String>,
}

impl MyMemoryClient {
    pub fn new(endpoint: impl Into<String>, user_agent: &str, timeout: Duration) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

fn request_url(endpoint: &str, text: &str, from: Language, to: Language) -> String {
    format!(
        "{}?q={}&langpair={}|{}",
        endpoint,
        urlencoding::encode(text),
        from.provider_code(),
        to.provider_code()
    )
}

fn parse_response(body: MyMemoryResponse) -> Result<String, TranslateError> {
    if !body.response_status.is_ok() {
        let details = body
            .response_details
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| "Translation failed".to_string());
        return Err(TranslateError::Provider(details));
    }

    Ok(body
        .response_data
        .and_then(|data| data.translated_text)
        .map(|text| text.trim().to_string())
        .unwrap_or_default())
}

#[async_trait]
impl TranslationProvider for MyMemoryClient {
    fn name(&self) -> &'static str {
        "MyMemory"
    }

    async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String, TranslateError> {
        log::info!("MyMemory translation: {} -> {}", from.provider_code(), to.provider_code());

        let response = self
            .client
            .get(request_url(&self.endpoint, text, from, to))
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Http { status: status.as_u16() });
        }

        let body: MyMemoryResponse = response.json().await?;
        log::debug!("MyMemory response status: {:?}", body.response_status);
        parse_response(body)
    }
}
