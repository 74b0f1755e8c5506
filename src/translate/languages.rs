use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Languages the translator accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
    Fr,
    De,
    It,
    Pt,
    Ja,
    Ko,
    Zh,
    Ar,
    Ru,
    Hi,
    Nl,
    Sv,
    No,
    Da,
    Pl,
    Tr,
    Th,
    Vi,
}

impl Language {
    pub const ALL: [Language; 20] = [
        Language::En,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::It,
        Language::Pt,
        Language::Ja,
        Language::Ko,
        Language::Zh,
        Language::Ar,
        Language::Ru,
        Language::Hi,
        Language::Nl,
        Language::Sv,
        Language::No,
        Language::Da,
        Language::Pl,
        Language::Tr,
        Language::Th,
        Language::Vi,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::It => "it",
            Language::Pt => "pt",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::Zh => "zh",
            Language::Ar => "ar",
            Language::Ru => "ru",
            Language::Hi => "hi",
            Language::Nl => "nl",
            Language::Sv => "sv",
            Language::No => "no",
            Language::Da => "da",
            Language::Pl => "pl",
            Language::Tr => "tr",
            Language::Th => "th",
            Language::Vi => "vi",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Fr => "French",
            Language::De => "German",
            Language::It => "Italian",
            Language::Pt => "Portuguese",
            Language::Ja => "Japanese",
            Language::Ko => "Korean",
            Language::Zh => "Chinese (Mandarin)",
            Language::Ar => "Arabic",
            Language::Ru => "Russian",
            Language::Hi => "Hindi",
            Language::Nl => "Dutch",
            Language::Sv => "Swedish",
            Language::No => "Norwegian",
            Language::Da => "Danish",
            Language::Pl => "Polish",
            Language::Tr => "Turkish",
            Language::Th => "Thai",
            Language::Vi => "Vietnamese",
        }
    }

    /// Code sent to the translation provider, which differs for a few languages
    pub fn provider_code(self) -> &'static str {
        match self {
            Language::Zh => "zh-CN",
            Language::No => "nb",
            other => other.code(),
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unsupported language: {}", self.0)
    }
}

impl std::error::Error for UnknownLanguage {}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s).ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// Entry in the supported-language listing
#[derive(Debug, Clone, Serialize)]
pub struct LanguageInfo {
    pub code: &'static str,
    pub name: &'static str,
}

pub fn supported_languages() -> Vec<LanguageInfo> {
    Language::ALL
        .iter()
        .map(|lang| LanguageInfo {
            code: lang.code(),
            name: lang.name(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for lang in Language::ALL {
            assert_eq!(lang.code().parse::<Language>().unwrap(), lang);
        }
    }

    #[test]
    fn test_provider_codes() {
        assert_eq!(Language::Zh.provider_code(), "zh-CN");
        assert_eq!(Language::No.provider_code(), "nb");
        assert_eq!(Language::Fr.provider_code(), "fr");
    }

    #[test]
    fn test_unknown_codes() {
        assert!("xx".parse::<Language>().is_err());
        // Codes are exact; no case folding
        assert!(Language::from_code("EN").is_none());
        assert!(Language::from_code("zh-CN").is_none());
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Language::Zh).unwrap(), "\"zh\"");
        let lang: Language = serde_json::from_str("\"no\"").unwrap();
        assert_eq!(lang, Language::No);
    }
}
