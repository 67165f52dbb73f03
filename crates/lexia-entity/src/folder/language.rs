//! Supported vocabulary languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A language a word collection can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "language", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    English,
    Georgian,
    Spanish,
    French,
    German,
    Russian,
    Japanese,
    Chinese,
}

impl Language {
    /// Every supported language, in display order.
    pub const ALL: [Language; 8] = [
        Self::English,
        Self::Georgian,
        Self::Spanish,
        Self::French,
        Self::German,
        Self::Russian,
        Self::Japanese,
        Self::Chinese,
    ];

    /// ISO 639-1 code used by translation providers.
    pub fn iso_code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Georgian => "ka",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::German => "de",
            Self::Russian => "ru",
            Self::Japanese => "ja",
            Self::Chinese => "zh",
        }
    }

    /// Map a provider language code (`"en"`, `"zh-CN"`, `"pt-BR"`, ...) back
    /// to a supported language. Region subtags are ignored.
    pub fn from_iso_code(code: &str) -> Option<Self> {
        let primary = code
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::ALL.into_iter().find(|l| l.iso_code() == primary)
    }

    /// Return the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "ENGLISH",
            Self::Georgian => "GEORGIAN",
            Self::Spanish => "SPANISH",
            Self::French => "FRENCH",
            Self::German => "GERMAN",
            Self::Russian => "RUSSIAN",
            Self::Japanese => "JAPANESE",
            Self::Chinese => "CHINESE",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == upper)
            .ok_or_else(|| format!("Unsupported language: {s}"))
    }
}
