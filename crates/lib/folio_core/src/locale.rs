//! Visitor locale resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Languages the assistant can answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleTag {
    #[default]
    En,
    Es,
}

/// Returned when a locale name is not one of the supported tags.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unsupported locale: {0} (expected \"en\" or \"es\")")]
pub struct LocaleParseError(pub String);

impl LocaleTag {
    /// All supported locales.
    pub const ALL: [LocaleTag; 2] = [LocaleTag::En, LocaleTag::Es];

    /// Resolve a locale from an `Accept-Language` style header.
    ///
    /// Any value starting with `es` (case-insensitive) selects Spanish.
    /// Everything else, including a missing header, selects English.
    pub fn from_accept_language(header: Option<&str>) -> Self {
        let Some(value) = header else {
            return LocaleTag::En;
        };
        let value = value.trim();
        match value.get(..2) {
            Some(prefix) if prefix.eq_ignore_ascii_case("es") => LocaleTag::Es,
            _ => LocaleTag::En,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LocaleTag::En => "en",
            LocaleTag::Es => "es",
        }
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocaleTag {
    type Err = LocaleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(LocaleTag::En),
            "es" => Ok(LocaleTag::Es),
            other => Err(LocaleParseError(other.to_string())),
        }
    }
}
