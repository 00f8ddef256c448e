//! Localized canned replies served in demo mode and on fallback.
//!
//! The table is loaded once at process start and never mutated. Entries are
//! matched in table order against the visitor's message, then against the UI
//! context label, before falling back to the locale's default reply.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::locale::LocaleTag;

const BUILTIN_TABLE: &str = include_str!("../data/demo_responses.json");

/// Errors raised while loading a demo response table.
#[derive(Debug, Error)]
pub enum DemoTableError {
    #[error("Failed to read demo responses: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse demo responses: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid demo responses for locale {locale}: {reason}")]
    Invalid { locale: LocaleTag, reason: String },
}

/// A canned reply and the phrases that select it.
#[derive(Debug, Clone, Deserialize)]
pub struct DemoEntry {
    pub key: String,
    pub patterns: Vec<String>,
    pub reply: String,
}

#[derive(Debug, Clone, Deserialize)]
struct LocaleResponses {
    default: String,
    entries: Vec<DemoEntry>,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    en: LocaleResponses,
    es: LocaleResponses,
}

/// Immutable mapping `locale -> pattern -> reply`.
#[derive(Debug, Clone)]
pub struct DemoResponseTable {
    en: LocaleResponses,
    es: LocaleResponses,
}

impl DemoResponseTable {
    /// The table shipped with the crate.
    pub fn builtin() -> Result<Self, DemoTableError> {
        Self::from_json(BUILTIN_TABLE)
    }

    /// Parse and validate a table from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, DemoTableError> {
        let raw: RawTable = serde_json::from_str(json)?;
        let table = Self {
            en: normalize(raw.en),
            es: normalize(raw.es),
        };
        for locale in LocaleTag::ALL {
            validate(locale, table.responses(locale))?;
        }
        Ok(table)
    }

    /// Load a table from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self, DemoTableError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Pick the canned reply for a message in the given locale.
    ///
    /// Never returns an empty string.
    pub fn lookup(&self, message: &str, context: Option<&str>, locale: LocaleTag) -> &str {
        let responses = self.responses(locale);
        find_entry(responses, message)
            .or_else(|| context.and_then(|c| find_entry(responses, c)))
            .map(|entry| entry.reply.as_str())
            .unwrap_or(responses.default.as_str())
    }

    /// Entry keys for a locale, in match order.
    pub fn keys(&self, locale: LocaleTag) -> Vec<&str> {
        self.responses(locale)
            .entries
            .iter()
            .map(|e| e.key.as_str())
            .collect()
    }

    fn responses(&self, locale: LocaleTag) -> &LocaleResponses {
        match locale {
            LocaleTag::En => &self.en,
            LocaleTag::Es => &self.es,
        }
    }
}

/// Lower-case and collapse text to single-space separated words.
fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize(mut responses: LocaleResponses) -> LocaleResponses {
    for entry in &mut responses.entries {
        entry.patterns = entry
            .patterns
            .iter()
            .map(|p| normalize_text(p))
            .filter(|p| !p.is_empty())
            .collect();
    }
    responses
}

fn validate(locale: LocaleTag, responses: &LocaleResponses) -> Result<(), DemoTableError> {
    let invalid = |reason: String| DemoTableError::Invalid { locale, reason };

    if responses.default.trim().is_empty() {
        return Err(invalid("default reply is empty".into()));
    }
    for entry in &responses.entries {
        if entry.patterns.is_empty() {
            return Err(invalid(format!("entry '{}' has no patterns", entry.key)));
        }
        if entry.reply.trim().is_empty() {
            return Err(invalid(format!("entry '{}' has an empty reply", entry.key)));
        }
    }
    Ok(())
}

fn find_entry<'a>(responses: &'a LocaleResponses, text: &str) -> Option<&'a DemoEntry> {
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return None;
    }
    // Pad so that patterns only match on word boundaries.
    let haystack = format!(" {normalized} ");
    responses.entries.iter().find(|entry| {
        entry
            .patterns
            .iter()
            .any(|p| haystack.contains(&format!(" {p} ")))
    })
}
