//! Selector blacklist

use regex::Regex;
use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};

/// A blacklist entry as written in an options file: a plain string is a
/// literal, `{ "pattern": "..." }` is a regular expression.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BlacklistEntry {
    Literal(String),
    Pattern { pattern: String },
}

/// A compiled blacklist entry
#[derive(Debug, Clone)]
pub enum SelectorPattern {
    /// Matches selectors containing the text
    Literal(String),
    /// Matches selectors the expression finds a match in
    Pattern(Regex),
}

impl SelectorPattern {
    pub fn matches(&self, selector: &str) -> bool {
        match self {
            Self::Literal(text) => selector.contains(text.as_str()),
            Self::Pattern(regex) => regex.is_match(selector),
        }
    }
}

impl TryFrom<&BlacklistEntry> for SelectorPattern {
    type Error = ConfigError;

    fn try_from(entry: &BlacklistEntry) -> ConfigResult<Self> {
        match entry {
            BlacklistEntry::Literal(text) => Ok(Self::Literal(text.clone())),
            BlacklistEntry::Pattern { pattern } => Regex::new(pattern)
                .map(Self::Pattern)
                .map_err(|source| ConfigError::InvalidPattern { pattern: pattern.clone(), source }),
        }
    }
}

/// Selectors whose declarations are never converted
#[derive(Debug, Clone, Default)]
pub struct SelectorBlacklist {
    entries: Vec<SelectorPattern>,
}

impl SelectorBlacklist {
    /// Compile options file entries, failing on the first invalid pattern
    pub fn from_entries(entries: &[BlacklistEntry]) -> ConfigResult<Self> {
        let entries = entries
            .iter()
            .map(SelectorPattern::try_from)
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any entry matches the selector
    pub fn matches(&self, selector: &str) -> bool {
        self.entries.iter().any(|entry| entry.matches(selector))
    }
}

/// Whether a selector is blacklisted. Nodes without a selector (`None`)
/// are never blacklisted.
pub fn is_selector_blacklisted(selector: Option<&str>, blacklist: &SelectorBlacklist) -> bool {
    selector.is_some_and(|selector| blacklist.matches(selector))
}
