//! Manual exclusion sets: the source-word blacklist and the loanword lexicon.
//!
//! Follows the same OnceLock pattern as `settings`: `exclusions()` parses the
//! embedded `default_exclusions.toml` on first use unless `init_custom` ran
//! first.

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::unicode::nfc;

pub const DEFAULT_EXCLUSIONS_TOML: &str = include_str!("default_exclusions.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `exclusions()` call.
pub fn init_custom(toml_content: String) -> Result<(), ExclusionsError> {
    parse_exclusions_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| ExclusionsError::AlreadyInitialized)
}

/// Get or initialize the global exclusion sets.
pub fn exclusions() -> &'static Exclusions {
    static INSTANCE: OnceLock<Exclusions> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_EXCLUSIONS_TOML);
        parse_exclusions_toml(toml_str).expect("exclusions TOML must be valid")
    })
}

/// Returns the embedded default exclusions TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_EXCLUSIONS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum ExclusionsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("empty entry in [{0}]")]
    EmptyEntry(&'static str),
    #[error("blacklist entry must be lowercase: {0}")]
    NotLowercase(String),
    #[error("exclusions already initialized")]
    AlreadyInitialized,
}

#[derive(Deserialize)]
struct ExclusionsConfig {
    blacklist: WordList,
    loanwords: WordList,
}

#[derive(Deserialize)]
struct WordList {
    words: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Exclusions {
    pub blacklist: Blacklist,
    pub loanwords: LoanwordLexicon,
}

/// Source words that are never safe, matched exactly against the
/// lower-cased source word.
#[derive(Debug, Clone, Default)]
pub struct Blacklist(HashSet<String>);

impl Blacklist {
    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Blacklist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Target-language entries that are always loanwords.
///
/// Entries are stored in NFC. A word matches if it is present as written or
/// after trimming and lower-casing.
#[derive(Debug, Clone, Default)]
pub struct LoanwordLexicon(HashSet<String>);

impl LoanwordLexicon {
    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word) || self.0.contains(&word.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for LoanwordLexicon {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(|w| nfc(w.as_ref())).collect())
    }
}

pub fn parse_exclusions_toml(toml_str: &str) -> Result<Exclusions, ExclusionsError> {
    let config: ExclusionsConfig =
        toml::from_str(toml_str).map_err(|e| ExclusionsError::Parse(e.to_string()))?;

    for word in &config.blacklist.words {
        if word.trim().is_empty() {
            return Err(ExclusionsError::EmptyEntry("blacklist"));
        }
        if word.to_lowercase() != *word {
            return Err(ExclusionsError::NotLowercase(word.clone()));
        }
    }
    if config.loanwords.words.iter().any(|w| w.trim().is_empty()) {
        return Err(ExclusionsError::EmptyEntry("loanwords"));
    }

    Ok(Exclusions {
        blacklist: config.blacklist.words.into_iter().collect(),
        loanwords: config.loanwords.words.iter().collect(),
    })
}
