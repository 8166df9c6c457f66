//! Pipeline parameters loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::table::CapPolicy;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub lengths: LengthSettings,
    #[serde(default)]
    caps: BTreeMap<String, usize>,
    /// Parsed caps: word length → maximum population.
    #[serde(skip)]
    caps_parsed: CapPolicy,
    pub resolver: ResolverSettings,
    pub oracle: OracleSettings,
    pub classifier: ClassifierSettings,
}

impl Settings {
    /// Population cap policy for the selector.
    pub fn cap_policy(&self) -> &CapPolicy {
        &self.caps_parsed
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LengthSettings {
    pub min: usize,
    pub max: usize,
}

impl LengthSettings {
    pub fn range(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolverSettings {
    pub reserved_endings: Vec<char>,
    pub guarded_ending: char,
    pub guarded_penultimate: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OracleSettings {
    #[serde(default)]
    pub extra: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierSettings {
    pub short_word_max_len: usize,
    pub max_consonant_run: usize,
    pub max_consonant_ratio: f64,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let mut s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    s.caps_parsed = parse_caps(&s.caps, &s.lengths)?;
    Ok(s)
}

fn parse_caps(
    raw: &BTreeMap<String, usize>,
    lengths: &LengthSettings,
) -> Result<CapPolicy, SettingsError> {
    let mut policy = CapPolicy::unlimited();
    for (key, &max) in raw {
        let len: usize = key.parse().map_err(|_| SettingsError::InvalidValue {
            field: format!("caps.{key}"),
            reason: "key must be a word length".to_string(),
        })?;
        if !lengths.range().contains(&len) {
            return Err(SettingsError::InvalidValue {
                field: format!("caps.{key}"),
                reason: format!(
                    "length outside lengths.min..=lengths.max ({}..={})",
                    lengths.min, lengths.max
                ),
            });
        }
        policy = policy.with_cap(len, max);
    }
    Ok(policy)
}

fn invalid(field: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(invalid(
                    concat!(stringify!($section), ".", stringify!($field)),
                    "must be positive",
                ));
            }
        };
    }

    check_positive_usize!(lengths.min);
    check_positive_usize!(lengths.max);
    if s.lengths.min > s.lengths.max {
        return Err(invalid("lengths.min", "must not exceed lengths.max"));
    }

    for &c in &s.resolver.reserved_endings {
        if !c.is_ascii_lowercase() {
            return Err(invalid(
                "resolver.reserved_endings",
                "entries must be lowercase ASCII letters",
            ));
        }
    }
    if !s.resolver.guarded_ending.is_ascii_lowercase() {
        return Err(invalid(
            "resolver.guarded_ending",
            "must be a lowercase ASCII letter",
        ));
    }
    if !s.resolver.guarded_penultimate.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(invalid(
            "resolver.guarded_penultimate",
            "must contain only lowercase ASCII letters",
        ));
    }

    if s.oracle.extra.iter().any(|w| w.trim().is_empty()) {
        return Err(invalid("oracle.extra", "entries must not be empty"));
    }

    check_positive_usize!(classifier.short_word_max_len);
    check_positive_usize!(classifier.max_consonant_run);
    let ratio = s.classifier.max_consonant_ratio;
    if !(ratio > 0.0 && ratio <= 1.0) {
        return Err(invalid(
            "classifier.max_consonant_ratio",
            "must be in (0, 1]",
        ));
    }

    Ok(())
}
