use std::collections::HashSet;

use crate::lexicon::LexiconEntry;
use crate::unicode::nfc;

/// The curated vocabulary, as a set of lower-cased NFC syllables.
///
/// Built in one go from a complete vocabulary and never modified afterwards,
/// so no conflict check can observe a partially loaded oracle.
#[derive(Debug, Clone, Default)]
pub struct ConflictOracle {
    syllables: HashSet<String>,
}

impl ConflictOracle {
    /// Build from curated vocabulary text (one entry per line). Multi-syllable
    /// entries contribute each syllable; `extra` syllables are always added.
    pub fn from_vocabulary(text: &str, extra: &[String]) -> Self {
        Self::from_words(text.lines(), extra)
    }

    /// Build from the curated entries of a classification run.
    pub fn from_entries(entries: &[LexiconEntry], extra: &[String]) -> Self {
        Self::from_words(entries.iter().map(LexiconEntry::text), extra)
    }

    fn from_words<'w>(words: impl Iterator<Item = &'w str>, extra: &[String]) -> Self {
        let mut syllables = HashSet::new();
        for line in words {
            for token in line.to_lowercase().split_whitespace() {
                syllables.insert(nfc(token));
            }
        }
        for token in extra {
            syllables.insert(nfc(&token.to_lowercase()));
        }
        Self { syllables }
    }

    /// Exact membership of an NFC, lower-cased string.
    pub fn contains(&self, output: &str) -> bool {
        self.syllables.contains(output)
    }

    pub fn len(&self) -> usize {
        self.syllables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syllables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_entries_into_syllables() {
        let oracle = ConflictOracle::from_vocabulary("con mèo\nỎn\n\n", &[]);
        assert!(oracle.contains("con"));
        assert!(oracle.contains("mèo"));
        assert!(oracle.contains("ỏn"));
        assert!(!oracle.contains("con mèo"));
        assert_eq!(oracle.len(), 3);
    }

    #[test]
    fn composes_decomposed_input() {
        let oracle = ConflictOracle::from_vocabulary("o\u{0309}n", &[]);
        assert!(oracle.contains("ỏn"));
    }

    #[test]
    fn from_classified_entries() {
        use crate::exclusions::LoanwordLexicon;
        use crate::lexicon::Classifier;
        use crate::settings::{parse_settings_toml, DEFAULT_SETTINGS_TOML};

        let settings = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        let lexicon = LoanwordLexicon::default();
        let partition = Classifier::new(&lexicon, &settings.classifier).partition("tiếng việt
hello!
");
        let oracle = ConflictOracle::from_entries(&partition.curated, &[]);
        assert!(oracle.contains("tiếng"));
        assert!(oracle.contains("việt"));
        assert!(!oracle.contains("hello!"));
    }

    #[test]
    fn extra_syllables() {
        let extra = vec!["ă".to_string(), "ươ".to_string()];
        let oracle = ConflictOracle::from_vocabulary("", &extra);
        assert!(oracle.contains("ă"));
        assert!(oracle.contains("ươ"));
        assert_eq!(oracle.len(), 2);
    }
}
