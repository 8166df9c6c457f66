use serde::Serialize;

use crate::exclusions::LoanwordLexicon;
use crate::settings::ClassifierSettings;
use crate::unicode::{is_accented, is_consonant, is_strict_consonant};

/// One of the loanword checks, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanwordHeuristic {
    /// Listed in the loanword lexicon.
    Lexicon,
    /// Short and spelled with plain ASCII letters only.
    ShortUnaccented,
    /// Contains a run of consecutive consonants too long for Vietnamese.
    ConsonantRun,
    /// Carries no Vietnamese diacritic at all.
    NoDiacritic,
    /// Too large a share of the word is consonants.
    ConsonantHeavy,
}

impl LoanwordHeuristic {
    pub const ORDER: [Self; 5] = [
        Self::Lexicon,
        Self::ShortUnaccented,
        Self::ConsonantRun,
        Self::NoDiacritic,
        Self::ConsonantHeavy,
    ];

    pub fn matches(
        self,
        word: &str,
        lexicon: &LoanwordLexicon,
        settings: &ClassifierSettings,
    ) -> bool {
        match self {
            Self::Lexicon => lexicon.contains(word),
            Self::ShortUnaccented => {
                let len = word.chars().count();
                len > 0
                    && len <= settings.short_word_max_len
                    && word.chars().all(|c| c.is_ascii_alphabetic())
            }
            Self::ConsonantRun => longest_consonant_run(word) >= settings.max_consonant_run,
            // NOTE: this also rejects genuine syllables written without a
            // diacritic ("ba", "con"). Kept as is; the curated vocabulary is
            // meant to err on the side of rejecting.
            Self::NoDiacritic => !word.is_empty() && !word.chars().any(is_accented),
            Self::ConsonantHeavy => {
                let len = word.chars().count();
                let consonants = word.chars().filter(|&c| is_strict_consonant(c)).count();
                consonants as f64 > len as f64 * settings.max_consonant_ratio
            }
        }
    }
}

fn longest_consonant_run(word: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for c in word.chars() {
        if is_consonant(c) {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

/// The first loanword heuristic that fires for `word`, if any.
pub fn detect(
    word: &str,
    lexicon: &LoanwordLexicon,
    settings: &ClassifierSettings,
) -> Option<LoanwordHeuristic> {
    LoanwordHeuristic::ORDER
        .into_iter()
        .find(|h| h.matches(word, lexicon, settings))
}

pub fn is_loanword(word: &str, lexicon: &LoanwordLexicon, settings: &ClassifierSettings) -> bool {
    detect(word, lexicon, settings).is_some()
}
