//! Lexical classification of a raw Vietnamese wordlist.
//!
//! Every non-blank line is labeled with exactly one [`Category`]. `Native`
//! entries form the curated vocabulary; everything else goes to a
//! diagnostic list annotated with its category.

mod loanword;
mod rules;
#[cfg(test)]
mod tests;

pub use loanword::{detect as detect_loanword, is_loanword, LoanwordHeuristic};
pub use rules::{
    default_chain, ExclamationRule, ForeignScriptRule, LoanwordRule, NumberRule, Rule,
};

use std::io::{self, Write};

use serde::Serialize;
use tracing::{debug, debug_span, trace};

use crate::exclusions::LoanwordLexicon;
use crate::settings::ClassifierSettings;
use crate::unicode::nfc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Native,
    Loanword,
    NumericContent,
    ExclamatoryMark,
    ForeignScript,
}

impl Category {
    /// Label written to the rejection list.
    pub fn label(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Loanword => "loanword_or_foreign",
            Self::NumericContent => "contains_number",
            Self::ExclamatoryMark => "contains_exclamation",
            Self::ForeignScript => "contains_special_char",
        }
    }
}

/// A labeled wordlist entry. The text is NFC and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    text: String,
    category: Category,
}

impl LexiconEntry {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassifyStats {
    pub total: usize,
    pub native: usize,
    pub loanword: usize,
    pub numeric: usize,
    pub exclamation: usize,
    pub special: usize,
}

impl ClassifyStats {
    fn record(&mut self, category: Category) {
        self.total += 1;
        match category {
            Category::Native => self.native += 1,
            Category::Loanword => self.loanword += 1,
            Category::NumericContent => self.numeric += 1,
            Category::ExclamatoryMark => self.exclamation += 1,
            Category::ForeignScript => self.special += 1,
        }
    }

    pub fn rejected(&self) -> usize {
        self.total - self.native
    }
}

/// Result of classifying a whole wordlist. Both lists keep input order.
#[derive(Debug, Default)]
pub struct Partition {
    pub curated: Vec<LexiconEntry>,
    pub rejected: Vec<LexiconEntry>,
    pub stats: ClassifyStats,
}

pub struct Classifier<'a> {
    rules: Vec<Box<dyn Rule + 'a>>,
}

impl<'a> Classifier<'a> {
    pub fn new(lexicon: &'a LoanwordLexicon, settings: &'a ClassifierSettings) -> Self {
        Self::with_rules(default_chain(lexicon, settings))
    }

    pub fn with_rules(rules: Vec<Box<dyn Rule + 'a>>) -> Self {
        Self { rules }
    }

    /// Category of an already canonical word.
    pub fn category(&self, word: &str) -> Category {
        self.rules
            .iter()
            .find(|rule| rule.matches(word))
            .map_or(Category::Native, |rule| rule.category())
    }

    /// Label one wordlist line. Returns `None` for blank lines.
    pub fn classify(&self, line: &str) -> Option<LexiconEntry> {
        let text = nfc(line.trim());
        if text.is_empty() {
            return None;
        }
        let category = self.category(&text);
        Some(LexiconEntry { text, category })
    }

    pub fn partition(&self, wordlist: &str) -> Partition {
        let _span = debug_span!("classify").entered();
        let mut out = Partition::default();
        for line in wordlist.lines() {
            let Some(entry) = self.classify(line) else {
                continue;
            };
            out.stats.record(entry.category);
            if entry.category == Category::Native {
                out.curated.push(entry);
            } else {
                trace!(word = %entry.text, category = entry.category.label(), "rejected");
                out.rejected.push(entry);
            }
        }
        debug!(
            total = out.stats.total,
            native = out.stats.native,
            loanword = out.stats.loanword,
            numeric = out.stats.numeric,
            exclamation = out.stats.exclamation,
            special = out.stats.special,
        );
        out
    }
}

/// One curated word per line.
pub fn write_curated<W: Write>(entries: &[LexiconEntry], out: &mut W) -> io::Result<()> {
    for entry in entries {
        writeln!(out, "{}", entry.text)?;
    }
    Ok(())
}

/// Header comment lines, then `word | category` per entry.
pub fn write_rejected<W: Write>(entries: &[LexiconEntry], out: &mut W) -> io::Result<()> {
    writeln!(out, "# Vietnamese loanwords and invalid entries")?;
    writeln!(out, "# Format: word | category")?;
    writeln!(
        out,
        "# Categories: loanword_or_foreign, contains_number, contains_exclamation, contains_special_char"
    )?;
    writeln!(out)?;
    for entry in entries {
        writeln!(out, "{} | {}", entry.text, entry.category.label())?;
    }
    Ok(())
}
