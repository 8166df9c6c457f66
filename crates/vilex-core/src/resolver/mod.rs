//! Conflict resolution: decides which English words can be left
//! untransformed by the Telex engine.
//!
//! Each corpus line pairs an English word with the string the engine would
//! produce if the same keystrokes were read as Telex. A word is safe only if
//! that output is not a real Vietnamese syllable and the word does not end in
//! a letter that only ever acts as a Telex modifier.

mod oracle;
#[cfg(test)]
mod tests;

pub use oracle::ConflictOracle;

use std::collections::{BTreeMap, HashSet};
use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::{debug, debug_span, trace};

use crate::exclusions::Blacklist;
use crate::keycode::KeySequence;
use crate::settings::{ResolverSettings, Settings};
use crate::unicode::nfc;

/// A corpus line: an English word and its hypothetical Telex output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateWord {
    pub source: String,
    pub output: String,
}

impl CandidateWord {
    /// Lower-cases both fields and composes the output.
    pub fn new(source: &str, output: &str) -> Self {
        Self {
            source: source.to_lowercase(),
            output: nfc(&output.to_lowercase()),
        }
    }

    /// Parse whitespace-separated columns; extra columns are ignored.
    /// Returns `None` for lines with fewer than two columns.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut cols = line.split_whitespace();
        let source = cols.next()?;
        let output = cols.next()?;
        Some(Self::new(source, output))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    NotAlphabetic,
    LengthOutOfRange,
    Blacklisted,
    OracleConflict,
    ReservedEnding,
    GuardedEnding,
    Unmappable,
}

/// A word that passed every check, with its key sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeWord {
    pub word: String,
    pub keys: KeySequence,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolveStats {
    pub lines: usize,
    pub blank: usize,
    pub malformed: usize,
    pub safe: usize,
    /// Safe on one line but conflicting on another.
    pub vetoed: usize,
    pub rejected: BTreeMap<Rejection, usize>,
}

/// Corpus resolution result; `safe` keeps corpus order and may repeat words.
#[derive(Debug, Default)]
pub struct Resolution {
    pub safe: Vec<SafeWord>,
    pub stats: ResolveStats,
}

pub struct Resolver<'a> {
    oracle: &'a ConflictOracle,
    blacklist: &'a Blacklist,
    lengths: RangeInclusive<usize>,
    rules: &'a ResolverSettings,
}

impl<'a> Resolver<'a> {
    pub fn new(oracle: &'a ConflictOracle, blacklist: &'a Blacklist, settings: &'a Settings) -> Self {
        Self {
            oracle,
            blacklist,
            lengths: settings.lengths.range(),
            rules: &settings.resolver,
        }
    }

    /// Decide one candidate. Checks run in a fixed order and the first
    /// failing one is reported.
    pub fn resolve(&self, candidate: &CandidateWord) -> Result<KeySequence, Rejection> {
        let word = candidate.source.as_str();

        if !word.chars().all(char::is_alphabetic) {
            return Err(Rejection::NotAlphabetic);
        }
        if !self.lengths.contains(&word.chars().count()) {
            return Err(Rejection::LengthOutOfRange);
        }
        if self.blacklist.contains(word) {
            return Err(Rejection::Blacklisted);
        }
        if self.oracle.contains(&candidate.output) {
            return Err(Rejection::OracleConflict);
        }

        let mut tail = word.chars().rev();
        let last = tail.next();
        let penultimate = tail.next();
        if last.is_some_and(|c| self.rules.reserved_endings.contains(&c)) {
            return Err(Rejection::ReservedEnding);
        }
        if last == Some(self.rules.guarded_ending) {
            if let Some(p) = penultimate {
                if !self.rules.guarded_penultimate.contains(p) {
                    return Err(Rejection::GuardedEnding);
                }
            }
        }

        KeySequence::from_word(word).ok_or(Rejection::Unmappable)
    }

    /// Resolve every line of a corpus.
    ///
    /// A word whose output conflicts with the oracle on any line is dropped
    /// everywhere, so no table entry has a recorded output in the oracle.
    pub fn resolve_corpus(&self, corpus: &str) -> Resolution {
        let _span = debug_span!("resolve").entered();
        let mut out = Resolution::default();
        let mut conflicted: HashSet<String> = HashSet::new();

        for line in corpus.lines() {
            out.stats.lines += 1;
            if line.trim().is_empty() {
                out.stats.blank += 1;
                continue;
            }
            let Some(candidate) = CandidateWord::parse_line(line) else {
                out.stats.malformed += 1;
                continue;
            };
            match self.resolve(&candidate) {
                Ok(keys) => out.safe.push(SafeWord {
                    word: candidate.source,
                    keys,
                }),
                Err(reason) => {
                    trace!(word = %candidate.source, ?reason, "rejected");
                    if reason == Rejection::OracleConflict {
                        conflicted.insert(candidate.source);
                    }
                    *out.stats.rejected.entry(reason).or_default() += 1;
                }
            }
        }

        let before = out.safe.len();
        out.safe.retain(|w| !conflicted.contains(&w.word));
        out.stats.vetoed = before - out.safe.len();
        out.stats.safe = out.safe.len();

        debug!(
            lines = out.stats.lines,
            malformed = out.stats.malformed,
            safe = out.stats.safe,
            vetoed = out.stats.vetoed,
            oracle_size = self.oracle.len(),
        );
        out
    }
}
