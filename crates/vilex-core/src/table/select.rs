use std::collections::{BTreeMap, HashSet};
use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::resolver::SafeWord;

use super::{Bucket, SafeTables, TableEntry};

/// Optional maximum population per word length. Lengths without a cap keep
/// every safe word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapPolicy {
    caps: BTreeMap<usize, usize>,
}

impl CapPolicy {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_cap(mut self, len: usize, max: usize) -> Self {
        self.caps.insert(len, max);
        self
    }

    pub fn cap(&self, len: usize) -> Option<usize> {
        self.caps.get(&len).copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BucketStats {
    pub len: usize,
    pub candidates: usize,
    pub duplicates: usize,
    pub capped: usize,
    pub kept: usize,
}

/// Group safe words into one bucket per length in `lengths`, drop
/// duplicates, apply the cap policy and sort each bucket by key sequence.
///
/// `safe` is in preference order: when a cap is in force, the earliest
/// distinct words are kept. Words whose length is outside `lengths` are
/// ignored.
pub fn select(
    safe: &[SafeWord],
    lengths: RangeInclusive<usize>,
    caps: &CapPolicy,
) -> (SafeTables, Vec<BucketStats>) {
    let _span = debug_span!("select").entered();
    let mut entries: BTreeMap<usize, Vec<TableEntry>> =
        lengths.clone().map(|len| (len, Vec::new())).collect();
    let mut stats: BTreeMap<usize, BucketStats> = lengths
        .clone()
        .map(|len| {
            (
                len,
                BucketStats {
                    len,
                    ..Default::default()
                },
            )
        })
        .collect();
    let mut seen = HashSet::new();

    for word in safe {
        let len = word.keys.len();
        let (Some(bucket), Some(stat)) = (entries.get_mut(&len), stats.get_mut(&len)) else {
            continue;
        };
        stat.candidates += 1;
        if !seen.insert(&word.keys) {
            stat.duplicates += 1;
            continue;
        }
        if caps.cap(len).is_some_and(|max| bucket.len() >= max) {
            stat.capped += 1;
            continue;
        }
        bucket.push(TableEntry {
            keys: word.keys.clone(),
            word: word.word.clone(),
        });
    }

    let mut buckets = BTreeMap::new();
    for (len, mut list) in entries {
        list.sort_by(|a, b| a.keys.cmp(&b.keys));
        if let Some(stat) = stats.get_mut(&len) {
            stat.kept = list.len();
            debug!(
                len,
                kept = stat.kept,
                duplicates = stat.duplicates,
                capped = stat.capped
            );
        }
        buckets.insert(
            len,
            Bucket {
                word_len: len,
                entries: list,
            },
        );
    }

    (SafeTables { buckets }, stats.into_values().collect())
}
