//! Safe-word tables: selection, serialization and read-back.
//!
//! A table holds every safe word of one length `L` as a sorted list of key
//! sequences. On disk (`common_{L}chars.bin`) each record is `L`
//! little-endian `u16` key codes; there is no header, the record count is
//! the file size divided by `2 * L`.

mod encode;
mod reader;
mod select;

pub use encode::{
    encoders_for, table_file_name, Artifact, BinaryEncoder, KeyNotation, OutputFormat,
    SourceEncoder, TableEncoder,
};
pub use reader::{SafeTable, SafeTableSet};
pub use select::{select, BucketStats, CapPolicy};

use std::collections::BTreeMap;
use std::io;

use crate::keycode::KeySequence;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("word length must be positive")]
    ZeroLength,

    #[error("table size {size} is not a multiple of the {record}-byte record size")]
    BadSize { size: usize, record: usize },

    #[error("record {record}: {key} is not a known key code")]
    InvalidKey { record: usize, key: u16 },

    #[error("record {record} is not greater than the record before it")]
    Unsorted { record: usize },
}

/// A table entry: key sequence plus the word it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntry {
    pub keys: KeySequence,
    pub word: String,
}

/// All safe words of one length, strictly increasing by key sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    word_len: usize,
    entries: Vec<TableEntry>,
}

impl Bucket {
    pub fn word_len(&self) -> usize {
        self.word_len
    }

    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One bucket per configured word length, keyed by length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SafeTables {
    buckets: BTreeMap<usize, Bucket>,
}

impl SafeTables {
    pub fn get(&self, len: usize) -> Option<&Bucket> {
        self.buckets.get(&len)
    }

    /// Buckets in increasing length order.
    pub fn buckets(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.values()
    }

    pub fn word_count(&self) -> usize {
        self.buckets.values().map(|b| b.entries.len()).sum()
    }
}
