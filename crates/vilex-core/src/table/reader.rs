use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs::File;
use std::ops::RangeInclusive;
use std::path::Path;

use memmap2::Mmap;

use crate::keycode::{self, KeySequence};

use super::{table_file_name, TableError};

#[derive(Debug)]
enum TableData {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl TableData {
    fn bytes(&self) -> &[u8] {
        match self {
            Self::Owned(v) => v.as_slice(),
            Self::Mapped(m) => &m[..],
        }
    }
}

/// A validated `common_{L}chars.bin` table, searched the way the engine
/// searches it: binary search over fixed-width little-endian records.
#[derive(Debug)]
pub struct SafeTable {
    word_len: usize,
    data: TableData,
}

impl SafeTable {
    pub fn from_bytes(word_len: usize, bytes: Vec<u8>) -> Result<Self, TableError> {
        validate(&bytes, word_len)?;
        Ok(Self {
            word_len,
            data: TableData::Owned(bytes),
        })
    }

    /// Open a table file, using mmap for zero-copy access.
    pub fn open(path: &Path, word_len: usize) -> Result<Self, TableError> {
        if word_len == 0 {
            return Err(TableError::ZeroLength);
        }
        let file = File::open(path)?;
        // Empty tables are valid but cannot be mapped on every platform.
        if file.metadata()?.len() == 0 {
            return Ok(Self {
                word_len,
                data: TableData::Owned(Vec::new()),
            });
        }
        // SAFETY: The file is opened read-only and the mapping is immutable.
        let mmap = unsafe { Mmap::map(&file)? };
        validate(&mmap, word_len)?;
        Ok(Self {
            word_len,
            data: TableData::Mapped(mmap),
        })
    }

    pub fn word_len(&self) -> usize {
        self.word_len
    }

    pub fn record_count(&self) -> usize {
        self.data.bytes().len() / (self.word_len * 2)
    }

    pub fn byte_len(&self) -> usize {
        self.data.bytes().len()
    }

    pub fn record(&self, index: usize) -> Option<KeySequence> {
        if index >= self.record_count() {
            return None;
        }
        KeySequence::from_keys(&decode(self.data.bytes(), self.word_len, index))
    }

    pub fn records(&self) -> impl Iterator<Item = KeySequence> + '_ {
        (0..self.record_count()).filter_map(move |i| self.record(i))
    }

    pub fn contains(&self, keys: &[u16]) -> bool {
        if keys.len() != self.word_len {
            return false;
        }
        let bytes = self.data.bytes();
        let mut left = 0;
        let mut right = self.record_count();
        while left < right {
            let mid = left + (right - left) / 2;
            match compare(bytes, self.word_len, mid, keys) {
                Ordering::Equal => return true,
                Ordering::Less => left = mid + 1,
                Ordering::Greater => right = mid,
            }
        }
        false
    }
}

fn decode(bytes: &[u8], word_len: usize, index: usize) -> Vec<u16> {
    let start = index * word_len * 2;
    bytes[start..start + word_len * 2]
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

fn compare(bytes: &[u8], word_len: usize, index: usize, target: &[u16]) -> Ordering {
    let start = index * word_len * 2;
    for (i, &want) in target.iter().enumerate() {
        let off = start + i * 2;
        let key = u16::from_le_bytes([bytes[off], bytes[off + 1]]);
        match key.cmp(&want) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    Ordering::Equal
}

/// Check record size, key validity and strict ordering.
fn validate(bytes: &[u8], word_len: usize) -> Result<(), TableError> {
    if word_len == 0 {
        return Err(TableError::ZeroLength);
    }
    let record = word_len * 2;
    if bytes.len() % record != 0 {
        return Err(TableError::BadSize {
            size: bytes.len(),
            record,
        });
    }
    let mut prev: Option<Vec<u16>> = None;
    for index in 0..bytes.len() / record {
        let keys = decode(bytes, word_len, index);
        if let Some(&key) = keys.iter().find(|&&k| keycode::letter(k).is_none()) {
            return Err(TableError::InvalidKey { record: index, key });
        }
        if prev.as_ref().is_some_and(|p| *p >= keys) {
            return Err(TableError::Unsorted { record: index });
        }
        prev = Some(keys);
    }
    Ok(())
}

/// The tables of a directory, keyed by word length.
pub struct SafeTableSet {
    tables: BTreeMap<usize, SafeTable>,
}

impl SafeTableSet {
    /// Open `common_{L}chars.bin` for every `L` in `lengths` that exists.
    pub fn open_dir(dir: &Path, lengths: RangeInclusive<usize>) -> Result<Self, TableError> {
        let mut tables = BTreeMap::new();
        for len in lengths {
            let path = dir.join(table_file_name(len));
            if !path.is_file() {
                continue;
            }
            tables.insert(len, SafeTable::open(&path, len)?);
        }
        Ok(Self { tables })
    }

    pub fn get(&self, len: usize) -> Option<&SafeTable> {
        self.tables.get(&len)
    }

    pub fn tables(&self) -> impl Iterator<Item = &SafeTable> {
        self.tables.values()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn contains_keys(&self, keys: &[u16]) -> bool {
        self.tables
            .get(&keys.len())
            .is_some_and(|t| t.contains(keys))
    }

    /// Whether `word` (case-insensitive) is in its length's table.
    pub fn contains_word(&self, word: &str) -> bool {
        KeySequence::from_word(&word.to_lowercase())
            .is_some_and(|seq| self.contains_keys(seq.keys()))
    }
}
