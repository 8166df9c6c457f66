use std::fmt::Write as _;

use crate::keycode;

use super::{Bucket, SafeTables};

/// A named output file produced by an encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Serializes already selected and sorted tables. Encoders never filter or
/// reorder; writing the artifacts is left to the caller.
pub trait TableEncoder {
    fn encode(&self, tables: &SafeTables) -> Vec<Artifact>;
}

pub fn table_file_name(len: usize) -> String {
    format!("common_{len}chars.bin")
}

/// One `common_{L}chars.bin` per bucket.
pub struct BinaryEncoder;

impl BinaryEncoder {
    pub fn encode_bucket(bucket: &Bucket) -> Vec<u8> {
        let mut buf = Vec::with_capacity(bucket.entries().len() * bucket.word_len() * 2);
        for entry in bucket.entries() {
            for &key in entry.keys.keys() {
                buf.extend_from_slice(&key.to_le_bytes());
            }
        }
        buf
    }
}

impl TableEncoder for BinaryEncoder {
    fn encode(&self, tables: &SafeTables) -> Vec<Artifact> {
        tables
            .buckets()
            .map(|bucket| Artifact {
                name: table_file_name(bucket.word_len()),
                bytes: Self::encode_bucket(bucket),
            })
            .collect()
    }
}

/// How key codes are spelled in generated source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyNotation {
    /// `keys::A`, for engines that define key constants.
    #[default]
    Symbolic,
    /// Plain integers.
    Numeric,
}

impl KeyNotation {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "symbolic" => Some(Self::Symbolic),
            "numeric" => Some(Self::Numeric),
            _ => None,
        }
    }

    fn render(self, code: u16) -> String {
        match self {
            Self::Symbolic => keycode::symbol(code).unwrap_or_else(|| code.to_string()),
            Self::Numeric => code.to_string(),
        }
    }
}

/// A single Rust source file with one constant array per bucket, one word
/// per line, the word itself as a trailing comment.
pub struct SourceEncoder {
    pub file_name: String,
    pub notation: KeyNotation,
}

impl SourceEncoder {
    pub const DEFAULT_FILE_NAME: &'static str = "safe_words.rs";

    pub fn new(notation: KeyNotation) -> Self {
        Self {
            file_name: Self::DEFAULT_FILE_NAME.to_string(),
            notation,
        }
    }

    pub fn render(&self, tables: &SafeTables) -> String {
        let mut out = String::from("// Generated by vilextool. Do not edit.\n");
        for bucket in tables.buckets() {
            let len = bucket.word_len();
            out.push('\n');
            let _ = writeln!(
                out,
                "/// Common {len}-letter English words safe to leave untransformed (sorted by key code)"
            );
            let _ = writeln!(out, "pub const COMMON_{len}LETTER_WORDS: &[[u16; {len}]] = &[");
            for entry in bucket.entries() {
                let keys: Vec<String> = entry
                    .keys
                    .keys()
                    .iter()
                    .map(|&k| self.notation.render(k))
                    .collect();
                let _ = writeln!(out, "    [{}], // {}", keys.join(", "), entry.word);
            }
            out.push_str("];\n");
        }
        out
    }
}

impl TableEncoder for SourceEncoder {
    fn encode(&self, tables: &SafeTables) -> Vec<Artifact> {
        vec![Artifact {
            name: self.file_name.clone(),
            bytes: self.render(tables).into_bytes(),
        }]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Binary,
    Source,
    Both,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bin" => Some(Self::Binary),
            "rust" => Some(Self::Source),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

/// Encoders for `format`. Both modes consume the same selected tables.
pub fn encoders_for(format: OutputFormat, source: SourceEncoder) -> Vec<Box<dyn TableEncoder>> {
    match format {
        OutputFormat::Binary => vec![Box::new(BinaryEncoder)],
        OutputFormat::Source => vec![Box::new(source)],
        OutputFormat::Both => vec![Box::new(BinaryEncoder), Box::new(source)],
    }
}
