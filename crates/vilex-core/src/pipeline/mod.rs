//! File-level stages: classify a raw wordlist, build the safe-word tables,
//! verify tables already on disk.
//!
//! Each stage reads its inputs completely before doing any work and either
//! returns a report or a single [`StageError`]. Outputs are written
//! atomically, so a failed stage never leaves a truncated artifact behind.


use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::exclusions::{Blacklist, LoanwordLexicon};
use crate::lexicon::{write_curated, write_rejected, Classifier, Partition};
use crate::resolver::{CandidateWord, ConflictOracle, ResolveStats, Resolver};
use crate::settings::{ClassifierSettings, Settings};
use crate::table::{
    encoders_for, select, BucketStats, KeyNotation, OutputFormat, SafeTableSet, SourceEncoder,
    TableError,
};

#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("table error: {0}")]
    Table(#[from] TableError),
}

impl StageError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read a whole UTF-8 input file.
pub fn read_input(path: &Path) -> Result<String, StageError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => StageError::MissingInput(path.to_path_buf()),
        _ => StageError::io(path, e),
    })
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Atomic write: write to .tmp then rename.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StageError> {
    write_all_atomic(&[(path.to_path_buf(), bytes)])
}

/// Write a set of files so that either all of them are replaced or none.
///
/// Every file goes to its `.tmp` sibling first; renames start only after
/// all writes succeeded. Temporary files are removed on any error.
pub fn write_all_atomic<B: AsRef<[u8]>>(files: &[(PathBuf, B)]) -> Result<(), StageError> {
    for (path, _) in files {
        if path.is_dir() {
            return Err(StageError::io(
                path,
                io::Error::other("destination is a directory"),
            ));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StageError::io(parent, e))?;
        }
    }

    let tmps: Vec<PathBuf> = files.iter().map(|(path, _)| tmp_path(path)).collect();
    let cleanup = |tmps: &[PathBuf]| {
        for tmp in tmps {
            let _ = fs::remove_file(tmp);
        }
    };

    for (tmp, (_, bytes)) in tmps.iter().zip(files) {
        if let Err(e) = fs::write(tmp, bytes.as_ref()) {
            cleanup(&tmps);
            return Err(StageError::io(tmp, e));
        }
    }
    for (i, (tmp, (path, _))) in tmps.iter().zip(files).enumerate() {
        if let Err(e) = fs::rename(tmp, path) {
            cleanup(&tmps[i..]);
            return Err(StageError::io(path, e));
        }
    }
    Ok(())
}

/// Classify `input` and write the curated and rejected lists.
///
/// Returns the whole partition so a following build can use the curated
/// entries of this very run as its oracle.
pub fn classify_stage(
    input: &Path,
    curated_out: &Path,
    rejected_out: &Path,
    lexicon: &LoanwordLexicon,
    settings: &ClassifierSettings,
) -> Result<Partition, StageError> {
    let _span = debug_span!("classify_stage", input = %input.display()).entered();
    let text = read_input(input)?;
    let partition = Classifier::new(lexicon, settings).partition(&text);

    let mut curated = Vec::new();
    write_curated(&partition.curated, &mut curated).map_err(|e| StageError::io(curated_out, e))?;
    let mut rejected = Vec::new();
    write_rejected(&partition.rejected, &mut rejected)
        .map_err(|e| StageError::io(rejected_out, e))?;

    write_all_atomic(&[
        (curated_out.to_path_buf(), curated),
        (rejected_out.to_path_buf(), rejected),
    ])?;
    Ok(partition)
}

/// Output choices for [`build_stage`].
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub format: OutputFormat,
    pub notation: KeyNotation,
    /// Where the textual table goes; defaults to `safe_words.rs` in the
    /// output directory. A relative path is taken as is, not joined to the
    /// output directory.
    pub source_out: Option<PathBuf>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Binary,
            notation: KeyNotation::Symbolic,
            source_out: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenArtifact {
    pub path: PathBuf,
    pub bytes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub oracle_size: usize,
    pub resolve: ResolveStats,
    pub buckets: Vec<BucketStats>,
    pub artifacts: Vec<WrittenArtifact>,
}

impl BuildReport {
    pub fn word_count(&self) -> usize {
        self.buckets.iter().map(|b| b.kept).sum()
    }
}

impl BuildOptions {
    /// Destination of an encoder artifact.
    pub fn artifact_path(&self, out_dir: &Path, name: &str) -> PathBuf {
        match &self.source_out {
            Some(path) if name == SourceEncoder::DEFAULT_FILE_NAME => path.clone(),
            _ => out_dir.join(name),
        }
    }
}

/// Resolve the corpus against the curated vocabulary and write the tables.
///
/// Both inputs are read in full before anything is written; a missing one
/// fails the stage with no output.
pub fn build_stage(
    corpus: &Path,
    vocabulary: &Path,
    out_dir: &Path,
    options: &BuildOptions,
    settings: &Settings,
    blacklist: &Blacklist,
) -> Result<BuildReport, StageError> {
    let vocabulary_text = read_input(vocabulary)?;
    let oracle = ConflictOracle::from_vocabulary(&vocabulary_text, &settings.oracle.extra);
    build_with_oracle(corpus, &oracle, out_dir, options, settings, blacklist)
}

/// [`build_stage`] against an oracle the caller already holds, such as the
/// curated entries of a classify run.
///
/// The tables are written as one set: if any of them cannot be written,
/// none of the previous tables is replaced.
pub fn build_with_oracle(
    corpus: &Path,
    oracle: &ConflictOracle,
    out_dir: &Path,
    options: &BuildOptions,
    settings: &Settings,
    blacklist: &Blacklist,
) -> Result<BuildReport, StageError> {
    let _span = debug_span!("build_stage", corpus = %corpus.display()).entered();
    let corpus_text = read_input(corpus)?;

    let resolution = Resolver::new(oracle, blacklist, settings).resolve_corpus(&corpus_text);
    let (tables, buckets) = select(
        &resolution.safe,
        settings.lengths.range(),
        settings.cap_policy(),
    );

    let encoders = encoders_for(options.format, SourceEncoder::new(options.notation));
    let files: Vec<(PathBuf, Vec<u8>)> = encoders
        .iter()
        .flat_map(|encoder| encoder.encode(&tables))
        .map(|artifact| {
            let path = options.artifact_path(out_dir, &artifact.name);
            (path, artifact.bytes)
        })
        .collect();
    write_all_atomic(&files)?;

    let artifacts = files
        .iter()
        .map(|(path, bytes)| {
            debug!(path = %path.display(), bytes = bytes.len(), "wrote");
            WrittenArtifact {
                path: path.clone(),
                bytes: bytes.len(),
            }
        })
        .collect();

    Ok(BuildReport {
        oracle_size: oracle.len(),
        resolve: resolution.stats,
        buckets,
        artifacts,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub len: usize,
    pub records: usize,
    pub bytes: usize,
}

/// Per-length record counts of an opened table set.
pub fn summarize(tables: &SafeTableSet) -> Vec<TableSummary> {
    tables
        .tables()
        .map(|t| TableSummary {
            len: t.word_len(),
            records: t.record_count(),
            bytes: t.byte_len(),
        })
        .collect()
}

/// A table word whose recorded Telex output is a Vietnamese syllable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub word: String,
    pub output: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub tables: Vec<TableSummary>,
    /// Configured lengths with no table file.
    pub missing: Vec<usize>,
    pub collisions: Vec<Collision>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.collisions.is_empty()
    }
}

/// Corpus and vocabulary used to re-check tables for collisions.
#[derive(Debug, Clone)]
pub struct CollisionCheck {
    pub corpus: PathBuf,
    pub vocabulary: PathBuf,
}

/// Re-read the binary tables in `dir`.
///
/// Opening a table validates its size, keys and ordering, so a corrupt
/// table fails the stage. With `check`, every corpus line whose word is in
/// a table is also tested against the oracle.
pub fn verify_stage(
    dir: &Path,
    settings: &Settings,
    check: Option<&CollisionCheck>,
) -> Result<VerifyReport, StageError> {
    let _span = debug_span!("verify_stage", dir = %dir.display()).entered();
    if !dir.is_dir() {
        return Err(StageError::MissingInput(dir.to_path_buf()));
    }
    let tables = SafeTableSet::open_dir(dir, settings.lengths.range())?;
    let mut report = VerifyReport {
        tables: summarize(&tables),
        missing: settings
            .lengths
            .range()
            .filter(|&len| tables.get(len).is_none())
            .collect(),
        collisions: Vec::new(),
    };

    if let Some(check) = check {
        let vocabulary = read_input(&check.vocabulary)?;
        let corpus = read_input(&check.corpus)?;
        let oracle = ConflictOracle::from_vocabulary(&vocabulary, &settings.oracle.extra);
        for candidate in corpus.lines().filter_map(CandidateWord::parse_line) {
            if oracle.contains(&candidate.output) && tables.contains_word(&candidate.source) {
                report.collisions.push(Collision {
                    word: candidate.source,
                    output: candidate.output,
                });
            }
        }
    }

    debug!(
        tables = report.tables.len(),
        missing = report.missing.len(),
        collisions = report.collisions.len(),
    );
    Ok(report)
}
