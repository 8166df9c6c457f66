use std::path::{Path, PathBuf};
use std::process;

use serde::Serialize;

use vilex_core::exclusions::exclusions;
use vilex_core::lexicon::ClassifyStats;
use vilex_core::pipeline::{self, BuildOptions, BuildReport, StageError};
use vilex_core::resolver::ConflictOracle;
use vilex_core::settings::settings;
use vilex_core::table::{KeyNotation, OutputFormat};

use super::classify_ops::run_classify;
use super::{exit_failed, stage_failed, write_report};

pub const CURATED_FILE: &str = "vietnamese_pure.txt";
pub const REJECTED_FILE: &str = "vietnamese_loan.txt";

/// Parse the output flags, exiting on unknown names.
pub fn build_options(format: &str, notation: &str, rust_out: Option<&str>) -> BuildOptions {
    let format = OutputFormat::from_name(format).unwrap_or_else(|| {
        eprintln!("Error: unknown format '{format}' (available: bin, rust, both)");
        process::exit(1);
    });
    let notation = KeyNotation::from_name(notation).unwrap_or_else(|| {
        eprintln!("Error: unknown notation '{notation}' (available: symbolic, numeric)");
        process::exit(1);
    });
    BuildOptions {
        format,
        notation,
        source_out: rust_out.map(PathBuf::from),
    }
}

/// Run the build stage, printing progress. `None` if it failed.
pub fn run_build(
    corpus: &str,
    vocabulary: &str,
    out_dir: &str,
    options: &BuildOptions,
) -> Option<BuildReport> {
    eprintln!("Reading {vocabulary} and {corpus}...");
    report_build(pipeline::build_stage(
        Path::new(corpus),
        Path::new(vocabulary),
        Path::new(out_dir),
        options,
        settings(),
        &exclusions().blacklist,
    ))
}

fn report_build(result: Result<BuildReport, StageError>) -> Option<BuildReport> {
    let report = match result {
        Ok(report) => report,
        Err(e) => {
            stage_failed("build", &e);
            return None;
        }
    };

    let stats = &report.resolve;
    eprintln!("Oracle: {} syllables", report.oracle_size);
    eprintln!(
        "Corpus: {} lines, {} safe, {} vetoed, {} malformed",
        stats.lines, stats.safe, stats.vetoed, stats.malformed
    );
    for (reason, count) in &stats.rejected {
        eprintln!("  rejected {reason:?}: {count}");
    }
    for bucket in &report.buckets {
        eprintln!(
            "  {} letters: {} words ({} duplicates, {} capped)",
            bucket.len, bucket.kept, bucket.duplicates, bucket.capped
        );
    }
    for artifact in &report.artifacts {
        eprintln!("Wrote {} ({} bytes)", artifact.path.display(), artifact.bytes);
    }
    eprintln!("Total: {} safe words", report.word_count());
    Some(report)
}

pub fn build(
    corpus: &str,
    vocabulary: &str,
    out_dir: &str,
    options: &BuildOptions,
    report: Option<&str>,
) {
    let Some(build) = run_build(corpus, vocabulary, out_dir, options) else {
        exit_failed();
    };
    if let Some(path) = report {
        write_report(path, &build);
    }
}

#[derive(Debug, Serialize)]
pub struct PipelineReport {
    pub classify: Option<ClassifyStats>,
    pub build: Option<BuildReport>,
}

impl PipelineReport {
    pub fn failed(&self) -> bool {
        self.classify.is_none() || self.build.is_none()
    }
}

/// Classify `raw` into `work_dir`, then build the tables there with the
/// curated entries of this run as the oracle. Build is skipped when
/// classify fails, so tables never come from an older curated list.
pub fn run_pipeline(
    raw: &str,
    corpus: &str,
    work_dir: &str,
    options: &BuildOptions,
) -> PipelineReport {
    let dir = Path::new(work_dir);
    let curated = dir.join(CURATED_FILE).to_string_lossy().into_owned();
    let rejected = dir.join(REJECTED_FILE).to_string_lossy().into_owned();

    let Some(partition) = run_classify(raw, &curated, &rejected) else {
        eprintln!("Skipping build: no curated vocabulary from this run");
        return PipelineReport {
            classify: None,
            build: None,
        };
    };

    let oracle = ConflictOracle::from_entries(&partition.curated, &settings().oracle.extra);
    eprintln!("Reading {corpus}...");
    let build = report_build(pipeline::build_with_oracle(
        Path::new(corpus),
        &oracle,
        dir,
        options,
        settings(),
        &exclusions().blacklist,
    ));
    PipelineReport {
        classify: Some(partition.stats),
        build,
    }
}

pub fn pipeline(
    raw: &str,
    corpus: &str,
    work_dir: &str,
    options: &BuildOptions,
    report: Option<&str>,
) {
    let result = run_pipeline(raw, corpus, work_dir, options);
    if let Some(path) = report {
        write_report(path, &result);
    }
    if result.failed() {
        exit_failed();
    }
}
