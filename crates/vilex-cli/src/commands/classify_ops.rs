use std::path::Path;

use vilex_core::exclusions::exclusions;
use vilex_core::lexicon::Partition;
use vilex_core::pipeline;
use vilex_core::settings::settings;

use super::{exit_failed, stage_failed, write_report};

/// Run the classify stage, printing progress. `None` if it failed.
pub fn run_classify(input: &str, curated_out: &str, rejected_out: &str) -> Option<Partition> {
    eprintln!("Reading {input}...");
    let result = pipeline::classify_stage(
        Path::new(input),
        Path::new(curated_out),
        Path::new(rejected_out),
        &exclusions().loanwords,
        &settings().classifier,
    );
    match result {
        Ok(partition) => {
            let stats = &partition.stats;
            eprintln!("  total:                {}", stats.total);
            eprintln!("  native:               {}", stats.native);
            eprintln!("  loanword_or_foreign:  {}", stats.loanword);
            eprintln!("  contains_number:      {}", stats.numeric);
            eprintln!("  contains_exclamation: {}", stats.exclamation);
            eprintln!("  contains_special_char: {}", stats.special);
            eprintln!("Wrote {curated_out} ({} words)", stats.native);
            eprintln!("Wrote {rejected_out} ({} words)", stats.rejected());
            Some(partition)
        }
        Err(e) => {
            stage_failed("classify", &e);
            None
        }
    }
}

pub fn classify(input: &str, curated_out: &str, rejected_out: &str, report: Option<&str>) {
    let Some(partition) = run_classify(input, curated_out, rejected_out) else {
        exit_failed();
    };
    if let Some(path) = report {
        write_report(path, &partition.stats);
    }
}
