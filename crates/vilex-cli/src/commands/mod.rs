use std::fs;
use std::path::Path;
use std::process;

use serde::Serialize;

use vilex_core::pipeline::{self, StageError};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod build_ops;
pub mod classify_ops;
pub mod config_ops;
pub mod table_ops;

/// Install custom settings and exclusions. Must run before any command
/// reads them.
pub fn init_config(settings: Option<&str>, exclusions: Option<&str>) {
    if let Some(file) = settings {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(
            vilex_core::settings::init_custom(content),
            "Error in {file}: {}"
        );
        tracing::debug!(file, "custom settings installed");
    }
    if let Some(file) = exclusions {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(
            vilex_core::exclusions::init_custom(content),
            "Error in {file}: {}"
        );
        tracing::debug!(file, "custom exclusions installed");
    }
}

fn write_report<T: Serialize>(path: &str, report: &T) {
    let json = die!(
        serde_json::to_string_pretty(report),
        "Error serializing report: {}"
    );
    die!(
        pipeline::write_atomic(Path::new(path), json.as_bytes()),
        "Error writing report: {}"
    );
    eprintln!("Wrote report to {path}");
}

fn print_json<T: Serialize>(value: &T) {
    let json = die!(serde_json::to_string_pretty(value), "Error: {}");
    println!("{json}");
}

/// A failed stage produces no output but does not stop its siblings.
fn stage_failed(stage: &str, err: &StageError) {
    eprintln!("Error: {stage} stage failed: {err}");
}

fn exit_failed() -> ! {
    process::exit(1)
}
