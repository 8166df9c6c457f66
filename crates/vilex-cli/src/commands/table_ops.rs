use std::fs;
use std::path::{Path, PathBuf};

use vilex_core::exclusions::exclusions;
use vilex_core::explain::explain;
use vilex_core::keycode::KeySequence;
use vilex_core::pipeline::{self, CollisionCheck};
use vilex_core::resolver::ConflictOracle;
use vilex_core::settings::settings;
use vilex_core::table::SafeTableSet;

use super::{exit_failed, print_json, stage_failed};

fn open_tables(dir: &str) -> SafeTableSet {
    let path = Path::new(dir);
    if !path.is_dir() {
        eprintln!("Error: {dir} is not a directory");
        exit_failed();
    }
    let tables = die!(
        SafeTableSet::open_dir(path, settings().lengths.range()),
        "Error opening tables: {}"
    );
    if tables.is_empty() {
        eprintln!("Error: no tables found in {dir}");
        exit_failed();
    }
    tables
}

pub fn info(dir: &str) {
    let tables = open_tables(dir);
    let summary = pipeline::summarize(&tables);
    println!("Tables in {dir}:");
    for t in &summary {
        println!("  {} letters: {} words ({} bytes)", t.len, t.records, t.bytes);
    }
    println!(
        "Total: {} words",
        summary.iter().map(|t| t.records).sum::<usize>()
    );
}

pub fn lookup(dir: &str, word: &str) {
    let tables = open_tables(dir);
    let lower = word.to_lowercase();
    match KeySequence::from_word(&lower) {
        Some(keys) if tables.contains_keys(keys.keys()) => println!("{lower}: safe {keys}"),
        Some(keys) => println!("{lower}: not in tables {keys}"),
        None => println!("{lower}: has no key mapping"),
    }
}

pub fn verify(dir: &str, corpus: Option<&str>, vocabulary: Option<&str>) {
    let check = match (corpus, vocabulary) {
        (Some(corpus), Some(vocabulary)) => Some(CollisionCheck {
            corpus: PathBuf::from(corpus),
            vocabulary: PathBuf::from(vocabulary),
        }),
        _ => None,
    };
    let report = match pipeline::verify_stage(Path::new(dir), settings(), check.as_ref()) {
        Ok(report) => report,
        Err(e) => {
            stage_failed("verify", &e);
            exit_failed();
        }
    };

    for t in &report.tables {
        println!("  {} letters: {} words, ok", t.len, t.records);
    }
    for len in &report.missing {
        println!("  {len} letters: missing");
    }
    if check.is_some() {
        for c in &report.collisions {
            println!("  collision: {} -> {}", c.word, c.output);
        }
        println!("Collisions: {}", report.collisions.len());
    }
    if !report.is_clean() {
        exit_failed();
    }
    println!("OK");
}

pub fn explain_cmd(word: &str, output: Option<&str>, vocabulary: Option<&str>) {
    let s = settings();
    let text = match vocabulary {
        Some(file) => die!(fs::read_to_string(file), "Error reading {file}: {}"),
        None => String::new(),
    };
    let oracle = ConflictOracle::from_vocabulary(&text, &s.oracle.extra);
    let result = explain(word, output, exclusions(), &oracle, s);
    print_json(&result);
}
