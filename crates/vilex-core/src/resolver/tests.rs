use super::*;
use crate::exclusions::Blacklist;
use crate::settings::{parse_settings_toml, DEFAULT_SETTINGS_TOML};

fn settings() -> Settings {
    parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap()
}

fn resolve(oracle: &ConflictOracle, blacklist: &Blacklist, source: &str, output: &str) -> Result<KeySequence, Rejection> {
    let s = settings();
    Resolver::new(oracle, blacklist, &s).resolve(&CandidateWord::new(source, output))
}

#[test]
fn parse_line_columns() {
    let c = CandidateWord::parse_line("Orf  Ỏn extra columns").unwrap();
    assert_eq!(c.source, "orf");
    assert_eq!(c.output, "ỏn");
    assert!(CandidateWord::parse_line("lonely").is_none());
    assert!(CandidateWord::parse_line("").is_none());
}

#[test]
fn parse_line_composes_output() {
    let c = CandidateWord::parse_line("orn o\u{0309}n").unwrap();
    assert_eq!(c.output, "ỏn");
}

#[test]
fn blacklisted_word_is_rejected_regardless_of_oracle() {
    let blacklist: Blacklist = ["aa"].into_iter().collect();
    let empty = ConflictOracle::default();
    let full = ConflictOracle::from_vocabulary("aa\nâ", &[]);
    assert_eq!(resolve(&empty, &blacklist, "aa", "aa"), Err(Rejection::Blacklisted));
    assert_eq!(resolve(&full, &blacklist, "aa", "aa"), Err(Rejection::Blacklisted));
    assert_eq!(resolve(&empty, &blacklist, "AA", "â"), Err(Rejection::Blacklisted));
}

#[test]
fn short_word_not_in_oracle_is_safe() {
    let oracle = ConflictOracle::default();
    let keys = resolve(&oracle, &Blacklist::default(), "if", "if").unwrap();
    assert_eq!(keys.keys(), &[34, 3]);
}

#[test]
fn oracle_conflict() {
    let oracle = ConflictOracle::from_vocabulary("ỏn", &[]);
    assert_eq!(
        resolve(&oracle, &Blacklist::default(), "orf", "ỏn"),
        Err(Rejection::OracleConflict)
    );
}

#[test]
fn non_alphabetic_and_length() {
    let oracle = ConflictOracle::default();
    let bl = Blacklist::default();
    assert_eq!(resolve(&oracle, &bl, "don't", "x"), Err(Rejection::NotAlphabetic));
    assert_eq!(resolve(&oracle, &bl, "abc1", "x"), Err(Rejection::NotAlphabetic));
    assert_eq!(resolve(&oracle, &bl, "a", "a"), Err(Rejection::LengthOutOfRange));
    assert_eq!(
        resolve(&oracle, &bl, "abcdefghi", "x"),
        Err(Rejection::LengthOutOfRange)
    );
    assert!(resolve(&oracle, &bl, "abcdefgh", "x").is_ok());
}

#[test]
fn reserved_endings() {
    let oracle = ConflictOracle::default();
    let bl = Blacklist::default();
    assert_eq!(resolve(&oracle, &bl, "raj", "rạ"), Err(Rejection::ReservedEnding));
    assert_eq!(resolve(&oracle, &bl, "quiz", "qui"), Err(Rejection::ReservedEnding));
}

#[test]
fn guarded_ending() {
    let oracle = ConflictOracle::default();
    let bl = Blacklist::default();
    // Allowed before a final f: vowels and y, l, r, f.
    for w in ["of", "off", "elf", "scarf", "leaf", "chef"] {
        assert!(resolve(&oracle, &bl, w, "x").is_ok(), "{w}");
    }
    for w in ["tf", "inf", "bmf"] {
        assert_eq!(resolve(&oracle, &bl, w, "x"), Err(Rejection::GuardedEnding), "{w}");
    }
}

#[test]
fn unmappable_letters() {
    let oracle = ConflictOracle::default();
    let bl = Blacklist::default();
    assert_eq!(resolve(&oracle, &bl, "café", "x"), Err(Rejection::Unmappable));
    assert_eq!(resolve(&oracle, &bl, "straße", "x"), Err(Rejection::Unmappable));
}

#[test]
fn check_order() {
    // Blacklist is checked before the oracle, the oracle before endings.
    let blacklist: Blacklist = ["raj"].into_iter().collect();
    let oracle = ConflictOracle::from_vocabulary("rạ\nrá", &[]);
    assert_eq!(resolve(&oracle, &blacklist, "raj", "rạ"), Err(Rejection::Blacklisted));
    assert_eq!(
        resolve(&oracle, &Blacklist::default(), "raj", "rạ"),
        Err(Rejection::OracleConflict)
    );
    assert_eq!(
        resolve(&ConflictOracle::default(), &Blacklist::default(), "raj", "rạ"),
        Err(Rejection::ReservedEnding)
    );
}

#[test]
fn resolve_corpus_stats() {
    let s = settings();
    let oracle = ConflictOracle::from_vocabulary("ỏn", &[]);
    let blacklist: Blacklist = ["aa"].into_iter().collect();
    let resolver = Resolver::new(&oracle, &blacklist, &s);
    let corpus = "if if\n\naa aa\norf ỏn\nlonely\nthe the\nquiz qui\nthe the\n";
    let r = resolver.resolve_corpus(corpus);

    let words: Vec<&str> = r.safe.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(words, vec!["if", "the", "the"]);
    assert_eq!(r.stats.lines, 8);
    assert_eq!(r.stats.blank, 1);
    assert_eq!(r.stats.malformed, 1);
    assert_eq!(r.stats.safe, 3);
    assert_eq!(r.stats.rejected[&Rejection::Blacklisted], 1);
    assert_eq!(r.stats.rejected[&Rejection::OracleConflict], 1);
    assert_eq!(r.stats.rejected[&Rejection::ReservedEnding], 1);
}

#[test]
fn conflict_on_any_line_vetoes_word() {
    let s = settings();
    let oracle = ConflictOracle::from_vocabulary("ỏn", &[]);
    let blacklist = Blacklist::default();
    let resolver = Resolver::new(&oracle, &blacklist, &s);
    let r = resolver.resolve_corpus("orn orn\norn ỏn\n");
    assert!(r.safe.is_empty());
    assert_eq!(r.stats.vetoed, 1);
    assert_eq!(r.stats.safe, 0);
}
