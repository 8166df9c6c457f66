use proptest::prelude::*;

use super::*;
use crate::exclusions::LoanwordLexicon;
use crate::settings::ClassifierSettings;

fn settings() -> ClassifierSettings {
    ClassifierSettings {
        short_word_max_len: 4,
        max_consonant_run: 3,
        max_consonant_ratio: 0.6,
    }
}

fn lexicon() -> LoanwordLexicon {
    ["album", "ôtô", "ASEAN"].into_iter().collect()
}

#[test]
fn exclamation_category() {
    let lex = lexicon();
    let s = settings();
    let c = Classifier::new(&lex, &s);
    let entry = c.classify("hello!").unwrap();
    assert_eq!(entry.category(), Category::ExclamatoryMark);
    assert_eq!(entry.category().label(), "contains_exclamation");
}

#[test]
fn number_category() {
    let lex = lexicon();
    let s = settings();
    let c = Classifier::new(&lex, &s);
    let entry = c.classify("abc123").unwrap();
    assert_eq!(entry.category(), Category::NumericContent);
    assert_eq!(entry.category().label(), "contains_number");
}

#[test]
fn exclamation_beats_number() {
    let lex = lexicon();
    let s = settings();
    let c = Classifier::new(&lex, &s);
    assert_eq!(c.category("abc123!"), Category::ExclamatoryMark);
}

#[test]
fn number_beats_special_char() {
    let lex = lexicon();
    let s = settings();
    let c = Classifier::new(&lex, &s);
    assert_eq!(c.category("a-1"), Category::NumericContent);
    assert_eq!(c.category("a-b"), Category::ForeignScript);
    assert_eq!(c.category("a-b").label(), "contains_special_char");
}

#[test]
fn only_decimal_digits_are_numbers() {
    let lex = lexicon();
    let s = settings();
    let c = Classifier::new(&lex, &s);
    assert_eq!(c.category("a0"), Category::NumericContent);
    assert_eq!(c.category("9"), Category::NumericContent);
    for w in ["½", "chươngⅫ"] {
        assert_eq!(c.category(w), Category::ForeignScript, "{w}");
    }
}

#[test]
fn special_char_beats_loanword() {
    let lex = lexicon();
    let s = settings();
    let c = Classifier::new(&lex, &s);
    // Would be a loanword by spelling, but the hyphen is checked first.
    assert_eq!(c.category("e-mail"), Category::ForeignScript);
    // Uppercase accented letters are outside the alphabet.
    assert_eq!(c.category("Ánh"), Category::ForeignScript);
}

#[test]
fn loanwords() {
    let lex = lexicon();
    let s = settings();
    let c = Classifier::new(&lex, &s);
    for w in ["album", "ôtô", "asean", "computer", "ABC"] {
        assert_eq!(c.category(w), Category::Loanword, "{w}");
    }
    assert_eq!(Category::Loanword.label(), "loanword_or_foreign");
}

#[test]
fn native_words() {
    let lex = lexicon();
    let s = settings();
    let c = Classifier::new(&lex, &s);
    for w in ["tiếng", "việt", "đường", "con mèo", "ỏn"] {
        assert_eq!(c.category(w), Category::Native, "{w}");
    }
}

#[test]
fn classify_trims_and_composes() {
    let lex = lexicon();
    let s = settings();
    let c = Classifier::new(&lex, &s);
    let entry = c.classify("  o\u{0309}n \n").unwrap();
    assert_eq!(entry.text(), "ỏn");
    assert_eq!(entry.category(), Category::Native);
    assert!(c.classify("   ").is_none());
    assert!(c.classify("").is_none());
}

#[test]
fn custom_rule_chain() {
    struct Everything;
    impl Rule for Everything {
        fn category(&self) -> Category {
            Category::Loanword
        }
        fn matches(&self, _word: &str) -> bool {
            true
        }
    }
    let c = Classifier::with_rules(vec![Box::new(NumberRule), Box::new(Everything)]);
    assert_eq!(c.category("a1"), Category::NumericContent);
    assert_eq!(c.category("tiếng"), Category::Loanword);
    let empty = Classifier::with_rules(Vec::new());
    assert_eq!(empty.category("a1"), Category::Native);
}

#[test]
fn partition_keeps_order_and_counts() {
    let lex = lexicon();
    let s = settings();
    let c = Classifier::new(&lex, &s);
    let input = "tiếng\nhello!\n\nabc123\nviệt\nalbum\na-b\n";
    let p = c.partition(input);

    let curated: Vec<&str> = p.curated.iter().map(|e| e.text()).collect();
    assert_eq!(curated, vec!["tiếng", "việt"]);
    let rejected: Vec<(&str, Category)> = p
        .rejected
        .iter()
        .map(|e| (e.text(), e.category()))
        .collect();
    assert_eq!(
        rejected,
        vec![
            ("hello!", Category::ExclamatoryMark),
            ("abc123", Category::NumericContent),
            ("album", Category::Loanword),
            ("a-b", Category::ForeignScript),
        ]
    );
    assert_eq!(
        p.stats,
        ClassifyStats {
            total: 6,
            native: 2,
            loanword: 1,
            numeric: 1,
            exclamation: 1,
            special: 1,
        }
    );
    assert_eq!(p.stats.rejected(), 4);
}

#[test]
fn write_outputs() {
    let lex = lexicon();
    let s = settings();
    let c = Classifier::new(&lex, &s);
    let p = c.partition("tiếng\nhello!\n");

    let mut curated = Vec::new();
    write_curated(&p.curated, &mut curated).unwrap();
    assert_eq!(String::from_utf8(curated).unwrap(), "tiếng\n");

    let mut rejected = Vec::new();
    write_rejected(&p.rejected, &mut rejected).unwrap();
    let text = String::from_utf8(rejected).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with('#'));
    assert!(lines[1].starts_with('#'));
    assert!(lines[2].starts_with('#'));
    assert_eq!(lines[3], "");
    assert_eq!(lines[4], "hello! | contains_exclamation");
    assert_eq!(lines.len(), 5);
}

proptest! {
    #[test]
    fn partition_is_exhaustive(lines in prop::collection::vec("[a-zđêôơư1! -]{0,8}", 0..40)) {
        let lex = lexicon();
        let s = settings();
        let c = Classifier::new(&lex, &s);
        let input = lines.join("\n");
        let non_blank = lines.iter().filter(|l| !l.trim().is_empty()).count();
        let p = c.partition(&input);
        prop_assert_eq!(p.curated.len() + p.rejected.len(), non_blank);
        prop_assert_eq!(p.stats.total, non_blank);
        prop_assert!(p.rejected.iter().all(|e| e.category() != Category::Native));
    }

    #[test]
    fn curated_words_are_pure(lines in prop::collection::vec("[a-zàáđêôơưạ1! -]{1,8}", 0..40)) {
        let lex = lexicon();
        let s = settings();
        let c = Classifier::new(&lex, &s);
        let p = c.partition(&lines.join("\n"));
        for entry in &p.curated {
            let w = entry.text();
            prop_assert!(!w.contains('!'));
            prop_assert!(!w.chars().any(|c| c.is_ascii_digit()));
            prop_assert!(w.chars().all(crate::unicode::is_allowed));
            prop_assert!(!is_loanword(w, &lex, &s));
        }
    }
}
