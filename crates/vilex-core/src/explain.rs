//! Why a word was curated or rejected, and whether it would be safe.

use serde::Serialize;

use crate::exclusions::Exclusions;
use crate::lexicon::{detect_loanword, Category, Classifier, LoanwordHeuristic};
use crate::resolver::{CandidateWord, ConflictOracle, Rejection, Resolver};
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub word: String,
    /// `None` for a blank word.
    pub category: Option<&'static str>,
    pub loanword_heuristic: Option<LoanwordHeuristic>,
    pub resolution: Option<ResolutionExplanation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionExplanation {
    pub source: String,
    pub output: String,
    pub in_oracle: bool,
    pub safe: bool,
    pub rejection: Option<Rejection>,
    pub keys: Option<Vec<u16>>,
}

/// Explain `word` as a wordlist entry and, given its Telex `output`, as a
/// corpus line.
pub fn explain(
    word: &str,
    output: Option<&str>,
    exclusions: &Exclusions,
    oracle: &ConflictOracle,
    settings: &Settings,
) -> Explanation {
    let classifier = Classifier::new(&exclusions.loanwords, &settings.classifier);
    let entry = classifier.classify(word);
    let loanword_heuristic = entry
        .as_ref()
        .filter(|e| e.category() == Category::Loanword)
        .and_then(|e| detect_loanword(e.text(), &exclusions.loanwords, &settings.classifier));

    let resolution = output.map(|output| {
        let candidate = CandidateWord::new(word.trim(), output.trim());
        let decision = Resolver::new(oracle, &exclusions.blacklist, settings).resolve(&candidate);
        ResolutionExplanation {
            in_oracle: oracle.contains(&candidate.output),
            safe: decision.is_ok(),
            rejection: decision.as_ref().err().copied(),
            keys: decision.ok().map(|k| k.keys().to_vec()),
            source: candidate.source,
            output: candidate.output,
        }
    });

    Explanation {
        word: word.to_string(),
        category: entry.map(|e| e.category().label()),
        loanword_heuristic,
        resolution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exclusions::{self, parse_exclusions_toml};
    use crate::settings::{self, parse_settings_toml};

    fn setup() -> (Exclusions, Settings) {
        (
            parse_exclusions_toml(exclusions::default_toml()).unwrap(),
            parse_settings_toml(settings::default_toml()).unwrap(),
        )
    }

    #[test]
    fn explains_category_only() {
        let (exclusions, settings) = setup();
        let oracle = ConflictOracle::from_vocabulary("", &[]);
        let e = explain("hello!", None, &exclusions, &oracle, &settings);
        assert_eq!(e.category, Some("contains_exclamation"));
        assert_eq!(e.loanword_heuristic, None);
        assert!(e.resolution.is_none());

        let e = explain("biển", None, &exclusions, &oracle, &settings);
        assert_eq!(e.category, Some("native"));

        let e = explain("   ", None, &exclusions, &oracle, &settings);
        assert_eq!(e.category, None);
    }

    #[test]
    fn names_loanword_heuristic() {
        let (exclusions, settings) = setup();
        let oracle = ConflictOracle::from_vocabulary("", &[]);
        let e = explain("xyz", None, &exclusions, &oracle, &settings);
        assert_eq!(e.category, Some("loanword_or_foreign"));
        assert_eq!(e.loanword_heuristic, Some(LoanwordHeuristic::ShortUnaccented));
    }

    #[test]
    fn explains_resolution() {
        let (exclusions, settings) = setup();
        let oracle = ConflictOracle::from_vocabulary("\u{1ecf}n\n", &[]);

        let e = explain("orf", Some("\u{1ecf}n"), &exclusions, &oracle, &settings);
        let r = e.resolution.unwrap();
        assert!(r.in_oracle);
        assert!(!r.safe);
        assert_eq!(r.rejection, Some(Rejection::OracleConflict));
        assert_eq!(r.keys, None);

        let e = explain("Ort", Some("ort"), &exclusions, &oracle, &settings);
        let r = e.resolution.unwrap();
        assert_eq!(r.source, "ort");
        assert!(r.safe);
        assert_eq!(r.keys, Some(vec![31, 15, 17]));
    }

    #[test]
    fn serializes_as_json() {
        let (exclusions, settings) = setup();
        let oracle = ConflictOracle::from_vocabulary("", &[]);
        let e = explain("jazz", Some("jazz"), &exclusions, &oracle, &settings);
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["resolution"]["rejection"], "reserved_ending");
        assert_eq!(json["loanword_heuristic"], "short_unaccented");
    }
}
