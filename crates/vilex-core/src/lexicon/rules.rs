use crate::exclusions::LoanwordLexicon;
use crate::settings::ClassifierSettings;
use crate::unicode::is_allowed;

use super::loanword;
use super::Category;

/// A single classification rule. The classifier tries its rules in order
/// and labels a word with the category of the first one that matches.
pub trait Rule {
    fn category(&self) -> Category;
    fn matches(&self, word: &str) -> bool;
}

/// Contains `!`.
pub struct ExclamationRule;

impl Rule for ExclamationRule {
    fn category(&self) -> Category {
        Category::ExclamatoryMark
    }

    fn matches(&self, word: &str) -> bool {
        word.contains('!')
    }
}

/// Contains an ASCII decimal digit. Other numeric characters (`½`, `Ⅻ`,
/// non-Latin digits) are outside the alphabet and fall to
/// [`ForeignScriptRule`].
pub struct NumberRule;

impl Rule for NumberRule {
    fn category(&self) -> Category {
        Category::NumericContent
    }

    fn matches(&self, word: &str) -> bool {
        word.chars().any(|c| c.is_ascii_digit())
    }
}

/// Contains a character outside the Vietnamese alphabet.
pub struct ForeignScriptRule;

impl Rule for ForeignScriptRule {
    fn category(&self) -> Category {
        Category::ForeignScript
    }

    fn matches(&self, word: &str) -> bool {
        !word.chars().all(is_allowed)
    }
}

pub struct LoanwordRule<'a> {
    pub lexicon: &'a LoanwordLexicon,
    pub settings: &'a ClassifierSettings,
}

impl Rule for LoanwordRule<'_> {
    fn category(&self) -> Category {
        Category::Loanword
    }

    fn matches(&self, word: &str) -> bool {
        loanword::is_loanword(word, self.lexicon, self.settings)
    }
}

/// The standard rule chain, highest priority first.
pub fn default_chain<'a>(
    lexicon: &'a LoanwordLexicon,
    settings: &'a ClassifierSettings,
) -> Vec<Box<dyn Rule + 'a>> {
    vec![
        Box::new(ExclamationRule),
        Box::new(NumberRule),
        Box::new(ForeignScriptRule),
        Box::new(LoanwordRule { lexicon, settings }),
    ]
}
