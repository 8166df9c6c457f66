//! Character-level classification for Vietnamese text.

use unicode_normalization::UnicodeNormalization;

/// Precomposed Vietnamese letters carrying a diacritic, plus đ/Đ.
///
/// Only the lowercase forms are listed; an uppercase accented letter is
/// outside the alphabet the curated vocabulary accepts.
pub const ACCENTED_LETTERS: &str = "áàảãạâầấẩẫậăằắẳẵặéèẻẽẹêềếểễệíìỉĩịóòỏõọôồốổỗộơờớởỡợúùủũụưừứửữựýỳỷỹỵđĐ";

pub fn is_accented(c: char) -> bool {
    !c.is_ascii() && ACCENTED_LETTERS.contains(c)
}

/// ASCII letters, Vietnamese accented letters and the space character.
pub fn is_allowed(c: char) -> bool {
    c.is_ascii_alphabetic() || c == ' ' || is_accented(c)
}

/// ASCII consonant letter, `y` included.
pub fn is_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && !matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

/// ASCII consonant letter, `y` excluded.
pub fn is_strict_consonant(c: char) -> bool {
    is_consonant(c) && !c.eq_ignore_ascii_case(&'y')
}

/// Canonical composition (NFC).
pub fn nfc(s: &str) -> String {
    s.nfc().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accented_letters() {
        for c in ['á', 'ặ', 'ễ', 'ự', 'ỵ', 'đ', 'Đ', 'ơ', 'ư'] {
            assert!(is_accented(c), "{c:?}");
        }
        for c in ['a', 'd', 'D', 'Á', 'ü', ' '] {
            assert!(!is_accented(c), "{c:?}");
        }
    }

    #[test]
    fn allowed_alphabet() {
        assert!("con mèo".chars().all(is_allowed));
        assert!("ABC".chars().all(is_allowed));
        assert!(!is_allowed('-'));
        assert!(!is_allowed('1'));
        assert!(!is_allowed('ß'));
        assert!(!is_allowed('\t'));
    }

    #[test]
    fn consonant_sets() {
        assert!(is_consonant('y'));
        assert!(is_consonant('B'));
        assert!(!is_consonant('a'));
        assert!(!is_consonant('đ'));
        assert!(!is_strict_consonant('y'));
        assert!(!is_strict_consonant('Y'));
        assert!(is_strict_consonant('t'));
    }

    #[test]
    fn nfc_composes_combining_marks() {
        // "o" + combining hook above
        let decomposed = "o\u{0309}n";
        assert_eq!(nfc(decomposed), "ỏn");
        assert_eq!(nfc("ỏn"), "ỏn");
    }
}
