//! Physical key codes for the letters the safe-word tables are indexed by.
//!
//! Values are macOS virtual key codes for the ANSI layout. The Telex engine
//! compares raw keystrokes against them, so the table never changes at
//! runtime.

use std::fmt;

/// Key code returned for characters that have no key in the table.
pub const UNMAPPABLE: u16 = 999;

/// Key code of each letter `a..=z`, indexed by `letter - 'a'`.
const BY_LETTER: [u16; 26] = [
    0,  // a
    11, // b
    8,  // c
    2,  // d
    14, // e
    3,  // f
    5,  // g
    4,  // h
    34, // i
    38, // j
    40, // k
    37, // l
    46, // m
    45, // n
    31, // o
    35, // p
    12, // q
    15, // r
    1,  // s
    17, // t
    32, // u
    9,  // v
    13, // w
    7,  // x
    16, // y
    6,  // z
];

/// Key code of `c`, or `None` for anything but a lowercase ASCII letter.
pub fn keycode(c: char) -> Option<u16> {
    if c.is_ascii_lowercase() {
        Some(BY_LETTER[(c as u8 - b'a') as usize])
    } else {
        None
    }
}

/// Key code of `c`, or [`UNMAPPABLE`].
pub fn map(c: char) -> u16 {
    keycode(c).unwrap_or(UNMAPPABLE)
}

/// Reverse lookup: the lowercase letter typed with key `code`.
pub fn letter(code: u16) -> Option<char> {
    BY_LETTER
        .iter()
        .position(|&k| k == code)
        .map(|i| (b'a' + i as u8) as char)
}

/// Key constant name as used by the engine's `keys` module (`keys::A`).
pub fn symbol(code: u16) -> Option<String> {
    letter(code).map(|c| format!("keys::{}", c.to_ascii_uppercase()))
}

/// A word's key codes, one per character.
///
/// Only constructed from fully mappable input, so it never holds
/// [`UNMAPPABLE`]. Ordering is element-wise on the key codes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeySequence(Vec<u16>);

impl KeySequence {
    /// Map every character of `word`; `None` if any of them is unmappable.
    pub fn from_word(word: &str) -> Option<Self> {
        word.chars()
            .map(keycode)
            .collect::<Option<Vec<u16>>>()
            .map(Self)
    }

    /// Wrap raw key codes read back from a table; `None` if any code is unknown.
    pub fn from_keys(keys: &[u16]) -> Option<Self> {
        if keys.iter().all(|&k| letter(k).is_some()) {
            Some(Self(keys.to_vec()))
        } else {
            None
        }
    }

    pub fn keys(&self) -> &[u16] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The lowercase word this sequence was typed as.
    pub fn to_word(&self) -> String {
        self.0.iter().filter_map(|&k| letter(k)).collect()
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|k| k.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_layout_letters() {
        assert_eq!(keycode('a'), Some(0));
        assert_eq!(keycode('s'), Some(1));
        assert_eq!(keycode('b'), Some(11));
        assert_eq!(keycode('o'), Some(31));
        assert_eq!(keycode('m'), Some(46));
        assert_eq!(keycode('z'), Some(6));
    }

    #[test]
    fn unmappable_characters() {
        for c in ['A', '1', '!', ' ', 'á', 'đ', 'ß'] {
            assert_eq!(keycode(c), None, "{c:?}");
            assert_eq!(map(c), UNMAPPABLE);
        }
    }

    #[test]
    fn codes_are_distinct() {
        let mut codes: Vec<u16> = ('a'..='z').filter_map(keycode).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 26);
        assert!(!codes.contains(&UNMAPPABLE));
    }

    #[test]
    fn letter_is_inverse_of_keycode() {
        for c in 'a'..='z' {
            assert_eq!(letter(map(c)), Some(c));
        }
        assert_eq!(letter(10), None);
        assert_eq!(letter(UNMAPPABLE), None);
    }

    #[test]
    fn symbol_names() {
        assert_eq!(symbol(0).as_deref(), Some("keys::A"));
        assert_eq!(symbol(46).as_deref(), Some("keys::M"));
        assert_eq!(symbol(UNMAPPABLE), None);
    }

    #[test]
    fn sequence_from_word() {
        let seq = KeySequence::from_word("if").unwrap();
        assert_eq!(seq.keys(), &[34, 3]);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.to_word(), "if");
        assert_eq!(seq.to_string(), "[34, 3]");
    }

    #[test]
    fn sequence_rejects_partial_words() {
        assert!(KeySequence::from_word("café").is_none());
        assert!(KeySequence::from_word("Hello").is_none());
        assert!(KeySequence::from_keys(&[0, UNMAPPABLE]).is_none());
        assert!(KeySequence::from_keys(&[0, 1]).is_some());
    }

    #[test]
    fn sequence_orders_by_key_code() {
        // "as" = [0, 1], "sa" = [1, 0], "ab" = [0, 11]
        let as_ = KeySequence::from_word("as").unwrap();
        let sa = KeySequence::from_word("sa").unwrap();
        let ab = KeySequence::from_word("ab").unwrap();
        assert!(as_ < ab);
        assert!(ab < sa);
    }
}
