//! Predefined character sets
//!
//! Each set is built once, on first use, and shared as `&'static CharSet`.
//! Shared sets cannot be mutated; clone one to derive a variant:
//!
//! ```
//! let mut ident = chars::alpha_numeric().clone();
//! ident.add_char('_');
//! assert!(ident.matches("snake_case_42"));
//! assert!(!chars::alpha_numeric().include_char('_'));
//! ```

use crate::char_set::CharSet;
use lazy_static::lazy_static;

lazy_static! {
    /// `0-9`
    pub static ref NUMERIC: CharSet = CharSet::from_chars('0'..='9');

    /// `0-7`
    pub static ref OCTAL: CharSet = CharSet::from_chars('0'..='7');

    /// `0-9 A-F`
    pub static ref UPPERCASE_HEXADECIMAL: CharSet =
        &*NUMERIC | &CharSet::from_chars('A'..='F');

    /// `0-9 a-f`
    pub static ref LOWERCASE_HEXADECIMAL: CharSet =
        &*NUMERIC | &CharSet::from_chars('a'..='f');

    /// `0-9 A-F a-f`
    pub static ref HEXADECIMAL: CharSet =
        &*UPPERCASE_HEXADECIMAL | &*LOWERCASE_HEXADECIMAL;

    /// `A-Z`
    pub static ref UPPERCASE_ALPHA: CharSet = CharSet::from_chars('A'..='Z');

    /// `a-z`
    pub static ref LOWERCASE_ALPHA: CharSet = CharSet::from_chars('a'..='z');

    /// `A-Z a-z`
    pub static ref ALPHA: CharSet = &*UPPERCASE_ALPHA | &*LOWERCASE_ALPHA;

    /// `A-Z a-z 0-9`
    pub static ref ALPHA_NUMERIC: CharSet = &*ALPHA | &*NUMERIC;

    /// Space plus `` ' " ` , ; : ~ - ( ) [ ] { } . ? ! ``
    pub static ref PUNCTUATION: CharSet = CharSet::from_chars(" '\"`,;:~-()[]{}.?!".chars());

    /// Punctuation plus `@ # $ % ^ & * _ + = | \ < > /`
    pub static ref SYMBOLS: CharSet =
        &*PUNCTUATION | &CharSet::from_chars("@#$%^&*_+=|\\<>/".chars());

    /// Space, form feed, newline, carriage return, tab and vertical tab
    pub static ref SPACE: CharSet = CharSet::from_chars(" \x0c\n\r\t\x0b".chars());

    /// Printable characters, not including whitespace
    pub static ref VISIBLE: CharSet = &*ALPHA_NUMERIC
        | &CharSet::from_chars("'\"`,;:~-()[]{}.?!@#$%^&*_+=|\\<>/".chars());

    /// Printable characters, including whitespace
    pub static ref PRINTABLE: CharSet = &(&(&*ALPHA_NUMERIC | &*PUNCTUATION) | &*SYMBOLS) | &*SPACE;

    /// `0x00-0x1f` and `0x7f`
    pub static ref CONTROL: CharSet = CharSet::from_bytes((0x00..=0x1f).chain([0x7f]));

    /// `0x00-0x7f`
    pub static ref SIGNED_ASCII: CharSet = CharSet::from_bytes(0x00..=0x7f);

    /// `0x00-0xff`
    pub static ref ASCII: CharSet = CharSet::from_bytes(0x00..=0xff);
}

/// Names accepted by [`by_name`], in definition order
pub const NAMES: [&str; 17] = [
    "numeric",
    "octal",
    "uppercase_hexadecimal",
    "lowercase_hexadecimal",
    "hexadecimal",
    "uppercase_alpha",
    "lowercase_alpha",
    "alpha",
    "alpha_numeric",
    "punctuation",
    "symbols",
    "space",
    "visible",
    "printable",
    "control",
    "signed_ascii",
    "ascii",
];

/// Look up a predefined set by name
///
/// Names are case-insensitive and may use `-` instead of `_`; a few short
/// aliases (`hex`, `alnum`, `digits`) are accepted as well.
pub fn by_name(name: &str) -> Option<&'static CharSet> {
    let name = name.trim().to_ascii_lowercase().replace('-', "_");
    let set: &'static CharSet = match name.as_str() {
        "numeric" | "digits" => &*NUMERIC,
        "octal" => &*OCTAL,
        "uppercase_hexadecimal" | "upper_hex" => &*UPPERCASE_HEXADECIMAL,
        "lowercase_hexadecimal" | "lower_hex" => &*LOWERCASE_HEXADECIMAL,
        "hexadecimal" | "hex" => &*HEXADECIMAL,
        "uppercase_alpha" | "upper" => &*UPPERCASE_ALPHA,
        "lowercase_alpha" | "lower" => &*LOWERCASE_ALPHA,
        "alpha" => &*ALPHA,
        "alpha_numeric" | "alphanumeric" | "alnum" => &*ALPHA_NUMERIC,
        "punctuation" => &*PUNCTUATION,
        "symbols" => &*SYMBOLS,
        "space" | "whitespace" => &*SPACE,
        "visible" => &*VISIBLE,
        "printable" => &*PRINTABLE,
        "control" => &*CONTROL,
        "signed_ascii" => &*SIGNED_ASCII,
        "ascii" => &*ASCII,
        _ => return None,
    };
    Some(set)
}

pub fn numeric() -> &'static CharSet {
    &NUMERIC
}

pub fn octal() -> &'static CharSet {
    &OCTAL
}

pub fn uppercase_hexadecimal() -> &'static CharSet {
    &UPPERCASE_HEXADECIMAL
}

pub fn lowercase_hexadecimal() -> &'static CharSet {
    &LOWERCASE_HEXADECIMAL
}

pub fn hexadecimal() -> &'static CharSet {
    &HEXADECIMAL
}

pub fn uppercase_alpha() -> &'static CharSet {
    &UPPERCASE_ALPHA
}

pub fn lowercase_alpha() -> &'static CharSet {
    &LOWERCASE_ALPHA
}

pub fn alpha() -> &'static CharSet {
    &ALPHA
}

pub fn alpha_numeric() -> &'static CharSet {
    &ALPHA_NUMERIC
}

pub fn punctuation() -> &'static CharSet {
    &PUNCTUATION
}

pub fn symbols() -> &'static CharSet {
    &SYMBOLS
}

/// Whitespace characters
pub fn space() -> &'static CharSet {
    &SPACE
}

pub fn visible() -> &'static CharSet {
    &VISIBLE
}

pub fn printable() -> &'static CharSet {
    &PRINTABLE
}

pub fn control() -> &'static CharSet {
    &CONTROL
}

pub fn signed_ascii() -> &'static CharSet {
    &SIGNED_ASCII
}

/// Every 8-bit value
pub fn ascii() -> &'static CharSet {
    &ASCII
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(numeric().len(), 10);
        assert_eq!(octal().len(), 8);
        assert_eq!(uppercase_hexadecimal().len(), 16);
        assert_eq!(lowercase_hexadecimal().len(), 16);
        assert_eq!(hexadecimal().len(), 22);
        assert_eq!(alpha().len(), 52);
        assert_eq!(alpha_numeric().len(), 62);
        assert_eq!(punctuation().len(), 18);
        assert_eq!(symbols().len(), 33);
        assert_eq!(space().len(), 6);
        assert_eq!(visible().len(), 94);
        assert_eq!(printable().len(), 100);
        assert_eq!(control().len(), 33);
        assert_eq!(signed_ascii().len(), 128);
        assert_eq!(ascii().len(), 256);
    }

    #[test]
    fn test_every_name_resolves() {
        for name in NAMES {
            assert!(by_name(name).is_some(), "{} should resolve", name);
        }
        assert_eq!(by_name("alpha-numeric"), Some(alpha_numeric()));
        assert_eq!(by_name("HEX"), Some(hexadecimal()));
        assert!(by_name("klingon").is_none());
    }

    #[test]
    fn test_visible_excludes_whitespace() {
        assert!(!visible().include_char(' '));
        assert!(printable().include_char(' '));
        assert!(printable().include_char('\t'));
        assert!(visible().matches("~hello_world!"));
    }

    #[test]
    fn test_control() {
        assert!(control().include_byte(0x00));
        assert!(control().include_byte(0x1f));
        assert!(control().include_byte(0x7f));
        assert!(!control().include_byte(0x20));
    }
}
