//! chars - character sets over bytes and Unicode code points
//!
//! This library provides a [`CharSet`] type for membership tests and set
//! algebra, `strings(1)`-style extraction of runs of members from binary
//! data, exhaustive enumeration of every string over a set, and random
//! sampling of characters and strings.
//!
//! ```
//! use chars::CharSet;
//!
//! let data = b"\x00\x01hello\x7f\x02world!!\x00ab";
//! let found = chars::alpha().substrings(data, 4);
//! assert_eq!(found, vec![&b"hello"[..], &b"world"[..]]);
//!
//! let ab = CharSet::from_chars("ab".chars());
//! let all: Vec<String> = ab.strings_of_length(2).collect();
//! assert_eq!(all, vec!["aa", "ab", "ba", "bb"]);
//! ```

pub mod char_set;
pub mod cli;
pub mod config;
pub mod error;
pub mod length;
pub mod predefined;
pub mod random;
pub mod string_enumerator;
pub mod substrings;

pub use char_set::{ByteSet, CharSet, Matchable, Seed};
pub use error::{Error, Result};
pub use length::{LengthSpec, Lengths};
pub use predefined::{
    alpha, alpha_numeric, ascii, control, hexadecimal, lowercase_alpha, lowercase_hexadecimal,
    numeric, octal, printable, punctuation, signed_ascii, space, symbols, uppercase_alpha,
    uppercase_hexadecimal, visible,
};
pub use string_enumerator::StringEnumerator;
pub use substrings::{
    StringsIn, StringsInOptions, Substring, SubstringRecord, SubstringScanner, DEFAULT_MIN_LENGTH,
};
