//! Exhaustive enumeration of every string over a character set
//!
//! Strings are produced in odometer order: each position is a digit of a
//! fixed-radix counter whose digits are the set's characters in member order,
//! with the most-significant digit leftmost.
//!
//! ```text
//! alphabet {a, b}, length 3:
//! aaa aab aba abb baa bab bba bbb
//! ```
//!
//! Nothing is materialized up front; each string is built from a working
//! buffer of digit indices that is advanced in place.

use crate::char_set::CharSet;
use crate::length::{LengthSpec, Lengths};
use tracing::debug;

/// Every string of one length over a set
#[derive(Debug, Clone, Copy)]
pub struct StringEnumerator<'s> {
    char_set: &'s CharSet,
    length: usize,
}

impl<'s> StringEnumerator<'s> {
    pub fn new(char_set: &'s CharSet, length: usize) -> Self {
        StringEnumerator { char_set, length }
    }

    pub fn char_set(&self) -> &'s CharSet {
        self.char_set
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of strings the enumeration yields, `None` if it overflows
    pub fn count(&self) -> Option<u128> {
        if self.char_set.is_empty() {
            return Some(0);
        }
        let length = u32::try_from(self.length).ok()?;
        (self.char_set.len() as u128).checked_pow(length)
    }

    /// Start a fresh pass over every string
    pub fn iter(&self) -> Strings {
        Strings::new(self.char_set.chars(), self.length)
    }
}

impl<'s> IntoIterator for StringEnumerator<'s> {
    type Item = String;
    type IntoIter = Strings;

    fn into_iter(self) -> Strings {
        self.iter()
    }
}

impl<'s> IntoIterator for &StringEnumerator<'s> {
    type Item = String;
    type IntoIter = Strings;

    fn into_iter(self) -> Strings {
        self.iter()
    }
}

/// Odometer iterator returned by [`StringEnumerator::iter`]
#[derive(Debug, Clone)]
pub struct Strings {
    alphabet: Vec<char>,
    /// Digit index per position
    digits: Vec<usize>,
    /// Next digit for the last position
    last_digit: usize,
    done: bool,
}

impl Strings {
    fn new(alphabet: Vec<char>, length: usize) -> Self {
        Strings {
            done: alphabet.is_empty(),
            digits: vec![0; length],
            alphabet,
            last_digit: 0,
        }
    }

    fn render(&self) -> String {
        self.digits.iter().map(|&d| self.alphabet[d]).collect()
    }

    /// Advance every position left of the last one; false once exhausted
    fn carry(&mut self) -> bool {
        let highest = self.alphabet.len() - 1;
        let last = self.digits.len() - 1;

        for i in (0..last).rev() {
            if self.digits[i] == highest {
                self.digits[i] = 0;
            } else {
                self.digits[i] += 1;
                return true;
            }
        }
        false
    }
}

impl Iterator for Strings {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        let Some(last) = self.digits.len().checked_sub(1) else {
            // length zero: exactly one (empty) string
            self.done = true;
            return Some(String::new());
        };

        if self.last_digit == self.alphabet.len() {
            if !self.carry() {
                self.done = true;
                return None;
            }
            self.last_digit = 0;
        }

        self.digits[last] = self.last_digit;
        self.last_digit += 1;
        Some(self.render())
    }
}

impl std::iter::FusedIterator for Strings {}

impl CharSet {
    /// Every string of `length` over this set, lazily
    ///
    /// Ranges and lists enumerate each length in increasing order.
    pub fn strings_of_length(&self, length: impl Into<LengthSpec>) -> impl Iterator<Item = String> + '_ {
        let length = length.into();
        debug!(?length, members = self.len(), "enumerating strings");
        // an empty set yields nothing at any length
        let lengths = if self.is_empty() {
            Lengths::none()
        } else {
            length.lengths()
        };
        lengths
            .into_iter()
            .flat_map(move |length| StringEnumerator::new(self, length).iter())
    }
}
