//! Character sets over bytes and Unicode code points
//!
//! A [`CharSet`] stores its members as integer code points in ascending
//! order. Members below `0x100` are mirrored into a 256-bit mask so byte
//! membership (the hot path of substring scanning) is a single word lookup.
//!
//! The textual form of each member is produced through an explicit decode
//! cache: characters added as `char` are recorded immediately, members added
//! as integers are decoded on first use and memoized.
//!
//! # Example
//!
//! ```
//! use chars::{char_set, CharSet};
//!
//! # fn main() -> chars::Result<()> {
//! let hex = char_set!['0'..='9', 'a'..='f']?;
//! assert!(hex.include_byte(b'c'));
//! assert!(hex.matches("deadbeef"));
//! assert!(!hex.matches("xyz"));
//!
//! let upper = CharSet::from_chars('A'..='F');
//! let both = &hex | &upper;
//! assert_eq!(both.len(), 22);
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::ops::{Add, BitAnd, BitOr, RangeInclusive, Sub};
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A value, range or nested list used to populate a [`CharSet`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    Char(char),
    /// A raw code point; byte values are code points below `0x100`
    Int(u32),
    /// Every character of the string
    Str(String),
    CharRange(RangeInclusive<char>),
    IntRange(RangeInclusive<u32>),
    List(Vec<Seed>),
}

impl From<char> for Seed {
    fn from(c: char) -> Self {
        Seed::Char(c)
    }
}

impl From<u32> for Seed {
    fn from(code_point: u32) -> Self {
        Seed::Int(code_point)
    }
}

impl From<&str> for Seed {
    fn from(s: &str) -> Self {
        Seed::Str(s.to_string())
    }
}

impl From<String> for Seed {
    fn from(s: String) -> Self {
        Seed::Str(s)
    }
}

impl From<RangeInclusive<char>> for Seed {
    fn from(range: RangeInclusive<char>) -> Self {
        Seed::CharRange(range)
    }
}

impl From<RangeInclusive<u32>> for Seed {
    fn from(range: RangeInclusive<u32>) -> Self {
        Seed::IntRange(range)
    }
}

impl<T: Into<Seed>> From<Vec<T>> for Seed {
    fn from(list: Vec<T>) -> Self {
        Seed::List(list.into_iter().map(Into::into).collect())
    }
}

/// A flattened seed member
enum Member {
    Char(char),
    CodePoint(u32),
}

impl Seed {
    /// Recursively decompose the seed into individual members
    fn flatten(self, out: &mut Vec<Member>) -> Result<()> {
        match self {
            Seed::Char(c) => out.push(Member::Char(c)),
            Seed::Int(code_point) => out.push(Member::CodePoint(valid(code_point)?)),
            Seed::Str(s) => out.extend(s.chars().map(Member::Char)),
            Seed::CharRange(range) => out.extend(range.map(Member::Char)),
            Seed::IntRange(range) => {
                for code_point in range {
                    out.push(Member::CodePoint(valid(code_point)?));
                }
            }
            Seed::List(list) => {
                for seed in list {
                    seed.flatten(out)?;
                }
            }
        }
        Ok(())
    }
}

fn valid(code_point: u32) -> Result<u32> {
    char::from_u32(code_point)
        .map(|_| code_point)
        .ok_or(Error::InvalidCodePoint(code_point))
}

/// Membership bits for code points `0x00..=0xff`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ByteMask {
    words: [u64; 4],
}

impl ByteMask {
    fn insert(&mut self, byte: u8) {
        self.words[usize::from(byte >> 6)] |= 1u64 << (byte & 63);
    }

    #[inline(always)]
    pub(crate) fn contains(&self, byte: u8) -> bool {
        self.words[usize::from(byte >> 6)] & (1u64 << (byte & 63)) != 0
    }
}

/// Memoized code point to character decoding
///
/// Every key is a member of the owning set.
#[derive(Debug, Default)]
struct CharCache {
    chars: RwLock<HashMap<u32, char>>,
}

impl CharCache {
    fn read(&self) -> RwLockReadGuard<'_, HashMap<u32, char>> {
        self.chars.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<u32, char>> {
        self.chars.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&mut self, c: char) {
        self.chars
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(u32::from(c), c);
    }

    /// Return the cached character, decoding and inserting it on a miss
    fn get_or_decode(&self, code_point: u32) -> char {
        if let Some(&c) = self.read().get(&code_point) {
            return c;
        }
        let c = char::from_u32(code_point).unwrap_or(char::REPLACEMENT_CHARACTER);
        *self.write().entry(code_point).or_insert(c)
    }

    /// Cache entries of `self` and `other` restricted to `members`
    fn carry(&self, other: Option<&CharCache>, members: &BTreeSet<u32>) -> CharCache {
        let mut chars: HashMap<u32, char> = self
            .read()
            .iter()
            .filter(|(code_point, _)| members.contains(code_point))
            .map(|(&code_point, &c)| (code_point, c))
            .collect();

        if let Some(other) = other {
            for (&code_point, &c) in other.read().iter() {
                if members.contains(&code_point) {
                    chars.entry(code_point).or_insert(c);
                }
            }
        }

        CharCache {
            chars: RwLock::new(chars),
        }
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}

impl Clone for CharCache {
    fn clone(&self) -> Self {
        CharCache {
            chars: RwLock::new(self.read().clone()),
        }
    }
}

/// An ordered set of bytes or Unicode code points
#[derive(Clone, Default)]
pub struct CharSet {
    code_points: BTreeSet<u32>,
    mask: ByteMask,
    cache: CharCache,
    /// Members in order, for indexed draws; cleared on every insert
    entries: OnceLock<Vec<u32>>,
}

/// Byte-oriented name for [`CharSet`]
pub type ByteSet = CharSet;

/// Build a [`CharSet`] from heterogeneous seeds
///
/// ```
/// let set = chars::char_set!['a'..='c', "xyz", 0x41u32, vec!['_', '-']].unwrap();
/// assert_eq!(set.len(), 9);
/// ```
#[macro_export]
macro_rules! char_set {
    () => {
        ::std::result::Result::<$crate::CharSet, $crate::Error>::Ok($crate::CharSet::new())
    };
    ($($seed:expr),+ $(,)?) => {
        $crate::CharSet::from_seeds([$($crate::Seed::from($seed)),+])
    };
}

impl CharSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set from seeds, flattening ranges and nested lists
    ///
    /// Fails if any seed holds an integer that is not a Unicode scalar value.
    pub fn from_seeds<I, S>(seeds: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Seed>,
    {
        let mut set = Self::new();
        for seed in seeds {
            set.insert(seed)?;
        }
        Ok(set)
    }

    /// Create a set from characters
    pub fn from_chars<I: IntoIterator<Item = char>>(chars: I) -> Self {
        let mut set = Self::new();
        for c in chars {
            set.add_char(c);
        }
        set
    }

    /// Create a set from byte values
    pub fn from_bytes<I: IntoIterator<Item = u8>>(bytes: I) -> Self {
        let mut set = Self::new();
        for byte in bytes {
            set.add_byte(byte);
        }
        set
    }

    fn from_parts(code_points: BTreeSet<u32>, cache: CharCache) -> Self {
        let mut mask = ByteMask::default();
        for byte in code_points.range(..0x100).filter_map(|&cp| u8::try_from(cp).ok()) {
            mask.insert(byte);
        }
        CharSet {
            code_points,
            mask,
            cache,
            entries: OnceLock::new(),
        }
    }

    fn insert_code_point(&mut self, code_point: u32) {
        if let Ok(byte) = u8::try_from(code_point) {
            self.mask.insert(byte);
        }
        if self.code_points.insert(code_point) {
            self.entries.take();
        }
    }

    /// Members in ascending order, built once and shared until the next insert
    pub(crate) fn entries(&self) -> &[u32] {
        self.entries
            .get_or_init(|| self.code_points.iter().copied().collect())
    }

    /// Add a seed of any shape
    ///
    /// The seed is flattened before anything is inserted, so a failing seed
    /// leaves the set unchanged.
    pub fn insert(&mut self, seed: impl Into<Seed>) -> Result<&mut Self> {
        let mut members = Vec::new();
        seed.into().flatten(&mut members)?;

        for member in members {
            match member {
                Member::Char(c) => {
                    self.add_char(c);
                }
                Member::CodePoint(code_point) => self.insert_code_point(code_point),
            }
        }
        Ok(self)
    }

    /// Add a character, recording its decoded form
    pub fn add_char(&mut self, c: char) -> &mut Self {
        self.insert_code_point(u32::from(c));
        self.cache.record(c);
        self
    }

    /// Add every character of `s`
    pub fn add_str(&mut self, s: &str) -> &mut Self {
        for c in s.chars() {
            self.add_char(c);
        }
        self
    }

    pub fn add_byte(&mut self, byte: u8) -> &mut Self {
        self.insert_code_point(u32::from(byte));
        self
    }

    /// Add a raw code point; its character form is decoded lazily
    pub fn add_code_point(&mut self, code_point: u32) -> Result<&mut Self> {
        self.insert_code_point(valid(code_point)?);
        Ok(self)
    }

    /// Byte membership via the 256-bit mask
    #[inline]
    pub fn include_byte(&self, byte: u8) -> bool {
        self.mask.contains(byte)
    }

    pub fn include_code_point(&self, code_point: u32) -> bool {
        match u8::try_from(code_point) {
            Ok(byte) => self.mask.contains(byte),
            Err(_) => self.code_points.contains(&code_point),
        }
    }

    #[inline]
    pub fn include_char(&self, c: char) -> bool {
        self.include_code_point(u32::from(c))
    }

    /// Membership of the first character of `s`; `false` for an empty string
    pub fn include_str(&self, s: &str) -> bool {
        s.chars().next().is_some_and(|c| self.include_char(c))
    }

    /// Whether every character (or integer) of `other` is a member
    ///
    /// An empty string or collection matches vacuously.
    pub fn matches<M: Matchable + ?Sized>(&self, other: &M) -> bool {
        other.matched_by(self)
    }

    pub fn len(&self) -> usize {
        self.code_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_points.is_empty()
    }

    /// Members in ascending order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = u32> + ExactSizeIterator + '_ {
        self.code_points.iter().copied()
    }

    /// Members in ascending order
    #[doc(alias = "entries")]
    pub fn bytes(&self) -> Vec<u32> {
        self.iter().collect()
    }

    /// Character form of every member, in member order
    pub fn each_char(&self) -> impl Iterator<Item = char> + '_ {
        self.iter().map(|code_point| self.cache.get_or_decode(code_point))
    }

    pub fn chars(&self) -> Vec<char> {
        self.each_char().collect()
    }

    /// Character form of a member, `None` for non-members
    pub fn char_for(&self, code_point: u32) -> Option<char> {
        self.include_code_point(code_point)
            .then(|| self.cache.get_or_decode(code_point))
    }

    pub fn select_bytes<F: FnMut(u32) -> bool>(&self, mut predicate: F) -> Vec<u32> {
        self.iter().filter(|&code_point| predicate(code_point)).collect()
    }

    pub fn select_chars<F: FnMut(char) -> bool>(&self, mut predicate: F) -> Vec<char> {
        self.each_char().filter(|&c| predicate(c)).collect()
    }

    pub fn map_bytes<T, F: FnMut(u32) -> T>(&self, f: F) -> Vec<T> {
        self.iter().map(f).collect()
    }

    pub fn map_chars<T, F: FnMut(char) -> T>(&self, f: F) -> Vec<T> {
        self.each_char().map(f).collect()
    }

    pub fn union(&self, other: &CharSet) -> CharSet {
        let code_points: BTreeSet<u32> = self
            .code_points
            .union(&other.code_points)
            .copied()
            .collect();
        let cache = self.cache.carry(Some(&other.cache), &code_points);
        CharSet::from_parts(code_points, cache)
    }

    /// Union with a raw seed, converting it to a set first
    pub fn union_with(&self, seed: impl Into<Seed>) -> Result<CharSet> {
        Ok(self.union(&CharSet::from_seeds([seed])?))
    }

    pub fn difference(&self, other: &CharSet) -> CharSet {
        let code_points: BTreeSet<u32> = self
            .code_points
            .difference(&other.code_points)
            .copied()
            .collect();
        let cache = self.cache.carry(None, &code_points);
        CharSet::from_parts(code_points, cache)
    }

    pub fn intersection(&self, other: &CharSet) -> CharSet {
        let code_points: BTreeSet<u32> = self
            .code_points
            .intersection(&other.code_points)
            .copied()
            .collect();
        let cache = self.cache.carry(Some(&other.cache), &code_points);
        CharSet::from_parts(code_points, cache)
    }

    pub fn is_subset(&self, other: &CharSet) -> bool {
        self.code_points.is_subset(&other.code_points)
    }

    pub fn is_superset(&self, other: &CharSet) -> bool {
        self.code_points.is_superset(&other.code_points)
    }

    pub(crate) fn mask(&self) -> &ByteMask {
        &self.mask
    }

    /// Number of members whose character form is currently cached
    pub fn cached_chars(&self) -> usize {
        self.cache.len()
    }
}

macro_rules! set_operator {
    ($op:ident, $method:ident, $set_method:ident) => {
        impl $op<&CharSet> for &CharSet {
            type Output = CharSet;

            fn $method(self, rhs: &CharSet) -> CharSet {
                self.$set_method(rhs)
            }
        }

        impl $op for CharSet {
            type Output = CharSet;

            fn $method(self, rhs: CharSet) -> CharSet {
                self.$set_method(&rhs)
            }
        }
    };
}

set_operator!(BitOr, bitor, union);
set_operator!(Add, add, union);
set_operator!(Sub, sub, difference);
set_operator!(BitAnd, bitand, intersection);

impl PartialEq for CharSet {
    fn eq(&self, other: &Self) -> bool {
        self.code_points == other.code_points
    }
}

impl Eq for CharSet {}

impl fmt::Debug for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CharSet {")?;
        for (i, code_point) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match code_point {
                0x09 | 0x0a | 0x0d | 0x20..=0x7e => {
                    write!(f, "{:?}", self.cache.get_or_decode(code_point).to_string())?
                }
                // C escapes where Rust would print \u{..}
                0x00 => f.write_str(r#""\0""#)?,
                0x07 => f.write_str(r#""\a""#)?,
                0x08 => f.write_str(r#""\b""#)?,
                0x0b => f.write_str(r#""\v""#)?,
                0x0c => f.write_str(r#""\f""#)?,
                _ => write!(f, "{:#04x}", code_point)?,
            }
        }
        f.write_str("}")
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        CharSet::from_chars(iter)
    }
}

impl FromIterator<u8> for CharSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        CharSet::from_bytes(iter)
    }
}

impl Extend<char> for CharSet {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        for c in iter {
            self.add_char(c);
        }
    }
}

impl From<RangeInclusive<char>> for CharSet {
    fn from(range: RangeInclusive<char>) -> Self {
        CharSet::from_chars(range)
    }
}

impl From<&str> for CharSet {
    fn from(s: &str) -> Self {
        CharSet::from_chars(s.chars())
    }
}

impl<'a> IntoIterator for &'a CharSet {
    type Item = u32;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, u32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.code_points.iter().copied()
    }
}

/// Values that can be tested against a set's alphabet with [`CharSet::matches`]
pub trait Matchable {
    fn matched_by(&self, set: &CharSet) -> bool;
}

impl Matchable for str {
    fn matched_by(&self, set: &CharSet) -> bool {
        self.chars().all(|c| set.include_char(c))
    }
}

impl Matchable for String {
    fn matched_by(&self, set: &CharSet) -> bool {
        self.as_str().matched_by(set)
    }
}

impl Matchable for char {
    fn matched_by(&self, set: &CharSet) -> bool {
        set.include_char(*self)
    }
}

impl Matchable for u8 {
    fn matched_by(&self, set: &CharSet) -> bool {
        set.include_byte(*self)
    }
}

impl Matchable for u32 {
    fn matched_by(&self, set: &CharSet) -> bool {
        set.include_code_point(*self)
    }
}

impl<T: Matchable> Matchable for [T] {
    fn matched_by(&self, set: &CharSet) -> bool {
        self.iter().all(|element| element.matched_by(set))
    }
}

impl<T: Matchable, const N: usize> Matchable for [T; N] {
    fn matched_by(&self, set: &CharSet) -> bool {
        self.as_slice().matched_by(set)
    }
}

impl<T: Matchable> Matchable for Vec<T> {
    fn matched_by(&self, set: &CharSet) -> bool {
        self.as_slice().matched_by(set)
    }
}

impl<T: Matchable + ?Sized> Matchable for &T {
    fn matched_by(&self, set: &CharSet) -> bool {
        (**self).matched_by(set)
    }
}
