//! Substring extraction: maximal runs of set members within binary data
//!
//! This is the engine behind `strings(1)`-style tools. A single left-to-right
//! pass tracks whether the cursor is inside a run of members; when a run ends
//! it is emitted if it is at least `min_length` long.
//!
//! # Algorithm
//!
//! ```text
//! data:   . . . . A A A A . . . . B B
//! state:  o o o o i i i i o o o o i i   (o = outside, i = inside)
//!                 ^start  ^end: emit "AAAA" @ 4
//!                                 ^start   end of data: trailing "BB"
//!                                          is dropped when min_length > 2
//! ```
//!
//! The trailing run is filtered by `min_length` exactly like interior runs.
//! Runs never overlap and are reported in ascending offset order.
//!
//! # Example
//!
//! ```
//! use chars::CharSet;
//!
//! let set = CharSet::from_chars('A'..='C');
//! let found: Vec<(usize, &[u8])> = set.substrings_with_indexes(b"..AAAA..BBBB..", 4);
//! assert_eq!(found, vec![(2, &b"AAAA"[..]), (8, &b"BBBB"[..])]);
//! ```

use crate::char_set::{ByteMask, CharSet};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Minimum run length used when none is given (same default as `strings(1)`)
pub const DEFAULT_MIN_LENGTH: usize = 4;

/// A run of set members found within a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Substring<'d> {
    /// Byte offset of the first member
    pub offset: usize,
    pub bytes: &'d [u8],
}

impl<'d> Substring<'d> {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Offset one past the last member
    pub fn end(&self) -> usize {
        self.offset + self.bytes.len()
    }

    /// The run as text, replacing invalid UTF-8
    pub fn to_str_lossy(&self) -> Cow<'d, str> {
        String::from_utf8_lossy(self.bytes)
    }
}

/// Serializable form of a [`Substring`]
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SubstringRecord {
    pub offset: usize,
    pub length: usize,
    pub text: String,
}

impl From<Substring<'_>> for SubstringRecord {
    fn from(substring: Substring<'_>) -> Self {
        SubstringRecord {
            offset: substring.offset,
            length: substring.len(),
            text: substring.to_str_lossy().into_owned(),
        }
    }
}

/// Run-tracking state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Outside,
    Inside { start: usize },
}

/// Scans buffers for runs of a set's members
///
/// The scanner only borrows the set; every call to [`scan`](Self::scan)
/// starts a fresh pass, so the same scanner can be reused across buffers.
#[derive(Debug, Clone, Copy)]
pub struct SubstringScanner<'s> {
    set: &'s CharSet,
    min_length: usize,
}

impl<'s> SubstringScanner<'s> {
    pub fn new(set: &'s CharSet, min_length: usize) -> Self {
        SubstringScanner { set, min_length }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Lazily find every run in `data` (byte membership)
    pub fn scan<'d>(&self, data: &'d [u8]) -> Substrings<'s, 'd> {
        debug!(
            len = data.len(),
            min_length = self.min_length,
            members = self.set.len(),
            "scanning buffer"
        );
        Substrings {
            mask: self.set.mask(),
            data,
            min_length: self.min_length,
            index: if data.len() < self.min_length {
                data.len()
            } else {
                0
            },
            state: RunState::Outside,
        }
    }

    /// Window-probing variant of [`scan`](Self::scan)
    ///
    /// Checks that the next `min_length` bytes are all members before
    /// extending to the end of the run. Yields exactly what `scan` yields.
    pub fn scan_probing<'d>(&self, data: &'d [u8]) -> ProbingSubstrings<'s, 'd> {
        ProbingSubstrings {
            mask: self.set.mask(),
            data,
            window: self.min_length.max(1),
            index: if data.len() < self.min_length {
                data.len()
            } else {
                0
            },
        }
    }

    /// Lazily find every run of member characters in UTF-8 text
    ///
    /// Membership is by code point, so sets holding characters above `0xff`
    /// work here. Offsets are byte offsets into `text`; `min_length` counts
    /// characters.
    pub fn scan_str<'d>(&self, text: &'d str) -> CharSubstrings<'s, 'd> {
        CharSubstrings {
            set: self.set,
            text,
            chars: text.char_indices(),
            min_length: self.min_length,
            run: None,
        }
    }
}

/// Iterator returned by [`SubstringScanner::scan`]
#[derive(Debug, Clone)]
pub struct Substrings<'s, 'd> {
    mask: &'s ByteMask,
    data: &'d [u8],
    min_length: usize,
    index: usize,
    state: RunState,
}

impl<'s, 'd> Substrings<'s, 'd> {
    fn emit(&self, start: usize, end: usize) -> Option<Substring<'d>> {
        if end - start >= self.min_length {
            trace!(offset = start, len = end - start, "run");
            Some(Substring {
                offset: start,
                bytes: &self.data[start..end],
            })
        } else {
            None
        }
    }
}

impl<'s, 'd> Iterator for Substrings<'s, 'd> {
    type Item = Substring<'d>;

    fn next(&mut self) -> Option<Self::Item> {
        let data = self.data;

        while self.index < data.len() {
            match self.state {
                RunState::Outside => {
                    // skip non-members in one tight loop
                    match data[self.index..]
                        .iter()
                        .position(|&b| self.mask.contains(b))
                    {
                        Some(skip) => {
                            let start = self.index + skip;
                            self.state = RunState::Inside { start };
                            self.index = start + 1;
                        }
                        None => self.index = data.len(),
                    }
                }
                RunState::Inside { start } => {
                    let end = data[self.index..]
                        .iter()
                        .position(|&b| !self.mask.contains(b))
                        .map_or(data.len(), |len| self.index + len);

                    self.state = RunState::Outside;
                    self.index = end;
                    if end == data.len() {
                        // trailing run: same length filter as interior runs
                        return self.emit(start, end);
                    }
                    self.index += 1;
                    if let Some(substring) = self.emit(start, end) {
                        return Some(substring);
                    }
                }
            }
        }

        // a run that started on the final byte
        if let RunState::Inside { start } = self.state {
            self.state = RunState::Outside;
            return self.emit(start, data.len());
        }
        None
    }
}

impl std::iter::FusedIterator for Substrings<'_, '_> {}

/// Iterator returned by [`SubstringScanner::scan_probing`]
#[derive(Debug, Clone)]
pub struct ProbingSubstrings<'s, 'd> {
    mask: &'s ByteMask,
    data: &'d [u8],
    window: usize,
    index: usize,
}

impl<'s, 'd> Iterator for ProbingSubstrings<'s, 'd> {
    type Item = Substring<'d>;

    fn next(&mut self) -> Option<Self::Item> {
        let data = self.data;

        while self.index + self.window <= data.len() {
            let start = self.index;
            let probe = &data[start..start + self.window];

            match probe.iter().position(|&b| !self.mask.contains(b)) {
                // a non-member inside the window: no run can start before it
                Some(miss) => self.index = start + miss + 1,
                None => {
                    let mut end = start + self.window;
                    while end < data.len() && self.mask.contains(data[end]) {
                        end += 1;
                    }
                    self.index = end + 1;
                    return Some(Substring {
                        offset: start,
                        bytes: &data[start..end],
                    });
                }
            }
        }

        self.index = data.len();
        None
    }
}

/// Iterator returned by [`SubstringScanner::scan_str`]
#[derive(Debug, Clone)]
pub struct CharSubstrings<'s, 'd> {
    set: &'s CharSet,
    text: &'d str,
    chars: std::str::CharIndices<'d>,
    min_length: usize,
    /// (byte offset, char count) of the run in progress
    run: Option<(usize, usize)>,
}

impl<'s, 'd> Iterator for CharSubstrings<'s, 'd> {
    type Item = (usize, &'d str);

    fn next(&mut self) -> Option<Self::Item> {
        for (offset, c) in self.chars.by_ref() {
            match (self.run, self.set.include_char(c)) {
                (None, true) => self.run = Some((offset, 1)),
                (Some((start, count)), true) => self.run = Some((start, count + 1)),
                (Some((start, count)), false) => {
                    self.run = None;
                    if count >= self.min_length {
                        return Some((start, &self.text[start..offset]));
                    }
                }
                (None, false) => {}
            }
        }

        match self.run.take() {
            Some((start, count)) if count >= self.min_length => Some((start, &self.text[start..])),
            _ => None,
        }
    }
}

/// Options for [`CharSet::strings_in`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringsInOptions {
    /// Minimum run length
    pub length: usize,
    /// Return an offset-keyed map instead of a list
    pub offsets: bool,
}

impl Default for StringsInOptions {
    fn default() -> Self {
        StringsInOptions {
            length: DEFAULT_MIN_LENGTH,
            offsets: false,
        }
    }
}

/// Result of [`CharSet::strings_in`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringsIn<'d> {
    /// Matched runs in order; identical text at different offsets is kept
    List(Vec<&'d [u8]>),
    /// Matched runs keyed by their offset
    Offsets(BTreeMap<usize, &'d [u8]>),
}

impl<'d> StringsIn<'d> {
    pub fn len(&self) -> usize {
        match self {
            StringsIn::List(list) => list.len(),
            StringsIn::Offsets(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CharSet {
    /// Scanner over this set with the given minimum run length
    pub fn scanner(&self, min_length: usize) -> SubstringScanner<'_> {
        SubstringScanner::new(self, min_length)
    }

    /// Every run and its offset, lazily
    pub fn each_substring_with_index<'s, 'd>(
        &'s self,
        data: &'d [u8],
        min_length: usize,
    ) -> Substrings<'s, 'd> {
        self.scanner(min_length).scan(data)
    }

    pub fn substrings_with_indexes<'d>(
        &self,
        data: &'d [u8],
        min_length: usize,
    ) -> Vec<(usize, &'d [u8])> {
        self.each_substring_with_index(data, min_length)
            .map(|substring| (substring.offset, substring.bytes))
            .collect()
    }

    /// Every run without its offset, lazily
    pub fn each_substring<'s, 'd>(
        &'s self,
        data: &'d [u8],
        min_length: usize,
    ) -> impl Iterator<Item = &'d [u8]> + 's
    where
        'd: 's,
    {
        self.each_substring_with_index(data, min_length)
            .map(|substring| substring.bytes)
    }

    pub fn substrings<'d>(&self, data: &'d [u8], min_length: usize) -> Vec<&'d [u8]> {
        self.each_substring(data, min_length).collect()
    }

    /// Bulk query: a list of runs, or an offset-keyed map with `offsets`
    pub fn strings_in<'d>(&self, data: &'d [u8], options: StringsInOptions) -> StringsIn<'d> {
        let runs = self.each_substring_with_index(data, options.length);
        if options.offsets {
            StringsIn::Offsets(runs.map(|s| (s.offset, s.bytes)).collect())
        } else {
            StringsIn::List(runs.map(|s| s.bytes).collect())
        }
    }
}
