//! Length specifications for generated strings and random samples
//!
//! A length is either a fixed count, an inclusive range of counts, or a list
//! of candidate counts. String enumeration walks every candidate length;
//! random sampling picks one of them uniformly.

use crate::error::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::{Range, RangeInclusive};
use std::str::FromStr;

/// One or more string lengths
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LengthSpec {
    /// Exactly this many characters
    Exactly(usize),
    /// Any length within the inclusive range
    Between(RangeInclusive<usize>),
    /// Any of the listed lengths
    OneOf(Vec<usize>),
}

impl LengthSpec {
    /// Every candidate length, ascending and without duplicates
    ///
    /// Ranges are walked lazily, so `1..=usize::MAX` costs nothing up front.
    pub fn lengths(&self) -> Lengths {
        match self {
            LengthSpec::Exactly(n) => Lengths::Range(*n..=*n),
            LengthSpec::Between(range) => Lengths::Range(range.clone()),
            LengthSpec::OneOf(list) => {
                let mut lengths = list.clone();
                lengths.sort_unstable();
                lengths.dedup();
                Lengths::List(lengths.into_iter())
            }
        }
    }

    /// Whether there is no candidate length at all
    pub fn is_empty(&self) -> bool {
        match self {
            LengthSpec::Exactly(_) => false,
            LengthSpec::Between(range) => range.is_empty(),
            LengthSpec::OneOf(list) => list.is_empty(),
        }
    }

    /// Resolve a concrete length using `rng`
    ///
    /// Ranges are sampled uniformly; lists pick one entry uniformly.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize> {
        match self {
            LengthSpec::Exactly(n) => Ok(*n),
            LengthSpec::Between(range) => {
                if range.is_empty() {
                    return Err(Error::EmptyLengthSpec);
                }
                Ok(rng.gen_range(range.clone()))
            }
            LengthSpec::OneOf(list) => list.choose(rng).copied().ok_or(Error::EmptyLengthSpec),
        }
    }
}

/// Iterator returned by [`LengthSpec::lengths`]
#[derive(Debug, Clone)]
pub enum Lengths {
    Range(RangeInclusive<usize>),
    List(std::vec::IntoIter<usize>),
}

impl Lengths {
    /// No lengths at all
    pub fn none() -> Self {
        Lengths::List(Vec::new().into_iter())
    }
}

impl Iterator for Lengths {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            Lengths::Range(range) => range.next(),
            Lengths::List(list) => list.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Lengths::Range(range) => range.size_hint(),
            Lengths::List(list) => list.size_hint(),
        }
    }
}

impl std::iter::FusedIterator for Lengths {}

impl From<usize> for LengthSpec {
    fn from(n: usize) -> Self {
        LengthSpec::Exactly(n)
    }
}

impl From<RangeInclusive<usize>> for LengthSpec {
    fn from(range: RangeInclusive<usize>) -> Self {
        LengthSpec::Between(range)
    }
}

impl From<Range<usize>> for LengthSpec {
    fn from(range: Range<usize>) -> Self {
        if range.is_empty() {
            LengthSpec::OneOf(Vec::new())
        } else {
            LengthSpec::Between(range.start..=range.end - 1)
        }
    }
}

impl From<Vec<usize>> for LengthSpec {
    fn from(list: Vec<usize>) -> Self {
        LengthSpec::OneOf(list)
    }
}

impl From<&[usize]> for LengthSpec {
    fn from(list: &[usize]) -> Self {
        LengthSpec::OneOf(list.to_vec())
    }
}

/// Parses `8`, `4..8` (exclusive), `4..=8` or `4,6,8`
impl FromStr for LengthSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| Error::InvalidLengthSpec(s.to_string()))
        };

        if let Some((start, end)) = s.split_once("..=") {
            Ok(LengthSpec::Between(parse(start)?..=parse(end)?))
        } else if let Some((start, end)) = s.split_once("..") {
            Ok(LengthSpec::from(parse(start)?..parse(end)?))
        } else if s.contains(',') {
            let list = s.split(',').map(parse).collect::<Result<Vec<_>>>()?;
            Ok(LengthSpec::OneOf(list))
        } else {
            Ok(LengthSpec::Exactly(parse(s)?))
        }
    }
}
