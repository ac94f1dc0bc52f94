//! Random sampling from a character set
//!
//! Every operation takes the random number generator as an argument, so
//! callers can pass `rand::thread_rng()`, an OS generator, or a seeded
//! `StdRng` for reproducible output.
//!
//! ```
//! use chars::CharSet;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! # fn main() -> chars::Result<()> {
//! let hex = CharSet::from_chars("0123456789abcdef".chars());
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let token = hex.random_string(16, &mut rng)?;
//! assert_eq!(token.len(), 16);
//! assert!(hex.matches(token.as_str()));
//! # Ok(())
//! # }
//! ```

use crate::char_set::CharSet;
use crate::error::{Error, Result};
use crate::length::LengthSpec;
use rand::seq::SliceRandom;
use rand::Rng;

impl CharSet {
    /// A uniformly chosen member
    pub fn random_byte<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<u32> {
        self.sample_entries(1)?
            .choose(rng)
            .copied()
            .ok_or(Error::EmptySet)
    }

    /// A uniformly chosen member, as a character
    pub fn random_char<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<char> {
        let code_point = self.random_byte(rng)?;
        self.char_for(code_point).ok_or(Error::EmptySet)
    }

    /// `n` independent random members
    pub fn each_random_byte<'a, R: Rng + ?Sized>(
        &'a self,
        n: usize,
        rng: &'a mut R,
    ) -> Result<impl Iterator<Item = u32> + 'a> {
        let entries = self.sample_entries(n)?;
        Ok((0..n).map(move |_| entries[rng.gen_range(0..entries.len())]))
    }

    /// `n` independent random members, as characters
    pub fn each_random_char<'a, R: Rng + ?Sized>(
        &'a self,
        n: usize,
        rng: &'a mut R,
    ) -> Result<impl Iterator<Item = char> + 'a> {
        let bytes = self.each_random_byte(n, rng)?;
        Ok(bytes.filter_map(move |code_point| self.char_for(code_point)))
    }

    /// Random members (with repetition); the count is resolved from `length`
    pub fn random_bytes<R: Rng + ?Sized>(
        &self,
        length: impl Into<LengthSpec>,
        rng: &mut R,
    ) -> Result<Vec<u32>> {
        let n = length.into().choose(rng)?;
        let entries = self.sample_entries(n)?;
        Ok((0..n)
            .map(|_| entries[rng.gen_range(0..entries.len())])
            .collect())
    }

    pub fn random_chars<R: Rng + ?Sized>(
        &self,
        length: impl Into<LengthSpec>,
        rng: &mut R,
    ) -> Result<Vec<char>> {
        Ok(self.to_chars(self.random_bytes(length, rng)?))
    }

    pub fn random_string<R: Rng + ?Sized>(
        &self,
        length: impl Into<LengthSpec>,
        rng: &mut R,
    ) -> Result<String> {
        Ok(self.random_chars(length, rng)?.into_iter().collect())
    }

    /// Random members without repetition
    ///
    /// The resolved count is capped at the size of the set.
    pub fn random_distinct_bytes<R: Rng + ?Sized>(
        &self,
        length: impl Into<LengthSpec>,
        rng: &mut R,
    ) -> Result<Vec<u32>> {
        let mut shuffled = self.entries().to_vec();
        shuffled.shuffle(rng);

        let n = length.into().choose(rng)?.min(shuffled.len());
        shuffled.truncate(n);
        Ok(shuffled)
    }

    pub fn random_distinct_chars<R: Rng + ?Sized>(
        &self,
        length: impl Into<LengthSpec>,
        rng: &mut R,
    ) -> Result<Vec<char>> {
        Ok(self.to_chars(self.random_distinct_bytes(length, rng)?))
    }

    pub fn random_distinct_string<R: Rng + ?Sized>(
        &self,
        length: impl Into<LengthSpec>,
        rng: &mut R,
    ) -> Result<String> {
        Ok(self
            .random_distinct_chars(length, rng)?
            .into_iter()
            .collect())
    }

    /// Ordered members to draw `n` samples from; drawing from nothing fails
    fn sample_entries(&self, n: usize) -> Result<&[u32]> {
        if n > 0 && self.is_empty() {
            return Err(Error::EmptySet);
        }
        Ok(self.entries())
    }

    fn to_chars(&self, code_points: Vec<u32>) -> Vec<char> {
        code_points
            .into_iter()
            .filter_map(|code_point| self.char_for(code_point))
            .collect()
    }
}
