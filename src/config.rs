//! `chars.toml` configuration
//!
//! The configuration sets scanning defaults and defines custom character
//! sets from seeds, optionally extending a predefined set.
//!
//! # Example chars.toml
//!
//! ```toml
//! [scan]
//! min_length = 6
//! char_set = "dashed_hex"
//!
//! # Hex digits plus a dash
//! [sets.dashed_hex]
//! seeds = [{ from = "A", to = "F" }, { from = 0x30, to = 0x39 }, "-"]
//!
//! # Identifiers: alpha-numeric plus underscore
//! [sets.ident]
//! base = "alpha_numeric"
//! seeds = ["_"]
//! ```
//!
//! Seeds are strings (every character is added), integers (code points),
//! `{ from, to }` tables (inclusive ranges of characters or integers) and
//! arrays of any of these. Any other TOML value is rejected.

use crate::char_set::{CharSet, Seed};
use crate::error::Error;
use crate::predefined;
use crate::substrings::DEFAULT_MIN_LENGTH;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Root configuration for chars.toml
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CharsConfig {
    pub scan: ScanConfig,
    /// Custom sets by name
    pub sets: BTreeMap<String, SetConfig>,
}

/// Defaults for substring scanning
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    pub min_length: usize,
    /// Custom or predefined set name
    pub char_set: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            min_length: DEFAULT_MIN_LENGTH,
            char_set: "printable".to_string(),
        }
    }
}

/// A custom character set definition
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SetConfig {
    /// Predefined set to start from
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub seeds: Vec<toml::Value>,
}

impl SetConfig {
    /// Build the set described by this definition
    pub fn build(&self) -> Result<CharSet> {
        let mut set = match &self.base {
            Some(base) => predefined::by_name(base)
                .ok_or_else(|| anyhow!("Unknown base character set: {}", base))?
                .clone(),
            None => CharSet::new(),
        };

        for value in &self.seeds {
            set.insert(Seed::try_from(value)?)?;
        }
        Ok(set)
    }
}

impl CharsConfig {
    /// Load configuration from a TOML file
    ///
    /// ```no_run
    /// use chars::config::CharsConfig;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = CharsConfig::from_file("chars.toml")?;
    /// println!("{} custom sets", config.sets.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        debug!(path = %path.display(), "loading configuration");
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// Resolve a set name: custom sets first, then predefined ones
    pub fn resolve_set(&self, name: &str) -> Result<CharSet> {
        if let Some(custom) = self.sets.get(name) {
            return custom
                .build()
                .with_context(|| format!("Invalid character set definition: {}", name));
        }

        predefined::by_name(name)
            .cloned()
            .ok_or_else(|| anyhow!("Unknown character set: {}", name))
    }

    /// The set named by `scan.char_set`
    pub fn scan_set(&self) -> Result<CharSet> {
        self.resolve_set(&self.scan.char_set)
    }
}

impl TryFrom<&toml::Value> for Seed {
    type Error = Error;

    fn try_from(value: &toml::Value) -> Result<Self, Error> {
        match value {
            toml::Value::String(s) => Ok(Seed::Str(s.clone())),
            toml::Value::Integer(i) => code_point(*i).map(Seed::Int),
            toml::Value::Array(items) => items
                .iter()
                .map(Seed::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Seed::List),
            toml::Value::Table(table) => {
                let (Some(from), Some(to)) = (table.get("from"), table.get("to")) else {
                    return Err(Error::InvalidSeed {
                        found: "table without from/to".to_string(),
                    });
                };
                range_seed(from, to)
            }
            other => Err(Error::InvalidSeed {
                found: other.type_str().to_string(),
            }),
        }
    }
}

fn code_point(i: i64) -> Result<u32, Error> {
    u32::try_from(i).map_err(|_| Error::InvalidSeed {
        found: format!("integer {}", i),
    })
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn range_seed(from: &toml::Value, to: &toml::Value) -> Result<Seed, Error> {
    match (from, to) {
        (toml::Value::String(a), toml::Value::String(b)) => {
            match (single_char(a), single_char(b)) {
                (Some(a), Some(b)) if a <= b => Ok(Seed::CharRange(a..=b)),
                _ => Err(Error::InvalidRange(format!("{:?}..={:?}", a, b))),
            }
        }
        (toml::Value::Integer(a), toml::Value::Integer(b)) if a <= b => {
            Ok(Seed::IntRange(code_point(*a)?..=code_point(*b)?))
        }
        _ => Err(Error::InvalidRange(format!("{}..={}", from, to))),
    }
}
