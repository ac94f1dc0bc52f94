//! Error types for character-set construction and sampling

use thiserror::Error;

/// Errors raised by [`CharSet`](crate::CharSet) operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A seed was neither a character, an integer, a range nor a list
    #[error("seeds must be a String, Integer, Range or Array (found {found})")]
    InvalidSeed { found: String },

    /// An integer that is not a Unicode scalar value
    #[error("invalid code point: {0:#x}")]
    InvalidCodePoint(u32),

    /// A range seed whose bounds are of different kinds or reversed
    #[error("invalid range seed: {0}")]
    InvalidRange(String),

    #[error("cannot sample from an empty character set")]
    EmptySet,

    /// A length specification with no candidate lengths (e.g. `5..5` or `[]`)
    #[error("length specification is empty")]
    EmptyLengthSpec,

    #[error("invalid length specification: {0}")]
    InvalidLengthSpec(String),
}

/// Result type for character-set operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::InvalidCodePoint(0xd800).to_string(),
            "invalid code point: 0xd800"
        );
        assert_eq!(
            Error::EmptySet.to_string(),
            "cannot sample from an empty character set"
        );
        let err = Error::InvalidSeed {
            found: "float".to_string(),
        };
        assert!(err.to_string().contains("float"));
    }
}
