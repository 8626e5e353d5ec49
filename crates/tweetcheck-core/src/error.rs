//! Error types for tweetcheck-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Why a piece of text was rejected as a post.
///
/// Exactly one variant is reported per failed validation. Checks run in a
/// fixed order (empty, length, forbidden characters) and the first failure
/// wins.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The text is the empty string.
    #[error("text may not be empty")]
    Empty,

    /// The computed length exceeds the limit. Carries the computed length.
    #[error("length {0} exceeds the maximum")]
    TooLong(usize),

    /// The text contains a forbidden character.
    #[error("invalid character {character:?} found at byte offset {offset}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of its first occurrence.
        offset: usize,
    },
}

impl ValidationError {
    /// Short machine-friendly name of the variant.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooLong(_) => "too-long",
            Self::InvalidCharacter { .. } => "invalid-character",
        }
    }
}

/// Result type alias using [`ValidationError`].
pub type ValidationResult<T> = Result<T, ValidationError>;
