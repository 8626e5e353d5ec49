//! Whole-post validation.
//!
//! Two independent entry points:
//!
//! - [`validate_legacy`] checks the original rules: the legacy length against
//!   a 140-character limit.
//! - [`parse`] checks the current rules: the weighted length against a
//!   280-unit limit, and reports how much of the limit the text uses.
//!
//! Both run the same ordered checks and stop at the first failure:
//! empty text, then length, then forbidden characters.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::extract::{Extractor, RegexExtractor};
use crate::length::{
    LEGACY_SHORT_URL_LENGTHS, WEIGHTED_SHORT_URL_LENGTHS, legacy_length_with,
    weighted_length_with,
};
use crate::weights::DEFAULT_WEIGHTS;

/// Limit applied by [`validate_legacy`].
pub const MAX_LEGACY_LENGTH: usize = 140;

/// Limit applied by [`parse`].
pub const MAX_WEIGHTED_LENGTH: usize = 280;

/// Byte-order marks, noncharacters and bidirectional embedding/override
/// controls.
const INVALID_CHARACTERS: &[char] = &[
    '\u{FFFE}', '\u{FEFF}', '\u{FFFF}', '\u{202A}', '\u{202B}', '\u{202C}', '\u{202D}',
    '\u{202E}',
];

/// Result of [`parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationOutcome {
    /// Weighted length of the text.
    pub weighted_length: usize,
    /// Share of the limit used, in parts per thousand. Not clamped: over-long
    /// text reports more than 1000.
    pub permillage: usize,
    /// Whether every check passed.
    pub valid: bool,
}

/// Check `text` against the legacy 140-character rules.
pub fn validate_legacy(text: &str) -> ValidationResult<()> {
    validate_legacy_with(text, MAX_LEGACY_LENGTH, &RegexExtractor)
}

/// Check `text` against the legacy rules with a custom limit and extractor.
///
/// Returns the first failure of: empty text, legacy length over
/// `max_length`, a forbidden character.
#[tracing::instrument(skip(text, extractor), fields(text_len = text.len()))]
pub fn validate_legacy_with<E>(text: &str, max_length: usize, extractor: &E) -> ValidationResult<()>
where
    E: Extractor + ?Sized,
{
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }

    let length = legacy_length_with(text, LEGACY_SHORT_URL_LENGTHS, extractor);
    if length > max_length {
        tracing::debug!(length, max_length, "text too long");
        return Err(ValidationError::TooLong(length));
    }

    if let Some(err) = find_invalid_character(text) {
        tracing::debug!(error = %err, "forbidden character");
        return Err(err);
    }

    Ok(())
}

/// Whether `text` passes [`validate_legacy`].
pub fn is_valid_tweet(text: &str) -> bool {
    validate_legacy(text).is_ok()
}

/// Check `text` against the current weighted rules.
pub fn parse(text: &str) -> (ValidationOutcome, Option<ValidationError>) {
    parse_with(text, MAX_WEIGHTED_LENGTH, &RegexExtractor)
}

/// Check `text` against the weighted rules with a custom limit and extractor.
///
/// The outcome is always filled in, even for invalid text, so callers can
/// show how far over the limit a draft is. A zero limit reports a
/// permillage of 0.
#[tracing::instrument(skip(text, extractor), fields(text_len = text.len()))]
pub fn parse_with<E>(
    text: &str,
    max_weighted_length: usize,
    extractor: &E,
) -> (ValidationOutcome, Option<ValidationError>)
where
    E: Extractor + ?Sized,
{
    let weighted_length = weighted_length_with(
        text,
        &DEFAULT_WEIGHTS,
        WEIGHTED_SHORT_URL_LENGTHS,
        extractor,
    );

    let error = if text.is_empty() {
        Some(ValidationError::Empty)
    } else if weighted_length > max_weighted_length {
        Some(ValidationError::TooLong(weighted_length))
    } else {
        find_invalid_character(text)
    };

    let permillage = (weighted_length * 1000)
        .checked_div(max_weighted_length)
        .unwrap_or(0);

    let outcome = ValidationOutcome {
        weighted_length,
        permillage,
        valid: error.is_none(),
    };
    tracing::debug!(?outcome, ?error, "parsed text");
    (outcome, error)
}

fn find_invalid_character(text: &str) -> Option<ValidationError> {
    text.char_indices()
        .find(|(_, c)| INVALID_CHARACTERS.contains(c))
        .map(|(offset, character)| ValidationError::InvalidCharacter { character, offset })
}
