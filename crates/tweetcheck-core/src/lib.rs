//! Core library for tweetcheck.
//!
//! Decides whether a piece of text is a valid short post under the
//! platform's length rules, and validates the usernames, lists, hashtags and
//! URLs that appear in posts.
//!
//! # Modules
//!
//! - [`weights`] - Per-codepoint weight table
//! - [`extract`] - Entity extraction trait and the built-in regex extractor
//! - [`length`] - Weighted and legacy length counters
//! - [`tweet`] - Whole-post validation
//! - [`entity`] - Username, list and hashtag validation
//! - [`url`] - Structural URL validation
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use tweetcheck_core::{ValidationError, parse, validate_legacy};
//!
//! let (outcome, error) = parse("Hello, world!");
//! assert!(outcome.valid && error.is_none());
//! assert_eq!(outcome.weighted_length, 13);
//!
//! assert_eq!(validate_legacy(""), Err(ValidationError::Empty));
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod entity;
pub mod error;
pub mod extract;
pub mod length;
pub mod tweet;
pub mod url;
pub mod weights;

pub use config::{Config, ConfigLoader, ConfigSources, DEFAULT_MAX_INPUT_BYTES, LogLevel};
pub use entity::{is_valid_hashtag, is_valid_list, is_valid_username};
pub use error::{ConfigError, ConfigResult, ValidationError, ValidationResult};
pub use extract::{Entity, EntityKind, Extractor, RegexExtractor};
pub use length::{ShortUrlLengths, legacy_length, weighted_length};
pub use tweet::{
    MAX_LEGACY_LENGTH, MAX_WEIGHTED_LENGTH, ValidationOutcome, is_valid_tweet, parse, parse_with,
    validate_legacy, validate_legacy_with,
};
pub use url::is_valid_url;
pub use weights::{DEFAULT_WEIGHTS, WeightRange, WeightTable};
