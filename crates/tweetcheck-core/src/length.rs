//! Length of a post as the platform counts it.
//!
//! Two counters live here:
//!
//! - [`weighted_length`] canonicalizes the text to NFC, charges every
//!   character its [`WeightTable`] weight and replaces each URL's cost with a
//!   fixed short-link length.
//! - [`legacy_length`] counts NFC characters one-for-one and applies the older
//!   short-link lengths. It backs the original 140-character check.
//!
//! Both ask an [`Extractor`] for the URLs in the *original* text. A URL costs
//! the same no matter how long it really is, because the platform rewrites
//! every link to a shortened form before display.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::extract::{Extractor, RegexExtractor};
use crate::weights::{DEFAULT_WEIGHTS, WeightTable};

/// Character units charged for a link, by scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ShortUrlLengths {
    /// Length of a shortened non-`https://` link.
    pub http: usize,
    /// Length of a shortened `https://` link.
    pub https: usize,
}

impl ShortUrlLengths {
    /// Length charged for `url`, chosen by its scheme prefix.
    pub fn for_url(&self, url: &str) -> usize {
        if url.starts_with("https://") {
            self.https
        } else {
            self.http
        }
    }
}

/// Short-link lengths used by the weighted counter.
pub const WEIGHTED_SHORT_URL_LENGTHS: ShortUrlLengths = ShortUrlLengths {
    http: 23,
    https: 23,
};

/// Short-link lengths used by the legacy counter.
pub const LEGACY_SHORT_URL_LENGTHS: ShortUrlLengths = ShortUrlLengths {
    http: 22,
    https: 23,
};

/// Weighted length of `text` using the default table, link lengths and
/// extractor.
pub fn weighted_length(text: &str) -> usize {
    weighted_length_with(
        text,
        &DEFAULT_WEIGHTS,
        WEIGHTED_SHORT_URL_LENGTHS,
        &RegexExtractor,
    )
}

/// Weighted length of `text`.
///
/// The raw (unscaled) weight of each URL the extractor reports is removed
/// from the raw weight of the whole text, the remainder is scaled down with
/// floor division, and the short-link length of each URL is added on top.
/// URL spans are trusted as given; an unfaithful span can only under-count.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn weighted_length_with<E>(
    text: &str,
    table: &WeightTable,
    short_urls: ShortUrlLengths,
    extractor: &E,
) -> usize
where
    E: Extractor + ?Sized,
{
    let normalized = nfc(text);
    let mut raw = table.raw_weight(&normalized);

    let urls = extractor.extract_urls(text);
    let mut substituted = 0;
    for url in &urls {
        raw = raw.saturating_sub(table.raw_weight(&nfc(&url.text)));
        substituted += short_urls.for_url(&url.text);
    }

    let length = raw / table.scale.max(1) + substituted;
    tracing::trace!(urls = urls.len(), length, "computed weighted length");
    length
}

/// Legacy length of `text` using the default link lengths and extractor.
pub fn legacy_length(text: &str) -> usize {
    legacy_length_with(text, LEGACY_SHORT_URL_LENGTHS, &RegexExtractor)
}

/// Legacy length of `text`: NFC characters, with each URL's character range
/// replaced by its short-link length.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn legacy_length_with<E>(text: &str, short_urls: ShortUrlLengths, extractor: &E) -> usize
where
    E: Extractor + ?Sized,
{
    let mut length = text.nfc().count();

    let urls = extractor.extract_urls(text);
    for url in &urls {
        length = length.saturating_sub(url.char_len());
        length += short_urls.for_url(&url.text);
    }

    tracing::trace!(urls = urls.len(), length, "computed legacy length");
    length
}

fn nfc(text: &str) -> String {
    text.nfc().collect()
}
