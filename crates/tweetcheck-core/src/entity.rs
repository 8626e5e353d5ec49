//! Username, list and hashtag validation.
//!
//! A candidate is valid when extraction over the candidate alone finds exactly
//! one entity and that entity covers the whole candidate.

use crate::extract::{Extractor, RegexExtractor};

/// Whether `username` (with its `@`) is a valid mention.
pub fn is_valid_username(username: &str) -> bool {
    is_valid_username_with(username, &RegexExtractor)
}

/// Whether `username` is a valid mention according to `extractor`.
pub fn is_valid_username_with<E>(username: &str, extractor: &E) -> bool
where
    E: Extractor + ?Sized,
{
    if username.is_empty() {
        return false;
    }
    let extracted = extractor.extract_mentioned_screen_names(username);
    matches!(extracted.as_slice(), [only] if only.text == username)
}

/// Whether `list` is a valid `@owner/list` reference.
pub fn is_valid_list(list: &str) -> bool {
    is_valid_list_with(list, &RegexExtractor)
}

/// Whether `list` is a valid `@owner/list` reference according to
/// `extractor`.
pub fn is_valid_list_with<E>(list: &str, extractor: &E) -> bool
where
    E: Extractor + ?Sized,
{
    if list.is_empty() {
        return false;
    }
    let extracted = extractor.extract_mentions_or_lists(list);
    matches!(
        extracted.as_slice(),
        [only] if only.text == list && only.list_slug.as_deref().is_some_and(|slug| !slug.is_empty())
    )
}

/// Whether `hashtag` (with its `#`) is a valid hashtag.
pub fn is_valid_hashtag(hashtag: &str) -> bool {
    is_valid_hashtag_with(hashtag, &RegexExtractor)
}

/// Whether `hashtag` is a valid hashtag according to `extractor`.
pub fn is_valid_hashtag_with<E>(hashtag: &str, extractor: &E) -> bool
where
    E: Extractor + ?Sized,
{
    if hashtag.is_empty() {
        return false;
    }
    let extracted = extractor.extract_hashtags(hashtag);
    matches!(extracted.as_slice(), [only] if only.text == hashtag)
}
