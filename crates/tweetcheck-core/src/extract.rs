//! Entity extraction.
//!
//! The length engine and the entity validators only need to know *where* URLs,
//! mentions and hashtags sit in a piece of text. That knowledge comes through
//! the [`Extractor`] trait so callers can plug in their own scanner (or a stub
//! in tests). [`RegexExtractor`] is the built-in implementation: a compact
//! grammar that recognizes the common shapes of each entity.
//!
//! Entity ranges count characters (Unicode scalar values) in the text that was
//! scanned, not bytes.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// What an [`Entity`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum EntityKind {
    /// A link, with or without scheme.
    Url,
    /// An `@name` mention or an `@owner/list` reference.
    Mention,
    /// A `#tag`.
    Hashtag,
    /// A `$SYMBOL`.
    Cashtag,
}

/// A recognized substring of some text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    /// Entity kind.
    pub kind: EntityKind,
    /// The matched text, sigil included.
    pub text: String,
    /// Character range of the match in the scanned text.
    pub range: Range<usize>,
    /// List slug (with its leading `/`) for `@owner/list` mentions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_slug: Option<String>,
}

impl Entity {
    /// Create an entity without a list slug.
    pub fn new(kind: EntityKind, text: impl Into<String>, range: Range<usize>) -> Self {
        Self {
            kind,
            text: text.into(),
            range,
            list_slug: None,
        }
    }

    /// Number of characters the entity covers in the scanned text.
    pub fn char_len(&self) -> usize {
        self.range.len()
    }
}

/// Source of entity spans for a piece of text.
///
/// Implementations must return entities in text order with ranges that are
/// faithful to the scanned text: the characters at `range` must be exactly
/// `text`. Consumers do not re-check this.
pub trait Extractor {
    /// URLs in `text`.
    fn extract_urls(&self, text: &str) -> Vec<Entity>;

    /// `@name` mentions and `@owner/list` references in `text`.
    fn extract_mentions_or_lists(&self, text: &str) -> Vec<Entity>;

    /// Plain `@name` mentions, skipping list references.
    fn extract_mentioned_screen_names(&self, text: &str) -> Vec<Entity> {
        self.extract_mentions_or_lists(text)
            .into_iter()
            .filter(|entity| entity.list_slug.is_none())
            .collect()
    }

    /// `#tag` hashtags in `text`.
    fn extract_hashtags(&self, text: &str) -> Vec<Entity>;

    /// `$SYMBOL` cashtags in `text`.
    fn extract_cashtags(&self, text: &str) -> Vec<Entity>;

    /// Entities of one kind in `text`.
    fn extract(&self, text: &str, kind: EntityKind) -> Vec<Entity> {
        match kind {
            EntityKind::Url => self.extract_urls(text),
            EntityKind::Mention => self.extract_mentions_or_lists(text),
            EntityKind::Hashtag => self.extract_hashtags(text),
            EntityKind::Cashtag => self.extract_cashtags(text),
        }
    }
}

/// Generic and common country-code TLDs accepted for scheme-less URLs.
const BARE_DOMAIN_TLDS: &str = "com|net|org|edu|gov|mil|int|info|biz|name|pro|mobi|app|dev|io|co|me|tv|ly|fm|gl|us|uk|ca|de|fr|es|it|nl|be|ch|at|se|no|dk|fi|pl|cz|ru|ua|jp|kr|cn|tw|hk|in|au|nz|br|mx|ar|za";

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r#"(?i)https?://[^\s<>"]+|(?:[a-z0-9](?:[a-z0-9\-]*[a-z0-9])?\.)+(?:{BARE_DOMAIN_TLDS})\b(?::[0-9]{{1,5}})?(?:/[^\s<>"]*)?"#
    );
    Regex::new(&pattern).expect("valid regex")
});

static MENTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[@＠](?P<name>[A-Za-z0-9_]{1,20})(?P<slug>/[A-Za-z][A-Za-z0-9_\-]{0,24})?")
        .expect("valid regex")
});

static HASHTAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[#＃][\p{L}\p{M}\p{Nd}_]*[\p{L}\p{M}][\p{L}\p{M}\p{Nd}_]*").expect("valid regex")
});

static CASHTAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\$[a-z]{1,6}(?:[._][a-z]{1,2})?\b").expect("valid regex")
});

/// The built-in regex-backed [`Extractor`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexExtractor;

impl RegexExtractor {
    /// Create the extractor. Grammars compile lazily on first use.
    pub const fn new() -> Self {
        Self
    }
}

impl Extractor for RegexExtractor {
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    fn extract_urls(&self, text: &str) -> Vec<Entity> {
        let mut offsets = CharOffsets::new(text);
        let mut found = Vec::new();

        for m in URL_PATTERN.find_iter(text) {
            let has_scheme = m.as_str().contains("://");
            let before = text[..m.start()].chars().next_back();
            let rejected = before.is_some_and(|c| {
                if has_scheme {
                    // Scripts without word spacing may run straight into a link.
                    c.is_ascii_alphanumeric()
                        || matches!(c, '@' | '＠' | '$' | '#' | '＃' | '\u{202A}'..='\u{202E}')
                } else {
                    c.is_alphanumeric() || matches!(c, '@' | '.' | '-' | '/' | '$' | '#' | '_')
                }
            });
            if rejected {
                continue;
            }

            let url = trim_url_end(m.as_str());
            if has_scheme && url.split_once("://").is_none_or(|(_, rest)| rest.is_empty()) {
                continue;
            }
            if !has_scheme && is_short_cctld_domain(url) {
                continue;
            }

            let end = m.start() + url.len();
            let range = offsets.at(m.start())..offsets.at(end);
            found.push(Entity::new(EntityKind::Url, url, range));
        }

        tracing::trace!(count = found.len(), "extracted urls");
        found
    }

    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    fn extract_mentions_or_lists(&self, text: &str) -> Vec<Entity> {
        let mut offsets = CharOffsets::new(text);
        let mut found = Vec::new();

        for caps in MENTION_PATTERN.captures_iter(text) {
            let Some(m) = caps.get(0) else { continue };
            let before = text[..m.start()].chars().next_back();
            if before.is_some_and(|c| {
                c.is_ascii_alphanumeric()
                    || matches!(c, '_' | '!' | '#' | '$' | '%' | '&' | '*' | '@' | '＠')
            }) {
                continue;
            }
            let after = &text[m.end()..];
            if after.starts_with(['@', '＠']) || after.starts_with("://") {
                continue;
            }

            let range = offsets.at(m.start())..offsets.at(m.end());
            let mut entity = Entity::new(EntityKind::Mention, m.as_str(), range);
            entity.list_slug = caps.name("slug").map(|slug| slug.as_str().to_string());
            found.push(entity);
        }

        found
    }

    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    fn extract_hashtags(&self, text: &str) -> Vec<Entity> {
        let mut offsets = CharOffsets::new(text);
        let mut found = Vec::new();

        for m in HASHTAG_PATTERN.find_iter(text) {
            let before = text[..m.start()].chars().next_back();
            if before.is_some_and(|c| c == '&' || is_word_char(c)) {
                continue;
            }
            let after = &text[m.end()..];
            if after.starts_with(['#', '＃']) || after.starts_with("://") {
                continue;
            }

            let range = offsets.at(m.start())..offsets.at(m.end());
            found.push(Entity::new(EntityKind::Hashtag, m.as_str(), range));
        }

        found
    }

    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    fn extract_cashtags(&self, text: &str) -> Vec<Entity> {
        let mut offsets = CharOffsets::new(text);
        let mut found = Vec::new();

        for m in CASHTAG_PATTERN.find_iter(text) {
            let before = text[..m.start()].chars().next_back();
            if before.is_some_and(|c| c == '$' || is_word_char(c)) {
                continue;
            }

            let range = offsets.at(m.start())..offsets.at(m.end());
            found.push(Entity::new(EntityKind::Cashtag, m.as_str(), range));
        }

        found
    }
}

/// `name.cc` with no subdomain, port or path reads as prose ("hello.it")
/// more often than as a link.
fn is_short_cctld_domain(url: &str) -> bool {
    if url.contains(['/', ':']) {
        return false;
    }
    let mut labels = url.split('.');
    matches!(
        (labels.next(), labels.next(), labels.next()),
        (Some(_), Some(tld), None) if tld.len() == 2
    )
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Drop trailing sentence punctuation and unbalanced closing parentheses.
fn trim_url_end(url: &str) -> &str {
    let mut end = url.len();
    while let Some(last) = url[..end].chars().next_back() {
        let candidate = &url[..end];
        let unbalanced_paren =
            last == ')' && candidate.matches(')').count() > candidate.matches('(').count();
        if matches!(last, '.' | ',' | ';' | ':' | '!' | '?' | '\'' | '"') || unbalanced_paren {
            end -= last.len_utf8();
        } else {
            break;
        }
    }
    &url[..end]
}

/// Converts increasing byte offsets into character offsets without rescanning
/// the text from the start each time.
struct CharOffsets<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharOffsets<'a> {
    const fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            chars: 0,
        }
    }

    fn at(&mut self, byte: usize) -> usize {
        if byte < self.byte {
            self.byte = 0;
            self.chars = 0;
        }
        self.chars += self.text[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(entities: &[Entity]) -> Vec<&str> {
        entities.iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn urls_with_scheme() {
        let urls = RegexExtractor.extract_urls("see http://example.com and https://t.co/abc");
        assert_eq!(texts(&urls), vec!["http://example.com", "https://t.co/abc"]);
        assert_eq!(urls[0].range, 4..22);
        assert_eq!(urls[0].kind, EntityKind::Url);
    }

    #[test]
    fn bare_domains_need_a_known_tld() {
        let urls = RegexExtractor.extract_urls("visit example.com or example.notatld today");
        assert_eq!(texts(&urls), vec!["example.com"]);
    }

    #[test]
    fn email_addresses_are_not_urls() {
        assert!(RegexExtractor.extract_urls("mail me at me@example.com").is_empty());
    }

    #[test]
    fn trailing_punctuation_is_trimmed() {
        let urls = RegexExtractor.extract_urls("(see http://example.com/a).");
        assert_eq!(texts(&urls), vec!["http://example.com/a"]);

        let urls = RegexExtractor.extract_urls("http://en.wikipedia.org/wiki/Rust_(language)");
        assert_eq!(texts(&urls), vec!["http://en.wikipedia.org/wiki/Rust_(language)"]);
    }

    #[test]
    fn url_ranges_count_characters() {
        let urls = RegexExtractor.extract_urls("日本 http://example.com");
        assert_eq!(urls[0].range, 3..21);
    }

    #[test]
    fn scheme_url_directly_after_cjk_text() {
        let urls = RegexExtractor.extract_urls("日本語http://example.com");
        assert_eq!(texts(&urls), vec!["http://example.com"]);
        assert_eq!(urls[0].range, 3..21);

        let urls = RegexExtractor.extract_urls("続きはhttps://example.com/a");
        assert_eq!(texts(&urls), vec!["https://example.com/a"]);
    }

    #[test]
    fn scheme_url_after_sigil_is_ignored() {
        assert!(RegexExtractor.extract_urls("$http://example.com").is_empty());
        assert!(RegexExtractor.extract_urls("＃http://example.com").is_empty());
    }

    #[test]
    fn short_country_domains_need_more_than_a_name() {
        assert!(RegexExtractor.extract_urls("hello.it").is_empty());
        assert!(RegexExtractor.extract_urls("see example.jp today").is_empty());

        let urls = RegexExtractor.extract_urls("www.hello.it and hello.it/menu and example.com");
        assert_eq!(texts(&urls), vec!["www.hello.it", "hello.it/menu", "example.com"]);
    }

    #[test]
    fn url_glued_to_a_word_is_ignored() {
        assert!(RegexExtractor.extract_urls("xhttp://example.com").is_empty());
        assert!(RegexExtractor.extract_urls("http://").is_empty());
    }

    #[test]
    fn mentions_and_lists() {
        let found = RegexExtractor.extract_mentions_or_lists("hi @alice and @bob/friends!");
        assert_eq!(texts(&found), vec!["@alice", "@bob/friends"]);
        assert_eq!(found[0].list_slug, None);
        assert_eq!(found[1].list_slug.as_deref(), Some("/friends"));
        assert_eq!(found[1].range, 14..26);
    }

    #[test]
    fn screen_names_skip_lists() {
        let found = RegexExtractor.extract_mentioned_screen_names("@alice @bob/friends");
        assert_eq!(texts(&found), vec!["@alice"]);
    }

    #[test]
    fn mention_boundaries() {
        assert!(RegexExtractor.extract_mentions_or_lists("me@example").is_empty());
        assert!(RegexExtractor.extract_mentions_or_lists("@alice@bob").is_empty());
        assert!(RegexExtractor.extract_mentions_or_lists("@http://x").is_empty());
        let found = RegexExtractor.extract_mentions_or_lists("RT:@alice");
        assert_eq!(texts(&found), vec!["@alice"]);
    }

    #[test]
    fn hashtags() {
        let found = RegexExtractor.extract_hashtags("#rust is #1 but #2fast and #日本語");
        assert_eq!(texts(&found), vec!["#rust", "#2fast", "#日本語"]);
    }

    #[test]
    fn hashtag_boundaries() {
        assert!(RegexExtractor.extract_hashtags("a#tag").is_empty());
        assert!(RegexExtractor.extract_hashtags("&#tag").is_empty());
        assert!(RegexExtractor.extract_hashtags("#tag#other").is_empty());
    }

    #[test]
    fn cashtags() {
        let found = RegexExtractor.extract_cashtags("buy $AAPL and $brk.a, not a$B or $TOOLONG");
        assert_eq!(texts(&found), vec!["$AAPL", "$brk.a"]);
    }

    #[test]
    fn extract_dispatches_by_kind() {
        let text = "@a #b $C http://d.com";
        assert_eq!(texts(&RegexExtractor.extract(text, EntityKind::Mention)), vec!["@a"]);
        assert_eq!(texts(&RegexExtractor.extract(text, EntityKind::Hashtag)), vec!["#b"]);
        assert_eq!(texts(&RegexExtractor.extract(text, EntityKind::Cashtag)), vec!["$C"]);
        assert_eq!(texts(&RegexExtractor.extract(text, EntityKind::Url)), vec!["http://d.com"]);
    }

    #[test]
    fn char_offsets_are_monotonic_and_resettable() {
        let mut offsets = CharOffsets::new("aé日b");
        assert_eq!(offsets.at(1), 1);
        assert_eq!(offsets.at(3), 2);
        assert_eq!(offsets.at(6), 3);
        assert_eq!(offsets.at(0), 0);
        assert_eq!(offsets.at(7), 4);
    }
}
