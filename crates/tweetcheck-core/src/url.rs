//! Structural URL validation.
//!
//! A candidate is first split into scheme, authority, path, query and
//! fragment by a permissive grammar that must cover the whole input. Each
//! captured part is then checked against its own grammar, built from the
//! character classes of RFC 3986 (plus Cyrillic letters in `unreserved`).
//! Any failing part rejects the whole candidate.

use std::sync::LazyLock;

use regex::Regex;

const UNRESERVED: &str = r"[a-z\p{Cyrillic}0-9\-._~]";
const PCT_ENCODED: &str = r"(?:%[0-9a-f]{2})";
const SUB_DELIMS: &str = r"[!$&'()*+,;=]";
const SCHEME: &str = r"(?:[a-z][a-z0-9+\-.]*)";
const DEC_OCTET: &str = r"(?:[0-9]|(?:[1-9][0-9])|(?:1[0-9]{2})|(?:2[0-4][0-9])|(?:25[0-5]))";
const IPV6: &str = r"(?:\[[a-f0-9:.]+\])";
const SUBDOMAIN_SEGMENT: &str = r"(?:[a-z0-9](?:[a-z0-9_\-]*[a-z0-9])?)";
const DOMAIN_SEGMENT: &str = r"(?:[a-z0-9](?:[a-z0-9\-]*[a-z0-9])?)";
const DOMAIN_TLD: &str = r"(?:[a-z](?:[a-z0-9\-]*[a-z0-9])?)";
const UNICODE_SUBDOMAIN_SEGMENT: &str =
    r"(?:(?:[a-z0-9]|[^\x00-\x7F])(?:(?:[a-z0-9_\-]|[^\x00-\x7F])*(?:[a-z0-9]|[^\x00-\x7F]))?)";
const UNICODE_DOMAIN_SEGMENT: &str =
    r"(?:(?:[a-z0-9]|[^\x00-\x7F])(?:(?:[a-z0-9\-]|[^\x00-\x7F])*(?:[a-z0-9]|[^\x00-\x7F]))?)";
const UNICODE_DOMAIN_TLD: &str =
    r"(?:(?:[a-z]|[^\x00-\x7F])(?:(?:[a-z0-9\-]|[^\x00-\x7F])*(?:[a-z0-9]|[^\x00-\x7F]))?)";
const PORT: &str = r"[0-9]{1,5}";

fn pchar() -> String {
    format!(r"(?:{UNRESERVED}|{PCT_ENCODED}|{SUB_DELIMS}|[@:|])")
}

fn userinfo() -> String {
    format!(r"(?:{UNRESERVED}|{PCT_ENCODED}|{SUB_DELIMS}|:)*")
}

fn ip() -> String {
    format!(r"(?:(?:{DEC_OCTET}(?:\.{DEC_OCTET}){{3}})|{IPV6})")
}

fn authority(subdomain: &str, segment: &str, tld: &str) -> String {
    let domain = format!(r"(?:(?:{subdomain}\.)*(?:{segment}\.){tld})");
    format!(
        r"(?:{userinfo}@)?(?:{ip}|{domain})(?::{PORT})?",
        userinfo = userinfo(),
        ip = ip(),
    )
}

/// Compile `pattern` so it only matches an entire string, case-insensitively.
fn whole(pattern: &str) -> Regex {
    Regex::new(&format!(r"(?i)\A(?:{pattern})\z")).expect("valid regex")
}

static UNENCODED_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\A(?:(?P<scheme>[^:/?#]+)://)?(?P<authority>[^/?#]*)(?P<path>[^?#]*)(?:\?(?P<query>[^#]*))?(?:#(?P<fragment>.*))?\z",
    )
    .expect("valid regex")
});

static SCHEME_PATTERN: LazyLock<Regex> = LazyLock::new(|| whole(SCHEME));

static PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| whole(&format!("(?:/{}*)*", pchar())));

static QUERY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| whole(&format!(r"(?:{}|/|\?)*", pchar())));

static FRAGMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| whole(&format!(r"(?:{}|/|\?)*", pchar())));

static AUTHORITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| whole(&authority(SUBDOMAIN_SEGMENT, DOMAIN_SEGMENT, DOMAIN_TLD)));

static UNICODE_AUTHORITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    whole(&authority(
        UNICODE_SUBDOMAIN_SEGMENT,
        UNICODE_DOMAIN_SEGMENT,
        UNICODE_DOMAIN_TLD,
    ))
});

/// Whether `url` is, in its entirety, a well-formed URL.
///
/// * `require_protocol` - demand an `http` or `https` scheme. When `false`
///   the scheme is not inspected and may be absent.
/// * `allow_unicode` - accept host labels containing non-ASCII characters.
#[tracing::instrument(skip(url), fields(url_len = url.len()))]
pub fn is_valid_url(url: &str, require_protocol: bool, allow_unicode: bool) -> bool {
    let Some(parts) = UNENCODED_URL.captures(url) else {
        tracing::trace!("no structural match");
        return false;
    };
    if parts.get(0).is_none_or(|m| m.range() != (0..url.len())) {
        return false;
    }

    let part = |name: &str| parts.name(name).map(|m| m.as_str());

    if require_protocol && !part("scheme").is_some_and(is_web_scheme) {
        tracing::trace!("missing or unsupported scheme");
        return false;
    }

    if !PATH_PATTERN.is_match(part("path").unwrap_or_default()) {
        tracing::trace!("invalid path");
        return false;
    }

    if part("query").is_some_and(|query| !QUERY_PATTERN.is_match(query)) {
        tracing::trace!("invalid query");
        return false;
    }

    if part("fragment").is_some_and(|fragment| !FRAGMENT_PATTERN.is_match(fragment)) {
        tracing::trace!("invalid fragment");
        return false;
    }

    let authority_pattern = if allow_unicode {
        &UNICODE_AUTHORITY_PATTERN
    } else {
        &AUTHORITY_PATTERN
    };
    let valid = authority_pattern.is_match(part("authority").unwrap_or_default());
    if !valid {
        tracing::trace!("invalid authority");
    }
    valid
}

fn is_web_scheme(scheme: &str) -> bool {
    SCHEME_PATTERN.is_match(scheme)
        && (scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https"))
}
