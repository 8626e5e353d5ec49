//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// Run a command with `--json` and parse its stdout, whatever the exit status.
fn json_output(args: &[&str]) -> (bool, Value) {
    let output = cmd()
        .args(args)
        .arg("--json")
        .output()
        .expect("failed to run command");
    let json = serde_json::from_slice(&output.stdout).expect("invalid JSON output");
    (output.status.success(), json)
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn long_help_lists_environment_variables() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("TWEETCHECK_LOG_DIR"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn no_arguments_shows_help_and_fails() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_outputs_valid_json() {
    let (ok, json) = json_output(&["info"]);
    assert!(ok);
    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_flag_accepted() {
    cmd().args(["-q", "info"]).assert().success();
}

#[test]
fn multiple_verbose_flags_accepted() {
    cmd().args(["-vv", "info"]).assert().success();
}

#[test]
fn color_never_accepted() {
    cmd().args(["--color", "never", "info"]).assert().success();
}

#[test]
fn log_dir_env_writes_json_log_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    cmd()
        .env("TWEETCHECK_LOG_DIR", tmp.path())
        .args(["-v", "length", "hello"])
        .assert()
        .success();

    let log = std::fs::read_to_string(tmp.path().join("tweetcheck.jsonl")).unwrap();
    let first = log.lines().next().expect("log file should not be empty");
    let _: Value = serde_json::from_str(first).expect("log lines should be JSON");
}

// =============================================================================
// Parse
// =============================================================================

#[test]
fn parse_accepts_short_text() {
    cmd()
        .args(["--color", "never", "parse", "Hello, world!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS: weighted length 13/280"))
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn color_never_prints_plain_text() {
    cmd()
        .args(["--color", "never", "url", "https://example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn color_always_styles_output() {
    cmd()
        .args(["--color", "always", "parse", "Hello, world!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b["));
}

#[test]
fn rejected_input_is_not_logged_as_fatal() {
    cmd()
        .args(["parse", "a".repeat(281).as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the maximum"))
        .stderr(predicate::str::contains("fatal error").not());
}

#[test]
fn operational_failure_is_logged_as_fatal() {
    cmd()
        .args(["parse", "--file", "/nonexistent/post.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fatal error"));
}

#[test]
fn parse_json_reports_outcome() {
    let (ok, json) = json_output(&["parse", "Hello, world!"]);
    assert!(ok);
    assert_eq!(json["weighted_length"], 13);
    assert_eq!(json["permillage"], 46);
    assert_eq!(json["valid"], true);
    assert!(json["error"].is_null());
}

#[test]
fn parse_counts_cjk_double() {
    let (ok, json) = json_output(&["parse", "日本語"]);
    assert!(ok);
    assert_eq!(json["weighted_length"], 6);
}

#[test]
fn parse_rejects_overlong_text_with_json_error() {
    let long = "a".repeat(281);
    let (ok, json) = json_output(&["parse", &long]);
    assert!(!ok);
    assert_eq!(json["valid"], false);
    assert_eq!(json["weighted_length"], 281);
    assert_eq!(json["permillage"], 1003);
    assert_eq!(json["error"]["kind"], "too-long");
}

#[test]
fn parse_rejects_bidi_override() {
    cmd()
        .args(["parse", "bad \u{202E} char"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid character"));
}

#[test]
fn parse_rejects_empty_text() {
    cmd()
        .args(["parse", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("may not be empty"));
}

#[test]
fn parse_max_length_flag_overrides_default() {
    cmd()
        .args(["parse", "Hello, world!", "--max-length", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the maximum"));
}

#[test]
fn parse_reads_stdin() {
    let (ok, json) = {
        let output = cmd()
            .args(["parse", "--json"])
            .write_stdin("Hello, world!\n")
            .output()
            .expect("failed to run command");
        (
            output.status.success(),
            serde_json::from_slice::<Value>(&output.stdout).expect("invalid JSON output"),
        )
    };
    assert!(ok);
    assert_eq!(json["weighted_length"], 13);
}

#[test]
fn parse_reads_file() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), "Hello, world!\n").unwrap();
    let (ok, json) = json_output(&["parse", "--file", tmp.path().to_str().unwrap()]);
    assert!(ok);
    assert_eq!(json["weighted_length"], 13);
}

#[test]
fn parse_missing_file_fails() {
    cmd()
        .args(["parse", "--file", "/nonexistent/post.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

// =============================================================================
// Validate & Length
// =============================================================================

#[test]
fn validate_accepts_140_letters() {
    cmd().args(["validate", &"a".repeat(140)]).assert().success();
}

#[test]
fn validate_rejects_141_letters() {
    let (ok, json) = json_output(&["validate", &"a".repeat(141)]);
    assert!(!ok);
    assert_eq!(json["length"], 141);
    assert_eq!(json["error"]["kind"], "too-long");
}

#[test]
fn validate_rejects_byte_order_mark() {
    let (ok, json) = json_output(&["validate", "\u{FEFF}start"]);
    assert!(!ok);
    assert_eq!(json["error"]["kind"], "invalid-character");
}

#[test]
fn length_counts_links_as_short_urls() {
    let (ok, json) = json_output(&["length", "see https://example.com/a/very/long/path"]);
    assert!(ok);
    assert_eq!(json["weighted_length"], 27);
    assert_eq!(json["legacy_length"], 27);
}

// =============================================================================
// URL & Entities
// =============================================================================

#[test]
fn length_shortens_link_after_cjk_text() {
    let (ok, json) = json_output(&["length", "日本語http://example.com"]);
    assert!(ok);
    assert_eq!(json["weighted_length"], 29);
    assert_eq!(json["legacy_length"], 25);
}

#[test]
fn length_treats_bare_country_domain_as_text() {
    let (ok, json) = json_output(&["length", "ciao hello.it"]);
    assert!(ok);
    assert_eq!(json["weighted_length"], 13);
}

#[test]
fn url_accepts_http_url() {
    cmd()
        .args(["url", "https://example.com/path?q=1#top"])
        .assert()
        .success();
}

#[test]
fn url_requires_protocol_by_default() {
    cmd()
        .args(["url", "example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid URL"));
}

#[test]
fn url_no_require_protocol_flag() {
    cmd()
        .args(["url", "example.com", "--no-require-protocol"])
        .assert()
        .success();
}

#[test]
fn url_unicode_flag_allows_idn() {
    cmd().args(["url", "http://例え.jp"]).assert().failure();
    cmd().args(["url", "http://例え.jp", "--unicode"]).assert().success();
}

#[test]
fn username_checks() {
    cmd().args(["username", "@alice"]).assert().success();
    cmd()
        .args(["username", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid username"));
}

#[test]
fn list_checks() {
    cmd().args(["list", "@alice/friends"]).assert().success();
    cmd().args(["list", "@alice"]).assert().failure();
}

#[test]
fn hashtag_checks() {
    let (ok, json) = json_output(&["hashtag", "#rust"]);
    assert!(ok);
    assert_eq!(json["kind"], "hashtag");
    assert_eq!(json["valid"], true);
    cmd().args(["hashtag", "#123"]).assert().failure();
}

#[test]
fn extract_lists_entities_in_order() {
    let (ok, json) = json_output(&["extract", "#rust by @alice at https://example.com"]);
    assert!(ok);
    let kinds: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, ["hashtag", "mention", "url"]);
    assert_eq!(json[1]["range"]["start"], 9);
}

#[test]
fn extract_kind_filter() {
    let (ok, json) = json_output(&["extract", "#one #two @alice", "--kind", "mention"]);
    assert!(ok);
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["text"], "@alice");
}
