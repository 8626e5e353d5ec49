//! Validate command: legacy character-count check.

use clap::Args;
use owo_colors::{OwoColorize, Stream::Stdout};
use serde::Serialize;
use tracing::{debug, instrument};

use tweetcheck_core::{RegexExtractor, legacy_length, validate_legacy_with};

use super::{TextInput, rejected};
use super::parse::ErrorReport;

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Input text source.
    #[command(flatten)]
    pub input: TextInput,

    /// Character limit (overrides config).
    #[arg(long, value_name = "N")]
    pub max_length: Option<usize>,
}

#[derive(Serialize)]
struct ValidateReport {
    valid: bool,
    length: usize,
    max_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

/// Check text against the legacy length rules.
#[instrument(name = "cmd_validate", skip_all)]
pub fn cmd_validate(
    args: ValidateArgs,
    global_json: bool,
    config_max_length: usize,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let max_length = args.max_length.unwrap_or(config_max_length);
    let text = args.input.read(max_input_bytes)?;
    debug!(text_len = text.len(), max_length, "executing validate command");

    let result = validate_legacy_with(&text, max_length, &RegexExtractor);
    let length = legacy_length(&text);

    if global_json {
        let report = ValidateReport {
            valid: result.is_ok(),
            length,
            max_length,
            error: result.err().map(ErrorReport::from),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if result.is_ok() {
        println!(
            "{} length {length}/{max_length}",
            "PASS:".if_supports_color(Stdout, |s| s.green())
        );
    }

    if let Err(err) = result {
        return Err(rejected(err));
    }
    Ok(())
}
