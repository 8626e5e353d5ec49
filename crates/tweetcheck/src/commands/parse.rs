//! Parse command: weighted length check.

use clap::Args;
use owo_colors::{OwoColorize, Stream::Stdout};
use serde::Serialize;
use tracing::{debug, instrument};

use tweetcheck_core::{RegexExtractor, ValidationError, ValidationOutcome, parse_with};

use super::{TextInput, rejected};

/// Arguments for the `parse` subcommand.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Input text source.
    #[command(flatten)]
    pub input: TextInput,

    /// Weighted length limit (overrides config).
    #[arg(long, value_name = "N")]
    pub max_length: Option<usize>,
}

/// Machine-readable form of a validation failure.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    /// Stable failure name, e.g. `too-long`.
    pub kind: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl From<ValidationError> for ErrorReport {
    fn from(err: ValidationError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ParseReport {
    #[serde(flatten)]
    outcome: ValidationOutcome,
    max_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

/// Check text against the weighted length rules.
#[instrument(name = "cmd_parse", skip_all)]
pub fn cmd_parse(
    args: ParseArgs,
    global_json: bool,
    config_max_length: usize,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let max_length = args.max_length.unwrap_or(config_max_length);
    let text = args.input.read(max_input_bytes)?;
    debug!(text_len = text.len(), max_length, "executing parse command");

    let (outcome, error) = parse_with(&text, max_length, &RegexExtractor);

    if global_json {
        let report = ParseReport {
            outcome,
            max_length,
            error: error.map(ErrorReport::from),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        if let Some(err) = error {
            return Err(rejected(err));
        }
        return Ok(());
    }

    match error {
        Some(err) => {
            return Err(rejected(format_args!(
                "{err} (weighted length {}/{max_length}, {}‰)",
                outcome.weighted_length, outcome.permillage
            )));
        }
        None => println!(
            "{} weighted length {}/{max_length} ({}‰)",
            "PASS:".if_supports_color(Stdout, |s| s.green()),
            outcome.weighted_length,
            outcome.permillage
        ),
    }
    Ok(())
}
