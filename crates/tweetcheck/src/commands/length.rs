//! Length command: report both counters without judging the text.

use clap::Args;
use owo_colors::{OwoColorize, Stream::Stdout};
use serde::Serialize;
use tracing::{debug, instrument};

use tweetcheck_core::{legacy_length, weighted_length};

use super::TextInput;

/// Arguments for the `length` subcommand.
#[derive(Args, Debug)]
pub struct LengthArgs {
    /// Input text source.
    #[command(flatten)]
    pub input: TextInput,
}

#[derive(Serialize)]
struct LengthReport {
    weighted_length: usize,
    legacy_length: usize,
    chars: usize,
    bytes: usize,
}

/// Print the weighted and legacy lengths of some text.
#[instrument(name = "cmd_length", skip_all)]
pub fn cmd_length(
    args: LengthArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let text = args.input.read(max_input_bytes)?;
    debug!(text_len = text.len(), "executing length command");

    let report = LengthReport {
        weighted_length: weighted_length(&text),
        legacy_length: legacy_length(&text),
        chars: text.chars().count(),
        bytes: text.len(),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{}: {}",
            "Weighted".if_supports_color(Stdout, |s| s.dimmed()),
            report.weighted_length
        );
        println!(
            "{}: {}",
            "Legacy".if_supports_color(Stdout, |s| s.dimmed()),
            report.legacy_length
        );
        println!(
            "{}: {} chars, {} bytes",
            "Raw".if_supports_color(Stdout, |s| s.dimmed()),
            report.chars,
            report.bytes
        );
    }
    Ok(())
}
