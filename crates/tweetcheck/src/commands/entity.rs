//! Username, list and hashtag commands.

use clap::Args;
use owo_colors::{OwoColorize, Stream::Stdout};
use serde::Serialize;
use tracing::{debug, instrument};

use super::rejected;

/// Arguments shared by the `username`, `list` and `hashtag` subcommands.
#[derive(Args, Debug)]
pub struct EntityArgs {
    /// Candidate text, sigil included (e.g. `@alice`, `#rust`).
    pub text: String,
}

/// Which entity validator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityCheck {
    /// `@name`
    Username,
    /// `@owner/slug`
    List,
    /// `#tag`
    Hashtag,
}

impl EntityCheck {
    fn is_valid(self, text: &str) -> bool {
        match self {
            Self::Username => tweetcheck_core::is_valid_username(text),
            Self::List => tweetcheck_core::is_valid_list(text),
            Self::Hashtag => tweetcheck_core::is_valid_hashtag(text),
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::List => "list",
            Self::Hashtag => "hashtag",
        }
    }
}

#[derive(Serialize)]
struct EntityReport<'a> {
    kind: EntityCheck,
    text: &'a str,
    valid: bool,
}

/// Check that the text is exactly one entity of the requested kind.
#[instrument(name = "cmd_entity", skip_all, fields(check = check.label()))]
pub fn cmd_entity(args: EntityArgs, check: EntityCheck, global_json: bool) -> anyhow::Result<()> {
    debug!(text = %args.text, "executing entity command");

    let valid = check.is_valid(&args.text);

    if global_json {
        let report = EntityReport {
            kind: check,
            text: &args.text,
            valid,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if valid {
        println!(
            "{} {}",
            "PASS:".if_supports_color(Stdout, |s| s.green()),
            args.text
        );
    }

    if !valid {
        return Err(rejected(format_args!(
            "invalid {}: {:?}",
            check.label(),
            args.text
        )));
    }
    Ok(())
}
