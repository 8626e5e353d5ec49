//! URL command: structural URL validation.

use clap::Args;
use owo_colors::{OwoColorize, Stream::Stdout};
use serde::Serialize;
use tracing::{debug, instrument};

use tweetcheck_core::is_valid_url;

use super::rejected;

/// Arguments for the `url` subcommand.
#[derive(Args, Debug)]
pub struct UrlArgs {
    /// URL to check.
    pub url: String,

    /// Accept URLs without an http/https scheme.
    #[arg(long)]
    pub no_require_protocol: bool,

    /// Accept non-ASCII host names.
    #[arg(long)]
    pub unicode: bool,
}

#[derive(Serialize)]
struct UrlReport<'a> {
    url: &'a str,
    valid: bool,
    require_protocol: bool,
    allow_unicode_domains: bool,
}

/// Check whether a URL is structurally valid.
#[instrument(name = "cmd_url", skip_all, fields(url = %args.url))]
pub fn cmd_url(
    args: UrlArgs,
    global_json: bool,
    config_require_protocol: bool,
    config_allow_unicode: bool,
) -> anyhow::Result<()> {
    let require_protocol = config_require_protocol && !args.no_require_protocol;
    let allow_unicode = config_allow_unicode || args.unicode;
    debug!(require_protocol, allow_unicode, "executing url command");

    let valid = is_valid_url(&args.url, require_protocol, allow_unicode);

    if global_json {
        let report = UrlReport {
            url: &args.url,
            valid,
            require_protocol,
            allow_unicode_domains: allow_unicode,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if valid {
        println!(
            "{} {}",
            "PASS:".if_supports_color(Stdout, |s| s.green()),
            args.url
        );
    }

    if !valid {
        return Err(rejected(format_args!("invalid URL: {}", args.url)));
    }
    Ok(())
}
