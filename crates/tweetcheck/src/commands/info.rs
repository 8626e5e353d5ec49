//! Info command implementation

use std::fmt::Display;

use clap::Args;
use owo_colors::{OwoColorize, Stream::Stdout, Style};
use serde::Serialize;
use tracing::{debug, instrument};
use tweetcheck_core::config::{Config, ConfigSources};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    /// Every loaded file, lowest precedence first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    config_files: Vec<String>,
    log_level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    max_weighted_length: usize,
    legacy_max_length: usize,
    require_protocol: bool,
    allow_unicode_domains: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            config_files: sources
                .user_file
                .iter()
                .chain(&sources.project_files)
                .chain(&sources.explicit_files)
                .map(|p| p.to_string())
                .collect(),
            log_level: config.log_level.as_str(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            max_weighted_length: config.max_weighted_length(),
            legacy_max_length: config.legacy_max_length(),
            require_protocol: config.require_protocol(),
            allow_unicode_domains: config.allow_unicode_domains(),
            max_input_bytes: config.input_limit(),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package and configuration details.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!(
        "{} {}",
        info.package.name.if_supports_color(Stdout, |s| s.bold()),
        info.package.version.if_supports_color(Stdout, |s| s.green())
    );
    if !info.package.description.is_empty() {
        println!("{}", info.package.description);
    }
    if !info.package.license.is_empty() {
        print_field("License", info.package.license);
    }
    if !info.package.repository.is_empty() {
        print_field(
            "Repository",
            info.package.repository.if_supports_color(Stdout, |s| s.cyan()),
        );
    }

    print_heading("Configuration");
    match info.config.config_file {
        Some(ref path) => print_field("Config file", path.if_supports_color(Stdout, |s| s.cyan())),
        None => print_field(
            "Config file",
            "none loaded".if_supports_color(Stdout, |s| s.yellow()),
        ),
    }
    print_field("Log level", info.config.log_level);
    if let Some(ref dir) = info.config.log_dir {
        print_field("Log directory", dir);
    }

    print_heading("Limits");
    print_field("Max weighted length", info.config.max_weighted_length);
    print_field("Legacy max length", info.config.legacy_max_length);
    print_field("URL requires protocol", info.config.require_protocol);
    print_field("Unicode domains", info.config.allow_unicode_domains);
    match info.config.max_input_bytes {
        Some(max) => print_field("Input limit", format_args!("{max} bytes")),
        None => print_field(
            "Input limit",
            "disabled".if_supports_color(Stdout, |s| s.yellow()),
        ),
    }

    Ok(())
}

/// Print a blank line and an underlined section title.
fn print_heading(title: &str) {
    println!();
    println!(
        "{}",
        title.if_supports_color(Stdout, |s| s.style(Style::new().bold().underline()))
    );
}

/// Print `label: value` with a dimmed label.
fn print_field(label: &str, value: impl Display) {
    println!("{}: {value}", label.if_supports_color(Stdout, |s| s.dimmed()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_info_text_succeeds() {
        let result = cmd_info(
            InfoArgs::default(),
            false,
            &Config::default(),
            &ConfigSources::default(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_cmd_info_json_succeeds() {
        let result = cmd_info(
            InfoArgs::default(),
            true,
            &Config::default(),
            &ConfigSources::default(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_info_defaults() {
        let info = ConfigInfo::from_config(&Config::default(), &ConfigSources::default());
        assert!(info.config_file.is_none());
        assert_eq!(info.log_level, "info");
        assert_eq!(info.max_weighted_length, 280);
        assert_eq!(info.legacy_max_length, 140);
        assert!(info.require_protocol);
        assert!(!info.allow_unicode_domains);
        assert_eq!(info.max_input_bytes, Some(5 * 1024 * 1024));
    }

    #[test]
    fn test_config_info_disabled_limit() {
        let config = Config {
            disable_input_limit: true,
            ..Config::default()
        };
        let info = ConfigInfo::from_config(&config, &ConfigSources::default());
        assert_eq!(info.max_input_bytes, None);
    }
}
