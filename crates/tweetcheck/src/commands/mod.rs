//! Command implementations.

use std::fmt;
use std::io::Read;

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;

pub mod entity;
pub mod extract;
pub mod info;
pub mod length;
pub mod parse;
pub mod url;
pub mod validate;

/// The input was checked and rejected.
///
/// Distinguishes an expected "no" from a failure to run the check at all.
#[derive(Debug)]
pub struct CheckFailed(pub String);

impl fmt::Display for CheckFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for CheckFailed {}

/// Build a [`CheckFailed`] error from anything printable.
pub fn rejected(reason: impl fmt::Display) -> anyhow::Error {
    CheckFailed(reason.to_string()).into()
}

/// Whether `err` is a rejected input rather than an operational failure.
pub fn is_check_failure(err: &anyhow::Error) -> bool {
    err.downcast_ref::<CheckFailed>().is_some()
}

/// Where a command reads its text from.
///
/// Exactly one of the positional text or `--file` may be given. With neither,
/// the text is read from stdin.
#[derive(Args, Debug, Default)]
pub struct TextInput {
    /// Text to check (reads stdin when omitted).
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file.
    #[arg(long, value_name = "FILE")]
    pub file: Option<Utf8PathBuf>,
}

impl TextInput {
    /// Resolve the input text, enforcing the byte limit on file and stdin input.
    ///
    /// A single trailing newline is dropped from file and stdin input so that
    /// `echo "text" | tweetcheck parse` counts what the user typed.
    pub fn read(self, max_bytes: Option<usize>) -> anyhow::Result<String> {
        let raw = match (self.text, self.file) {
            (Some(text), _) => return Ok(text),
            (None, Some(path)) => read_input_file(&path, max_bytes)?,
            (None, None) => read_stdin(max_bytes)?,
        };
        Ok(strip_trailing_newline(raw))
    }
}

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Check the size before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    std::fs::read_to_string(path.as_std_path()).with_context(|| format!("failed to read {path}"))
}

fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut buf = String::new();
    let stdin = std::io::stdin().lock();
    match max_bytes {
        Some(max) => {
            // One byte past the limit is enough to know it was exceeded.
            stdin
                .take(max as u64 + 1)
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            if buf.len() > max {
                bail!("input too large: stdin exceeds {max} bytes");
            }
        }
        None => {
            let mut stdin = stdin;
            stdin
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
        }
    }
    Ok(buf)
}

fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}
