//! Extract command: list the entities found in some text.

use clap::Args;
use owo_colors::{OwoColorize, Stream::Stdout};
use tracing::{debug, instrument};

use tweetcheck_core::{Entity, EntityKind, Extractor, RegexExtractor};

use super::TextInput;

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Input text source.
    #[command(flatten)]
    pub input: TextInput,

    /// Only report entities of this kind.
    #[arg(long, value_enum)]
    pub kind: Option<EntityKind>,
}

const ALL_KINDS: [EntityKind; 4] = [
    EntityKind::Url,
    EntityKind::Mention,
    EntityKind::Hashtag,
    EntityKind::Cashtag,
];

fn collect_entities(text: &str, kind: Option<EntityKind>) -> Vec<Entity> {
    let extractor = RegexExtractor::new();
    let mut entities: Vec<Entity> = match kind {
        Some(kind) => extractor.extract(text, kind),
        None => ALL_KINDS
            .iter()
            .flat_map(|&kind| extractor.extract(text, kind))
            .collect(),
    };
    entities.sort_by_key(|e| e.range.start);
    entities
}

/// Print each entity with its character range.
#[instrument(name = "cmd_extract", skip_all, fields(kind = ?args.kind))]
pub fn cmd_extract(
    args: ExtractArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let kind = args.kind;
    let text = args.input.read(max_input_bytes)?;
    let entities = collect_entities(&text, kind);
    debug!(count = entities.len(), "executing extract command");

    if global_json {
        println!("{}", serde_json::to_string_pretty(&entities)?);
        return Ok(());
    }

    for entity in &entities {
        let kind = match entity.kind {
            EntityKind::Url => "url",
            EntityKind::Mention => "mention",
            EntityKind::Hashtag => "hashtag",
            EntityKind::Cashtag => "cashtag",
        };
        println!(
            "{:<8} {:>4}..{:<4} {}",
            kind.if_supports_color(Stdout, |s| s.dimmed()),
            entity.range.start,
            entity.range.end,
            entity.text.if_supports_color(Stdout, |s| s.cyan())
        );
    }
    Ok(())
}
