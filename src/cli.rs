use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Debug, Parser)]
#[command(
    name = "wikidex",
    about = "A keyword lookup service for markdown wiki knowledge bases"
)]
pub struct Cli {
    /// Override the XDG data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to a sources.toml describing the wiki categories
    #[arg(long, global = true)]
    pub sources: Option<PathBuf>,

    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch every category document and rebuild the index
    Sync(SyncArgs),
    /// Resolve a message against the cached documents
    Lookup(LookupArgs),
    /// Serve lookups on stdin with periodic background re-sync
    Serve(ServeArgs),
    /// List the configured category sources
    Sources(SourcesArgs),
    /// Show data directory and cache state
    Status(StatusArgs),
    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsArgs),
}

// -- Sync --

#[derive(Debug, Parser)]
pub struct SyncArgs {
    /// Output a summary as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Lookup --

#[derive(Debug, Parser)]
pub struct LookupArgs {
    /// The message to resolve
    #[arg(required = true)]
    pub text: Vec<String>,

    /// Name to skip when it leads a token (e.g. the bot's mention name)
    #[arg(long = "self-name")]
    pub self_names: Vec<String>,

    /// Fetch fresh documents before resolving
    #[arg(long)]
    pub fresh: bool,

    /// Output the record as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Serve --

#[derive(Debug, Parser)]
pub struct ServeArgs {
    /// Minutes between background re-synchronizations
    #[arg(long, default_value = "15")]
    pub interval: u64,

    /// Name to skip when it leads a token (e.g. the bot's mention name)
    #[arg(long = "self-name")]
    pub self_names: Vec<String>,

    /// Output records as JSON, one object per line
    #[arg(long)]
    pub json: bool,
}

// -- Sources --

#[derive(Debug, Parser)]
pub struct SourcesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Status --

#[derive(Debug, Parser)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Completions --

#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Generate shell completions and print to stdout.
    pub fn generate(&self) {
        let mut cmd = Cli::command();
        clap_complete::generate(
            self.shell,
            &mut cmd,
            "wikidex",
            &mut std::io::stdout(),
        );
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn parse_lookup_joins_trailing_words() {
        let cli =
            Cli::parse_from(["wikidex", "lookup", "event", "give", "--json"]);
        match cli.command {
            Command::Lookup(args) => {
                assert_eq!(args.text, vec!["event", "give"]);
                assert!(args.json);
                assert!(!args.fresh);
                assert!(args.self_names.is_empty());
            }
            _ => panic!("expected lookup command"),
        }
    }

    #[test]
    fn parse_serve_defaults() {
        let cli = Cli::parse_from(["wikidex", "serve"]);
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.interval, 15);
                assert!(!args.json);
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn parse_repeated_self_names() {
        let cli = Cli::parse_from([
            "wikidex",
            "lookup",
            "--self-name",
            "bot",
            "--self-name",
            "helper",
            "hello",
        ]);
        match cli.command {
            Command::Lookup(args) => {
                assert_eq!(args.self_names, vec!["bot", "helper"]);
                assert_eq!(args.text, vec!["hello"]);
            }
            _ => panic!("expected lookup command"),
        }
    }
}
