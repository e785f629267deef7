use std::{io::BufRead, sync::Arc, thread, time::Duration};

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use wikidex::{
    cli::{
        Cli, Command, LookupArgs, ServeArgs, SourcesArgs, StatusArgs,
        SyncArgs,
    },
    data_dir::DataDir,
    error::Result,
    extract,
    index::IndexHandle,
    resolve,
    source::SourceConfig,
    sync,
};

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("WIKIDEX_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Command::Completions(args) = &cli.command {
        args.generate();
        return Ok(());
    }

    let data_dir = DataDir::resolve(cli.data_dir.as_deref())?;
    let config = load_sources(&cli, &data_dir)?;

    match cli.command {
        Command::Sync(args) => cmd_sync(&config, &data_dir, &args),
        Command::Lookup(args) => cmd_lookup(&config, &data_dir, &args),
        Command::Serve(args) => cmd_serve(&config, &data_dir, &args),
        Command::Sources(args) => cmd_sources(&config, &args),
        Command::Status(args) => cmd_status(&config, &data_dir, &args),
        Command::Completions(_) => Ok(()),
    }
}

/// Load the category sources from, in order of priority: the --sources
/// flag, a sources.toml in the data directory, the built-in set.
fn load_sources(cli: &Cli, data_dir: &DataDir) -> Result<SourceConfig> {
    if let Some(path) = &cli.sources {
        return SourceConfig::load(path);
    }
    let default = data_dir.sources_file();
    if default.exists() {
        return SourceConfig::load(&default);
    }
    Ok(SourceConfig::builtin())
}

fn cmd_sync(
    config: &SourceConfig,
    data_dir: &DataDir,
    args: &SyncArgs,
) -> Result<()> {
    let outcome = sync::synchronize(&config.sources, data_dir)?;

    if args.json {
        let finished_at = outcome
            .finished_at
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        println!(
            "{}",
            serde_json::json!({
                "keys": outcome.index.key_count(),
                "fetched": outcome.fetched,
                "failed": outcome.failed,
                "degraded": outcome.is_degraded(),
                "finished_at": finished_at,
            })
        );
    } else {
        println!(
            "Synchronized {} of {} sources, {} keys indexed.",
            outcome.fetched,
            config.sources.len(),
            outcome.index.key_count()
        );
        if outcome.is_degraded() {
            println!(
                "Stale cache used for: {}",
                outcome.failed.join(", ")
            );
        }
    }
    Ok(())
}

fn cmd_lookup(
    config: &SourceConfig,
    data_dir: &DataDir,
    args: &LookupArgs,
) -> Result<()> {
    let index = if args.fresh {
        sync::synchronize(&config.sources, data_dir)?.index
    } else {
        sync::rebuild_from_cache(&config.sources, data_dir)?
    };

    let text = args.text.join(" ");
    let record = resolve::resolve(&text, &index, &args.self_names);

    if args.json {
        resolve::format_json(&record);
    } else {
        resolve::format_human(&record);
    }
    Ok(())
}

fn cmd_serve(
    config: &SourceConfig,
    data_dir: &DataDir,
    args: &ServeArgs,
) -> Result<()> {
    // The first synchronization must succeed: without a complete index
    // there is nothing to serve (stale cache is fine, unreadable is not).
    let first = sync::synchronize(&config.sources, data_dir)?;
    let handle = Arc::new(IndexHandle::new(first.index));

    {
        let handle = Arc::clone(&handle);
        let sources = config.sources.clone();
        let data_dir = data_dir.clone();
        let interval = Duration::from_secs(args.interval * 60);
        thread::spawn(move || {
            loop {
                thread::sleep(interval);
                match sync::synchronize(&sources, &data_dir) {
                    Ok(outcome) => handle.publish(outcome.index),
                    // The previously published index stays live.
                    Err(err) => error!("scheduled sync failed: {err}"),
                }
            }
        });
    }

    eprintln!(
        "Serving lookups on stdin, re-syncing every {} minute(s).",
        args.interval
    );

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let index = handle.load();
        let record = resolve::resolve(&line, &index, &args.self_names);
        if args.json {
            resolve::format_json(&record);
        } else {
            resolve::format_human(&record);
            println!();
        }
    }
    Ok(())
}

fn cmd_sources(config: &SourceConfig, args: &SourcesArgs) -> Result<()> {
    if args.json {
        let entries: Vec<_> = config
            .sources
            .iter()
            .map(|s| {
                serde_json::json!({
                    "name": s.name,
                    "singular": s.singular,
                    "aliases": s.aliases,
                    "label": s.label,
                    "raw_url": s.raw_url,
                    "page_url": s.page_url,
                })
            })
            .collect();
        println!("{}", serde_json::Value::Array(entries));
    } else {
        for source in &config.sources {
            println!("{}\t{}\t{}", source.name, source.label, source.raw_url);
        }
    }
    Ok(())
}

fn cmd_status(
    config: &SourceConfig,
    data_dir: &DataDir,
    args: &StatusArgs,
) -> Result<()> {
    let pages = data_dir.pages_dir()?;

    let mut cached = 0usize;
    let mut lines = Vec::new();
    for source in &config.sources {
        let path = pages.join(source.file_name());
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                cached += 1;
                let entries =
                    extract::extract(&text, source.shape()).count();
                lines.push(format!(
                    "  {}: {} - cached ({entries} entries)",
                    source.name, source.label
                ));
            }
            Err(_) => {
                lines.push(format!(
                    "  {}: {} - not cached",
                    source.name, source.label
                ));
            }
        }
    }

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "data_dir": data_dir.root().display().to_string(),
                "sources": config.sources.len(),
                "cached": cached,
            })
        );
    } else {
        println!("Data directory: {}", data_dir.root().display());
        println!("Sources: {}", config.sources.len());
        for line in &lines {
            println!("{line}");
        }
    }
    Ok(())
}
