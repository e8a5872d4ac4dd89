//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `recording_store` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - JSON input and output
//!
//! All core functionality is implemented in the library crate.

use std::io::Read;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use recording_store::config::{Cli, Command};
use recording_store::export::{export_jsonl, ExportOptions};
use recording_store::initialization::{init_logger, init_store};
use recording_store::{Config, Predicate, Query, Recording, RecordingPatch, RecordingStore};

/// `add` accepts a single recording or an array of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Box<Recording>),
    Many(Vec<Recording>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<Recording> {
        match self {
            OneOrMany::One(recording) => vec![*recording],
            OneOrMany::Many(recordings) => recordings,
        }
    }
}

/// Reads JSON from a file, or from stdin when the path is `-`.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn parse_filter(filter: Option<&str>) -> Result<Option<Predicate>> {
    filter
        .map(|json| serde_json::from_str(json).context("Invalid --where predicate"))
        .transpose()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(store: &RecordingStore, command: Command) -> Result<()> {
    match command {
        Command::Add { input } => {
            let recordings = read_json::<OneOrMany>(&input)?.into_vec();
            store
                .create_many(&recordings)
                .await
                .context("Failed to add recordings")?;
            println!(
                "Added {} recording{}",
                recordings.len(),
                if recordings.len() == 1 { "" } else { "s" }
            );
        }
        Command::Get { uuid } => {
            let recording = store.get(&uuid).await?;
            print_json(&recording)?;
        }
        Command::Update { uuid, patch } => {
            let patch: RecordingPatch = read_json(&patch)?;
            let recording = store
                .update(&uuid, &patch)
                .await
                .with_context(|| format!("Failed to update {uuid}"))?;
            print_json(&recording)?;
        }
        Command::Delete { uuid, remove_file } => {
            if remove_file {
                let recording = store.get(&uuid).await?;
                let schedule_id = recording.schedule_id.unwrap_or_default();
                let remaining = store
                    .delete_recording(&uuid, &schedule_id)
                    .await
                    .with_context(|| format!("Failed to delete {uuid}"))?;
                println!("Deleted {uuid}; {remaining} left for schedule '{schedule_id}'");
            } else {
                store
                    .delete(&uuid)
                    .await
                    .with_context(|| format!("Failed to delete {uuid}"))?;
                println!("Deleted {uuid}");
            }
        }
        Command::List { filter, limit } => {
            let query = Query {
                predicate: parse_filter(filter.as_deref())?,
                limit,
            };
            let page = store.query(&query).await?;
            print_json(&page)?;
        }
        Command::Schedules { limit } => {
            let page = store.all_schedule_ids(limit).await?;
            print_json(&page)?;
        }
        Command::Export { output, filter } => {
            let opts = ExportOptions {
                output,
                predicate: parse_filter(filter.as_deref())?,
            };
            let written = export_jsonl(store, &opts).await?;
            if opts.output.is_some() {
                println!("Exported {written} recordings");
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = Config {
        db_path: cli.db_path.clone(),
        log_level: cli.log_level.clone(),
        log_format: cli.log_format.clone(),
        ..Default::default()
    };

    init_logger(&config).context("Failed to initialize logger")?;

    let result = match init_store(&config).await {
        Ok(store) => {
            let result = run(&store, cli.command).await;
            store.close().await;
            result
        }
        Err(e) => Err(anyhow::Error::new(e).context("Failed to open recording store")),
    };

    if let Err(e) = result {
        eprintln!("recording_store error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
