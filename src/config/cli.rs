//! Command-line interface definition.
//!
//! Kept in the library so the parser can be exercised from integration tests.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::constants::{DB_PATH, DB_PATH_ENV};
use crate::config::types::{LogFormat, LogLevel};

/// Persist and query media recording records.
#[derive(Debug, Parser)]
#[command(name = "recording_store", version, about)]
pub struct Cli {
    /// SQLite database file
    #[arg(long, env = DB_PATH_ENV, default_value = DB_PATH, global = true)]
    pub db_path: PathBuf,

    /// Log level (defaults to RUST_LOG, then info)
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Insert recordings from a JSON object or array (`-` reads stdin)
    Add {
        input: PathBuf,
    },
    /// Print one recording as JSON
    Get {
        uuid: String,
    },
    /// Apply a JSON patch to a recording (`-` reads stdin)
    Update {
        uuid: String,
        patch: PathBuf,
    },
    /// Delete a recording
    Delete {
        uuid: String,
        /// Also remove the media file the recording points at
        #[arg(long)]
        remove_file: bool,
    },
    /// List recordings, optionally filtered by a JSON predicate
    List {
        /// Predicate as JSON, e.g. '{"op":"equalTo","field":"scheduleId","value":"s1"}'
        #[arg(long = "where")]
        filter: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List distinct schedule ids that have recordings
    Schedules {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Export recordings as JSON Lines
    Export {
        /// Output file (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long = "where")]
        filter: Option<String>,
    },
}
