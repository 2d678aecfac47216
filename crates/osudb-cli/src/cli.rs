//! CLI argument definitions for osudb.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "osudb")]
#[command(about = "Inspect osu! stable database files", version)]
pub struct Args {
    /// Decode options file (TOML)
    #[arg(long, value_name = "FILE", global = true, env = "OSUDB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Replace out-of-range values with defaults instead of failing
    #[arg(long, global = true)]
    pub lenient: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the header of a database file
    Info {
        /// Path to osu!.db, collection.db or scores.db
        file: PathBuf,
        /// File kind (inferred from the file name if omitted)
        #[arg(long, value_enum)]
        kind: Option<DbKind>,
    },
    /// List beatmaps of osu!.db
    Beatmaps {
        /// Path to osu!.db
        file: PathBuf,
        /// Show at most this many entries
        #[arg(long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Index entries first and decode them on all cores
        #[arg(long)]
        parallel: bool,
    },
    /// List collections of collection.db
    Collections {
        /// Path to collection.db
        file: PathBuf,
        /// osu!.db to resolve beatmap hashes against
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List local scores of scores.db
    Scores {
        /// Path to scores.db
        file: PathBuf,
        /// Only scores of the beatmap with this MD5 hash
        #[arg(long, value_name = "HASH")]
        beatmap: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DbKind {
    Beatmaps,
    Collections,
    Scores,
}
