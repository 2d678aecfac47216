mod cli;
mod cli_utils;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG overrides; warnings only by default. Logs go to stderr so
    // JSON on stdout stays clean.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("osudb_cli=warn,osudb_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let options = cli_utils::load_options(args.config.as_deref(), args.lenient)?;

    match args.command {
        Command::Info { file, kind } => commands::info::run(&file, kind, options),
        Command::Beatmaps {
            file,
            limit,
            json,
            parallel,
        } => commands::beatmaps::run(&file, options, limit, json, parallel),
        Command::Collections {
            file,
            catalog,
            json,
        } => commands::collections::run(&file, options, catalog.as_deref(), json),
        Command::Scores {
            file,
            beatmap,
            json,
        } => commands::scores::run(&file, options, beatmap.as_deref(), json),
    }
}
