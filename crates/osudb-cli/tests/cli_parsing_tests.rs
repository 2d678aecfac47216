//! CLI argument parsing tests.
//!
//! These tests verify that command-line arguments are parsed correctly
//! without reading any database file.

use std::path::PathBuf;

use clap::Parser;

// Re-create Args structure for testing since it's not publicly exported
#[derive(Parser)]
#[command(name = "osudb")]
struct Args {
    #[arg(long, value_name = "FILE", global = true, env = "OSUDB_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    Info {
        file: PathBuf,
        #[arg(long, value_enum)]
        kind: Option<DbKind>,
    },
    Beatmaps {
        file: PathBuf,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        parallel: bool,
    },
    Collections {
        file: PathBuf,
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    Scores {
        file: PathBuf,
        #[arg(long, value_name = "HASH")]
        beatmap: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum DbKind {
    Beatmaps,
    Collections,
    Scores,
}

#[test]
fn test_subcommand_required() {
    assert!(Args::try_parse_from(["osudb"]).is_err());
}

#[test]
fn test_parse_info() {
    let args = Args::try_parse_from(["osudb", "info", "osu!.db"]).unwrap();
    match args.command {
        Command::Info { file, kind } => {
            assert_eq!(file, PathBuf::from("osu!.db"));
            assert!(kind.is_none());
        }
        _ => panic!("Expected Info command"),
    }
}

#[test]
fn test_parse_info_with_kind() {
    let args = Args::try_parse_from(["osudb", "info", "backup.bin", "--kind", "scores"]).unwrap();
    match args.command {
        Command::Info { kind, .. } => {
            assert_eq!(kind, Some(DbKind::Scores));
        }
        _ => panic!("Expected Info command"),
    }
}

#[test]
fn test_parse_invalid_kind_fails() {
    let result = Args::try_parse_from(["osudb", "info", "a.db", "--kind", "presence"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_beatmaps_defaults() {
    let args = Args::try_parse_from(["osudb", "beatmaps", "osu!.db"]).unwrap();
    match args.command {
        Command::Beatmaps {
            limit,
            json,
            parallel,
            ..
        } => {
            assert!(limit.is_none());
            assert!(!json);
            assert!(!parallel);
        }
        _ => panic!("Expected Beatmaps command"),
    }
}

#[test]
fn test_parse_beatmaps_all_flags() {
    let args = Args::try_parse_from([
        "osudb", "beatmaps", "osu!.db", "--limit", "20", "--json", "--parallel",
    ])
    .unwrap();
    match args.command {
        Command::Beatmaps {
            limit,
            json,
            parallel,
            ..
        } => {
            assert_eq!(limit, Some(20));
            assert!(json);
            assert!(parallel);
        }
        _ => panic!("Expected Beatmaps command"),
    }
}

#[test]
fn test_parse_collections_with_catalog() {
    let args = Args::try_parse_from([
        "osudb",
        "collections",
        "collection.db",
        "--catalog",
        "osu!.db",
    ])
    .unwrap();
    match args.command {
        Command::Collections { catalog, json, .. } => {
            assert_eq!(catalog, Some(PathBuf::from("osu!.db")));
            assert!(!json);
        }
        _ => panic!("Expected Collections command"),
    }
}

#[test]
fn test_parse_scores_for_beatmap() {
    let args = Args::try_parse_from([
        "osudb",
        "scores",
        "scores.db",
        "--beatmap",
        "d41d8cd98f00b204e9800998ecf8427e",
    ])
    .unwrap();
    match args.command {
        Command::Scores { beatmap, .. } => {
            assert_eq!(beatmap.as_deref(), Some("d41d8cd98f00b204e9800998ecf8427e"));
        }
        _ => panic!("Expected Scores command"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let args = Args::try_parse_from([
        "osudb",
        "scores",
        "scores.db",
        "--lenient",
        "--config",
        "osudb.toml",
    ])
    .unwrap();
    assert!(args.lenient);
    assert_eq!(args.config, Some(PathBuf::from("osudb.toml")));
}

#[test]
fn test_missing_file_fails() {
    assert!(Args::try_parse_from(["osudb", "beatmaps"]).is_err());
}
