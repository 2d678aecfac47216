//! Header summary of any of the three database files.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use osudb_core::{BeatmapDatabase, CollectionDatabase, DecodeOptions, ScoreDatabase};

use crate::cli::DbKind;
use crate::cli_utils;

pub fn run(path: &Path, kind: Option<DbKind>, options: DecodeOptions) -> Result<()> {
    let kind = kind.or_else(|| cli_utils::detect_kind(path)).ok_or_else(|| {
        anyhow!(
            "Cannot tell the database kind of {} from its name, pass --kind",
            path.display()
        )
    })?;
    let bytes = cli_utils::read_file(path)?;
    let context = || format!("Failed to decode {}", path.display());

    println!("File: {}", path.display());
    println!("Size: {} bytes", bytes.len());

    match kind {
        DbKind::Beatmaps => {
            let stream = BeatmapDatabase::stream_with(&bytes, options).with_context(context)?;
            let header = stream.header();
            print_version(header.version, header.version_validated);
            println!("Player: {}", header.player_name);
            println!("Folders: {}", header.folder_count);
            if header.account_unlocked {
                println!("Account: unlocked");
            } else {
                println!("Account: locked until {}", header.unlock_date);
            }
            println!("Beatmaps: {}", header.beatmap_count);
        }
        DbKind::Collections => {
            let stream = CollectionDatabase::stream_with(&bytes, options).with_context(context)?;
            print_version(stream.version(), stream.version_validated());
            println!("Collections: {}", stream.declared_count());
        }
        DbKind::Scores => {
            let db = ScoreDatabase::decode_with(&bytes, options).with_context(context)?;
            print_version(db.version, db.version_validated);
            println!("Beatmaps: {}", db.len());
            println!("Scores: {}", db.score_count());
        }
    }

    Ok(())
}

fn print_version(version: u32, validated: bool) {
    if validated {
        println!("Version: {version}");
    } else {
        println!("Version: {version} (outside the validated range)");
    }
}
