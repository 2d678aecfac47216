//! Score listing for scores.db.

use std::path::Path;

use anyhow::{Context, Result};
use osudb_core::{DecodeOptions, ScoreDatabase, ScoreEntry};

use crate::cli_utils;

pub fn run(path: &Path, options: DecodeOptions, beatmap: Option<&str>, json: bool) -> Result<()> {
    let bytes = cli_utils::read_file(path)?;
    let db = ScoreDatabase::decode_with(&bytes, options)
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    let scores: Vec<&ScoreEntry> = match beatmap {
        Some(hash) => db.scores_for(hash).iter().collect(),
        None => db.iter_scores().collect(),
    };

    if json {
        return cli_utils::print_json(&scores);
    }

    for score in &scores {
        println!("{}", format_score(score));
    }
    eprintln!("{} scores", scores.len());

    Ok(())
}

fn format_score(score: &ScoreEntry) -> String {
    format!(
        "{}  {:<16} {:>10} {:>7.2}% {:>5}x {:<8} {}",
        score.beatmap_hash,
        score.player_name,
        score.score,
        score.accuracy() * 100.0,
        score.max_combo,
        score.mods.short_name(),
        score.timestamp.format("%Y-%m-%d %H:%M")
    )
}
