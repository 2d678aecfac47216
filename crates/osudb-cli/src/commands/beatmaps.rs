//! Beatmap listing for osu!.db.

use std::path::Path;

use anyhow::{Context, Result};
use osudb_core::{BeatmapDatabase, BeatmapDbHeader, BeatmapEntry, DecodeOptions, EntryIndex};
use serde::Serialize;

use crate::cli_utils;

#[derive(Serialize)]
struct BeatmapsOutput<'a> {
    header: &'a BeatmapDbHeader,
    beatmaps: &'a [BeatmapEntry],
}

pub fn run(
    path: &Path,
    options: DecodeOptions,
    limit: Option<usize>,
    json: bool,
    parallel: bool,
) -> Result<()> {
    let bytes = cli_utils::read_file(path)?;
    let context = || format!("Failed to decode {}", path.display());

    let (header, beatmaps) = if parallel {
        let index = EntryIndex::scan_with(&bytes, options).with_context(context)?;
        let mut beatmaps = index.decode_parallel().with_context(context)?;
        if let Some(limit) = limit {
            beatmaps.truncate(limit);
        }
        (index.header().clone(), beatmaps)
    } else {
        // Lazy so --limit stops reading early.
        let mut stream = BeatmapDatabase::stream_with(&bytes, options).with_context(context)?;
        let header = stream.header().clone();
        let beatmaps = stream
            .by_ref()
            .take(limit.unwrap_or(usize::MAX))
            .collect::<Result<Vec<_>, _>>()
            .with_context(context)?;
        (header, beatmaps)
    };

    if json {
        return cli_utils::print_json(&BeatmapsOutput {
            header: &header,
            beatmaps: &beatmaps,
        });
    }

    for entry in &beatmaps {
        println!("{}", format_entry(entry));
    }
    eprintln!("{} of {} beatmaps", beatmaps.len(), header.beatmap_count);

    Ok(())
}

fn format_entry(entry: &BeatmapEntry) -> String {
    let stars = entry
        .star_ratings
        .nomod(entry.mode)
        .map_or_else(|| "-".to_string(), |stars| format!("{stars:.2}"));
    format!(
        "{}  {:<10} {:<10} {:>6}*  {}",
        entry.md5_hash,
        entry.mode.name(),
        entry.ranked_status.name(),
        stars,
        entry.display_name()
    )
}
