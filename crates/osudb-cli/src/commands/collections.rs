//! Collection listing for collection.db, optionally resolved against osu!.db.

use std::path::Path;

use anyhow::{Context, Result};
use osudb_core::{BeatmapDatabase, BeatmapIndex, Collection, CollectionDatabase, DecodeOptions};
use serde::Serialize;

use crate::cli_utils;

#[derive(Serialize)]
struct ResolvedCollection<'a> {
    name: &'a str,
    beatmaps: Vec<ResolvedBeatmap<'a>>,
    missing: usize,
}

#[derive(Serialize)]
struct ResolvedBeatmap<'a> {
    hash: &'a str,
    /// `None` when the catalog has no such beatmap.
    name: Option<String>,
}

pub fn run(path: &Path, options: DecodeOptions, catalog: Option<&Path>, json: bool) -> Result<()> {
    let bytes = cli_utils::read_file(path)?;
    let db = CollectionDatabase::decode_with(&bytes, options)
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    let Some(catalog_path) = catalog else {
        if json {
            return cli_utils::print_json(&db);
        }
        for collection in &db.collections {
            println!("{} ({} beatmaps)", collection.name, collection.len());
        }
        return Ok(());
    };

    let catalog_bytes = cli_utils::read_file(catalog_path)?;
    let catalog = BeatmapDatabase::decode_with(&catalog_bytes, options)
        .with_context(|| format!("Failed to decode {}", catalog_path.display()))?;
    let index = catalog.index_by_hash();

    let resolved: Vec<_> = db
        .collections
        .iter()
        .map(|collection| resolve(collection, &index))
        .collect();

    if json {
        return cli_utils::print_json(&resolved);
    }

    for collection in &resolved {
        println!(
            "{} ({} beatmaps, {} missing)",
            collection.name,
            collection.beatmaps.len(),
            collection.missing
        );
        for beatmap in &collection.beatmaps {
            match &beatmap.name {
                Some(name) => println!("  {name}"),
                None => println!("  {} (not in catalog)", beatmap.hash),
            }
        }
    }

    Ok(())
}

fn resolve<'a>(collection: &'a Collection, index: &'a BeatmapIndex<'a>) -> ResolvedCollection<'a> {
    let beatmaps: Vec<_> = collection
        .resolve(index)
        .map(|(hash, entry)| ResolvedBeatmap {
            hash,
            name: entry.map(|e| e.display_name()),
        })
        .collect();
    let missing = beatmaps.iter().filter(|b| b.name.is_none()).count();
    ResolvedCollection {
        name: &collection.name,
        beatmaps,
        missing,
    }
}
