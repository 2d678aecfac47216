use serde::Serialize;

use crate::codec::ByteBuffer;
use crate::db::BeatmapIndex;
use crate::beatmap::BeatmapEntry;
use crate::error::Result;
use crate::record::{Decode, DecodeContext};

/// A named list of beatmap MD5 hashes.
///
/// Hashes are kept in file order, duplicates included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collection {
    pub name: String,
    pub beatmap_hashes: Vec<String>,
}

impl Collection {
    pub fn len(&self) -> usize {
        self.beatmap_hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beatmap_hashes.is_empty()
    }

    /// Looks every hash up in `index`, `None` where the beatmap is not in it.
    pub fn resolve<'a>(&'a self, index: &'a BeatmapIndex<'a>) -> impl Iterator<Item = (&'a str, Option<&'a BeatmapEntry>)> + 'a {
        self.beatmap_hashes
            .iter()
            .map(move |hash| (hash.as_str(), index.get(hash)))
    }

    /// Hashes with no entry in `index`.
    pub fn missing<'a>(&'a self, index: &'a BeatmapIndex<'a>) -> Vec<&'a str> {
        self.resolve(index)
            .filter(|(_, entry)| entry.is_none())
            .map(|(hash, _)| hash)
            .collect()
    }
}

struct Hash(String);

impl Decode for Hash {
    const LABEL: &'static str = "Beatmap Hash";
    const MIN_SIZE: usize = 1;

    fn decode(buf: &mut ByteBuffer<'_>, _ctx: &DecodeContext) -> Result<Self> {
        buf.read_string().map(Hash)
    }
}

impl Decode for Collection {
    const LABEL: &'static str = "Collection";
    const MIN_SIZE: usize = 1 + 4;

    fn decode(buf: &mut ByteBuffer<'_>, ctx: &DecodeContext) -> Result<Self> {
        let name = buf.read_string()?;
        let beatmap_hashes = ctx
            .read_records::<Hash>(buf)?
            .into_iter()
            .map(|Hash(hash)| hash)
            .collect();
        Ok(Self {
            name,
            beatmap_hashes,
        })
    }
}
