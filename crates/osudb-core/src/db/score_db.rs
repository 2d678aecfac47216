use std::collections::HashMap;

use serde::Serialize;

use crate::codec::ByteBuffer;
use crate::config::DecodeOptions;
use crate::db::stream::{note_trailing, read_version, RecordStream};
use crate::error::Result;
use crate::score::{BeatmapScores, ScoreEntry};

/// Fully decoded `scores.db`.
///
/// Groups keep file order; `scores_for` looks a group up by beatmap hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreDatabase {
    pub version: u32,
    pub version_validated: bool,
    pub beatmaps: Vec<BeatmapScores>,
    #[serde(skip)]
    by_hash: HashMap<String, usize>,
}

impl ScoreDatabase {
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Self::decode_with(bytes, DecodeOptions::default())
    }

    pub fn decode_with(bytes: &[u8], options: DecodeOptions) -> Result<Self> {
        let mut stream = Self::stream_with(bytes, options)?;
        let beatmaps = stream.collect_all()?;
        note_trailing(stream.buffer_mut(), "scores.db");

        let mut by_hash = HashMap::with_capacity(beatmaps.len());
        for (i, group) in beatmaps.iter().enumerate() {
            if by_hash.contains_key(&group.beatmap_hash) {
                tracing::debug!(hash = %group.beatmap_hash, index = i, "Repeated beatmap hash in scores.db, lookup keeps the first group");
                continue;
            }
            by_hash.insert(group.beatmap_hash.clone(), i);
        }

        tracing::debug!(
            beatmaps = beatmaps.len(),
            scores = beatmaps.iter().map(BeatmapScores::len).sum::<usize>(),
            "Decoded scores.db"
        );

        Ok(Self {
            version: stream.version(),
            version_validated: stream.version_validated(),
            beatmaps,
            by_hash,
        })
    }

    pub fn stream(bytes: &[u8]) -> Result<RecordStream<'_, BeatmapScores>> {
        Self::stream_with(bytes, DecodeOptions::default())
    }

    pub fn stream_with(bytes: &[u8], options: DecodeOptions) -> Result<RecordStream<'_, BeatmapScores>> {
        let mut buf = ByteBuffer::new(bytes);
        let (ctx, validated) = read_version(&mut buf, options)?;
        RecordStream::new(buf, ctx, validated)
    }

    pub fn get(&self, beatmap_hash: &str) -> Option<&BeatmapScores> {
        self.by_hash.get(beatmap_hash).map(|&i| &self.beatmaps[i])
    }

    /// Scores of one beatmap, empty if it has none.
    pub fn scores_for(&self, beatmap_hash: &str) -> &[ScoreEntry] {
        self.get(beatmap_hash).map_or(&[], |group| group.scores.as_slice())
    }

    /// Every score in file order.
    pub fn iter_scores(&self) -> impl Iterator<Item = &ScoreEntry> {
        self.beatmaps.iter().flat_map(|group| group.scores.iter())
    }

    pub fn score_count(&self) -> usize {
        self.beatmaps.iter().map(BeatmapScores::len).sum()
    }

    pub fn len(&self) -> usize {
        self.beatmaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beatmaps.is_empty()
    }
}
