use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::codec::ByteBuffer;
use crate::error::Result;
use crate::mode::GameMode;
use crate::record::{Decode, DecodeContext};
use crate::score::{HitCounts, Mods};
use crate::version::VersionGate;

/// One locally stored play.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEntry {
    pub mode: GameMode,
    /// Client build that set the score. Gates the online id width.
    pub score_version: u32,
    pub beatmap_hash: String,
    pub player_name: String,
    pub replay_hash: String,
    pub hits: HitCounts,
    pub score: u32,
    pub max_combo: u16,
    pub perfect_combo: bool,
    pub mods: Mods,
    /// Life bar graph; the client leaves it empty in `scores.db`.
    pub life_bar: String,
    pub timestamp: DateTime<Utc>,
    /// Always -1 as written by the client.
    pub reserved: i32,
    /// `None` for scores older than 20121008.
    pub online_score_id: Option<u64>,
    /// Target practice total accuracy, present only with that mod.
    pub additional_mod_info: Option<f64>,
}

impl ScoreEntry {
    pub fn accuracy(&self) -> f64 {
        self.hits.accuracy(self.mode)
    }

    pub fn total_hits(&self) -> u32 {
        self.hits.total_hits(self.mode)
    }

    /// Whether the score was submitted online.
    pub fn is_online(&self) -> bool {
        self.online_score_id.is_some_and(|id| id != 0)
    }
}

impl Decode for ScoreEntry {
    const LABEL: &'static str = "Score Entry";

    // mode, version, 3 absent strings, 6 counts, score, combo, perfect, mods,
    // absent life bar, timestamp, reserved
    const MIN_SIZE: usize = 1 + 4 + 3 + 12 + 4 + 2 + 1 + 4 + 1 + 8 + 4;

    fn decode(buf: &mut ByteBuffer<'_>, ctx: &DecodeContext) -> Result<Self> {
        let mode = ctx.read_enum(buf, "game mode", GameMode::from_u8, GameMode::Osu)?;
        let score_version = buf.read_u32()?;
        let beatmap_hash = buf.read_string()?;
        let player_name = buf.read_string()?;
        let replay_hash = buf.read_string()?;

        let hits = HitCounts {
            count_300: buf.read_u16()?,
            count_100: buf.read_u16()?,
            count_50: buf.read_u16()?,
            count_geki: buf.read_u16()?,
            count_katu: buf.read_u16()?,
            count_miss: buf.read_u16()?,
        };

        let score = buf.read_u32()?;
        let max_combo = buf.read_u16()?;
        let perfect_combo = ctx.read_bool(buf)?;
        let mods = Mods::from_raw(buf.read_u32()?);
        let life_bar = buf.read_string()?;
        let timestamp = buf.read_datetime()?;
        let reserved = buf.read_i32()?;

        let score_gate = VersionGate::new(score_version);
        let online_score_id = if score_gate.has_online_score_id_64() {
            Some(buf.read_u64()?)
        } else if score_gate.has_online_score_id_32() {
            Some(u64::from(buf.read_u32()?))
        } else {
            None
        };

        let additional_mod_info = if mods.contains(Mods::TARGET_PRACTICE) {
            Some(buf.read_f64()?)
        } else {
            None
        };

        Ok(Self {
            mode,
            score_version,
            beatmap_hash,
            player_name,
            replay_hash,
            hits,
            score,
            max_combo,
            perfect_combo,
            mods,
            life_bar,
            timestamp,
            reserved,
            online_score_id,
            additional_mod_info,
        })
    }
}

/// All local scores of one beatmap, in file order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeatmapScores {
    pub beatmap_hash: String,
    pub scores: Vec<ScoreEntry>,
}

impl BeatmapScores {
    /// Highest score value, if any.
    pub fn best(&self) -> Option<&ScoreEntry> {
        self.scores.iter().max_by_key(|s| s.score)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl Decode for BeatmapScores {
    const LABEL: &'static str = "Beatmap Scores";
    const MIN_SIZE: usize = 1 + 4;

    fn decode(buf: &mut ByteBuffer<'_>, ctx: &DecodeContext) -> Result<Self> {
        let beatmap_hash = buf.read_string()?;
        let scores = ctx.read_records::<ScoreEntry>(buf)?;
        tracing::trace!(hash = %beatmap_hash, scores = scores.len(), "Decoded beatmap scores");
        Ok(Self { beatmap_hash, scores })
    }
}
