use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::beatmap::{RankedStatus, StarRatings, TimingPoint};
use crate::codec::ByteBuffer;
use crate::error::{DecodeError, Result};
use crate::mode::GameMode;
use crate::record::{Decode, DecodeContext};
use crate::score::{Grade, GradeTable};

/// AR/CS/HP/OD. Old versions store whole numbers in one byte each; they are
/// widened to `f32` here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DifficultyAttributes {
    pub approach_rate: f32,
    pub circle_size: f32,
    pub hp_drain: f32,
    pub overall_difficulty: f32,
}

impl DifficultyAttributes {
    fn decode(buf: &mut ByteBuffer<'_>, ctx: &DecodeContext) -> Result<Self> {
        if ctx.gate.has_float_difficulty() {
            Ok(Self {
                approach_rate: buf.read_f32()?,
                circle_size: buf.read_f32()?,
                hp_drain: buf.read_f32()?,
                overall_difficulty: buf.read_f32()?,
            })
        } else {
            Ok(Self {
                approach_rate: f32::from(buf.read_u8()?),
                circle_size: f32::from(buf.read_u8()?),
                hp_drain: f32::from(buf.read_u8()?),
                overall_difficulty: f32::from(buf.read_u8()?),
            })
        }
    }
}

/// One difficulty as cached in `osu!.db`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeatmapEntry {
    /// Byte size of the entry after this field; only on versions before
    /// 20191106.
    pub entry_size: Option<u32>,
    pub artist: String,
    pub artist_unicode: String,
    pub title: String,
    pub title_unicode: String,
    pub creator: String,
    pub difficulty_name: String,
    pub audio_file: String,
    pub md5_hash: String,
    pub osu_file: String,
    pub ranked_status: RankedStatus,
    pub hit_circles: u16,
    pub sliders: u16,
    pub spinners: u16,
    pub last_modified: DateTime<Utc>,
    pub difficulty: DifficultyAttributes,
    pub slider_velocity: f64,
    pub star_ratings: StarRatings,
    /// Seconds.
    pub drain_time: u32,
    /// Milliseconds.
    pub total_time: u32,
    /// Milliseconds; -1 when unset.
    pub preview_time: i32,
    pub timing_points: Vec<TimingPoint>,
    pub difficulty_id: u32,
    pub beatmap_set_id: u32,
    pub thread_id: u32,
    pub grades: GradeTable,
    pub local_offset: i16,
    pub stack_leniency: f32,
    pub mode: GameMode,
    pub source: String,
    pub tags: String,
    pub online_offset: i16,
    pub title_font: String,
    pub unplayed: bool,
    pub last_played: DateTime<Utc>,
    pub is_osz2: bool,
    pub folder_name: String,
    pub last_checked: DateTime<Utc>,
    pub ignore_beatmap_sound: bool,
    pub ignore_beatmap_skin: bool,
    pub disable_storyboard: bool,
    pub disable_video: bool,
    pub visual_override: bool,
    /// Undocumented short of versions before 20140609; 0 otherwise.
    pub legacy_unknown: u16,
    /// Second modification stamp, raw.
    pub last_modified_raw: u32,
    pub mania_scroll_speed: u8,
}

impl BeatmapEntry {
    pub fn hit_objects(&self) -> u32 {
        u32::from(self.hit_circles) + u32::from(self.sliders) + u32::from(self.spinners)
    }

    /// Tags split on whitespace.
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        self.tags.split_whitespace()
    }

    /// BPM range over uninherited timing points as `(min, max)`.
    pub fn bpm_range(&self) -> Option<(f64, f64)> {
        self.timing_points
            .iter()
            .filter_map(TimingPoint::bpm)
            .fold(None, |acc, bpm| match acc {
                None => Some((bpm, bpm)),
                Some((lo, hi)) => Some((lo.min(bpm), hi.max(bpm))),
            })
    }

    /// "Artist - Title [Difficulty]"
    pub fn display_name(&self) -> String {
        format!("{} - {} [{}]", self.artist, self.title, self.difficulty_name)
    }

    fn decode_grades(buf: &mut ByteBuffer<'_>, ctx: &DecodeContext) -> Result<GradeTable> {
        let mut grades = [Grade::Unplayed; GameMode::COUNT];
        for grade in &mut grades {
            *grade = ctx.read_enum(buf, "grade", Grade::from_u8, Grade::Unplayed)?;
        }
        Ok(GradeTable::new(grades))
    }

    /// Compares the declared entry size with what the grammar consumed.
    fn check_entry_size(ctx: &DecodeContext, declared: u32, body_start: usize, end: usize) -> Result<()> {
        let consumed = end - body_start;
        if consumed as u64 == u64::from(declared) {
            return Ok(());
        }
        if ctx.options.is_strict() {
            return Err(DecodeError::invalid(
                body_start,
                format!("entry declares {declared} bytes but {consumed} were decoded"),
            )
            .into());
        }
        tracing::warn!(
            offset = body_start,
            declared,
            consumed,
            "Beatmap entry size does not match its contents"
        );
        Ok(())
    }
}

impl Decode for BeatmapEntry {
    const LABEL: &'static str = "Beatmap Entry";

    // Every string absent, byte difficulty, no star ratings, no timing points.
    const MIN_SIZE: usize = 9 + 1 + 6 + 8 + 4 + 8 + 12 + 4 + 12 + 4 + 2 + 4 + 1 + 2 + 2 + 1
        + 1 + 8 + 1 + 1 + 8 + 5 + 4 + 1;

    fn decode(buf: &mut ByteBuffer<'_>, ctx: &DecodeContext) -> Result<Self> {
        let entry_size = if ctx.gate.has_entry_size() {
            Some(buf.read_u32()?)
        } else {
            None
        };
        let body_start = buf.position();

        let artist = buf.read_string()?;
        let artist_unicode = buf.read_string()?;
        let title = buf.read_string()?;
        let title_unicode = buf.read_string()?;
        let creator = buf.read_string()?;
        let difficulty_name = buf.read_string()?;
        let audio_file = buf.read_string()?;
        let md5_hash = buf.read_string()?;
        let osu_file = buf.read_string()?;

        let ranked_status =
            ctx.read_enum(buf, "ranked status", RankedStatus::from_u8, RankedStatus::Unknown)?;
        let hit_circles = buf.read_u16()?;
        let sliders = buf.read_u16()?;
        let spinners = buf.read_u16()?;
        let last_modified = buf.read_datetime()?;

        let difficulty = DifficultyAttributes::decode(buf, ctx)?;
        let slider_velocity = buf.read_f64()?;

        let star_ratings = if ctx.gate.has_star_ratings() {
            StarRatings::decode(buf, ctx)?
        } else {
            StarRatings::default()
        };

        let drain_time = buf.read_u32()?;
        let total_time = buf.read_u32()?;
        let preview_time = buf.read_i32()?;

        let timing_points = ctx.read_records::<TimingPoint>(buf)?;

        let difficulty_id = buf.read_u32()?;
        let beatmap_set_id = buf.read_u32()?;
        let thread_id = buf.read_u32()?;

        let grades = Self::decode_grades(buf, ctx)?;

        let local_offset = buf.read_i16()?;
        let stack_leniency = buf.read_f32()?;
        let mode = ctx.read_enum(buf, "game mode", GameMode::from_u8, GameMode::Osu)?;

        let source = buf.read_string()?;
        let tags = buf.read_string()?;
        let online_offset = buf.read_i16()?;
        let title_font = buf.read_string()?;

        let unplayed = ctx.read_bool(buf)?;
        let last_played = buf.read_datetime()?;
        let is_osz2 = ctx.read_bool(buf)?;
        let folder_name = buf.read_string()?;
        let last_checked = buf.read_datetime()?;

        let ignore_beatmap_sound = ctx.read_bool(buf)?;
        let ignore_beatmap_skin = ctx.read_bool(buf)?;
        let disable_storyboard = ctx.read_bool(buf)?;
        let disable_video = ctx.read_bool(buf)?;
        let visual_override = ctx.read_bool(buf)?;

        let legacy_unknown = if ctx.gate.has_legacy_unknown() {
            buf.read_u16()?
        } else {
            0
        };
        let last_modified_raw = buf.read_u32()?;
        let mania_scroll_speed = buf.read_u8()?;

        if let Some(declared) = entry_size {
            Self::check_entry_size(ctx, declared, body_start, buf.position())?;
        }

        Ok(Self {
            entry_size,
            artist,
            artist_unicode,
            title,
            title_unicode,
            creator,
            difficulty_name,
            audio_file,
            md5_hash,
            osu_file,
            ranked_status,
            hit_circles,
            sliders,
            spinners,
            last_modified,
            difficulty,
            slider_velocity,
            star_ratings,
            drain_time,
            total_time,
            preview_time,
            timing_points,
            difficulty_id,
            beatmap_set_id,
            thread_id,
            grades,
            local_offset,
            stack_leniency,
            mode,
            source,
            tags,
            online_offset,
            title_font,
            unplayed,
            last_played,
            is_osz2,
            folder_name,
            last_checked,
            ignore_beatmap_sound,
            ignore_beatmap_skin,
            disable_storyboard,
            disable_video,
            visual_override,
            legacy_unknown,
            last_modified_raw,
            mania_scroll_speed,
        })
    }
}
