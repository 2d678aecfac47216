//! Builders for synthetic database images.
//!
//! Each builder writes the exact field sequence the client does for the
//! given format version.

#![allow(dead_code)]

use osudb_core::codec::datetime::UNIX_EPOCH_TICKS;
use osudb_core::version::{ENTRY_SIZE_REMOVED, FLOAT_DIFFICULTY, FLOAT_STAR_RATING};
use osudb_core::ByteWriter;

pub const MODERN: u32 = 20230319;

/// 2020-01-01T00:00:00Z in ticks.
pub const JAN_2020_TICKS: i64 = UNIX_EPOCH_TICKS + 1_577_836_800 * 10_000_000;

#[derive(Debug, Clone)]
pub struct BeatmapFixture {
    pub artist: String,
    pub title: String,
    pub difficulty: String,
    pub hash: String,
    pub ranked_status: u8,
    pub mode: u8,
    pub beatmap_set_id: u32,
    pub difficulty_id: u32,
    pub approach_rate: f32,
    /// `(mods, stars)` for the standard table.
    pub osu_stars: Vec<(u32, f64)>,
    /// `(beat_length, offset, inherited)`
    pub timing_points: Vec<(f64, f64, bool)>,
    pub grades: [u8; 4],
    pub tags: String,
    pub unplayed: u8,
    /// Only written before the float difficulty version.
    pub legacy_unknown: u16,
}

impl BeatmapFixture {
    pub fn new(hash: &str) -> Self {
        Self {
            artist: "Artist".into(),
            title: "Title".into(),
            difficulty: "Normal".into(),
            hash: hash.into(),
            ranked_status: 4,
            mode: 0,
            beatmap_set_id: 100,
            difficulty_id: 1000,
            approach_rate: 9.0,
            osu_stars: vec![(0, 5.25), (64, 7.5)],
            timing_points: vec![(500.0, 0.0, false), (-50.0, 1000.0, true)],
            grades: [9, 9, 9, 9],
            tags: "stream jumps".into(),
            unplayed: 1,
            legacy_unknown: 0,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_set(mut self, set_id: u32) -> Self {
        self.beatmap_set_id = set_id;
        self
    }

    /// Appends this entry, size prefix included when the version has one.
    pub fn write(&self, w: &mut ByteWriter, version: u32) {
        let mut body = ByteWriter::new();
        self.write_body(&mut body, version);
        if version < ENTRY_SIZE_REMOVED {
            w.write_u32(body.len() as u32);
        }
        w.write_bytes(body.as_bytes());
    }

    fn write_body(&self, w: &mut ByteWriter, version: u32) {
        w.write_string(&self.artist)
            .write_absent_string()
            .write_string(&self.title)
            .write_absent_string()
            .write_string("Mapper")
            .write_string(&self.difficulty)
            .write_string("audio.mp3")
            .write_string(&self.hash)
            .write_string("map.osu")
            .write_u8(self.ranked_status)
            .write_u16(300)
            .write_u16(120)
            .write_u16(2)
            .write_i64(JAN_2020_TICKS);

        if version >= FLOAT_DIFFICULTY {
            w.write_f32(self.approach_rate)
                .write_f32(4.0)
                .write_f32(6.0)
                .write_f32(8.0);
        } else {
            w.write_u8(self.approach_rate as u8)
                .write_u8(4)
                .write_u8(6)
                .write_u8(8);
        }
        w.write_f64(1.4);

        if version >= FLOAT_DIFFICULTY {
            w.write_array(&self.osu_stars, |w, &(mods, stars)| {
                w.write_u8(0x08).write_u32(mods);
                if version >= FLOAT_STAR_RATING {
                    w.write_u8(0x0c).write_f32(stars as f32);
                } else {
                    w.write_u8(0x0d).write_f64(stars);
                }
            });
            // taiko, catch, mania
            w.write_u32(0).write_u32(0).write_u32(0);
        }

        w.write_u32(95).write_u32(100_000).write_i32(-1);
        w.write_array(&self.timing_points, |w, &(beat_length, offset, inherited)| {
            w.write_f64(beat_length).write_f64(offset).write_bool(!inherited);
        });

        w.write_u32(self.difficulty_id)
            .write_u32(self.beatmap_set_id)
            .write_u32(0);
        for grade in self.grades {
            w.write_u8(grade);
        }
        w.write_i16(0)
            .write_f32(0.7)
            .write_u8(self.mode)
            .write_absent_string()
            .write_string(&self.tags)
            .write_i16(0)
            .write_absent_string()
            .write_u8(self.unplayed)
            .write_i64(JAN_2020_TICKS)
            .write_bool(false)
            .write_string("100 Artist - Title")
            .write_i64(JAN_2020_TICKS);
        for _ in 0..5 {
            w.write_bool(false);
        }
        if version < FLOAT_DIFFICULTY {
            w.write_u16(self.legacy_unknown);
        }
        w.write_u32(0).write_u8(0);
    }
}

/// Header, entries and trailer of an `osu!.db` image.
pub fn beatmap_db(version: u32, entries: &[BeatmapFixture]) -> Vec<u8> {
    beatmap_db_with_count(version, entries, entries.len() as u32)
}

/// Like `beatmap_db` but with an arbitrary declared entry count.
pub fn beatmap_db_with_count(version: u32, entries: &[BeatmapFixture], declared: u32) -> Vec<u8> {
    let mut w = ByteWriter::new();
    write_beatmap_header(&mut w, version, declared);
    for entry in entries {
        entry.write(&mut w, version);
    }
    w.write_u32(1 | 4);
    w.into_bytes()
}

pub fn write_beatmap_header(w: &mut ByteWriter, version: u32, declared: u32) {
    w.write_u32(version)
        .write_u32(42)
        .write_bool(true)
        .write_i64(JAN_2020_TICKS)
        .write_string("player")
        .write_u32(declared);
}

pub fn collection_db(version: u32, collections: &[(&str, Vec<&str>)]) -> Vec<u8> {
    let mut w = ByteWriter::new();
    w.write_u32(version);
    w.write_array(collections, |w, (name, hashes)| {
        w.write_string(name);
        w.write_array(hashes, |w, hash| {
            w.write_string(hash);
        });
    });
    w.into_bytes()
}

#[derive(Debug, Clone)]
pub struct ScoreFixture {
    pub score_version: u32,
    pub beatmap_hash: String,
    pub player: String,
    pub score: u32,
    pub mods: u32,
    pub online_id: u64,
}

impl ScoreFixture {
    pub fn new(beatmap_hash: &str, score: u32) -> Self {
        Self {
            score_version: MODERN,
            beatmap_hash: beatmap_hash.into(),
            player: "player".into(),
            score,
            mods: 0,
            online_id: 0,
        }
    }

    pub fn write(&self, w: &mut ByteWriter) {
        w.write_u8(0)
            .write_u32(self.score_version)
            .write_string(&self.beatmap_hash)
            .write_string(&self.player)
            .write_string("replay")
            .write_u16(500)
            .write_u16(30)
            .write_u16(2)
            .write_u16(60)
            .write_u16(10)
            .write_u16(1)
            .write_u32(self.score)
            .write_u16(700)
            .write_bool(false)
            .write_u32(self.mods)
            .write_absent_string()
            .write_i64(JAN_2020_TICKS)
            .write_i32(-1);
        if self.score_version >= 20140721 {
            w.write_u64(self.online_id);
        } else if self.score_version >= 20121008 {
            w.write_u32(self.online_id as u32);
        }
        if self.mods & (1 << 23) != 0 {
            w.write_f64(0.5);
        }
    }
}

pub fn score_db(version: u32, groups: &[(&str, Vec<ScoreFixture>)]) -> Vec<u8> {
    let mut w = ByteWriter::new();
    w.write_u32(version);
    w.write_array(groups, |w, (hash, scores)| {
        w.write_string(hash);
        w.write_u32(scores.len() as u32);
        for score in scores {
            score.write(w);
        }
    });
    w.into_bytes()
}
