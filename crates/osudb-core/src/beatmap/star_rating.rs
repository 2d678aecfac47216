use serde::Serialize;

use crate::codec::ByteBuffer;
use crate::error::Result;
use crate::mode::GameMode;
use crate::record::{Decode, DecodeContext};
use crate::score::Mods;

const INT_MARKER: u8 = 0x08;
const FLOAT_MARKER: u8 = 0x0c;
const DOUBLE_MARKER: u8 = 0x0d;

/// Cached star rating for one mod combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StarRating {
    pub mods: Mods,
    /// Widened from `f32` on versions that store single precision.
    pub stars: f64,
}

impl Decode for StarRating {
    const LABEL: &'static str = "Star Rating";
    // marker, mods, marker, f32
    const MIN_SIZE: usize = 1 + 4 + 1 + 4;

    fn decode(buf: &mut ByteBuffer<'_>, ctx: &DecodeContext) -> Result<Self> {
        ctx.expect_marker(buf, INT_MARKER, "int")?;
        let mods = Mods::from_raw(buf.read_u32()?);
        let stars = if ctx.gate.has_float_star_rating() {
            ctx.expect_marker(buf, FLOAT_MARKER, "float")?;
            f64::from(buf.read_f32()?)
        } else {
            ctx.expect_marker(buf, DOUBLE_MARKER, "double")?;
            buf.read_f64()?
        };
        Ok(Self { mods, stars })
    }
}

/// Star rating tables for each game mode. Empty on versions before the
/// tables existed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StarRatings {
    pub osu: Vec<StarRating>,
    pub taiko: Vec<StarRating>,
    pub catch: Vec<StarRating>,
    pub mania: Vec<StarRating>,
}

impl StarRatings {
    pub fn for_mode(&self, mode: GameMode) -> &[StarRating] {
        match mode {
            GameMode::Osu => &self.osu,
            GameMode::Taiko => &self.taiko,
            GameMode::Catch => &self.catch,
            GameMode::Mania => &self.mania,
        }
    }

    /// Rating without mods for `mode`, if cached.
    pub fn nomod(&self, mode: GameMode) -> Option<f64> {
        self.with_mods(mode, Mods::empty())
    }

    pub fn with_mods(&self, mode: GameMode, mods: Mods) -> Option<f64> {
        self.for_mode(mode)
            .iter()
            .find(|rating| rating.mods == mods)
            .map(|rating| rating.stars)
    }

    pub fn is_empty(&self) -> bool {
        self.osu.is_empty() && self.taiko.is_empty() && self.catch.is_empty() && self.mania.is_empty()
    }

    pub(crate) fn decode(buf: &mut ByteBuffer<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            osu: ctx.read_records(buf)?,
            taiko: ctx.read_records(buf)?,
            catch: ctx.read_records(buf)?,
            mania: ctx.read_records(buf)?,
        })
    }
}
