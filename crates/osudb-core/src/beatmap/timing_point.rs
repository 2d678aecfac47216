use serde::Serialize;

use crate::codec::ByteBuffer;
use crate::error::Result;
use crate::record::{Decode, DecodeContext};

/// A tempo or slider-velocity change at a point of the song.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingPoint {
    /// Milliseconds per beat for uninherited points; negative inverse
    /// velocity percentage for inherited ones.
    pub beat_length: f64,
    /// Song offset in milliseconds.
    pub offset: f64,
    pub inherited: bool,
}

impl TimingPoint {
    /// Beats per minute, only defined for uninherited points.
    pub fn bpm(&self) -> Option<f64> {
        (!self.inherited && self.beat_length > 0.0).then(|| 60_000.0 / self.beat_length)
    }

    /// Slider velocity multiplier, only defined for inherited points.
    pub fn slider_velocity_multiplier(&self) -> Option<f64> {
        (self.inherited && self.beat_length < 0.0).then(|| -100.0 / self.beat_length)
    }
}

impl Decode for TimingPoint {
    const LABEL: &'static str = "Timing Point";
    const MIN_SIZE: usize = 8 + 8 + 1;

    fn decode(buf: &mut ByteBuffer<'_>, ctx: &DecodeContext) -> Result<Self> {
        let beat_length = buf.read_f64()?;
        let offset = buf.read_f64()?;
        // stored as "uninherited"
        let uninherited = ctx.read_bool(buf)?;
        Ok(Self {
            beat_length,
            offset,
            inherited: !uninherited,
        })
    }
}
