//! Score-related types.
//!
//! - `Grade`, `GradeTable` - letter grades and the per-mode best grade table
//! - `Mods` - modifier bitset
//! - `HitCounts` - per-judgment counts and accuracy
//! - `ScoreEntry`, `BeatmapScores` - records of `scores.db`

mod entry;
mod grade;
mod judge;
mod mods;

pub use entry::*;
pub use grade::*;
pub use judge::*;
pub use mods::*;
