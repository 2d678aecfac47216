//! Records of the beatmap catalog (`osu!.db`).
//!
//! - `BeatmapEntry` - one cached difficulty with all its metadata
//! - `TimingPoint` - ordered tempo/velocity changes of an entry
//! - `StarRating`, `StarRatings` - cached star ratings per mode and mods
//! - `RankedStatus` - ranked status byte

mod entry;
mod star_rating;
mod status;
mod timing_point;

pub use entry::*;
pub use star_rating::*;
pub use status::*;
pub use timing_point::*;
