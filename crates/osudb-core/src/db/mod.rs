//! Whole-file decoders.
//!
//! - `BeatmapDatabase`: `osu!.db`, the beatmap cache
//! - `CollectionDatabase`: `collection.db`, user collections
//! - `ScoreDatabase`: `scores.db`, local scores
//!
//! Each can decode eagerly into a snapshot or stream its records lazily.

mod beatmap_db;
mod collection_db;
mod index;
mod score_db;
mod stream;

pub use beatmap_db::*;
pub use collection_db::*;
pub use index::*;
pub use score_db::*;
pub use stream::RecordStream;
