//! Decoders for the osu! stable database files `osu!.db`, `collection.db`
//! and `scores.db`.
//!
//! ```no_run
//! let bytes = std::fs::read("osu!.db")?;
//! let db = osudb_core::BeatmapDatabase::decode(&bytes)?;
//! println!("{} beatmaps", db.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod beatmap;
pub mod codec;
pub mod collection;
pub mod config;
pub mod db;
pub mod error;
pub mod mode;
pub mod record;
pub mod score;
pub mod version;

pub use beatmap::{BeatmapEntry, DifficultyAttributes, RankedStatus, StarRating, StarRatings, TimingPoint};
pub use codec::{ByteBuffer, ByteWriter};
pub use collection::Collection;
pub use config::{DecodeOptions, Strictness, VersionPolicy};
pub use db::{
    BeatmapDatabase, BeatmapDbHeader, BeatmapIndex, BeatmapStream, CollectionDatabase, EntryIndex,
    RecordStream, ScoreDatabase, UserPermissions,
};
pub use error::{DecodeError, DecodeErrorKind, Error, RecordPath, Result};
pub use mode::GameMode;
pub use record::{Decode, DecodeContext};
pub use score::{BeatmapScores, Grade, GradeTable, HitCounts, Mods, ScoreEntry};
pub use version::VersionGate;
