//! Format version gating.
//!
//! Every database file starts with the client build date (`yyyymmdd`) that
//! wrote it. Fields added or changed over time are present only from a given
//! build on; thresholds are per field.

use serde::Serialize;
use strum::IntoStaticStr;

use crate::config::VersionPolicy;
use crate::error::{DecodeError, DecodeErrorKind, Result};

/// AR/CS/HP/OD stored as `f32` instead of `u8`; star rating tables present;
/// the legacy unknown short removed.
pub const FLOAT_DIFFICULTY: u32 = 20140609;

/// Beatmap entries no longer start with their byte size.
pub const ENTRY_SIZE_REMOVED: u32 = 20191106;

/// Star ratings stored as `f32` instead of `f64`.
pub const FLOAT_STAR_RATING: u32 = 20250107;

/// Scores carry a 32-bit online id.
pub const ONLINE_SCORE_ID_32: u32 = 20121008;

/// Scores carry a 64-bit online id.
pub const ONLINE_SCORE_ID_64: u32 = 20140721;

/// Oldest version the grammar is known to describe.
pub const MIN_SUPPORTED_VERSION: u32 = 20070000;

/// Newest version the grammar has been checked against.
pub const MAX_VALIDATED_VERSION: u32 = 20251231;

/// Fields whose presence or representation depends on the format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum GatedField {
    EntrySize,
    FloatDifficulty,
    StarRatings,
    FloatStarRating,
    LegacyUnknown,
    OnlineScoreId32,
    OnlineScoreId64,
}

/// Answers which optional fields the current file encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VersionGate {
    version: u32,
}

impl VersionGate {
    pub fn new(version: u32) -> Self {
        Self { version }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// `true` when the file's version is at least `min_version`.
    pub fn is_field_present(&self, field: GatedField, min_version: u32) -> bool {
        let present = self.version >= min_version;
        tracing::trace!(
            field = <&'static str>::from(field),
            min_version,
            version = self.version,
            present,
            "Version gate"
        );
        present
    }

    pub fn has_entry_size(&self) -> bool {
        !self.is_field_present(GatedField::EntrySize, ENTRY_SIZE_REMOVED)
    }

    pub fn has_float_difficulty(&self) -> bool {
        self.is_field_present(GatedField::FloatDifficulty, FLOAT_DIFFICULTY)
    }

    pub fn has_star_ratings(&self) -> bool {
        self.is_field_present(GatedField::StarRatings, FLOAT_DIFFICULTY)
    }

    pub fn has_float_star_rating(&self) -> bool {
        self.is_field_present(GatedField::FloatStarRating, FLOAT_STAR_RATING)
    }

    pub fn has_legacy_unknown(&self) -> bool {
        !self.is_field_present(GatedField::LegacyUnknown, FLOAT_DIFFICULTY)
    }

    pub fn has_online_score_id_64(&self) -> bool {
        self.is_field_present(GatedField::OnlineScoreId64, ONLINE_SCORE_ID_64)
    }

    pub fn has_online_score_id_32(&self) -> bool {
        self.is_field_present(GatedField::OnlineScoreId32, ONLINE_SCORE_ID_32)
    }

    /// Whether the version lies in the validated range.
    pub fn is_validated(&self) -> bool {
        (MIN_SUPPORTED_VERSION..=MAX_VALIDATED_VERSION).contains(&self.version)
    }

    /// Applies `policy` to an out-of-range version.
    ///
    /// Returns whether the version is validated; with `VersionPolicy::Reject`
    /// an unvalidated version is an error instead.
    pub fn check(&self, policy: VersionPolicy, offset: usize) -> Result<bool> {
        if self.is_validated() {
            return Ok(true);
        }
        match policy {
            VersionPolicy::Reject => Err(DecodeError::new(
                DecodeErrorKind::UnsupportedVersion {
                    version: self.version,
                    min: MIN_SUPPORTED_VERSION,
                    max: MAX_VALIDATED_VERSION,
                },
                offset,
            )
            .into()),
            VersionPolicy::Warn => {
                tracing::warn!(
                    version = self.version,
                    min = MIN_SUPPORTED_VERSION,
                    max = MAX_VALIDATED_VERSION,
                    "Database version outside the validated range, decoding anyway"
                );
                Ok(false)
            }
        }
    }
}
