//! Decode options.
//!
//! `DecodeOptions` is plain data so callers can load it from whatever config
//! format they use; every field has a default and missing keys fall back to it.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How structurally-parseable but out-of-range values are handled.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Strictness {
    /// Out-of-range enum bytes, non 0/1 booleans and entry size mismatches
    /// fail the decode.
    #[default]
    Strict,
    /// Such values are replaced by the field's documented default and logged.
    Lenient,
}

/// What to do with a format version outside the validated range.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VersionPolicy {
    /// Fail with `UnsupportedVersion`.
    Reject,
    /// Log a warning and keep decoding with the nearest known grammar.
    #[default]
    Warn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub strictness: Strictness,
    pub version_policy: VersionPolicy,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn lenient() -> Self {
        Self {
            strictness: Strictness::Lenient,
            ..Self::default()
        }
    }

    pub fn with_version_policy(mut self, policy: VersionPolicy) -> Self {
        self.version_policy = policy;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strictness == Strictness::Strict
    }
}
