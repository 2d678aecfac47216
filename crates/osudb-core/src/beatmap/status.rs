use serde::{Deserialize, Serialize};
use strum::{FromRepr, IntoStaticStr};

/// Ranked status of a beatmap as cached by the client.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    FromRepr,
    IntoStaticStr,
)]
#[repr(u8)]
pub enum RankedStatus {
    #[default]
    Unknown = 0,
    Unsubmitted = 1,
    /// Also covers WIP and graveyard.
    Pending = 2,
    Unused = 3,
    Ranked = 4,
    Approved = 5,
    Qualified = 6,
    Loved = 7,
}

impl RankedStatus {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    /// Whether scores on this beatmap count for online ranking.
    pub fn is_leaderboard(&self) -> bool {
        matches!(
            self,
            Self::Ranked | Self::Approved | Self::Qualified | Self::Loved
        )
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for RankedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
