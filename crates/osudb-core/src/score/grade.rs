use serde::{Deserialize, Serialize};
use strum::{FromRepr, IntoStaticStr};

use crate::mode::GameMode;

/// Letter grade as stored by the client.
///
/// Byte values are the client's own and do not follow rank order (S+ is 1,
/// SS is 2); compare grades with `rank`. `Unplayed` (9) marks a mode that was
/// never played.
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
pub enum Grade {
    #[strum(serialize = "SS+")]
    SilverSs = 0,
    #[strum(serialize = "S+")]
    SilverS = 1,
    #[strum(serialize = "SS")]
    Ss = 2,
    S = 3,
    A = 4,
    B = 5,
    C = 6,
    D = 7,
    F = 8,
    #[default]
    #[strum(serialize = "-")]
    Unplayed = 9,
}

impl Grade {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    /// Position in rank order, higher is better: SS+ > SS > S+ > S > A > B >
    /// C > D > F > unplayed.
    pub fn rank(&self) -> u8 {
        match self {
            Self::SilverSs => 9,
            Self::Ss => 8,
            Self::SilverS => 7,
            Self::S => 6,
            Self::A => 5,
            Self::B => 4,
            Self::C => 3,
            Self::D => 2,
            Self::F => 1,
            Self::Unplayed => 0,
        }
    }

    pub fn is_played(&self) -> bool {
        *self != Self::Unplayed
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Best local grade per game mode, always one slot per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GradeTable([Grade; GameMode::COUNT]);

impl GradeTable {
    pub fn new(grades: [Grade; GameMode::COUNT]) -> Self {
        Self(grades)
    }

    pub fn get(&self, mode: GameMode) -> Grade {
        self.0[mode.index()]
    }

    pub fn as_array(&self) -> &[Grade; GameMode::COUNT] {
        &self.0
    }

    /// Best grade over all modes, `Unplayed` if no mode was played.
    pub fn best(&self) -> Grade {
        self.0
            .iter()
            .copied()
            .max_by_key(Grade::rank)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order() {
        let ordered = [
            Grade::SilverSs,
            Grade::Ss,
            Grade::SilverS,
            Grade::S,
            Grade::A,
            Grade::B,
            Grade::C,
            Grade::D,
            Grade::F,
            Grade::Unplayed,
        ];
        assert!(ordered.windows(2).all(|w| w[0].rank() > w[1].rank()));
    }

    #[test]
    fn test_best_ss_outranks_silver_s() {
        // SS is byte 2, S+ is byte 1
        let table = GradeTable::new([Grade::Ss, Grade::SilverS, Grade::Unplayed, Grade::Unplayed]);
        assert_eq!(table.best(), Grade::Ss);

        let table = GradeTable::new([Grade::F, Grade::Unplayed, Grade::D, Grade::Unplayed]);
        assert_eq!(table.best(), Grade::D);
    }

    #[test]
    fn test_grade_from_u8() {
        assert_eq!(Grade::from_u8(9), Some(Grade::Unplayed));
        assert_eq!(Grade::from_u8(8), Some(Grade::F));
        assert_eq!(Grade::from_u8(10), None);
    }

    #[test]
    fn test_grade_display() {
        assert_eq!(Grade::SilverSs.to_string(), "SS+");
        assert_eq!(Grade::Unplayed.to_string(), "-");
        assert_eq!(Grade::A.to_string(), "A");
    }

    #[test]
    fn test_table_lookup_and_best() {
        let table = GradeTable::new([Grade::Unplayed, Grade::B, Grade::Unplayed, Grade::S]);
        assert_eq!(table.get(GameMode::Taiko), Grade::B);
        assert_eq!(table.get(GameMode::Osu), Grade::Unplayed);
        assert_eq!(table.best(), Grade::S);
        assert_eq!(GradeTable::default().best(), Grade::Unplayed);
    }
}
