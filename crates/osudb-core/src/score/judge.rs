use serde::{Deserialize, Serialize};

use crate::mode::GameMode;

/// Per-judgment hit counts of a score.
///
/// Wire order is 300, 100, 50, geki, katu, miss. Geki and katu mean different
/// things per mode (MAX/200 in mania, droplet misses in catch).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitCounts {
    pub count_300: u16,
    pub count_100: u16,
    pub count_50: u16,
    pub count_geki: u16,
    pub count_katu: u16,
    pub count_miss: u16,
}

impl HitCounts {
    /// Number of judged objects for `mode`.
    pub fn total_hits(&self, mode: GameMode) -> u32 {
        let n300 = u32::from(self.count_300);
        let n100 = u32::from(self.count_100);
        let n50 = u32::from(self.count_50);
        let geki = u32::from(self.count_geki);
        let katu = u32::from(self.count_katu);
        let miss = u32::from(self.count_miss);

        match mode {
            GameMode::Osu => n300 + n100 + n50 + miss,
            GameMode::Taiko => n300 + n100 + miss,
            GameMode::Catch => n300 + n100 + n50 + katu + miss,
            GameMode::Mania => geki + n300 + katu + n100 + n50 + miss,
        }
    }

    /// Accuracy in `0.0..=1.0` using the client's per-mode formula.
    /// Zero judged objects yields 0.
    pub fn accuracy(&self, mode: GameMode) -> f64 {
        let total = self.total_hits(mode);
        if total == 0 {
            return 0.0;
        }

        let n300 = f64::from(self.count_300);
        let n100 = f64::from(self.count_100);
        let n50 = f64::from(self.count_50);
        let geki = f64::from(self.count_geki);
        let katu = f64::from(self.count_katu);
        let total = f64::from(total);

        match mode {
            GameMode::Osu => (300.0 * n300 + 100.0 * n100 + 50.0 * n50) / (300.0 * total),
            GameMode::Taiko => (n300 + 0.5 * n100) / total,
            GameMode::Catch => (n300 + n100 + n50) / total,
            GameMode::Mania => {
                (300.0 * (geki + n300) + 200.0 * katu + 100.0 * n100 + 50.0 * n50) / (300.0 * total)
            }
        }
    }

    /// Check if nothing was missed
    pub fn is_full_combo_judgement(&self) -> bool {
        self.count_miss == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osu_accuracy() {
        let counts = HitCounts {
            count_300: 90,
            count_100: 6,
            count_50: 3,
            count_miss: 1,
            ..Default::default()
        };
        assert_eq!(counts.total_hits(GameMode::Osu), 100);
        let expected = (300.0 * 90.0 + 100.0 * 6.0 + 50.0 * 3.0) / 30000.0;
        assert!((counts.accuracy(GameMode::Osu) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_taiko_accuracy() {
        let counts = HitCounts {
            count_300: 8,
            count_100: 2,
            ..Default::default()
        };
        assert!((counts.accuracy(GameMode::Taiko) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_catch_counts_droplet_misses() {
        let counts = HitCounts {
            count_300: 9,
            count_katu: 1,
            ..Default::default()
        };
        assert_eq!(counts.total_hits(GameMode::Catch), 10);
        assert!((counts.accuracy(GameMode::Catch) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_mania_perfect_accuracy() {
        let counts = HitCounts {
            count_geki: 500,
            count_300: 100,
            ..Default::default()
        };
        assert!((counts.accuracy(GameMode::Mania) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_counts() {
        let counts = HitCounts::default();
        assert_eq!(counts.accuracy(GameMode::Osu), 0.0);
        assert!(counts.is_full_combo_judgement());
    }
}
