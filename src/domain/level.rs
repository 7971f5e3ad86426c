//! XP → level derivation.
//!
//! Level is never stored. It is recomputed from cumulative XP on every read
//! through the curve configured in `[engagement.level]`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelCurveError {
    #[error("xp_per_level must be greater than zero")]
    ZeroStep,

    #[error("thresholds must start at 0")]
    MissingBaseThreshold,

    #[error("thresholds must be strictly ascending")]
    NotAscending,
}

/// Deterministic, monotonic mapping from XP to level. Level 1 starts at 0 XP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "curve", rename_all = "snake_case")]
pub enum LevelCurve {
    /// One level every `xp_per_level` points.
    Linear { xp_per_level: u64 },

    /// `thresholds[i]` is the XP required to reach level `i + 1`.
    Thresholds { thresholds: Vec<u64> },
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self::Linear { xp_per_level: 100 }
    }
}

impl LevelCurve {
    pub fn validate(&self) -> Result<(), LevelCurveError> {
        match self {
            Self::Linear { xp_per_level } => {
                if *xp_per_level == 0 {
                    return Err(LevelCurveError::ZeroStep);
                }
            }
            Self::Thresholds { thresholds } => {
                if thresholds.first() != Some(&0) {
                    return Err(LevelCurveError::MissingBaseThreshold);
                }
                if thresholds.windows(2).any(|w| w[0] >= w[1]) {
                    return Err(LevelCurveError::NotAscending);
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn level_for(&self, xp: u64) -> u32 {
        let level = match self {
            Self::Linear { xp_per_level } => (xp / (*xp_per_level).max(1)).saturating_add(1),
            Self::Thresholds { thresholds } => {
                thresholds.partition_point(|&t| t <= xp).max(1) as u64
            }
        };
        u32::try_from(level).unwrap_or(u32::MAX)
    }

    /// XP at which the next level is reached, or `None` at the top of a
    /// threshold table.
    #[must_use]
    pub fn next_level_at(&self, xp: u64) -> Option<u64> {
        match self {
            Self::Linear { xp_per_level } => {
                let step = (*xp_per_level).max(1);
                (xp / step).checked_add(1)?.checked_mul(step)
            }
            Self::Thresholds { thresholds } => thresholds.iter().copied().find(|&t| t > xp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curves() -> Vec<LevelCurve> {
        vec![
            LevelCurve::default(),
            LevelCurve::Linear { xp_per_level: 7 },
            LevelCurve::Thresholds {
                thresholds: vec![0, 50, 150, 400, 1000],
            },
        ]
    }

    #[test]
    fn starts_at_level_one() {
        for curve in curves() {
            assert_eq!(curve.level_for(0), 1);
        }
    }

    #[test]
    fn level_is_monotonic_in_xp() {
        for curve in curves() {
            let mut previous = curve.level_for(0);
            for xp in 1..=2_000 {
                let level = curve.level_for(xp);
                assert!(level >= previous, "{curve:?} dropped at {xp}");
                previous = level;
            }
        }
    }

    #[test]
    fn level_is_deterministic() {
        for curve in curves() {
            for xp in [0, 9, 10, 99, 100, 101, 5_000, u64::MAX] {
                assert_eq!(curve.level_for(xp), curve.clone().level_for(xp));
            }
        }
    }

    #[test]
    fn linear_boundaries() {
        let curve = LevelCurve::default();
        assert_eq!(curve.level_for(99), 1);
        assert_eq!(curve.level_for(100), 2);
        assert_eq!(curve.next_level_at(10), Some(100));
        assert_eq!(curve.next_level_at(100), Some(200));
    }

    #[test]
    fn threshold_boundaries() {
        let curve = LevelCurve::Thresholds {
            thresholds: vec![0, 50, 150],
        };
        assert_eq!(curve.level_for(49), 1);
        assert_eq!(curve.level_for(50), 2);
        assert_eq!(curve.level_for(10_000), 3);
        assert_eq!(curve.next_level_at(60), Some(150));
        assert_eq!(curve.next_level_at(150), None);
    }

    #[test]
    fn validation() {
        assert_eq!(
            LevelCurve::Linear { xp_per_level: 0 }.validate(),
            Err(LevelCurveError::ZeroStep)
        );
        assert_eq!(
            LevelCurve::Thresholds {
                thresholds: vec![10, 20]
            }
            .validate(),
            Err(LevelCurveError::MissingBaseThreshold)
        );
        assert_eq!(
            LevelCurve::Thresholds {
                thresholds: vec![0, 20, 20]
            }
            .validate(),
            Err(LevelCurveError::NotAscending)
        );
        assert!(LevelCurve::default().validate().is_ok());
    }
}
