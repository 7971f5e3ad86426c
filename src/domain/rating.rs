use serde::{Deserialize, Serialize};
use std::fmt;

/// A rating score, always within `Score::MIN..=Score::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub struct Score(i32);

impl Score {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            // range-checked above
            #[allow(clippy::cast_possible_truncation)]
            Ok(Self(value as i32))
        } else {
            Err(format!(
                "Score must be an integer between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            ))
        }
    }
}

impl From<Score> for i32 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Average reported when a title has no ratings. Valid scores start at 1,
/// so it cannot be confused with a real mean.
pub const NO_RATINGS_AVERAGE: f64 = 0.0;

/// Arithmetic mean rounded to one decimal place.
#[must_use]
pub fn average_score(scores: &[i32]) -> f64 {
    if scores.is_empty() {
        return NO_RATINGS_AVERAGE;
    }

    let sum: i64 = scores.iter().map(|&s| i64::from(s)).sum();
    #[allow(clippy::cast_precision_loss)]
    let mean = sum as f64 / scores.len() as f64;
    (mean * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_bounds() {
        assert!(Score::try_from(0_i64).is_err());
        assert!(Score::try_from(6_i64).is_err());
        assert!(Score::try_from(-3_i64).is_err());
        for valid in 1_i64..=5 {
            assert_eq!(Score::try_from(valid).unwrap().value(), valid as i32);
        }
    }

    #[test]
    fn score_deserialization_rejects_out_of_range() {
        assert!(serde_json::from_str::<Score>("4").is_ok());
        assert!(serde_json::from_str::<Score>("9").is_err());
        assert!(serde_json::from_str::<Score>("4.5").is_err());
    }

    #[test]
    fn average_of_nothing_is_the_sentinel() {
        let avg = average_score(&[]);
        assert!(!avg.is_nan());
        assert!((avg - NO_RATINGS_AVERAGE).abs() < f64::EPSILON);
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        assert!((average_score(&[5]) - 5.0).abs() < f64::EPSILON);
        assert!((average_score(&[4, 5]) - 4.5).abs() < f64::EPSILON);
        assert!((average_score(&[1, 2, 2]) - 1.7).abs() < 1e-9);
        assert!((average_score(&[5, 4, 4]) - 4.3).abs() < 1e-9);
    }
}
