use serde::Serialize;
use thiserror::Error;

/// Default score ceiling used by games that don't configure their own.
pub const MAX_SCORE_DEFAULT: u32 = 10;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("total must be > 0")]
    InvalidTotal,

    #[error("correct ({correct}) exceeds total ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },
}

//
// ─── TIERS ─────────────────────────────────────────────────────────────────────
//

/// Discrete feedback category for a normalized score.
///
/// Ordered from best to worst; `classify` picks the first tier whose
/// inclusive lower bound the score percentage reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Tier {
    Excellent,
    Great,
    Good,
    Nice,
    KeepTrying,
    Practice,
}

impl Tier {
    /// Player-facing message for this tier.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Tier::Excellent => "Excellent work!",
            Tier::Great => "Great job!",
            Tier::Good => "Good work!",
            Tier::Nice => "Nice effort!",
            Tier::KeepTrying => "Keep trying!",
            Tier::Practice => "Practice makes perfect!",
        }
    }
}

//
// ─── SCORING ───────────────────────────────────────────────────────────────────
//

/// Maps raw performance to a bounded score.
///
/// Returns `round(correct / total * max_score)`.
///
/// # Errors
///
/// Returns `ScoreError::InvalidTotal` if `total` is zero, or
/// `ScoreError::CorrectExceedsTotal` if `correct > total`.
pub fn compute_score(correct: u32, total: u32, max_score: u32) -> Result<u32, ScoreError> {
    if total == 0 {
        return Err(ScoreError::InvalidTotal);
    }
    if correct > total {
        return Err(ScoreError::CorrectExceedsTotal { correct, total });
    }

    let ratio = f64::from(correct) / f64::from(total);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = (ratio * f64::from(max_score)).round() as u32;
    Ok(score)
}

/// Maps a normalized score to its feedback tier.
///
/// Thresholds are inclusive lower bounds on the score percentage, checked
/// in descending order; the first match wins, so every score lands in
/// exactly one tier.
#[must_use]
pub fn classify(score: u32, max_score: u32) -> Tier {
    let percentage = f64::from(score) / f64::from(max_score) * 100.0;

    if percentage >= 90.0 {
        Tier::Excellent
    } else if percentage >= 80.0 {
        Tier::Great
    } else if percentage >= 70.0 {
        Tier::Good
    } else if percentage >= 60.0 {
        Tier::Nice
    } else if percentage >= 50.0 {
        Tier::KeepTrying
    } else {
        Tier::Practice
    }
}

/// Score plus feedback, computed once per set of raw inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    raw_correct: u32,
    raw_total: u32,
    score: u32,
    tier: Tier,
}

impl ScoreResult {
    /// Computes the bounded score and its tier for raw performance.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError` for invalid inputs, see [`compute_score`].
    pub fn compute(correct: u32, total: u32, max_score: u32) -> Result<Self, ScoreError> {
        let score = compute_score(correct, total, max_score)?;
        Ok(Self {
            raw_correct: correct,
            raw_total: total,
            score,
            tier: classify(score, max_score),
        })
    }

    #[must_use]
    pub fn raw_correct(&self) -> u32 {
        self.raw_correct
    }

    #[must_use]
    pub fn raw_total(&self) -> u32 {
        self.raw_total
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        self.tier.message()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_score_rejects_zero_total() {
        assert_eq!(compute_score(0, 0, 10).unwrap_err(), ScoreError::InvalidTotal);
    }

    #[test]
    fn compute_score_rejects_correct_above_total() {
        assert_eq!(
            compute_score(5, 4, 10).unwrap_err(),
            ScoreError::CorrectExceedsTotal {
                correct: 5,
                total: 4
            }
        );
    }

    #[test]
    fn compute_score_bounds() {
        // full marks and zero marks hit the score range endpoints exactly
        assert_eq!(compute_score(7, 7, 10).unwrap(), 10);
        assert_eq!(compute_score(0, 7, 10).unwrap(), 0);
        assert_eq!(compute_score(3, 3, 25).unwrap(), 25);
    }

    #[test]
    fn compute_score_rounds_to_nearest() {
        // 2/3 of 10 = 6.67 -> 7; 1/3 of 10 = 3.33 -> 3; 1/4 of 10 = 2.5 -> 3
        assert_eq!(compute_score(2, 3, 10).unwrap(), 7);
        assert_eq!(compute_score(1, 3, 10).unwrap(), 3);
        assert_eq!(compute_score(1, 4, 10).unwrap(), 3);
    }

    #[test]
    fn compute_score_stays_in_range() {
        for total in 1..=20 {
            for correct in 0..=total {
                let score = compute_score(correct, total, MAX_SCORE_DEFAULT).unwrap();
                assert!(score <= MAX_SCORE_DEFAULT);
            }
        }
    }

    #[test]
    fn classify_threshold_boundaries() {
        assert_eq!(classify(9, 10), Tier::Excellent);
        assert_eq!(classify(8, 10), Tier::Great);
        assert_eq!(classify(7, 10), Tier::Good);
        assert_eq!(classify(6, 10), Tier::Nice);
        assert_eq!(classify(5, 10), Tier::KeepTrying);
        assert_eq!(classify(4, 10), Tier::Practice);
        assert_eq!(classify(0, 10), Tier::Practice);
        assert_eq!(classify(10, 10), Tier::Excellent);
    }

    #[test]
    fn classify_is_monotonic() {
        let max = 100;
        let mut last = classify(0, max);
        for score in 1..=max {
            let tier = classify(score, max);
            // Tier derives Ord best-first, so a higher score never yields a
            // strictly worse (greater) tier.
            assert!(tier <= last, "score {score} regressed from {last:?} to {tier:?}");
            last = tier;
        }
    }

    #[test]
    fn score_result_combines_score_and_tier() {
        let result = ScoreResult::compute(9, 10, MAX_SCORE_DEFAULT).unwrap();
        assert_eq!(result.score(), 9);
        assert_eq!(result.tier(), Tier::Excellent);
        assert_eq!(result.message(), "Excellent work!");
        assert_eq!(result.raw_correct(), 9);
        assert_eq!(result.raw_total(), 10);
    }
}
