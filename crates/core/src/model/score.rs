use std::fmt;

/// Rounded percentage of correct answers, defined as 0 when `total` is 0.
#[must_use]
pub fn score_percentage(correct: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = f64::from(correct) / f64::from(total);
    (ratio * 100.0).round() as u8
}

/// Verdict band for a finished quiz.
///
/// Bands are closed on their lower edge; a perfect run is its own band
/// rather than the top of `Excellent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreCategory {
    /// Every answer correct.
    Perfect,
    /// 80% or better, short of perfect.
    Excellent,
    /// 50% to 79%.
    Regular,
    /// Below 50%.
    Bad,
}

impl ScoreCategory {
    /// Maps a rounded percentage to its band.
    #[must_use]
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            100.. => Self::Perfect,
            80..=99 => Self::Excellent,
            50..=79 => Self::Regular,
            _ => Self::Bad,
        }
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScoreCategory::Perfect => "Perfect",
            ScoreCategory::Excellent => "Excellent",
            ScoreCategory::Regular => "Regular",
            ScoreCategory::Bad => "Bad",
        };
        write!(f, "{label}")
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
