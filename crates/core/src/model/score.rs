use std::fmt;

/// Final `score/total` of a quiz run.
///
/// `percent` rounds to the nearest integer, unlike the floor used by
/// `StatisticsTracker::accuracy_percent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuizScore {
    pub score: u32,
    pub total: u32,
}

impl QuizScore {
    #[must_use]
    pub fn new(score: u32, total: u32) -> Self {
        Self { score, total }
    }

    /// Percentage of correct answers, rounded half up. Zero when nothing was judged.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let score = u64::from(self.score);
        let total = u64::from(self.total);
        let rounded = (score * 100 + total / 2) / total;
        u32::try_from(rounded).unwrap_or(u32::MAX)
    }
}

impl fmt::Display for QuizScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({}%)", self.score, self.total, self.percent())
    }
}
