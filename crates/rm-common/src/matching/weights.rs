use serde::{Deserialize, Serialize};

/// Aggregation weights for the three sub-scores.
/// Keyword overlap dominates, declared skills next, stated experience least.
///
/// The keyword sub-score is an unnormalized sum of per-match weights while the other two
/// live on a 0-100 scale; the weights are applied as-is on top of that mismatch.
pub const DEFAULT_WEIGHTS: ScoreWeights = ScoreWeights {
    keyword: 0.5,
    skills: 0.3,
    experience: 0.2,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub keyword: f64,
    pub skills: f64,
    pub experience: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.keyword + self.skills + self.experience
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        assert!((DEFAULT_WEIGHTS.sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn keyword_weight_dominates() {
        let w = ScoreWeights::default();
        assert!(w.keyword > w.skills && w.skills > w.experience);
    }
}
