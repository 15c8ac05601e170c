use super::{
    experience::experience_match_percentage,
    keyword_match::{attach_contexts, keyword_score, match_keywords, weighting_for, KeywordMatch, KeywordWeighting},
    skills::{check_skill_coverage, SkillCoverage},
    weights::ScoreWeights,
};
use crate::config::RankingConfig;

/// Sub-scores and the aggregated total for one candidate text.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchScore {
    /// Weighted total, rounded to two decimals.
    pub total: f64,
    /// Unnormalized sum of keyword match weights.
    pub keyword: f64,
    pub skills: SkillCoverage,
    /// 0.0..=100.0
    pub experience: f64,
    pub keyword_matches: Vec<KeywordMatch>,
}

/// Weighted sum of the three sub-scores, rounded to two decimals.
pub fn aggregate(keyword_score: f64, skills_score: f64, experience_score: f64, weights: &ScoreWeights) -> f64 {
    round_to_cents(
        keyword_score * weights.keyword
            + skills_score * weights.skills
            + experience_score * weights.experience,
    )
}

/// Rounds half away from zero to two decimals.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub struct ScoringEngine {
    weights: ScoreWeights,
    weighting: Box<dyn KeywordWeighting>,
    capture_context: bool,
}

impl ScoringEngine {
    pub fn new(config: &RankingConfig) -> Self {
        Self {
            weights: config.weights,
            weighting: weighting_for(config.keyword_weighting),
            capture_context: config.capture_keyword_context,
        }
    }

    /// Swaps in a custom keyword weighting strategy.
    pub fn with_weighting(mut self, weighting: Box<dyn KeywordWeighting>) -> Self {
        self.weighting = weighting;
        self
    }

    pub fn weighting_name(&self) -> &'static str {
        self.weighting.name()
    }

    /// Scores a non-empty candidate text against pre-extracted job keywords.
    pub fn calculate_match_score(
        &self,
        candidate_text: &str,
        keywords: &[String],
        job_description: &str,
        required_skills: &[String],
    ) -> MatchScore {
        let mut keyword_matches = match_keywords(candidate_text, keywords, self.weighting.as_ref());
        if self.capture_context {
            attach_contexts(candidate_text, &mut keyword_matches);
        }

        let keyword = keyword_score(&keyword_matches);
        let skills = check_skill_coverage(candidate_text, required_skills);
        let experience = experience_match_percentage(candidate_text, job_description);
        let total = aggregate(keyword, skills.percentage, experience, &self.weights);

        MatchScore {
            total,
            keyword,
            skills,
            experience,
            keyword_matches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::keyword_match::TechnicalBoostWeighting;
    use crate::matching::weights::DEFAULT_WEIGHTS;

    #[test]
    fn aggregate_uses_fixed_weights_and_rounds() {
        assert_eq!(aggregate(0.0, 0.0, 50.0, &DEFAULT_WEIGHTS), 10.0);
        assert_eq!(aggregate(0.3, 100.0, 80.0, &DEFAULT_WEIGHTS), 46.15);
        assert_eq!(aggregate(0.1, 33.333333, 50.0, &DEFAULT_WEIGHTS), 20.05);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_to_cents(1.234), 1.23);
        assert_eq!(round_to_cents(1.236), 1.24);
        assert_eq!(round_to_cents(0.0), 0.0);
    }

    #[test]
    fn engine_combines_sub_scores() {
        let engine = ScoringEngine::new(&RankingConfig::default());
        let keywords = vec!["rust".to_string(), "kafka".to_string(), "terraform".to_string()];
        let score = engine.calculate_match_score(
            "Rust and Kafka engineer with 4 years of experience",
            &keywords,
            "3 years of experience with Rust",
            &["Rust".to_string(), "Go".to_string()],
        );

        assert_eq!(score.keyword_matches.len(), 2);
        assert!((score.keyword - 0.2).abs() < 1e-9);
        assert_eq!(score.skills.percentage, 50.0);
        assert_eq!(score.experience, 80.0);
        assert_eq!(score.total, 31.1);
        assert!(score.keyword_matches.iter().all(|m| m.context.is_empty()));
    }

    #[test]
    fn context_capture_and_custom_weighting() {
        let config = RankingConfig {
            capture_keyword_context: true,
            ..RankingConfig::default()
        };
        let engine = ScoringEngine::new(&config).with_weighting(Box::new(TechnicalBoostWeighting));
        assert_eq!(engine.weighting_name(), "technical_boost");

        let score = engine.calculate_match_score("python python", &["python".to_string()], "", &[]);
        assert!((score.keyword - 0.3).abs() < 1e-9);
        assert_eq!(score.keyword_matches[0].context.len(), 2);
    }
}
