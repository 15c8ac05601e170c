pub mod experience;
pub mod keyword_match;
pub mod keywords;
pub mod pipeline;
pub mod scoring;
pub mod skills;
pub mod summary;
pub mod weights;

pub use experience::{experience_match_percentage, extract_years};
pub use keyword_match::{
    keyword_score, match_keywords, FlatWeighting, KeywordMatch, KeywordWeighting, TechnicalBoostWeighting,
};
pub use keywords::{extract_keywords, tokenize, StopWords};
pub use pipeline::{assign_ranks, RankingResult, Ranker, UNSCORABLE_RANK};
pub use scoring::{aggregate, MatchScore, ScoringEngine};
pub use skills::{check_skill_coverage, skills_match_percentage, SkillCoverage};
pub use weights::{ScoreWeights, DEFAULT_WEIGHTS};
