use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};
use tracing::warn;

use crate::matching::weights::{ScoreWeights, DEFAULT_WEIGHTS};

pub const DEFAULT_KEYWORD_LIMIT: usize = 20;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("weight `{name}` must be a finite non-negative number, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
    #[error("score weights must not all be zero")]
    ZeroWeights,
    #[error("keyword limit must be at least 1")]
    ZeroKeywordLimit,
}

/// How unscorable candidates (no obtainable text) take part in the final ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UnscorablePolicy {
    /// Scored candidates are ranked first; unscorable ones follow in input order.
    #[default]
    RankLast,
    /// Sorted together with everyone else as a plain 0.0 score.
    Interleave,
    /// Dropped from the result set.
    Exclude,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum KeywordWeightingKind {
    /// 0.1 per matched keyword regardless of occurrences.
    #[default]
    Flat,
    /// Occurrence-scaled with a boost for well-known technical terms.
    TechnicalBoost,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    pub weights: ScoreWeights,
    pub keyword_limit: usize,
    pub keyword_weighting: KeywordWeightingKind,
    pub capture_keyword_context: bool,
    pub unscorable_policy: UnscorablePolicy,
    pub parallel: bool,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
            keyword_weighting: KeywordWeightingKind::Flat,
            capture_keyword_context: false,
            unscorable_policy: UnscorablePolicy::RankLast,
            parallel: false,
        }
    }
}

impl RankingConfig {
    /// Reads overrides from `RM_*` environment variables.
    ///
    /// Unset variables keep their defaults; unparsable ones are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`RankingConfig::from_env`] but with an injectable lookup, so callers can
    /// feed values from a dotenv map or a test fixture.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            weights: ScoreWeights {
                keyword: parse_var(&lookup, "RM_WEIGHT_KEYWORD").unwrap_or(defaults.weights.keyword),
                skills: parse_var(&lookup, "RM_WEIGHT_SKILLS").unwrap_or(defaults.weights.skills),
                experience: parse_var(&lookup, "RM_WEIGHT_EXPERIENCE")
                    .unwrap_or(defaults.weights.experience),
            },
            keyword_limit: parse_var(&lookup, "RM_KEYWORD_LIMIT").unwrap_or(defaults.keyword_limit),
            keyword_weighting: parse_var(&lookup, "RM_KEYWORD_WEIGHTING")
                .unwrap_or(defaults.keyword_weighting),
            capture_keyword_context: parse_flag(&lookup, "RM_KEYWORD_CONTEXT")
                .unwrap_or(defaults.capture_keyword_context),
            unscorable_policy: parse_var(&lookup, "RM_UNSCORABLE_POLICY")
                .unwrap_or(defaults.unscorable_policy),
            parallel: parse_flag(&lookup, "RM_PARALLEL").unwrap_or(defaults.parallel),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("keyword", self.weights.keyword),
            ("skills", self.weights.skills),
            ("experience", self.weights.experience),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        if self.weights.sum() == 0.0 {
            return Err(ConfigError::ZeroWeights);
        }
        if self.keyword_limit == 0 {
            return Err(ConfigError::ZeroKeywordLimit);
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable config value");
            None
        }
    }
}

fn parse_flag<F>(lookup: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            warn!(key, value = %raw, "ignoring unparsable boolean config value");
            None
        }
    }
}
