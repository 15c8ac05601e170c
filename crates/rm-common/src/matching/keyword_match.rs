use std::collections::HashSet;

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::config::KeywordWeightingKind;

/// Per-match contribution under the flat weighting.
pub const FLAT_KEYWORD_WEIGHT: f64 = 0.1;

const CONTEXT_RADIUS_CHARS: usize = 50;
const CONTEXT_LIMIT: usize = 3;

const TECHNICAL_KEYWORDS: &[&str] = &[
    "python", "java", "c#", "javascript", "react", "angular", "vue", "sql", "mysql", "postgresql",
    "mongodb", "docker", "kubernetes", "aws", "azure", "gcp", "git", "jenkins", "agile", "scrum",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMatch {
    pub keyword: String,
    pub weight: f64,
    pub occurrences: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,
}

/// Maps a matched keyword and its occurrence count to a score contribution.
pub trait KeywordWeighting: Send + Sync {
    fn name(&self) -> &'static str;

    fn weight(&self, keyword: &str, occurrences: usize) -> f64;
}

/// Constant contribution per matched keyword, independent of count and importance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatWeighting(pub f64);

impl Default for FlatWeighting {
    fn default() -> Self {
        Self(FLAT_KEYWORD_WEIGHT)
    }
}

impl KeywordWeighting for FlatWeighting {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn weight(&self, _keyword: &str, _occurrences: usize) -> f64 {
        self.0
    }
}

/// 0.1 per occurrence capped at 1.0, times 1.5 for well-known technical terms, capped again.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TechnicalBoostWeighting;

impl KeywordWeighting for TechnicalBoostWeighting {
    fn name(&self) -> &'static str {
        "technical_boost"
    }

    fn weight(&self, keyword: &str, occurrences: usize) -> f64 {
        let mut weight = (occurrences as f64 * 0.1).min(1.0);
        let lowered = keyword.to_lowercase();
        if TECHNICAL_KEYWORDS.contains(&lowered.as_str()) {
            weight *= 1.5;
        }
        weight.min(1.0)
    }
}

pub fn weighting_for(kind: KeywordWeightingKind) -> Box<dyn KeywordWeighting> {
    match kind {
        KeywordWeightingKind::Flat => Box::new(FlatWeighting::default()),
        KeywordWeightingKind::TechnicalBoost => Box::new(TechnicalBoostWeighting),
    }
}

/// Case-insensitive substring matching of `keywords` against `text`.
///
/// Keywords with no occurrence are left out; the rest keep input order. A keyword listed
/// twice is reported once.
pub fn match_keywords(
    text: &str,
    keywords: &[String],
    weighting: &dyn KeywordWeighting,
) -> Vec<KeywordMatch> {
    let lowered = text.to_lowercase();
    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    for keyword in keywords {
        let needle = keyword.to_lowercase();
        if needle.is_empty() || !seen.insert(needle.clone()) {
            continue;
        }

        let occurrences = lowered.matches(needle.as_str()).count();
        if occurrences == 0 {
            continue;
        }

        matches.push(KeywordMatch {
            keyword: keyword.clone(),
            weight: weighting.weight(keyword, occurrences),
            occurrences,
            context: Vec::new(),
        });
    }

    matches
}

/// Fills `context` of every match with snippets from `text`.
pub fn attach_contexts(text: &str, matches: &mut [KeywordMatch]) {
    for m in matches.iter_mut() {
        m.context = keyword_contexts(text, &m.keyword, CONTEXT_RADIUS_CHARS, CONTEXT_LIMIT);
    }
}

/// Up to `limit` snippets of `text` around case-insensitive occurrences of `keyword`,
/// each extending `radius` chars on both sides. Overlapping occurrences each get a snippet.
pub fn keyword_contexts(text: &str, keyword: &str, radius: usize, limit: usize) -> Vec<String> {
    if keyword.is_empty() || limit == 0 {
        return Vec::new();
    }
    let Ok(pattern) = RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
    else {
        return Vec::new();
    };

    let mut contexts = Vec::new();
    let mut pos = 0;
    while contexts.len() < limit {
        let Some(found) = pattern.find_at(text, pos) else {
            break;
        };
        let start = floor_char_offset(text, found.start(), radius);
        let end = ceil_char_offset(text, found.end(), radius);
        let snippet = text[start..end].trim();
        if !snippet.is_empty() {
            contexts.push(snippet.to_string());
        }
        // next search starts one char past this match's start
        pos = found.start() + text[found.start()..].chars().next().map_or(1, char::len_utf8);
    }
    contexts
}

/// Byte offset `chars` characters before `byte_idx` (clamped to 0).
fn floor_char_offset(text: &str, byte_idx: usize, chars: usize) -> usize {
    if chars == 0 {
        return byte_idx;
    }
    text[..byte_idx]
        .char_indices()
        .rev()
        .nth(chars - 1)
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

/// Byte offset `chars` characters after `byte_idx` (clamped to the end).
fn ceil_char_offset(text: &str, byte_idx: usize, chars: usize) -> usize {
    text[byte_idx..]
        .char_indices()
        .nth(chars)
        .map(|(idx, _)| byte_idx + idx)
        .unwrap_or(text.len())
}

pub fn keyword_score(matches: &[KeywordMatch]) -> f64 {
    matches.iter().map(|m| m.weight).sum()
}
