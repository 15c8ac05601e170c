use std::{
    borrow::{Borrow, Cow},
    cmp::Ordering,
    collections::HashMap,
    panic::AssertUnwindSafe,
    sync::Arc,
};

use rayon::prelude::*;
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use super::{
    keyword_match::{KeywordMatch, KeywordWeighting},
    keywords::{extract_keywords, StopWords},
    scoring::ScoringEngine,
    summary::{generate_ranking_summary, UNSCORABLE_SUMMARY},
};
use crate::{
    config::{ConfigError, RankingConfig, UnscorablePolicy},
    extraction::TextExtractor,
    Candidate, JobRequirement,
};

/// Rank given to a candidate whose text could not be obtained, before final enumeration.
pub const UNSCORABLE_RANK: u32 = 999;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResult<'a> {
    #[serde(rename = "resume")]
    pub candidate: &'a Candidate,
    pub score: f64,
    pub rank: u32,
    pub keyword_matches: Vec<KeywordMatch>,
    pub resume_source: String,
    pub skills_match_percentage: f64,
    pub experience_match_percentage: f64,
    pub summary: String,
    pub unscorable: bool,
}

impl<'a> RankingResult<'a> {
    fn unscorable(candidate: &'a Candidate) -> Self {
        Self {
            candidate,
            score: 0.0,
            rank: UNSCORABLE_RANK,
            keyword_matches: vec![],
            resume_source: candidate.source.to_string(),
            skills_match_percentage: 0.0,
            experience_match_percentage: 0.0,
            summary: UNSCORABLE_SUMMARY.to_string(),
            unscorable: true,
        }
    }
}

/// Batch ranker: scores every candidate against one job and orders the results.
pub struct Ranker {
    config: RankingConfig,
    scorer: ScoringEngine,
    stop_words: StopWords,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(RankingConfig::default())
    }
}

impl Ranker {
    pub fn new(config: RankingConfig) -> Self {
        Self {
            scorer: ScoringEngine::new(&config),
            stop_words: StopWords::english().clone(),
            config,
        }
    }

    pub fn try_new(config: RankingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    pub fn with_weighting(mut self, weighting: Box<dyn KeywordWeighting>) -> Self {
        self.scorer = self.scorer.with_weighting(weighting);
        self
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    pub fn extract_keywords(&self, job_description: &str) -> Vec<String> {
        extract_keywords(job_description, &self.stop_words, self.config.keyword_limit)
    }

    /// Scores a single candidate without ranking it (rank stays 0, or 999 if unscorable).
    pub fn rank_one<'a>(
        &self,
        candidate: &'a Candidate,
        job: &JobRequirement,
        extractor: &dyn TextExtractor,
    ) -> RankingResult<'a> {
        let keywords = self.extract_keywords(&job.description_text);
        let text = resolve_text(candidate, extractor);
        self.build_result(candidate, text.as_deref(), &keywords, job)
    }

    /// Scores all candidates and returns them ordered with ranks assigned.
    ///
    /// Candidates without inline content go through `extractor`; one failing extraction only
    /// makes that candidate unscorable. Accepts owned records or a borrowed selection
    /// (`&[&Candidate]`).
    #[instrument(skip_all, fields(candidates = candidates.len(), parallel = self.config.parallel))]
    pub fn rank_all<'a, C>(
        &self,
        candidates: &'a [C],
        job: &JobRequirement,
        extractor: &dyn TextExtractor,
    ) -> Vec<RankingResult<'a>>
    where
        C: Borrow<Candidate> + Sync,
    {
        let keywords = self.extract_keywords(&job.description_text);
        debug!(keywords = ?keywords, "extracted job keywords");

        let score_one = |entry: &'a C| {
            let candidate = <C as Borrow<Candidate>>::borrow(entry);
            let text = resolve_text(candidate, extractor);
            self.build_result(candidate, text.as_deref(), &keywords, job)
        };

        let results: Vec<RankingResult<'a>> = if self.config.parallel {
            candidates.par_iter().map(score_one).collect()
        } else {
            candidates.iter().map(score_one).collect()
        };

        self.finish(results)
    }

    /// Same as [`Ranker::rank_all`], but document texts are fetched concurrently on the
    /// blocking pool. A panicking extraction leaves only its own candidate unscorable.
    #[instrument(skip_all, fields(candidates = candidates.len()))]
    pub async fn rank_all_async<'a, C>(
        &self,
        candidates: &'a [C],
        job: &JobRequirement,
        extractor: Arc<dyn TextExtractor>,
    ) -> Vec<RankingResult<'a>>
    where
        C: Borrow<Candidate>,
    {
        let mut tasks = JoinSet::new();
        for (idx, candidate) in candidates.iter().map(<C as Borrow<Candidate>>::borrow).enumerate() {
            if has_inline_content(candidate) || candidate.file_path.trim().is_empty() {
                continue;
            }
            let extractor = Arc::clone(&extractor);
            let path = candidate.file_path.clone();
            tasks.spawn_blocking(move || (idx, extractor.extract_text(&path)));
        }

        let mut extracted: HashMap<usize, String> = HashMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, text)) => {
                    extracted.insert(idx, text);
                }
                Err(err) => {
                    warn!(error = %err, "text extraction task failed; candidate left unscorable");
                }
            }
        }

        let keywords = self.extract_keywords(&job.description_text);
        let results = candidates
            .iter()
            .map(<C as Borrow<Candidate>>::borrow)
            .enumerate()
            .map(|(idx, candidate)| {
                let text = if has_inline_content(candidate) {
                    Some(candidate.content.as_str())
                } else {
                    extracted
                        .get(&idx)
                        .map(String::as_str)
                        .filter(|text| !text.trim().is_empty())
                };
                self.build_result(candidate, text, &keywords, job)
            })
            .collect();

        self.finish(results)
    }

    fn build_result<'a>(
        &self,
        candidate: &'a Candidate,
        text: Option<&str>,
        keywords: &[String],
        job: &JobRequirement,
    ) -> RankingResult<'a> {
        let Some(text) = text else {
            debug!(candidate_id = %candidate.id, "no text content; candidate unscorable");
            return RankingResult::unscorable(candidate);
        };

        let score = self.scorer.calculate_match_score(
            text,
            keywords,
            &job.description_text,
            &job.required_skills,
        );
        let summary = generate_ranking_summary(&score.keyword_matches, score.skills.percentage, score.experience);

        debug!(
            candidate_id = %candidate.id,
            score = score.total,
            keyword = score.keyword,
            skills = score.skills.percentage,
            experience = score.experience,
            "scored candidate"
        );

        RankingResult {
            candidate,
            score: score.total,
            rank: 0,
            keyword_matches: score.keyword_matches,
            resume_source: candidate.source.to_string(),
            skills_match_percentage: score.skills.percentage,
            experience_match_percentage: score.experience,
            summary,
            unscorable: false,
        }
    }

    fn finish<'a>(&self, results: Vec<RankingResult<'a>>) -> Vec<RankingResult<'a>> {
        let total = results.len();
        let unscorable = results.iter().filter(|r| r.unscorable).count();
        let ranked = assign_ranks(results, self.config.unscorable_policy);

        info!(
            total,
            scored = total - unscorable,
            unscorable,
            returned = ranked.len(),
            policy = self.config.unscorable_policy.as_ref(),
            "ranking run complete"
        );

        ranked
    }
}

fn has_inline_content(candidate: &Candidate) -> bool {
    !candidate.content.trim().is_empty()
}

/// Text to score for `candidate`: inline content first, then the extractor on `file_path`.
/// `None` means the candidate is unscorable.
pub fn resolve_text<'a>(candidate: &'a Candidate, extractor: &dyn TextExtractor) -> Option<Cow<'a, str>> {
    if has_inline_content(candidate) {
        return Some(Cow::Borrowed(candidate.content.as_str()));
    }
    if candidate.file_path.trim().is_empty() {
        return None;
    }

    let extracted = std::panic::catch_unwind(AssertUnwindSafe(|| {
        extractor.extract_text(&candidate.file_path)
    }));
    match extracted {
        Ok(text) if !text.trim().is_empty() => Some(Cow::Owned(text)),
        Ok(_) => None,
        Err(_) => {
            warn!(candidate_id = %candidate.id, "text extractor panicked; candidate left unscorable");
            None
        }
    }
}

/// Orders by score descending, then `email_sender` ascending (missing sender first).
/// Remaining ties keep input order.
pub fn compare_results(a: &RankingResult<'_>, b: &RankingResult<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.candidate.sender_key().cmp(b.candidate.sender_key()))
}

/// Sorts `results` and overwrites ranks with `1..` according to `policy`.
pub fn assign_ranks(results: Vec<RankingResult<'_>>, policy: UnscorablePolicy) -> Vec<RankingResult<'_>> {
    let mut ordered = match policy {
        UnscorablePolicy::Interleave => {
            let mut all = results;
            all.sort_by(compare_results);
            all
        }
        UnscorablePolicy::RankLast => {
            let (mut scored, unscorable): (Vec<_>, Vec<_>) =
                results.into_iter().partition(|r| !r.unscorable);
            scored.sort_by(compare_results);
            scored.extend(unscorable);
            scored
        }
        UnscorablePolicy::Exclude => {
            let mut scored = results;
            scored.retain(|r| !r.unscorable);
            scored.sort_by(compare_results);
            scored
        }
    };

    for (idx, result) in ordered.iter_mut().enumerate() {
        result.rank = idx as u32 + 1;
    }
    ordered
}
