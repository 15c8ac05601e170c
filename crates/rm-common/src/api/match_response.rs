use std::{collections::HashSet, sync::Arc};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use super::match_request::MatchRequest;
use crate::{
    extraction::TextExtractor,
    matching::{keyword_match::KeywordMatch, pipeline::RankingResult, Ranker},
    Candidate, CandidateSource, CandidateStatus,
};

/// Candidate record without its (potentially large) text content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSummary {
    pub id: String,
    pub file_name: String,
    pub file_path: String,
    pub email_subject: Option<String>,
    pub email_sender: Option<String>,
    pub source: CandidateSource,
    pub created_at: DateTime<Utc>,
    pub status: CandidateStatus,
}

impl From<&Candidate> for CandidateSummary {
    fn from(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id.clone(),
            file_name: candidate.file_name.clone(),
            file_path: candidate.file_path.clone(),
            email_subject: candidate.email_subject.clone(),
            email_sender: candidate.email_sender.clone(),
            source: candidate.source,
            created_at: candidate.created_at,
            status: candidate.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingSummary {
    pub resume: CandidateSummary,
    pub candidate_name: String,
    pub score: f64,
    pub rank: u32,
    pub keyword_matches: Vec<KeywordMatch>,
    pub resume_source: String,
    pub skills_match_percentage: f64,
    pub experience_match_percentage: f64,
    pub summary: String,
    pub unscorable: bool,
}

impl From<&RankingResult<'_>> for RankingSummary {
    fn from(result: &RankingResult<'_>) -> Self {
        Self {
            resume: CandidateSummary::from(result.candidate),
            candidate_name: result.candidate.display_name(),
            score: result.score,
            rank: result.rank,
            keyword_matches: result.keyword_matches.clone(),
            resume_source: result.resume_source.clone(),
            skills_match_percentage: result.skills_match_percentage,
            experience_match_percentage: result.experience_match_percentage,
            summary: result.summary.clone(),
            unscorable: result.unscorable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub request_id: String,
    pub processed_at: DateTime<Utc>,
    pub total_resumes_processed: usize,
    pub job_description: String,
    pub extracted_keywords: Vec<String>,
    pub rankings: Vec<RankingSummary>,
}

impl MatchResponse {
    /// Ranks the candidates selected by `request` and packages the top `max_results`.
    pub fn build(
        request: &MatchRequest,
        candidates: &[Candidate],
        ranker: &Ranker,
        extractor: &dyn TextExtractor,
    ) -> Self {
        let selected = request.select_candidates(candidates);
        let job = request.job_requirement();
        let results = ranker.rank_all(&selected, &job, extractor);
        Self::from_rankings(request, ranker.extract_keywords(&job.description_text), selected.len(), &results)
    }

    pub async fn build_async(
        request: &MatchRequest,
        candidates: &[Candidate],
        ranker: &Ranker,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        let selected = request.select_candidates(candidates);
        let job = request.job_requirement();
        let results = ranker.rank_all_async(&selected, &job, extractor).await;
        Self::from_rankings(request, ranker.extract_keywords(&job.description_text), selected.len(), &results)
    }

    pub fn from_rankings(
        request: &MatchRequest,
        extracted_keywords: Vec<String>,
        total_resumes_processed: usize,
        results: &[RankingResult<'_>],
    ) -> Self {
        let limit = request.max_results.unwrap_or(usize::MAX);

        Self {
            request_id: Ulid::new().to_string(),
            processed_at: Utc::now(),
            total_resumes_processed,
            job_description: request.job_description.clone(),
            extracted_keywords,
            rankings: results.iter().take(limit).map(RankingSummary::from).collect(),
        }
    }

    pub fn email_resumes_count(&self) -> usize {
        self.count_by_source(CandidateSource::Email)
    }

    pub fn database_resumes_count(&self) -> usize {
        self.count_by_source(CandidateSource::Database)
    }

    fn count_by_source(&self, source: CandidateSource) -> usize {
        self.rankings
            .iter()
            .filter(|r| r.resume_source == source.as_ref())
            .count()
    }

    /// Distinct candidate names from `source`, in rank order.
    pub fn candidates_by_source(&self, source: CandidateSource) -> Vec<String> {
        distinct_names(
            self.rankings
                .iter()
                .filter(|r| r.resume_source == source.as_ref()),
        )
    }

    /// Distinct candidate names, in rank order.
    pub fn all_candidates(&self) -> Vec<String> {
        distinct_names(self.rankings.iter())
    }
}

fn distinct_names<'a>(rankings: impl Iterator<Item = &'a RankingSummary>) -> Vec<String> {
    let mut seen = HashSet::new();
    rankings
        .filter(|r| seen.insert(r.candidate_name.as_str()))
        .map(|r| r.candidate_name.clone())
        .collect()
}
