use serde::{Deserialize, Serialize};

use crate::{Candidate, CandidateSource, JobRequirement};

pub const DEFAULT_MAX_RESULTS: usize = 10;

fn default_max_results() -> Option<usize> {
    Some(DEFAULT_MAX_RESULTS)
}

fn default_true() -> bool {
    true
}

/// Matching request as posted by the recruiting front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub job_description: String,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub required_skills: Option<Vec<String>>,
    #[serde(default)]
    pub preferred_skills: Option<Vec<String>>,
    /// `None` returns every ranked candidate.
    #[serde(default = "default_max_results")]
    pub max_results: Option<usize>,
    #[serde(default = "default_true")]
    pub include_email_resumes: bool,
    #[serde(default = "default_true")]
    pub include_database_resumes: bool,
}

impl Default for MatchRequest {
    fn default() -> Self {
        Self {
            job_description: String::new(),
            job_title: None,
            company: None,
            required_skills: None,
            preferred_skills: None,
            max_results: default_max_results(),
            include_email_resumes: true,
            include_database_resumes: true,
        }
    }
}

impl MatchRequest {
    pub fn job_requirement(&self) -> JobRequirement {
        JobRequirement {
            description_text: self.job_description.clone(),
            required_skills: self.required_skills.clone().unwrap_or_default(),
            preferred_skills: self.preferred_skills.clone().unwrap_or_default(),
            title: self.job_title.clone(),
            company: self.company.clone(),
        }
    }

    /// Whether candidates from `source` take part in this request.
    /// Only the email and database channels can be switched off.
    pub fn accepts_source(&self, source: CandidateSource) -> bool {
        match source {
            CandidateSource::Email => self.include_email_resumes,
            CandidateSource::Database => self.include_database_resumes,
            CandidateSource::File | CandidateSource::Unknown => true,
        }
    }

    pub fn select_candidates<'a>(&self, candidates: &'a [Candidate]) -> Vec<&'a Candidate> {
        candidates
            .iter()
            .filter(|c| self.accepts_source(c.source))
            .collect()
    }
}
