pub mod api;
pub mod config;
pub mod extraction;
pub mod logging;
pub mod matching;

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

pub use config::{ConfigError, KeywordWeightingKind, RankingConfig, UnscorablePolicy};
pub use extraction::{NoopExtractor, PlainTextFileExtractor, TextExtractor};
pub use matching::{
    keyword_match::KeywordMatch,
    pipeline::{RankingResult, Ranker, UNSCORABLE_RANK},
};

/// Channel a resume record was acquired through.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
pub enum CandidateSource {
    Database,
    Email,
    File,
    #[default]
    Unknown,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
pub enum CandidateStatus {
    #[default]
    Pending,
    Processing,
    Processed,
    Failed,
}

// Resume record as handed over by the store or the mailbox fetcher. Read-only for ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Candidate {
    pub id: String,
    pub file_name: String,
    pub file_path: String,
    pub content: String,
    pub source: CandidateSource,
    pub created_at: DateTime<Utc>,
    pub status: CandidateStatus,
    pub email_sender: Option<String>,
    pub email_subject: Option<String>,
}

impl Candidate {
    /// Human-readable name used in reports.
    ///
    /// Prefers the display part of `email_sender` (`"Jane Doe" <jane@x.io>` → `Jane Doe`),
    /// then the file name stem with `_`/`-` turned into spaces.
    pub fn display_name(&self) -> String {
        if let Some(sender) = self.email_sender.as_deref() {
            let display = match sender.find('<') {
                Some(idx) => &sender[..idx],
                None => sender,
            };
            let cleaned = display.replace('"', "");
            let cleaned = cleaned.trim();
            if !cleaned.is_empty() {
                return cleaned.to_string();
            }
        }

        if !self.file_name.is_empty() {
            let stem = Path::new(&self.file_name)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            if !stem.is_empty() {
                return stem.replace(['_', '-'], " ");
            }
        }

        "Unknown Candidate".to_string()
    }

    /// Sender key used for tie-breaking; a missing sender sorts as the empty string.
    pub fn sender_key(&self) -> &str {
        self.email_sender.as_deref().unwrap_or("")
    }
}

/// One job posting to rank against. Immutable for the duration of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobRequirement {
    pub description_text: String,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub title: Option<String>,
    pub company: Option<String>,
}

impl JobRequirement {
    pub fn new(description_text: impl Into<String>, required_skills: Vec<String>) -> Self {
        Self {
            description_text: description_text.into(),
            required_skills,
            ..Self::default()
        }
    }
}
