//! Request/response shapes exchanged with the recruiting front end.

pub mod match_request;
pub mod match_response;

pub use match_request::{MatchRequest, DEFAULT_MAX_RESULTS};
pub use match_response::{CandidateSummary, MatchResponse, RankingSummary};
