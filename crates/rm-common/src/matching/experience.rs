use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Score when either side states no years of experience.
pub const NEUTRAL_EXPERIENCE_SCORE: f64 = 50.0;
/// Score when the candidate is above the job's stated range.
pub const OVERQUALIFIED_EXPERIENCE_SCORE: f64 = 80.0;

// "5 years of experience" / "1 year of experience"; a bare "5 years experience" is not a match
static YEARS_OF_EXPERIENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*years?\s*of?\s*experience").unwrap());
// "experience: 5 years" / "experience 5 year"
static EXPERIENCE_COLON_YEARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"experience[:\s]*(\d+)\s*years?").unwrap());
// "5 years in backend"
static YEARS_IN_FIELD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*years?\s*in\s*\w+").unwrap());

/// Every stated years-of-experience value in `text`.
///
/// All three patterns are applied to the lower-cased text and every match is kept, so a
/// phrase matched by two patterns contributes twice. Values that do not fit an integer are
/// skipped.
pub fn extract_years(text: &str) -> Vec<u32> {
    let lowered = text.to_lowercase();
    let mut years = Vec::new();

    for pattern in [
        &*YEARS_OF_EXPERIENCE_RE,
        &*EXPERIENCE_COLON_YEARS_RE,
        &*YEARS_IN_FIELD_RE,
    ] {
        for caps in pattern.captures_iter(&lowered) {
            let Some(raw) = caps.get(1) else {
                continue;
            };
            match raw.as_str().parse::<u32>() {
                Ok(value) => years.push(value),
                Err(err) => debug!(raw = raw.as_str(), error = %err, "skipping unparsable years value"),
            }
        }
    }

    years
}

/// Alignment of the candidate's stated experience with the job's stated range, 0.0..=100.0.
///
/// Inside `[min(job), max(job)]` (compared with the candidate's mean) scores 100, above the
/// range 80, below it linearly towards 0. Either side without any stated years scores 50.
pub fn experience_match_percentage(candidate_text: &str, job_text: &str) -> f64 {
    let candidate_years = extract_years(candidate_text);
    let job_years = extract_years(job_text);
    score_years(&candidate_years, &job_years)
}

pub fn score_years(candidate_years: &[u32], job_years: &[u32]) -> f64 {
    let (Some(&job_min), Some(&job_max)) = (job_years.iter().min(), job_years.iter().max()) else {
        return NEUTRAL_EXPERIENCE_SCORE;
    };
    if candidate_years.is_empty() {
        return NEUTRAL_EXPERIENCE_SCORE;
    }

    let candidate_avg =
        candidate_years.iter().map(|&y| f64::from(y)).sum::<f64>() / candidate_years.len() as f64;
    let (job_min, job_max) = (f64::from(job_min), f64::from(job_max));

    if (job_min..=job_max).contains(&candidate_avg) {
        100.0
    } else if candidate_avg > job_max {
        OVERQUALIFIED_EXPERIENCE_SCORE
    } else {
        // candidate_avg < job_min <= job_max, so job_max > 0 here
        (candidate_avg / job_max * 100.0).max(0.0)
    }
}
