use super::keyword_match::KeywordMatch;

const SUMMARY_TOP_KEYWORDS: usize = 5;
pub const NO_MATCH_SUMMARY: &str = "No significant matches found";
pub const UNSCORABLE_SUMMARY: &str = "No text content found";

/// One-line explanation of a candidate's score.
pub fn generate_ranking_summary(
    keyword_matches: &[KeywordMatch],
    skills_score: f64,
    experience_score: f64,
) -> String {
    let mut parts = Vec::new();

    if !keyword_matches.is_empty() {
        let mut by_weight: Vec<&KeywordMatch> = keyword_matches.iter().collect();
        // stable: equal weights keep match order
        by_weight.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        let top: Vec<&str> = by_weight
            .iter()
            .take(SUMMARY_TOP_KEYWORDS)
            .map(|m| m.keyword.as_str())
            .collect();
        parts.push(format!(
            "Matched {} keywords including {}",
            keyword_matches.len(),
            top.join(", ")
        ));
    }

    if skills_score > 0.0 {
        parts.push(format!("Skills match: {skills_score:.1}%"));
    }

    if experience_score > 0.0 {
        parts.push(format!("Experience match: {experience_score:.1}%"));
    }

    if parts.is_empty() {
        return NO_MATCH_SUMMARY.to_string();
    }

    format!("{}.", parts.join(". "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(keyword: &str, weight: f64) -> KeywordMatch {
        KeywordMatch {
            keyword: keyword.into(),
            weight,
            occurrences: 1,
            context: vec![],
        }
    }

    #[test]
    fn summarizes_all_parts() {
        let summary = generate_ranking_summary(&[m("rust", 0.1), m("kafka", 0.1)], 50.0, 80.0);
        assert_eq!(
            summary,
            "Matched 2 keywords including rust, kafka. Skills match: 50.0%. Experience match: 80.0%."
        );
    }

    #[test]
    fn lists_heaviest_keywords_first_and_caps_at_five() {
        let matches = vec![
            m("a1", 0.1),
            m("b2", 0.9),
            m("c3", 0.1),
            m("d4", 0.1),
            m("e5", 0.1),
            m("f6", 0.1),
        ];
        let summary = generate_ranking_summary(&matches, 0.0, 0.0);
        assert_eq!(summary, "Matched 6 keywords including b2, a1, c3, d4, e5.");
    }

    #[test]
    fn empty_summary_fallback() {
        assert_eq!(generate_ranking_summary(&[], 0.0, 0.0), NO_MATCH_SUMMARY);
    }
}
