use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCoverage {
    /// 0.0..=100.0
    pub percentage: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Share of `required_skills` found verbatim (case-insensitive substring) in `text`, in percent.
///
/// An empty requirement list scores 0.0, not 100.0.
pub fn skills_match_percentage(text: &str, required_skills: &[String]) -> f64 {
    check_skill_coverage(text, required_skills).percentage
}

/// Required-skill coverage with the matched and missing skills listed in input order.
pub fn check_skill_coverage(text: &str, required_skills: &[String]) -> SkillCoverage {
    if required_skills.is_empty() {
        return SkillCoverage {
            percentage: 0.0,
            matched: vec![],
            missing: vec![],
        };
    }

    let lowered = text.to_lowercase();
    let (matched, missing): (Vec<String>, Vec<String>) = required_skills
        .iter()
        .cloned()
        .partition(|skill| lowered.contains(&skill.to_lowercase()));

    let percentage = matched.len() as f64 / required_skills.len() as f64 * 100.0;

    SkillCoverage {
        percentage,
        matched,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_requirements_score_zero() {
        assert_eq!(skills_match_percentage("Rust, Go, anything", &[]), 0.0);
        assert_eq!(skills_match_percentage("", &[]), 0.0);
    }

    #[test]
    fn counts_case_insensitive_substrings() {
        let required = skills(&["Python", "SQL Server", "C#", ".NET"]);
        let coverage = check_skill_coverage("Worked with python, sql server and .net core", &required);

        assert!((coverage.percentage - 75.0).abs() < f64::EPSILON);
        assert_eq!(coverage.matched, skills(&["Python", "SQL Server", ".NET"]));
        assert_eq!(coverage.missing, skills(&["C#"]));
    }

    #[test]
    fn coverage_grows_as_skills_appear() {
        let required = skills(&["rust", "kafka", "terraform"]);
        let texts = ["nothing here", "rust", "rust kafka", "rust kafka terraform"];

        let scores: Vec<f64> = texts
            .iter()
            .map(|t| skills_match_percentage(t, &required))
            .collect();

        assert!(scores.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(scores[0], 0.0);
        assert_eq!(scores[3], 100.0);
    }
}
