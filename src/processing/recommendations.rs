//! Rule-based improvement suggestions

/// Missing skills named in the first recommendation
pub const MISSING_SKILLS_LISTED: usize = 5;
pub const SKILLS_SCORE_THRESHOLD: f64 = 70.0;
pub const SIMILARITY_THRESHOLD: f32 = 0.6;
pub const OVERALL_SCORE_THRESHOLD: u8 = 60;

pub const HIGHLIGHT_SKILLS_MESSAGE: &str =
    "Highlight more relevant skills and experience that match the job requirements";
pub const USE_KEYWORDS_MESSAGE: &str =
    "Use more keywords and phrases from the job description to improve semantic alignment";
pub const RESTRUCTURE_MESSAGE: &str =
    "Consider restructuring your resume to better emphasize the qualifications this role asks for";

/// Recommendations in rule order; every rule fires independently
pub fn recommend(missing_skills: &[String], skills_score: f64, similarity: f32, overall_score: u8) -> Vec<String> {
    let mut recommendations = Vec::new();

    if !missing_skills.is_empty() {
        let listed: Vec<&str> = missing_skills
            .iter()
            .take(MISSING_SKILLS_LISTED)
            .map(|s| s.as_str())
            .collect();
        recommendations.push(format!("Consider adding these missing skills: {}", listed.join(", ")));
    }

    if skills_score < SKILLS_SCORE_THRESHOLD {
        recommendations.push(HIGHLIGHT_SKILLS_MESSAGE.to_string());
    }

    if similarity < SIMILARITY_THRESHOLD {
        recommendations.push(USE_KEYWORDS_MESSAGE.to_string());
    }

    if overall_score < OVERALL_SCORE_THRESHOLD {
        recommendations.push(RESTRUCTURE_MESSAGE.to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_rules_fire_for_strong_match() {
        assert!(recommend(&[], 100.0, 0.95, 98).is_empty());
    }

    #[test]
    fn test_all_rules_fire_in_order() {
        let result = recommend(&skills(&["aws"]), 10.0, 0.1, 20);

        assert_eq!(result.len(), 4);
        assert_eq!(result[0], "Consider adding these missing skills: aws");
        assert_eq!(result[1], HIGHLIGHT_SKILLS_MESSAGE);
        assert_eq!(result[2], USE_KEYWORDS_MESSAGE);
        assert_eq!(result[3], RESTRUCTURE_MESSAGE);
    }

    #[test]
    fn test_only_first_five_missing_skills_listed() {
        let missing = skills(&["aws", "docker", "kubernetes", "terraform", "linux", "kafka", "spark"]);
        let result = recommend(&missing, 100.0, 0.9, 90);

        assert_eq!(result, vec![
            "Consider adding these missing skills: aws, docker, kubernetes, terraform, linux".to_string()
        ]);
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert!(recommend(&[], SKILLS_SCORE_THRESHOLD, SIMILARITY_THRESHOLD, OVERALL_SCORE_THRESHOLD).is_empty());

        let result = recommend(&[], 69.99, 0.6, 60);
        assert_eq!(result, vec![HIGHLIGHT_SKILLS_MESSAGE.to_string()]);

        let result = recommend(&[], 70.0, 0.599, 60);
        assert_eq!(result, vec![USE_KEYWORDS_MESSAGE.to_string()]);

        let result = recommend(&[], 70.0, 0.6, 59);
        assert_eq!(result, vec![RESTRUCTURE_MESSAGE.to_string()]);
    }

    #[test]
    fn test_pinned_constants() {
        assert_eq!(MISSING_SKILLS_LISTED, 5);
        assert_eq!(crate::processing::skills::MISSING_SKILLS_CAP, 10);
    }
}
