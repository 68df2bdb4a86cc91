//! Section and overall compatibility scores

use crate::config::ScoringConfig;
use serde::{Deserialize, Serialize};

/// Unrounded section scores, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionScores {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub keywords: f64,
}

/// Section scores rounded for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundedSectionScores {
    pub skills: u8,
    pub experience: u8,
    pub education: u8,
    pub keywords: u8,
}

#[derive(Debug, Clone)]
pub struct Scorer {
    weights: ScoringConfig,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl Scorer {
    pub fn new(weights: ScoringConfig) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringConfig {
        &self.weights
    }

    /// Section scores from the skill match and the semantic similarity
    pub fn section_scores(&self, job_skill_count: usize, matched_count: usize, similarity: f32) -> SectionScores {
        let similarity = f64::from(similarity);

        let skills = if job_skill_count == 0 {
            100.0
        } else {
            // containment can match more resume skills than there are job skills
            (100.0 * matched_count as f64 / job_skill_count as f64).min(100.0)
        };

        let experience = (100.0 * self.weights.experience_boost * similarity).clamp(0.0, 100.0);
        let education = (100.0 * similarity).clamp(0.0, 100.0);

        SectionScores {
            skills,
            experience,
            education,
            keywords: skills,
        }
    }

    /// Weighted sum of the unrounded sections, rounded once
    pub fn overall_score(&self, sections: &SectionScores) -> u8 {
        let w = &self.weights;
        let weighted = w.skills_weight * sections.skills
            + w.experience_weight * sections.experience
            + w.education_weight * sections.education
            + w.keywords_weight * sections.keywords;

        round_score(weighted)
    }
}

impl SectionScores {
    pub fn rounded(&self) -> RoundedSectionScores {
        RoundedSectionScores {
            skills: round_score(self.skills),
            experience: round_score(self.experience),
            education: round_score(self.education),
            keywords: round_score(self.keywords),
        }
    }
}

fn round_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_ratio() {
        let sections = Scorer::default().section_scores(3, 2, 0.5);
        assert!((sections.skills - 66.666_666).abs() < 1e-3);
        assert_eq!(sections.keywords, sections.skills);
        assert_eq!(sections.rounded().skills, 67);
    }

    #[test]
    fn test_no_job_skills_is_full_score() {
        let sections = Scorer::default().section_scores(0, 0, 0.3);
        assert_eq!(sections.skills, 100.0);
        assert_eq!(sections.keywords, 100.0);
    }

    #[test]
    fn test_experience_boost_and_clamp() {
        let scorer = Scorer::default();

        let sections = scorer.section_scores(1, 1, 0.5);
        assert!((sections.experience - 60.0).abs() < 1e-4);
        assert!((sections.education - 50.0).abs() < 1e-4);

        let sections = scorer.section_scores(1, 1, 0.9);
        assert_eq!(sections.experience, 100.0);
        assert!((sections.education - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_overall_uses_unrounded_sections() {
        let scorer = Scorer::default();
        let sections = SectionScores {
            skills: 66.4,
            experience: 66.4,
            education: 66.4,
            keywords: 66.4,
        };
        assert_eq!(scorer.overall_score(&sections), 66);

        // rounding every section first would give 67
        let sections = SectionScores {
            skills: 66.5,
            experience: 66.4,
            education: 66.4,
            keywords: 66.5,
        };
        assert_eq!(sections.rounded().skills, 67);
        assert_eq!(scorer.overall_score(&sections), 66);
    }

    #[test]
    fn test_scenario_a_overall() {
        let scorer = Scorer::default();
        let sections = scorer.section_scores(3, 2, 0.5);
        // 0.4*66.67 + 0.3*60 + 0.2*50 + 0.1*66.67 = 61.33
        assert_eq!(scorer.overall_score(&sections), 61);
    }

    #[test]
    fn test_perfect_match() {
        let scorer = Scorer::default();
        let sections = scorer.section_scores(4, 4, 1.0);
        assert_eq!(sections.rounded(), RoundedSectionScores {
            skills: 100,
            experience: 100,
            education: 100,
            keywords: 100,
        });
        assert_eq!(scorer.overall_score(&sections), 100);
    }

    #[test]
    fn test_scores_stay_in_bounds() {
        let scorer = Scorer::default();
        let similarities = [-1.0, -0.3, 0.0, 0.25, 0.59, 0.6, 0.83, 0.999_999, 1.0];

        for job in 0..6 {
            for matched in 0..8 {
                for &similarity in &similarities {
                    let sections = scorer.section_scores(job, matched, similarity);
                    for value in [sections.skills, sections.experience, sections.education, sections.keywords] {
                        assert!((0.0..=100.0).contains(&value), "{:?}", sections);
                    }
                    assert!(scorer.overall_score(&sections) <= 100);
                }
            }
        }
    }
}
