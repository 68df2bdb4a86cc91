//! Skill extraction and resume/job skill reconciliation

use crate::processing::normalizer::normalize;
use crate::processing::vocabulary::SkillVocabulary;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Number of missing skills reported to callers
pub const MISSING_SKILLS_CAP: usize = 10;

/// Skills found in a document, deduplicated, in vocabulary order
pub type SkillSet = Vec<String>;

/// Scans documents for vocabulary skills
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    vocabulary: Arc<SkillVocabulary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    /// Resume skills that some job skill contains
    pub matched: Vec<String>,
    /// Job skills no resume skill contains, uncapped
    pub missing: Vec<String>,
}

impl SkillExtractor {
    pub fn new(vocabulary: Arc<SkillVocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    /// Vocabulary entries contained in the normalized text
    pub fn extract_skills(&self, text: &str) -> SkillSet {
        let normalized = normalize(text);

        let skills: SkillSet = self
            .vocabulary
            .find_in(&normalized)
            .into_iter()
            .filter_map(|index| self.vocabulary.entry(index))
            .map(str::to_string)
            .collect();

        log::debug!("Extracted {} skills from {} characters", skills.len(), text.len());
        skills
    }
}

impl SkillMatch {
    /// Missing skills as shown to callers: the first ten
    pub fn missing_capped(&self) -> Vec<String> {
        self.missing.iter().take(MISSING_SKILLS_CAP).cloned().collect()
    }
}

/// Reconcile resume skills against job skills.
///
/// A resume skill is matched when a job skill contains it, case-insensitively.
/// A job skill is missing when no resume skill contains it.
pub fn match_skills(resume_skills: &[String], job_skills: &[String]) -> SkillMatch {
    let resume_lower: Vec<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();
    let job_lower: Vec<String> = job_skills.iter().map(|s| s.to_lowercase()).collect();

    let matched = resume_skills
        .iter()
        .zip(&resume_lower)
        .filter(|(_, resume)| job_lower.iter().any(|job| job.contains(resume.as_str())))
        .map(|(skill, _)| skill.clone())
        .collect();

    let missing = job_skills
        .iter()
        .zip(&job_lower)
        .filter(|(_, job)| !resume_lower.iter().any(|resume| resume.contains(job.as_str())))
        .map(|(skill, _)| skill.clone())
        .collect();

    SkillMatch { matched, missing }
}
