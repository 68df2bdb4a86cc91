//! Curated skill vocabulary and its substring automaton

use crate::error::{MatcherError, Result};
use crate::processing::normalizer::normalize;
use aho_corasick::AhoCorasick;
use std::collections::HashSet;
use std::path::Path;

/// Ordered, duplicate-free list of recognized skill phrases.
///
/// Each entry is matched through its normalized form, so `node.js` is found in
/// text that normalizes to `node js`. Lookups report the original phrase.
pub struct SkillVocabulary {
    entries: Vec<String>,
    patterns: Vec<String>,
    matcher: Option<AhoCorasick>,
}

impl std::fmt::Debug for SkillVocabulary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillVocabulary")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl SkillVocabulary {
    /// Build from phrases, rejecting blanks and duplicates
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept = Vec::new();
        let mut patterns = Vec::new();
        let mut seen = HashSet::new();

        for entry in entries {
            let entry = entry.as_ref().trim();
            let pattern = normalize(entry);

            if pattern.is_empty() {
                return Err(MatcherError::Vocabulary(format!(
                    "Skill '{}' has no letters or digits", entry
                )));
            }

            if !seen.insert(pattern.clone()) {
                return Err(MatcherError::Vocabulary(format!(
                    "Duplicate skill in vocabulary: '{}'", entry
                )));
            }

            kept.push(entry.to_string());
            patterns.push(pattern);
        }

        let matcher = if patterns.is_empty() {
            None
        } else {
            let automaton = AhoCorasick::new(&patterns)
                .map_err(|e| MatcherError::Vocabulary(format!("Failed to build skill matcher: {}", e)))?;
            Some(automaton)
        };

        Ok(Self {
            entries: kept,
            patterns,
            matcher,
        })
    }

    /// Parse a vocabulary file: one skill per line, `#` starts a comment
    pub fn parse(content: &str) -> Result<Self> {
        let lines = content
            .lines()
            .map(|line| line.split('#').next().unwrap_or("").trim())
            .filter(|line| !line.is_empty());

        Self::from_entries(lines)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MatcherError::Vocabulary(format!("Failed to read vocabulary {}: {}", path.display(), e))
        })?;

        let vocabulary = Self::parse(&content)?;
        log::info!("Loaded {} skills from {}", vocabulary.len(), path.display());
        Ok(vocabulary)
    }

    /// Built-in list when given no path
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn builtin() -> Self {
        Self::from_entries(DEFAULT_SKILLS).expect("built-in vocabulary is valid")
    }

    /// Indices of every entry whose pattern occurs in already-normalized text,
    /// ascending (vocabulary order)
    pub fn find_in(&self, normalized: &str) -> Vec<usize> {
        let Some(matcher) = &self.matcher else {
            return Vec::new();
        };

        let mut present = vec![false; self.entries.len()];
        for mat in matcher.find_overlapping_iter(normalized) {
            present[mat.pattern().as_usize()] = true;
        }

        present
            .iter()
            .enumerate()
            .filter_map(|(index, found)| found.then_some(index))
            .collect()
    }

    pub fn entry(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|s| s.as_str())
    }

    /// Vocabulary position of a phrase, compared by normalized form
    pub fn position(&self, skill: &str) -> Option<usize> {
        let pattern = normalize(skill);
        self.patterns.iter().position(|p| *p == pattern)
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.position(skill).is_some()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

const DEFAULT_SKILLS: &[&str] = &[
    // Programming languages
    "python", "javascript", "typescript", "java", "rust", "golang", "ruby", "php",
    "swift", "kotlin", "scala", "perl", "haskell", "elixir", "matlab",

    // Frameworks and libraries
    "react", "angular", "vue", "svelte", "node.js", "next.js", "express", "django",
    "flask", "fastapi", "spring boot", "rails", "laravel", "tensorflow", "pytorch",
    "pandas", "numpy", "graphql", "rest api", "html", "css",

    // Databases
    "sql", "postgresql", "mysql", "mongodb", "redis", "elasticsearch", "sqlite",
    "cassandra", "dynamodb",

    // Cloud and platforms
    "aws", "azure", "gcp", "google cloud", "docker", "kubernetes", "terraform",
    "linux", "git", "jenkins", "ci/cd", "kafka", "spark", "hadoop", "airflow",

    // Practices
    "machine learning", "deep learning", "data analysis", "microservices", "devops",
    "agile", "scrum",

    // Soft skills
    "leadership", "communication", "teamwork", "problem solving", "project management",
    "mentoring", "collaboration",
];
