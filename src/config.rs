//! Configuration management for the resume matcher

use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub embedding: EmbeddingConfig,
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    /// HuggingFace repo id of the Model2Vec model
    pub model: String,
    pub models_dir: PathBuf,
    pub normalize: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    pub skills_weight: f64,
    pub experience_weight: f64,
    pub education_weight: f64,
    pub keywords_weight: f64,
    /// Multiplier applied to similarity before clamping the experience score
    pub experience_boost: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VocabularyConfig {
    /// Custom vocabulary file, one skill per line. Built-in list when unset.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            skills_weight: 0.4,
            experience_weight: 0.3,
            education_weight: 0.2,
            keywords_weight: 0.1,
            experience_boost: 1.2,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-matcher")
            .join("models");

        Self {
            embedding: EmbeddingConfig {
                model: "minishlab/potion-base-8M".to_string(),
                models_dir,
                normalize: true,
            },
            scoring: ScoringConfig::default(),
            vocabulary: VocabularyConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| MatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| MatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let s = &self.scoring;
        let weights = [s.skills_weight, s.experience_weight, s.education_weight, s.keywords_weight];

        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(MatcherError::Configuration(
                "Scoring weights must be non-negative numbers".to_string(),
            ));
        }

        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(MatcherError::Configuration(format!(
                "Scoring weights must sum to 1.0, got {:.3}",
                total
            )));
        }

        if !s.experience_boost.is_finite() || s.experience_boost <= 0.0 {
            return Err(MatcherError::Configuration(
                "experience_boost must be positive".to_string(),
            ));
        }

        if self.embedding.model.trim().is_empty() {
            return Err(MatcherError::Configuration("Embedding model must be set".to_string()));
        }

        Ok(())
    }

    pub fn models_dir(&self) -> &Path {
        &self.embedding.models_dir
    }
}
