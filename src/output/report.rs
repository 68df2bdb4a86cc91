//! Report wrapper around an analysis result

use crate::processing::analyzer::AnalysisResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub resume_file: String,
    pub job_file: String,
    pub embedding_model: String,
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
}

impl AnalysisReport {
    pub fn new(result: AnalysisResult, metadata: ReportMetadata) -> Self {
        Self { result, metadata }
    }

    /// Short label for the overall score
    pub fn verdict(&self) -> &'static str {
        match self.result.overall_score {
            85..=100 => "Excellent match",
            70..=84 => "Strong match",
            60..=69 => "Moderate match",
            40..=59 => "Weak match",
            _ => "Poor match",
        }
    }
}
