//! Output formatters for console, JSON and Markdown reports

use crate::config::OutputFormat;
use crate::error::{MatcherError, Result};
use crate::output::report::AnalysisReport;
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Picks a formatter per output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".blue().bold(), title.blue().bold())
        } else {
            format!("\n{} {}\n", "▓", title)
        }
    }

    fn score_color(score: u8) -> Color {
        match score {
            80..=100 => Color::Green,
            60..=79 => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn format_score_line(&self, label: &str, score: u8) -> String {
        let value = format!("{:>3}%", score);
        format!("  {:<12} {}\n", label, self.colorize(&value, Self::score_color(score)))
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME MATCH ANALYSIS"));
        output.push_str(&format!(
            "Resume: {} | Job: {}\n",
            report.metadata.resume_file, report.metadata.job_file
        ));

        let overall = format!("{}%", result.overall_score);
        output.push_str(&format!(
            "\nOverall Score: {} ({})\n",
            self.colorize(&overall, Self::score_color(result.overall_score)),
            report.verdict()
        ));

        output.push_str(&self.format_header("Section Scores"));
        output.push_str(&self.format_score_line("Skills", result.section_scores.skills));
        output.push_str(&self.format_score_line("Experience", result.section_scores.experience));
        output.push_str(&self.format_score_line("Education", result.section_scores.education));
        output.push_str(&self.format_score_line("Keywords", result.section_scores.keywords));
        output.push_str(&format!("  Semantic similarity: {:.3}\n", result.similarity));

        output.push_str(&self.format_header("Skills"));
        if result.matched_skills.is_empty() {
            output.push_str("  Matched: none\n");
        } else {
            output.push_str(&format!(
                "  Matched: {}\n",
                self.colorize(&result.matched_skills.join(", "), Color::Green)
            ));
        }
        if !result.missing_skills.is_empty() {
            output.push_str(&format!(
                "  Missing: {}\n",
                self.colorize(&result.missing_skills.join(", "), Color::Red)
            ));
        }

        if !result.recommendations.is_empty() {
            output.push_str(&self.format_header("Recommendations"));
            for (i, recommendation) in result.recommendations.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, recommendation));
            }
        }

        output.push_str(&format!(
            "\nGenerated: {} | Model: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.embedding_model,
            report.metadata.processing_time_ms
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn file_name(path: &str) -> String {
        Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string())
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("# Resume Match Analysis\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Model:** `{}`\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.embedding_model
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                Self::file_name(&report.metadata.resume_file),
                Self::file_name(&report.metadata.job_file)
            ));
        }

        output.push_str(&format!(
            "**Overall Score:** {}% ({})\n\n",
            result.overall_score,
            report.verdict()
        ));

        output.push_str("## Section Scores\n\n");
        output.push_str("| Section | Score |\n");
        output.push_str("|---------|-------|\n");
        output.push_str(&format!("| Skills | {}% |\n", result.section_scores.skills));
        output.push_str(&format!("| Experience | {}% |\n", result.section_scores.experience));
        output.push_str(&format!("| Education | {}% |\n", result.section_scores.education));
        output.push_str(&format!("| Keywords | {}% |\n\n", result.section_scores.keywords));

        output.push_str("## Skills\n\n");
        let matched = if result.matched_skills.is_empty() {
            "none".to_string()
        } else {
            result.matched_skills.join(", ")
        };
        output.push_str(&format!("- **Matched:** {}\n", matched));
        if !result.missing_skills.is_empty() {
            output.push_str(&format!("- **Missing:** {}\n", result.missing_skills.join(", ")));
        }

        if !result.recommendations.is_empty() {
            output.push_str("\n## Recommendations\n\n");
            for (i, recommendation) in result.recommendations.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, recommendation));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content).map_err(|e| {
        MatcherError::OutputFormatting(format!("Failed to write {}: {}", file_path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::ReportMetadata;
    use crate::processing::analyzer::AnalysisResult;
    use crate::processing::scoring::RoundedSectionScores;
    use tempfile::TempDir;

    fn sample_report() -> AnalysisReport {
        let result = AnalysisResult {
            overall_score: 61,
            section_scores: RoundedSectionScores {
                skills: 67,
                experience: 60,
                education: 50,
                keywords: 67,
            },
            matched_skills: vec!["python".to_string(), "react".to_string()],
            missing_skills: vec!["aws".to_string()],
            recommendations: vec!["Consider adding these missing skills: aws".to_string()],
            similarity: 0.5,
        };

        AnalysisReport::new(result, ReportMetadata {
            resume_file: "docs/resume.txt".to_string(),
            job_file: "docs/job.txt".to_string(),
            embedding_model: "test-model".to_string(),
            generated_at: chrono::Utc::now(),
            processing_time_ms: 12,
        })
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false).format_report(&sample_report()).unwrap();

        assert!(output.contains("Overall Score: 61% (Moderate match)"));
        assert!(output.contains("Matched: python, react"));
        assert!(output.contains("Missing: aws"));
        assert!(output.contains("1. Consider adding these missing skills: aws"));
    }

    #[test]
    fn test_json_contains_result_fields() {
        let output = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["result"]["overall_score"], 61);
        assert_eq!(value["result"]["section_scores"]["skills"], 67);
        assert_eq!(value["result"]["missing_skills"][0], "aws");
        assert_eq!(value["metadata"]["embedding_model"], "test-model");
    }

    #[test]
    fn test_markdown_uses_file_names() {
        let output = MarkdownFormatter::new(true).format_report(&sample_report()).unwrap();

        assert!(output.starts_with("# Resume Match Analysis"));
        assert!(output.contains("**Resume:** `resume.txt`"));
        assert!(output.contains("| Skills | 67% |"));
        assert!(output.contains("## Recommendations"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, true, false);
        let report = sample_report();

        for format in [OutputFormat::Console, OutputFormat::Json, OutputFormat::Markdown] {
            assert!(!generator.generate_report(&report, format).unwrap().is_empty());
        }
    }

    #[test]
    fn test_save_report_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reports").join("out.md");

        save_report_to_file("# report", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# report");
    }
}
