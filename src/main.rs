//! Resume matcher: score a resume against a job description

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction};
use resume_matcher::config::Config;
use resume_matcher::error::{MatcherError, Result};
use resume_matcher::input::InputManager;
use resume_matcher::output::{save_report_to_file, AnalysisReport, ReportGenerator, ReportMetadata};
use resume_matcher::processing::analyzer::{Analyzer, ProgressEvent};
use resume_matcher::processing::skills::SkillExtractor;
use resume_matcher::processing::vocabulary::SkillVocabulary;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

const SUPPORTED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "txt"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            vocabulary,
            embedding,
            output,
            save,
        } => {
            for (label, path) in [("Resume", &resume), ("Job description", &job)] {
                cli::validate_file_extension(path, &SUPPORTED_EXTENSIONS)
                    .map_err(|e| MatcherError::InvalidInput(format!("{} file: {}", label, e)))?;
            }

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(MatcherError::InvalidInput)?,
                None => config.output.format,
            };
            if vocabulary.is_some() {
                config.vocabulary.path = vocabulary;
            }
            if let Some(model) = embedding {
                config.embedding.model = model;
            }

            let start_time = Instant::now();
            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume).await?;
            let job_text = input_manager.extract_text(&job).await?;
            info!(
                "Resume: {} characters, job description: {} characters",
                resume_text.len(),
                job_text.len()
            );

            let analyzer = Analyzer::from_config(&config)?;
            let (progress_tx, progress_rx) = mpsc::unbounded_channel();
            let progress_task = tokio::spawn(drive_progress_bar(progress_rx));

            let outcome = analyzer
                .analyze_with_progress(&resume_text, &job_text, Some(&progress_tx))
                .await;
            drop(progress_tx);
            let _ = progress_task.await;
            let result = outcome?;

            let report = AnalysisReport::new(result, ReportMetadata {
                resume_file: resume.to_string_lossy().to_string(),
                job_file: job.to_string_lossy().to_string(),
                embedding_model: config.embedding.model.clone(),
                generated_at: chrono::Utc::now(),
                processing_time_ms: start_time.elapsed().as_millis() as u64,
            });

            let generator = ReportGenerator::with_options(config.output.color_output, true, true);
            let rendered = generator.generate_report(&report, output_format)?;
            println!("{}", rendered);

            if let Some(save_path) = save {
                // Saved copies never carry terminal color codes
                let plain = ReportGenerator::with_options(false, true, true)
                    .generate_report(&report, output_format)?;
                save_report_to_file(&plain, &save_path)?;
                println!("Report saved to {}", save_path.display());
            }
        }

        Commands::Skills { path, vocabulary } => {
            let vocabulary_path: Option<PathBuf> = vocabulary.or(config.vocabulary.path);
            let vocabulary = SkillVocabulary::load(vocabulary_path.as_deref())?;
            let extractor = SkillExtractor::new(Arc::new(vocabulary));

            let mut input_manager = InputManager::new();
            let text = input_manager.extract_text(&path).await?;
            let skills = extractor.extract_skills(&text);

            if skills.is_empty() {
                println!("No known skills found in {}", path.display());
            } else {
                println!("{} skills found in {}:", skills.len(), path.display());
                for skill in &skills {
                    println!("  • {}", skill);
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Configuration file: {}", config_path.display());
                println!("Embedding model: {}", config.embedding.model);
                println!("Models directory: {}", config.models_dir().display());
                println!(
                    "Vocabulary: {}",
                    config
                        .vocabulary
                        .path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "built-in".to_string())
                );
                println!("\nScoring Weights:");
                println!("  Skills: {:.1}%", config.scoring.skills_weight * 100.0);
                println!("  Experience: {:.1}%", config.scoring.experience_weight * 100.0);
                println!("  Education: {:.1}%", config.scoring.education_weight * 100.0);
                println!("  Keywords: {:.1}%", config.scoring.keywords_weight * 100.0);
                println!("  Experience boost: {:.2}", config.scoring.experience_boost);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset to defaults at {}", config_path.display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

async fn drive_progress_bar(mut events: mpsc::UnboundedReceiver<ProgressEvent>) {
    let progress = ProgressBar::new(100);
    let style = ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos:>3}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(style);

    while let Some(event) = events.recv().await {
        progress.set_position(u64::from(event.percent));
        progress.set_message(event.stage.description());
    }

    progress.finish_and_clear();
}
