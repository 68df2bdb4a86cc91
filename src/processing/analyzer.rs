//! Analysis pipeline: skills, embeddings, similarity, scores and recommendations

use crate::config::Config;
use crate::error::{MatcherError, Result};
use crate::processing::embedding_manager::Model2VecProvider;
use crate::processing::embeddings::{EmbeddingClient, EmbeddingProvider};
use crate::processing::normalizer::normalize;
use crate::processing::recommendations::recommend;
use crate::processing::scoring::{RoundedSectionScores, Scorer};
use crate::processing::similarity::cosine_similarity;
use crate::processing::skills::{match_skills, SkillExtractor};
use crate::processing::vocabulary::SkillVocabulary;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Outcome of matching one resume against one job description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Weighted overall score (0 to 100)
    pub overall_score: u8,
    pub section_scores: RoundedSectionScores,
    pub matched_skills: Vec<String>,
    /// First ten missing job skills, vocabulary order
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<String>,
    /// Cosine similarity of the two document embeddings
    pub similarity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnalysisStage {
    ExtractingSkills,
    MatchingSkills,
    Embedding,
    ComputingSimilarity,
    Scoring,
    Recommending,
    Complete,
}

impl AnalysisStage {
    pub fn percent(self) -> u8 {
        match self {
            AnalysisStage::ExtractingSkills => 10,
            AnalysisStage::MatchingSkills => 25,
            AnalysisStage::Embedding => 40,
            AnalysisStage::ComputingSimilarity => 70,
            AnalysisStage::Scoring => 85,
            AnalysisStage::Recommending => 95,
            AnalysisStage::Complete => 100,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AnalysisStage::ExtractingSkills => "Extracting skills",
            AnalysisStage::MatchingSkills => "Matching skills",
            AnalysisStage::Embedding => "Computing embeddings",
            AnalysisStage::ComputingSimilarity => "Comparing documents",
            AnalysisStage::Scoring => "Scoring",
            AnalysisStage::Recommending => "Generating recommendations",
            AnalysisStage::Complete => "Done",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub stage: AnalysisStage,
    pub percent: u8,
}

impl From<AnalysisStage> for ProgressEvent {
    fn from(stage: AnalysisStage) -> Self {
        Self {
            stage,
            percent: stage.percent(),
        }
    }
}

/// Receives progress events; a dropped receiver is ignored
pub type ProgressSender = mpsc::UnboundedSender<ProgressEvent>;

/// Runs the matching pipeline against an injected embedding backend
pub struct Analyzer<P: EmbeddingProvider> {
    extractor: SkillExtractor,
    embeddings: Arc<EmbeddingClient<P>>,
    scorer: Scorer,
}

impl Analyzer<Model2VecProvider> {
    /// Vocabulary, Model2Vec backend and weights from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let vocabulary = SkillVocabulary::load(config.vocabulary.path.as_deref())?;
        let provider = Model2VecProvider::from_config(&config.embedding);

        Ok(Self::new(
            Arc::new(vocabulary),
            Arc::new(EmbeddingClient::new(provider)),
            Scorer::new(config.scoring.clone()),
        ))
    }
}

impl<P: EmbeddingProvider> Analyzer<P> {
    pub fn new(vocabulary: Arc<SkillVocabulary>, embeddings: Arc<EmbeddingClient<P>>, scorer: Scorer) -> Self {
        Self {
            extractor: SkillExtractor::new(vocabulary),
            embeddings,
            scorer,
        }
    }

    pub fn extractor(&self) -> &SkillExtractor {
        &self.extractor
    }

    pub fn embeddings(&self) -> &EmbeddingClient<P> {
        &self.embeddings
    }

    pub async fn analyze(&self, resume_text: &str, job_text: &str) -> Result<AnalysisResult> {
        self.analyze_with_progress(resume_text, job_text, None).await
    }

    /// Full analysis. Any failure is returned as `AnalysisFailed` and no
    /// partial result is produced.
    pub async fn analyze_with_progress(
        &self,
        resume_text: &str,
        job_text: &str,
        progress: Option<&ProgressSender>,
    ) -> Result<AnalysisResult> {
        let start_time = Instant::now();

        match self.run(resume_text, job_text, progress).await {
            Ok(result) => {
                log::info!(
                    "Analysis completed in {:.2?}: overall score {}",
                    start_time.elapsed(),
                    result.overall_score
                );
                Ok(result)
            }
            Err(e) => {
                log::error!("Analysis failed: {}", e);
                Err(MatcherError::analysis_failed(e))
            }
        }
    }

    async fn run(&self, resume_text: &str, job_text: &str, progress: Option<&ProgressSender>) -> Result<AnalysisResult> {
        report(progress, AnalysisStage::ExtractingSkills);
        let resume_skills = self.extractor.extract_skills(resume_text);
        let job_skills = self.extractor.extract_skills(job_text);

        report(progress, AnalysisStage::MatchingSkills);
        let skill_match = match_skills(&resume_skills, &job_skills);
        log::debug!(
            "Skills: {} in resume, {} in job, {} matched, {} missing",
            resume_skills.len(),
            job_skills.len(),
            skill_match.matched.len(),
            skill_match.missing.len()
        );

        report(progress, AnalysisStage::Embedding);
        let resume_normalized = normalize(resume_text);
        let job_normalized = normalize(job_text);
        let (resume_embedding, job_embedding) = tokio::try_join!(
            self.embeddings.embed(&resume_normalized),
            self.embeddings.embed(&job_normalized),
        )?;

        report(progress, AnalysisStage::ComputingSimilarity);
        let similarity = cosine_similarity(&resume_embedding, &job_embedding)?;

        report(progress, AnalysisStage::Scoring);
        let sections = self
            .scorer
            .section_scores(job_skills.len(), skill_match.matched.len(), similarity);
        let overall_score = self.scorer.overall_score(&sections);

        report(progress, AnalysisStage::Recommending);
        let missing_skills = skill_match.missing_capped();
        let recommendations = recommend(&missing_skills, sections.skills, similarity, overall_score);

        let result = AnalysisResult {
            overall_score,
            section_scores: sections.rounded(),
            matched_skills: skill_match.matched,
            missing_skills,
            recommendations,
            similarity,
        };

        report(progress, AnalysisStage::Complete);
        Ok(result)
    }
}

fn report(progress: Option<&ProgressSender>, stage: AnalysisStage) {
    if let Some(sender) = progress {
        // receiver may be gone; progress is best effort
        let _ = sender.send(ProgressEvent::from(stage));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::embeddings::{EmbeddingModel, InferenceOptions};

    /// Embeds text as the count of a few marker words
    struct MarkerModel;

    impl EmbeddingModel for MarkerModel {
        fn infer(&self, text: &str, _options: InferenceOptions) -> anyhow::Result<Vec<f32>> {
            let count = |word: &str| text.split(' ').filter(|w| *w == word).count() as f32;
            Ok(vec![count("python"), count("react"), count("aws"), 1.0])
        }
    }

    struct MarkerProvider {
        available: bool,
    }

    impl EmbeddingProvider for MarkerProvider {
        type Model = MarkerModel;

        async fn load(&self) -> anyhow::Result<MarkerModel> {
            if self.available {
                Ok(MarkerModel)
            } else {
                anyhow::bail!("offline")
            }
        }

        fn name(&self) -> &str {
            "marker"
        }
    }

    fn analyzer(available: bool) -> Analyzer<MarkerProvider> {
        Analyzer::new(
            Arc::new(SkillVocabulary::builtin()),
            Arc::new(EmbeddingClient::new(MarkerProvider { available })),
            Scorer::default(),
        )
    }

    #[test]
    fn test_stage_percentages_increase() {
        let stages = [
            AnalysisStage::ExtractingSkills,
            AnalysisStage::MatchingSkills,
            AnalysisStage::Embedding,
            AnalysisStage::ComputingSimilarity,
            AnalysisStage::Scoring,
            AnalysisStage::Recommending,
            AnalysisStage::Complete,
        ];
        for pair in stages.windows(2) {
            assert!(pair[0].percent() < pair[1].percent());
        }
        assert_eq!(AnalysisStage::Complete.percent(), 100);
    }

    #[tokio::test]
    async fn test_analyze_reports_progress_in_order() {
        let analyzer = analyzer(true);
        let (tx, mut rx) = mpsc::unbounded_channel();

        analyzer
            .analyze_with_progress("python developer", "python role", Some(&tx))
            .await
            .unwrap();
        drop(tx);

        let mut percents = Vec::new();
        while let Some(event) = rx.recv().await {
            percents.push(event.percent);
        }
        assert_eq!(percents, vec![10, 25, 40, 70, 85, 95, 100]);
    }

    #[tokio::test]
    async fn test_dropped_progress_receiver_is_ignored() {
        let analyzer = analyzer(true);
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        assert!(analyzer
            .analyze_with_progress("python developer", "python role", Some(&tx))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_unavailable_backend_fails_whole_analysis() {
        let analyzer = analyzer(false);

        let err = analyzer.analyze("python developer", "python role").await.unwrap_err();
        assert!(matches!(err, MatcherError::AnalysisFailed(_)));
        assert!(matches!(err.root_cause(), MatcherError::EmbeddingUnavailable(_)));
    }

    #[tokio::test]
    async fn test_scenario_a_scores() {
        let analyzer = analyzer(true);
        let result = analyzer
            .analyze(
                "Experienced Python and React developer",
                "Looking for Python, React, and AWS experience",
            )
            .await
            .unwrap();

        assert_eq!(result.matched_skills, vec!["python", "react"]);
        assert_eq!(result.missing_skills, vec!["aws"]);
        assert_eq!(result.section_scores.skills, 67);
        assert_eq!(result.section_scores.keywords, 67);
        assert!(result.recommendations[0].contains("aws"));
    }
}
