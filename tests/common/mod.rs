//! Deterministic embedding backends for integration tests

#![allow(dead_code)]

use resume_matcher::config::ScoringConfig;
use resume_matcher::processing::analyzer::Analyzer;
use resume_matcher::processing::embeddings::{
    EmbeddingClient, EmbeddingModel, EmbeddingProvider, InferenceOptions,
};
use resume_matcher::processing::scoring::Scorer;
use resume_matcher::processing::vocabulary::SkillVocabulary;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const DIMENSIONS: usize = 64;

/// Hashed bag of words
pub struct BagOfWordsModel;

impl EmbeddingModel for BagOfWordsModel {
    fn infer(&self, text: &str, _options: InferenceOptions) -> anyhow::Result<Vec<f32>> {
        let mut embedding = vec![0.0f32; DIMENSIONS];
        for word in text.split_whitespace() {
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            embedding[(hasher.finish() as usize) % DIMENSIONS] += 1.0;
        }
        Ok(embedding)
    }
}

/// Loads a `BagOfWordsModel` after `delay`, counting attempts
pub struct BagOfWordsProvider {
    pub loads: Arc<AtomicUsize>,
    pub delay: Duration,
}

impl BagOfWordsProvider {
    pub fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            loads: Arc::new(AtomicUsize::new(0)),
            delay,
        }
    }
}

impl EmbeddingProvider for BagOfWordsProvider {
    type Model = BagOfWordsModel;

    async fn load(&self) -> anyhow::Result<BagOfWordsModel> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(BagOfWordsModel)
    }

    fn name(&self) -> &str {
        "bag-of-words"
    }
}

/// Never produces a model
pub struct OfflineProvider;

impl EmbeddingProvider for OfflineProvider {
    type Model = BagOfWordsModel;

    async fn load(&self) -> anyhow::Result<BagOfWordsModel> {
        anyhow::bail!("network unreachable")
    }

    fn name(&self) -> &str {
        "offline"
    }
}

pub fn analyzer_with<P: EmbeddingProvider>(vocabulary: SkillVocabulary, provider: P) -> Analyzer<P> {
    Analyzer::new(
        Arc::new(vocabulary),
        Arc::new(EmbeddingClient::new(provider)),
        Scorer::new(ScoringConfig::default()),
    )
}

pub fn default_analyzer() -> Analyzer<BagOfWordsProvider> {
    analyzer_with(SkillVocabulary::builtin(), BagOfWordsProvider::new())
}
