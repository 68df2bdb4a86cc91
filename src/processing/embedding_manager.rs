//! Model2Vec embedding backend: download via HuggingFace Hub, load from disk

use crate::config::EmbeddingConfig;
use crate::processing::embeddings::{EmbeddingModel, EmbeddingProvider, InferenceOptions};
use crate::processing::similarity::l2_normalize;
use anyhow::{anyhow, Context};
use hf_hub::api::tokio::Api;
use model2vec_rs::model::StaticModel;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs;

/// Files a Model2Vec model directory must contain
const REQUIRED_FILES: [&str; 3] = ["tokenizer.json", "model.safetensors", "config.json"];

/// Provides Model2Vec static embedding models
pub struct Model2VecProvider {
    repo_id: String,
    models_dir: PathBuf,
    normalize: bool,
}

pub struct Model2VecModel {
    model: StaticModel,
}

impl Model2VecProvider {
    pub fn new(repo_id: impl Into<String>, models_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_id: repo_id.into(),
            models_dir: models_dir.into(),
            normalize: true,
        }
    }

    pub fn from_config(config: &EmbeddingConfig) -> Self {
        Self {
            repo_id: config.model.clone(),
            models_dir: config.models_dir.clone(),
            normalize: config.normalize,
        }
    }

    pub fn repo_id(&self) -> &str {
        &self.repo_id
    }

    /// Local directory for the model, e.g. `minishlab--potion-base-8M`
    pub fn model_dir(&self) -> PathBuf {
        self.models_dir.join(self.repo_id.replace('/', "--"))
    }

    pub async fn is_downloaded(&self) -> bool {
        Self::is_valid_model_directory(&self.model_dir()).await
    }

    async fn is_valid_model_directory(path: &Path) -> bool {
        for file in &REQUIRED_FILES {
            if fs::metadata(path.join(file)).await.is_err() {
                return false;
            }
        }
        true
    }

    /// Fetch the model files into `model_dir` unless already present
    pub async fn ensure_downloaded(&self) -> anyhow::Result<PathBuf> {
        let model_dir = self.model_dir();

        if Self::is_valid_model_directory(&model_dir).await {
            log::debug!("Using cached embedding model at {}", model_dir.display());
            return Ok(model_dir);
        }

        log::info!("Downloading embedding model {} into {}", self.repo_id, model_dir.display());

        fs::create_dir_all(&model_dir)
            .await
            .with_context(|| format!("Failed to create model directory {}", model_dir.display()))?;

        let api = Api::new().context("Failed to initialize HF API")?;
        let repo = api.repo(hf_hub::Repo::model(self.repo_id.clone()));

        for file in &REQUIRED_FILES {
            let cached = repo
                .get(file)
                .await
                .with_context(|| format!("Failed to download required file {}", file))?;

            fs::copy(&cached, model_dir.join(file))
                .await
                .with_context(|| format!("Failed to copy {}", file))?;
            log::debug!("Downloaded {}", file);
        }

        Ok(model_dir)
    }
}

impl EmbeddingProvider for Model2VecProvider {
    type Model = Model2VecModel;

    async fn load(&self) -> anyhow::Result<Model2VecModel> {
        let model_dir = self.ensure_downloaded().await?;
        let normalize = self.normalize;
        let start_time = Instant::now();

        let model = tokio::task::spawn_blocking(move || {
            StaticModel::from_pretrained(&model_dir, None, Some(normalize), None)
        })
        .await
        .map_err(|e| anyhow!("model loading task aborted: {}", e))?
        .with_context(|| format!("Failed to load Model2Vec model {}", self.repo_id))?;

        log::info!("Model2Vec model {} loaded in {:.2?}", self.repo_id, start_time.elapsed());
        Ok(Model2VecModel { model })
    }

    fn name(&self) -> &str {
        &self.repo_id
    }
}

impl EmbeddingModel for Model2VecModel {
    fn infer(&self, text: &str, options: InferenceOptions) -> anyhow::Result<Vec<f32>> {
        // Model2Vec always mean-pools token vectors
        let mut embedding = self.model.encode_single(text);

        if embedding.is_empty() {
            return Err(anyhow!("model returned an empty embedding"));
        }

        if options.normalize {
            l2_normalize(&mut embedding);
        }

        Ok(embedding)
    }
}
