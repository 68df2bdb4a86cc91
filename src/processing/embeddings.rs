//! Embedding client with a lazily loaded, shared backend

use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// How token vectors are combined into one document vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pooling {
    Mean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceOptions {
    pub pooling: Pooling,
    pub normalize: bool,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            pooling: Pooling::Mean,
            normalize: true,
        }
    }
}

/// A loaded embedding model
pub trait EmbeddingModel: Send + Sync + 'static {
    /// Embed one text. Must be deterministic and keep a fixed dimension.
    fn infer(&self, text: &str, options: InferenceOptions) -> anyhow::Result<Vec<f32>>;
}

/// Source of embedding models. Loading may be slow and network-bound.
pub trait EmbeddingProvider: Send + Sync + 'static {
    type Model: EmbeddingModel;

    fn load(&self) -> impl Future<Output = anyhow::Result<Self::Model>> + Send;

    fn name(&self) -> &str;
}

/// Observable lifecycle of the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendState {
    Uninitialized,
    Loading,
    Ready,
}

enum Backend<M> {
    Uninitialized,
    Loading,
    Ready(Arc<M>),
}

impl<M> Backend<M> {
    fn state(&self) -> BackendState {
        match self {
            Backend::Uninitialized => BackendState::Uninitialized,
            Backend::Loading => BackendState::Loading,
            Backend::Ready(_) => BackendState::Ready,
        }
    }
}

/// Converts normalized text into vectors.
///
/// The backend moves `Uninitialized -> Loading -> Ready`, or back to
/// `Uninitialized` when a load fails so a later call can retry. Only one load
/// runs at a time; callers arriving during a load wait for it and share its
/// outcome instead of starting another.
pub struct EmbeddingClient<P: EmbeddingProvider> {
    provider: P,
    backend: Mutex<Backend<P::Model>>,
    load_lock: tokio::sync::Mutex<()>,
    failed_loads: AtomicU64,
    last_error: Mutex<Option<String>>,
    options: InferenceOptions,
}

impl<P: EmbeddingProvider> EmbeddingClient<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            backend: Mutex::new(Backend::Uninitialized),
            load_lock: tokio::sync::Mutex::new(()),
            failed_loads: AtomicU64::new(0),
            last_error: Mutex::new(None),
            options: InferenceOptions::default(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn state(&self) -> BackendState {
        self.backend().state()
    }

    pub fn is_ready(&self) -> bool {
        self.state() == BackendState::Ready
    }

    /// Bring the backend up if needed. Load failures are logged, not returned;
    /// the resulting state tells the caller whether a model is available.
    pub async fn initialize(&self) -> BackendState {
        if self.ready_model().is_some() {
            return BackendState::Ready;
        }

        let failures_seen = self.failed_loads.load(Ordering::Acquire);
        let _guard = self.load_lock.lock().await;

        if self.ready_model().is_some() {
            return BackendState::Ready;
        }

        if self.failed_loads.load(Ordering::Acquire) != failures_seen {
            // the in-flight load this call waited on failed
            return self.state();
        }

        *self.backend() = Backend::Loading;
        log::info!("Loading embedding backend: {}", self.provider.name());
        let start_time = Instant::now();

        match self.provider.load().await {
            Ok(model) => {
                *self.backend() = Backend::Ready(Arc::new(model));
                *self.last_error() = None;
                log::info!("Embedding backend ready in {:.2?}", start_time.elapsed());
            }
            Err(e) => {
                *self.backend() = Backend::Uninitialized;
                *self.last_error() = Some(format!("{:#}", e));
                self.failed_loads.fetch_add(1, Ordering::AcqRel);
                log::warn!("Failed to load embedding backend {}: {:#}", self.provider.name(), e);
            }
        }

        self.state()
    }

    /// Embed already-normalized text, loading the backend on first use
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.initialize().await;

        let model = self.ready_model().ok_or_else(|| {
            let reason = self
                .last_error()
                .clone()
                .unwrap_or_else(|| "backend is not ready".to_string());
            MatcherError::EmbeddingUnavailable(format!("{}: {}", self.provider.name(), reason))
        })?;

        let text = text.to_string();
        let options = self.options;
        let outcome = tokio::task::spawn_blocking(move || model.infer(&text, options)).await;

        match outcome {
            Ok(Ok(embedding)) => Ok(embedding),
            Ok(Err(e)) => {
                log::error!("Embedding inference failed: {:#}", e);
                Err(MatcherError::EmbeddingCompute(format!("{:#}", e)))
            }
            Err(e) => {
                log::error!("Embedding inference task aborted: {}", e);
                Err(MatcherError::EmbeddingCompute(format!("inference task aborted: {}", e)))
            }
        }
    }

    /// Failed load attempts so far
    pub fn failed_loads(&self) -> u64 {
        self.failed_loads.load(Ordering::Acquire)
    }

    fn ready_model(&self) -> Option<Arc<P::Model>> {
        match &*self.backend() {
            Backend::Ready(model) => Some(Arc::clone(model)),
            _ => None,
        }
    }

    fn backend(&self) -> MutexGuard<'_, Backend<P::Model>> {
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn last_error(&self) -> MutexGuard<'_, Option<String>> {
        self.last_error.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
