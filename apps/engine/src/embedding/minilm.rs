//! ONNX MiniLM backend (all-MiniLM-L6-v2 family) behind the `model`
//! feature. The model is loaded lazily on first encode and held for the
//! lifetime of the process; concurrent first touches still produce a single
//! shared instance.

use std::sync::{Mutex, OnceLock};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::{info, warn};

use crate::embedding::Embedder;
use crate::errors::EngineError;

pub struct MiniLmEmbedder {
    model: OnceLock<Option<Mutex<TextEmbedding>>>,
}

impl MiniLmEmbedder {
    pub fn new() -> Self {
        Self {
            model: OnceLock::new(),
        }
    }

    /// At-most-once initialization. A failed load is cached as `None` so
    /// every later call degrades instead of retrying the download.
    fn model(&self) -> Option<&Mutex<TextEmbedding>> {
        self.model
            .get_or_init(|| {
                info!("loading MiniLM embedding model");
                match TextEmbedding::try_new(
                    InitOptions::new(EmbeddingModel::AllMiniLML6V2)
                        .with_show_download_progress(false),
                ) {
                    Ok(model) => {
                        info!("embedding model loaded");
                        Some(Mutex::new(model))
                    }
                    Err(e) => {
                        warn!("failed to load embedding model: {e}");
                        None
                    }
                }
            })
            .as_ref()
    }

    fn embed_all(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EngineError> {
        let model = self.model().ok_or_else(|| {
            EngineError::ModelUnavailable("MiniLM model failed to initialize".to_string())
        })?;
        let mut guard = model
            .lock()
            .map_err(|_| EngineError::Embedding("embedding model lock poisoned".to_string()))?;
        guard
            .embed(texts, None)
            .map_err(|e| EngineError::Embedding(e.to_string()))
    }
}

impl Default for MiniLmEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl Embedder for MiniLmEmbedder {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EngineError> {
        let mut batch = self.embed_all(vec![text.to_string()])?;
        batch
            .pop()
            .ok_or_else(|| EngineError::Embedding("empty embedding batch".to_string()))
    }

    fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EngineError> {
        self.embed_all(texts.to_vec())
    }
}
