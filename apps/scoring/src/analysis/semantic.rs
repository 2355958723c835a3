//! Semantic scorer: cosine similarity between sentence embeddings.
//!
//! The embedding backend is a trait object handed to [`SemanticScorer`] at
//! startup. `FastEmbedder` is the production backend; tests inject a
//! deterministic one.

use std::path::Path;
use std::sync::{Arc, Mutex};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::{error, info};

use crate::errors::ScoringError;

/// Maps one text to a fixed-length vector.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, ScoringError>;

    /// Backend label, used in logs.
    fn name(&self) -> &str;
}

// ────────────────────────────────────────────────────────────────────────────
// FastEmbedder (ONNX sentence-transformers via fastembed)
// ────────────────────────────────────────────────────────────────────────────

pub struct FastEmbedder {
    model_code: String,
    // TextEmbedding::embed needs &mut self
    inner: Mutex<TextEmbedding>,
}

impl FastEmbedder {
    /// Loads `model_name`, downloading it into `cache_dir` on first use.
    pub fn try_new(model_name: &str, cache_dir: Option<&Path>) -> Result<Self, ScoringError> {
        let (model, model_code) = resolve_model(model_name)?;

        let mut options = InitOptions::new(model).with_show_download_progress(false);
        if let Some(dir) = cache_dir {
            options = options.with_cache_dir(dir.to_path_buf());
        }

        let embedding = TextEmbedding::try_new(options)
            .map_err(|e| ScoringError::ModelUnavailable(format!("{model_code}: {e:?}")))?;

        Ok(Self {
            model_code,
            inner: Mutex::new(embedding),
        })
    }
}

impl Embedder for FastEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, ScoringError> {
        let mut model = self
            .inner
            .lock()
            .map_err(|_| ScoringError::ModelUnavailable("embedding model lock poisoned".into()))?;

        model
            .embed(vec![text.to_string()], None)
            .map_err(|e| ScoringError::ModelUnavailable(format!("Failed to embed text: {e:?}")))?
            .into_iter()
            .next()
            .ok_or_else(|| ScoringError::ModelUnavailable("model returned no embedding".into()))
    }

    fn name(&self) -> &str {
        &self.model_code
    }
}

/// Accepts either fastembed's model code (`Qdrant/all-MiniLM-L6-v2-onnx`) or the
/// Hugging Face name (`sentence-transformers/all-MiniLM-L6-v2`).
fn resolve_model(model_name: &str) -> Result<(EmbeddingModel, String), ScoringError> {
    let wanted = model_key(model_name);
    if wanted.is_empty() {
        return Err(ScoringError::ModelUnavailable("empty model name".into()));
    }

    TextEmbedding::list_supported_models()
        .into_iter()
        .find(|info| {
            info.model_code.eq_ignore_ascii_case(model_name.trim())
                || model_key(&info.model_code) == wanted
        })
        .map(|info| (info.model, info.model_code))
        .ok_or_else(|| ScoringError::ModelUnavailable(format!("unknown model '{model_name}'")))
}

/// `Org/All-MiniLM-L6-v2-onnx` -> `all-minilm-l6-v2`
fn model_key(name: &str) -> String {
    let base = name.trim().rsplit('/').next().unwrap_or_default();
    let base = base.to_lowercase();
    base.strip_suffix("-onnx").unwrap_or(base.as_str()).to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// SemanticScorer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
enum Backend {
    Ready(Arc<dyn Embedder>),
    /// Initialization failed; every call reports this reason.
    Unavailable(String),
}

/// Cosine similarity over an injected embedder.
#[derive(Clone)]
pub struct SemanticScorer {
    backend: Backend,
}

impl SemanticScorer {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            backend: Backend::Ready(embedder),
        }
    }

    /// A scorer whose model never loaded. It stays degraded for its lifetime.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            backend: Backend::Unavailable(reason.into()),
        }
    }

    /// Loads the fastembed backend once. A load failure is logged and produces
    /// a degraded scorer instead of an error.
    pub fn load(model_name: &str, cache_dir: Option<&Path>) -> Self {
        match FastEmbedder::try_new(model_name, cache_dir) {
            Ok(embedder) => {
                info!("Embedding model loaded: {}", embedder.name());
                Self::new(Arc::new(embedder))
            }
            Err(e) => {
                error!("Embedding model '{model_name}' failed to load, semantic scores will be 0: {e}");
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.backend, Backend::Ready(_))
    }

    /// Cosine similarity in [-1, 1] between the embeddings of `left` and
    /// `right`. Empty input is reported before the model is consulted.
    pub fn similarity(&self, left: &str, right: &str) -> Result<f32, ScoringError> {
        if left.trim().is_empty() || right.trim().is_empty() {
            return Err(ScoringError::EmptyInput(
                "semantic similarity needs two non-empty texts".into(),
            ));
        }

        let embedder = match &self.backend {
            Backend::Ready(embedder) => embedder,
            Backend::Unavailable(reason) => {
                return Err(ScoringError::ModelUnavailable(reason.clone()))
            }
        };

        let left = normalize_embedding(&embedder.embed(left)?);
        let right = normalize_embedding(&embedder.embed(right)?);
        Ok(cosine_similarity(&left, &right))
    }
}

/// Normalize a vector to unit length.
///
/// Returns the original vector when the norm is zero.
pub fn normalize_embedding(vec: &[f32]) -> Vec<f32> {
    let norm = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm == 0.0 {
        vec.to_vec()
    } else {
        vec.iter().map(|x| x / norm).collect()
    }
}

/// Cosine similarity clamped to [-1, 1]. Zero-norm or mismatched vectors give 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}
