//! cvsift Infer — word vectors, named-entity recognition, tokenization.
//!
//! Provides the `EmbedderBackend` and `EntityRecognizer` traits. When the
//! `onnx` feature is enabled and model files are present, ONNX models back
//! both; otherwise the deterministic `SubwordEmbedder` and `RuleRecognizer`
//! are used so extraction always works offline.

pub mod cache;
pub mod embedder;
pub mod ner;
pub mod onnx_embedder;
pub mod onnx_ner;
pub mod onnx_session;
pub mod rules;
pub mod tokenize;

pub use cache::{CachedEmbedder, VectorCache, DEFAULT_CACHE_SIZE};
pub use embedder::{cosine_similarity, EmbedderBackend, EmbeddingResult, SubwordEmbedder};
pub use ner::{Entity, EntityLabel, EntityRecognizer};
pub use rules::RuleRecognizer;
pub use tokenize::{tokenize, words, Token};

#[cfg(feature = "onnx")]
pub use onnx_embedder::OnnxEmbedder;
#[cfg(feature = "onnx")]
pub use onnx_ner::OnnxRecognizer;

use std::path::Path;
use std::sync::Arc;

use cvsift_core::Lexicon;

/// Create the best available embedder, wrapped in a vector cache.
///
/// Tries ONNX first (if the feature is enabled and a model directory is
/// configured), falls back to `SubwordEmbedder`.
pub fn create_embedder(model_dir: Option<&Path>) -> Arc<dyn EmbedderBackend> {
    let backend: Arc<dyn EmbedderBackend> = load_onnx_embedder(model_dir)
        .unwrap_or_else(|| Arc::new(SubwordEmbedder::default()) as Arc<dyn EmbedderBackend>);
    tracing::info!(
        "Using {} embedder (dim={})",
        backend.name(),
        backend.dimension()
    );
    Arc::new(CachedEmbedder::new(backend, DEFAULT_CACHE_SIZE))
}

/// Create the best available entity recognizer.
///
/// Tries an ONNX token-classification model first, falls back to `RuleRecognizer`.
pub fn create_recognizer(model_dir: Option<&Path>, lexicon: &Lexicon) -> Arc<dyn EntityRecognizer> {
    let recognizer = load_onnx_recognizer(model_dir)
        .unwrap_or_else(|| Arc::new(RuleRecognizer::new(lexicon)) as Arc<dyn EntityRecognizer>);
    tracing::info!("Using {} entity recognizer", recognizer.name());
    recognizer
}

#[cfg(feature = "onnx")]
fn load_onnx_embedder(model_dir: Option<&Path>) -> Option<Arc<dyn EmbedderBackend>> {
    let dir = model_dir?;
    match OnnxEmbedder::load(dir) {
        Ok(embedder) => Some(Arc::new(embedder)),
        Err(e) => {
            tracing::warn!("ONNX embedder unavailable: {}. Falling back to subword vectors.", e);
            None
        }
    }
}

#[cfg(not(feature = "onnx"))]
fn load_onnx_embedder(model_dir: Option<&Path>) -> Option<Arc<dyn EmbedderBackend>> {
    if let Some(dir) = model_dir {
        tracing::warn!(
            "Embedding model {} ignored: built without the onnx feature",
            dir.display()
        );
    }
    None
}

#[cfg(feature = "onnx")]
fn load_onnx_recognizer(model_dir: Option<&Path>) -> Option<Arc<dyn EntityRecognizer>> {
    let dir = model_dir?;
    match OnnxRecognizer::load(dir) {
        Ok(recognizer) => Some(Arc::new(recognizer)),
        Err(e) => {
            tracing::warn!("ONNX recognizer unavailable: {}. Falling back to rules.", e);
            None
        }
    }
}

#[cfg(not(feature = "onnx"))]
fn load_onnx_recognizer(model_dir: Option<&Path>) -> Option<Arc<dyn EntityRecognizer>> {
    if let Some(dir) = model_dir {
        tracing::warn!("NER model {} ignored: built without the onnx feature", dir.display());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_backends_without_models() {
        let embedder = create_embedder(None);
        assert_eq!(embedder.name(), "subword");
        assert!(embedder.embed("python").is_some());

        let recognizer = create_recognizer(Some(Path::new("/nonexistent/ner")), &Lexicon::default());
        assert_eq!(recognizer.name(), "rules");
    }
}
