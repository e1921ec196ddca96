//! Vibe Matcher text embedding layer
//!
//! Turns short English text (a product description, a user's "vibe" query) into a dense vector
//! whose cosine similarity tracks semantic closeness.
//!
//! Two backends sit behind the [`Embedder`] trait:
//!
//! - **ONNX mode** runs `all-mpnet-base-v2` locally. The model and tokenizer are fetched once when
//!   missing, loaded once, and then served from a dedicated worker thread.
//! - **Fast mode** is a deterministic hashing bag-of-words embedder. No model files, no network.
//!   Tests and benches use it.
//!
//! There is no silent fallback: if ONNX mode is requested and the model cannot be loaded,
//! [`load_embedder`] returns the error and the caller decides what to do.
//!
//! ## Quick example
//!
//! ```no_run
//! use semantic::{load_embedder, SemanticConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), semantic::SemanticError> {
//!     let embedder = load_embedder(&SemanticConfig::default()).await?;
//!     let vector = embedder.embed("energetic urban chic")?;
//!     println!("dim = {}", vector.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;

mod assets;
mod cache;
mod normalize;
mod onnx;
mod stub;

use std::sync::Arc;

use tracing::info;

pub use crate::config::{EmbeddingMode, SemanticConfig};
pub use crate::error::SemanticError;
pub use crate::onnx::OnnxEmbedder;
pub use crate::stub::HashingEmbedder;

/// Anything that can turn text into fixed-width vectors.
///
/// Implementations must return one vector per input, in input order, all of the same width.
pub trait Embedder: Send + Sync {
    /// Label of the model behind this embedder, for logs and health output.
    fn model_name(&self) -> &str;

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, SemanticError>;

    fn embed(&self, text: &str) -> Result<Vec<f32>, SemanticError> {
        self.embed_batch(&[text])?
            .pop()
            .ok_or_else(|| SemanticError::Inference("embedder returned no vector".into()))
    }
}

/// Build the embedder described by `cfg`.
///
/// In ONNX mode this resolves (and if needed downloads) the model assets, then starts the
/// inference worker on a blocking thread. Calling it twice loads the model twice, so callers keep
/// the returned handle around.
pub async fn load_embedder(cfg: &SemanticConfig) -> Result<Arc<dyn Embedder>, SemanticError> {
    match cfg.mode {
        EmbeddingMode::Fast => {
            let embedder = HashingEmbedder::new(cfg)?;
            info!(
                model = embedder.model_name(),
                dim = embedder.dimension(),
                "hashing embedder ready"
            );
            Ok(Arc::new(embedder))
        }
        EmbeddingMode::Onnx => {
            let assets = assets::resolve_model_assets(cfg).await?;
            let worker_cfg = cfg.clone();
            let embedder =
                tokio::task::spawn_blocking(move || OnnxEmbedder::spawn(assets, &worker_cfg))
                    .await
                    .map_err(|e| SemanticError::Inference(e.to_string()))??;
            info!(model = embedder.model_name(), "onnx embedder ready");
            Ok(Arc::new(embedder))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn fast_mode_loads_hashing_embedder() {
        let embedder = load_embedder(&SemanticConfig::fast()).await.unwrap();
        assert_eq!(embedder.model_name(), "hashing-bow");
        assert_eq!(embedder.embed("big cat").unwrap().len(), 768);
    }

    #[tokio::test]
    async fn fast_mode_is_deterministic() {
        let embedder = load_embedder(&SemanticConfig::fast()).await.unwrap();
        let a = embedder.embed("big cat").unwrap();
        let b = embedder.embed("big cat").unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn fast_mode_respects_normalize_flag() {
        let cfg = SemanticConfig {
            normalize: false,
            ..SemanticConfig::fast()
        };
        let embedder = load_embedder(&cfg).await.unwrap();
        let v = embedder.embed("cat cat cat").unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 3.0).abs() < 1e-5, "norm={norm}");
    }

    #[tokio::test]
    async fn empty_batch_is_empty() {
        let embedder = load_embedder(&SemanticConfig::fast()).await.unwrap();
        assert!(embedder.embed_batch(&[]).unwrap().is_empty());
    }

    #[tokio::test]
    async fn onnx_mode_without_assets_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = SemanticConfig {
            model_path: dir.path().join("model.onnx"),
            model_url: None,
            tokenizer_path: Some(dir.path().join("tokenizer.json")),
            tokenizer_url: None,
            ..SemanticConfig::default()
        };
        let err = load_embedder(&cfg).await.err().unwrap();
        assert!(matches!(err, SemanticError::ModelNotFound(_)));
    }

    #[tokio::test]
    #[ignore = "requires local ONNX + tokenizer assets under models/"]
    async fn real_model_inference() {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let workspace_root = manifest_dir
            .parent()
            .and_then(|p| p.parent())
            .expect("workspace root");
        let model_dir = workspace_root.join("models").join("all-mpnet-base-v2");

        let cfg = SemanticConfig {
            model_path: model_dir.join("onnx").join("model.onnx"),
            tokenizer_path: Some(model_dir.join("tokenizer.json")),
            ..SemanticConfig::default()
        };

        let embedder = load_embedder(&cfg)
            .await
            .expect("inference should start with real model");
        let vectors = embedder
            .embed_batch(&["hello world", "a cozy knit cardigan for rainy days"])
            .unwrap();
        assert_eq!(vectors.len(), 2);
        for v in &vectors {
            assert_eq!(v.len(), 768);
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            assert!((norm - 1.0).abs() < 1e-3);
        }
    }
}
