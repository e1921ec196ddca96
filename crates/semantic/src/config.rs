use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which embedder backs the semantic layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingMode {
    /// Local ONNX sentence encoder (the real model).
    #[default]
    Onnx,
    /// Deterministic hashing embedder. No model files, no network.
    Fast,
}

impl std::str::FromStr for EmbeddingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "onnx" => Ok(Self::Onnx),
            "fast" | "stub" => Ok(Self::Fast),
            other => Err(format!("unknown embedding mode '{other}'")),
        }
    }
}

/// Runtime configuration describing which model/tokenizer to use and how to post-process vectors.
///
/// Every field has a default, so a YAML/JSON document only needs to name the fields it changes.
///
/// # Example
/// ```no_run
/// use semantic::{load_embedder, EmbeddingMode, SemanticConfig};
///
/// # async fn run() -> Result<(), semantic::SemanticError> {
/// let cfg = SemanticConfig {
///     mode: EmbeddingMode::Fast,
///     ..Default::default()
/// };
/// let embedder = load_embedder(&cfg).await?;
/// let vector = embedder.embed("cozy rainy day book")?;
/// # let _ = vector;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SemanticConfig {
    /// Inference mode selector.
    pub mode: EmbeddingMode,
    /// Friendly label reported by the embedder.
    pub model_name: String,
    /// Local path where the ONNX file should live (also used as the download target when
    /// [`model_url`](Self::model_url) is provided).
    pub model_path: PathBuf,
    /// Optional HTTPS URL that will be downloaded when [`model_path`](Self::model_path) is missing.
    pub model_url: Option<String>,
    /// Path to `tokenizer.json`. When absent and [`tokenizer_url`](Self::tokenizer_url) is provided we
    /// infer the filename from the URL and place it next to the model file.
    pub tokenizer_path: Option<PathBuf>,
    /// Optional HTTPS URL for fetching the tokenizer on-demand.
    pub tokenizer_url: Option<String>,
    /// Normalize the resulting vector to unit-length.
    pub normalize: bool,
    /// Token budget per input; longer inputs are truncated.
    pub max_sequence_length: usize,
    /// Output dimension of the hashing embedder used in [`EmbeddingMode::Fast`].
    pub stub_dimension: usize,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            mode: EmbeddingMode::Onnx,
            model_name: "all-mpnet-base-v2".into(),
            model_path: PathBuf::from("./models/all-mpnet-base-v2/onnx/model.onnx"),
            model_url: Some(
                "https://huggingface.co/sentence-transformers/all-mpnet-base-v2/resolve/main/onnx/model.onnx"
                    .into(),
            ),
            tokenizer_path: Some(PathBuf::from("./models/all-mpnet-base-v2/tokenizer.json")),
            tokenizer_url: Some(
                "https://huggingface.co/sentence-transformers/all-mpnet-base-v2/resolve/main/tokenizer.json"
                    .into(),
            ),
            normalize: true,
            max_sequence_length: 384,
            stub_dimension: 768,
        }
    }
}

impl SemanticConfig {
    /// Config for the hashing embedder; handy in tests and benches.
    pub fn fast() -> Self {
        Self {
            mode: EmbeddingMode::Fast,
            model_name: "hashing-bow".into(),
            ..Self::default()
        }
    }
}
