use std::{env, path::PathBuf};

use semantic::{load_embedder, SemanticConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let text = env::args()
        .nth(1)
        .unwrap_or_else(|| "energetic urban chic".into());

    let mut cfg = SemanticConfig::default();
    match locate_model_assets() {
        Some((model_path, tokenizer_path)) => {
            cfg.model_path = model_path;
            cfg.tokenizer_path = Some(tokenizer_path);
            println!("Running ONNX model at {}", cfg.model_path.display());
        }
        None => {
            cfg = SemanticConfig::fast();
            println!("ONNX assets not found, using the hashing embedder");
        }
    }

    let embedder = load_embedder(&cfg).await?;
    let vector = embedder.embed(&text)?;
    println!("model: {}", embedder.model_name());
    println!("dim: {}", vector.len());
    println!("first values: {:?}", &vector[..vector.len().min(8)]);

    Ok(())
}

fn locate_model_assets() -> Option<(PathBuf, PathBuf)> {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir.parent()?.parent()?;

    let model_dir = workspace_root.join("models").join("all-mpnet-base-v2");
    let model_path = model_dir.join("onnx").join("model.onnx");
    let tokenizer_path = model_dir.join("tokenizer.json");

    if model_path.exists() && tokenizer_path.exists() {
        Some((model_path, tokenizer_path))
    } else {
        None
    }
}
