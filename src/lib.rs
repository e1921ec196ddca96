//! Vibe Matcher
//!
//! Type a "vibe" (a mood, a place, a style) and get the closest items from a small product
//! catalog, ranked by cosine similarity between sentence embeddings.
//!
//! This crate wires the pieces together:
//!
//! - [`config`]: the YAML application config with `VIBEMATCHER_*` overrides.
//! - [`load_matcher`]: catalog + embedder + one-time vector build, ready to query.
//! - [`console`]: the retro console screen (idle, cleared, results, errors).
//! - [`smoke`]: the fixed three-query smoke test and its report table.
//!
//! The engine itself lives in the `matcher` crate and the embedding model in `semantic`.
//!
//! ```no_run
//! use vibematcher::{load_matcher, VibeConfig};
//!
//! # async fn run() -> Result<(), vibematcher::StartupError> {
//! let config = VibeConfig::load(None)?;
//! let matcher = load_matcher(&config).await?;
//! for hit in matcher.find_matches("cozy rainy day book", 3)? {
//!     println!("{} {}", hit.glyph(), hit.item.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod console;
pub mod smoke;

use thiserror::Error;
use tracing::{error, info};

pub use crate::config::{CatalogYamlConfig, ConfigLoadError, MatcherYamlConfig, VibeConfig};
pub use crate::console::{
    clamp_top_n, render_results, Console, ConsoleCommand, ConsoleReply, EXAMPLE_VIBES,
};
pub use crate::smoke::{run_smoke, SmokeCase, SmokeConfig, SmokeOutcome, SmokeReport};
pub use matcher::{
    glyph_for, set_match_metrics, Catalog, CatalogError, Item, MatchError, MatchHit, MatchMetrics,
    VibeMatcher,
};
pub use semantic::{load_embedder, Embedder, EmbeddingMode, SemanticConfig, SemanticError};

/// Shown to the user when the matcher cannot be brought up.
pub const FATAL_LOAD_MESSAGE: &str =
    "FATAL ERROR: Could not load VibeMatcher model. Application cannot start.";

/// Anything that can stop the matcher from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("config error: {0}")]
    Config(#[from] ConfigLoadError),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("model error: {0}")]
    Semantic(#[from] SemanticError),
    #[error("vector build error: {0}")]
    Match(#[from] MatchError),
    #[error("vector build task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// A startup failure as the user sees it: always [`FATAL_LOAD_MESSAGE`], with the cause kept as
/// the error source for logs.
#[derive(Debug, Error)]
#[error("{}", FATAL_LOAD_MESSAGE)]
pub struct FatalStartup(#[source] pub StartupError);

/// Load the catalog, start the embedder and build the item vectors.
///
/// The build runs on tokio's blocking pool; with the ONNX embedder it is one model call per
/// catalog item.
pub async fn load_matcher(config: &VibeConfig) -> Result<VibeMatcher, StartupError> {
    let catalog = Catalog::from_path(&config.catalog.path)?;
    info!(
        path = %config.catalog.path.display(),
        items = catalog.len(),
        "catalog loaded"
    );

    let embedder = load_embedder(&config.semantic).await?;
    let matcher = VibeMatcher::new(catalog, embedder);
    let matcher =
        tokio::task::spawn_blocking(move || matcher.build_vectors().map(|()| matcher)).await??;
    Ok(matcher)
}

/// [`load_matcher`], with any failure logged and collapsed into [`FatalStartup`].
pub async fn start_or_fatal(config: &VibeConfig) -> Result<VibeMatcher, FatalStartup> {
    load_matcher(config).await.map_err(|err| {
        error!(error = %err, "startup failed");
        FatalStartup(err)
    })
}
