//! # Vibe Matcher engine (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` owns the product catalog and answers "which items feel like this?" queries. Each
//! item's `ai_tags` text is embedded once through a [`semantic::Embedder`]; a query is embedded on
//! demand and the catalog is ranked by cosine similarity.
//!
//! ## Core Types
//!
//! - [`Catalog`] / [`Item`]: the fixed, validated product list, usually loaded from JSON.
//! - [`VibeMatcher`]: catalog + embedder + the one-time vector table.
//! - [`MatchHit`]: a ranked result borrowing its [`Item`].
//! - [`glyph_for`]: the vibe-tag to emoji lookup used by every presentation surface.
//!
//! ## Example Usage
//!
//! ```no_run
//! use matcher::{Catalog, VibeMatcher};
//! use semantic::{load_embedder, SemanticConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::from_path("assets/catalog.json")?;
//! let embedder = load_embedder(&SemanticConfig::default()).await?;
//! let matcher = VibeMatcher::new(catalog, embedder);
//! matcher.build_vectors()?;
//!
//! for hit in matcher.find_matches("cozy rainy day book", 3)? {
//!     println!("{} {} {:.3}", hit.rank, hit.item.name, hit.score);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Observability
//!
//! Install a [`MatchMetrics`] implementation via [`set_match_metrics`] to record build latency,
//! per-query latency and hit counts, and degraded query embeddings. This is typically done once
//! during service startup.

pub mod catalog;
pub mod engine;
pub mod glyph;
pub mod metrics;
pub mod similarity;
pub mod types;

pub use crate::catalog::{Catalog, CatalogError, Item};
pub use crate::engine::VibeMatcher;
pub use crate::glyph::{glyph_for, DEFAULT_GLYPH, GLYPHS};
pub use crate::metrics::{set_match_metrics, MatchMetrics};
pub use crate::similarity::cosine_similarity;
pub use crate::types::{MatchError, MatchHit};
