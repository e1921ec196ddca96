use semantic::SemanticError;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::Item;
use crate::glyph::glyph_for;

/// A single ranked result. Borrows its item from the matcher's catalog.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MatchHit<'a> {
    /// 1-based position in the result list.
    pub rank: usize,
    /// Cosine similarity between the query and the item's tags, in `[-1, 1]`.
    pub score: f32,
    #[serde(flatten)]
    pub item: &'a Item,
}

impl MatchHit<'_> {
    pub fn glyph(&self) -> &'static str {
        glyph_for(self.item.vibes.as_slice())
    }
}

/// Errors produced by the matching layer.
#[derive(Debug, Error)]
pub enum MatchError {
    /// `find_matches` was called before `build_vectors` succeeded.
    #[error("catalog vectors have not been built")]
    VectorsNotBuilt,
    /// The embedder failed on a catalog item while building the vector table.
    #[error("failed to embed catalog item '{item}': {source}")]
    Build {
        item: String,
        #[source]
        source: SemanticError,
    },
    /// The embedder returned vectors of different widths for different items.
    #[error("item '{item}' embedded to {found} dimensions, expected {expected}")]
    DimensionMismatch {
        item: String,
        expected: usize,
        found: usize,
    },
}
