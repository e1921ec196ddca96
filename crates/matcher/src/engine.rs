use std::sync::Arc;

use once_cell::sync::OnceCell;
use semantic::Embedder;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::glyph::glyph_for;
use crate::metrics::{metrics_recorder, MetricsSpan};
use crate::similarity::cosine_similarity;
use crate::types::{MatchError, MatchHit};


/// Ranks a fixed catalog against free-text vibes.
///
/// The vector table is written once by [`build_vectors`](Self::build_vectors) and read-only
/// afterwards, so a `VibeMatcher` can be shared behind an `Arc` and queried from many threads.
pub struct VibeMatcher {
    catalog: Catalog,
    embedder: Arc<dyn Embedder>,
    vectors: OnceCell<Vec<Vec<f32>>>,
}

impl VibeMatcher {
    pub fn new(catalog: Catalog, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            catalog,
            embedder,
            vectors: OnceCell::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn model_name(&self) -> &str {
        self.embedder.model_name()
    }

    pub fn is_built(&self) -> bool {
        self.vectors.get().is_some()
    }

    /// Width of the stored vectors, once built.
    pub fn dimension(&self) -> Option<usize> {
        self.vectors
            .get()
            .and_then(|vectors| vectors.first())
            .map(Vec::len)
    }

    /// Embed `text` lower-cased. Embedder failures are logged and yield `None`.
    pub fn embed(&self, text: &str) -> Option<Vec<f32>> {
        match self.embedder.embed(&text.to_lowercase()) {
            Ok(vector) => Some(vector),
            Err(err) => {
                warn!(error = %err, "embedding failed; treating as no match");
                if let Some(recorder) = metrics_recorder() {
                    recorder.record_embedding_failure(&err);
                }
                None
            }
        }
    }

    /// Embed every item's `ai_tags` once.
    ///
    /// Concurrent first callers block on a single build; later calls return immediately. A failed
    /// build stores nothing, so a later call retries from scratch.
    pub fn build_vectors(&self) -> Result<(), MatchError> {
        if self.is_built() {
            return Ok(());
        }
        let span = MetricsSpan::start();
        let result = self
            .vectors
            .get_or_try_init(|| self.compute_vectors())
            .map(|_| ());
        if let Some(span) = span {
            span.record_build(result.as_ref().map(|_| ()));
        }
        result
    }

    fn compute_vectors(&self) -> Result<Vec<Vec<f32>>, MatchError> {
        let mut vectors: Vec<Vec<f32>> = Vec::with_capacity(self.catalog.len());
        for item in &self.catalog {
            let vector = self
                .embedder
                .embed(&item.ai_tags.to_lowercase())
                .map_err(|source| MatchError::Build {
                    item: item.name.clone(),
                    source,
                })?;
            if let Some(expected) = vectors.first().map(Vec::len) {
                if vector.len() != expected {
                    return Err(MatchError::DimensionMismatch {
                        item: item.name.clone(),
                        expected,
                        found: vector.len(),
                    });
                }
            }
            vectors.push(vector);
        }
        info!(
            items = vectors.len(),
            dim = vectors.first().map(Vec::len).unwrap_or(0),
            model = self.embedder.model_name(),
            "catalog vectors built"
        );
        Ok(vectors)
    }

    /// Rank the catalog against `query` and return the best `top_n` hits.
    ///
    /// Errors only when the vectors are not built. `top_n == 0` and failed query embeddings give
    /// an empty list; `top_n` larger than the catalog is clamped. Equal scores keep catalog order.
    pub fn find_matches(&self, query: &str, top_n: usize) -> Result<Vec<MatchHit<'_>>, MatchError> {
        let vectors = self.vectors.get().ok_or(MatchError::VectorsNotBuilt)?;
        if top_n == 0 {
            return Ok(Vec::new());
        }
        let span = MetricsSpan::start();

        let hits = match self.embed(query) {
            Some(q) if vectors.first().is_some_and(|v| v.len() == q.len()) => {
                self.rank(&q, vectors, top_n)
            }
            Some(q) => {
                warn!(
                    query_dim = q.len(),
                    table_dim = vectors.first().map(Vec::len).unwrap_or(0),
                    "query embedding dimension mismatch; treating as no match"
                );
                Vec::new()
            }
            None => Vec::new(),
        };

        debug!(query, top_n, hits = hits.len(), "vibe query ranked");
        if let Some(span) = span {
            span.record_match(hits.len());
        }
        Ok(hits)
    }

    fn rank(&self, query: &[f32], vectors: &[Vec<f32>], top_n: usize) -> Vec<MatchHit<'_>> {
        let mut scored: Vec<(usize, f32)> = vectors
            .iter()
            .enumerate()
            .map(|(idx, v)| (idx, cosine_similarity(query, v)))
            .collect();
        // stable: ties stay in catalog order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let items = self.catalog.items();
        scored
            .into_iter()
            .take(top_n)
            .enumerate()
            .map(|(pos, (idx, score))| MatchHit {
                rank: pos + 1,
                score,
                item: &items[idx],
            })
            .collect()
    }

    /// Glyph for a tag list; same as [`crate::glyph_for`].
    pub fn glyph_for<S: AsRef<str>>(&self, vibes: &[S]) -> &'static str {
        glyph_for(vibes)
    }
}
