use fxhash::hash64;

use crate::normalize::l2_normalize_in_place;
use crate::{Embedder, SemanticConfig, SemanticError};

/// Deterministic embedder used in [`EmbeddingMode::Fast`](crate::EmbeddingMode::Fast).
///
/// Signed feature hashing over lower-cased alphanumeric tokens: each token lands in one bucket
/// with a +1/-1 sign taken from its hash. Texts that share words end up with a high cosine
/// similarity, which is enough to exercise ranking without model files.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    model_name: String,
    dim: usize,
    normalize: bool,
}

impl HashingEmbedder {
    pub fn new(cfg: &SemanticConfig) -> Result<Self, SemanticError> {
        if cfg.stub_dimension == 0 {
            return Err(SemanticError::InvalidConfig(
                "stub_dimension must be greater than zero".into(),
            ));
        }
        Ok(Self {
            model_name: cfg.model_name.clone(),
            dim: cfg.stub_dimension,
            normalize: cfg.normalize,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dim
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        let lowered = text.to_lowercase();
        for token in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let h = hash64(token.as_bytes());
            let bucket = (h % self.dim as u64) as usize;
            let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
            v[bucket] += sign;
        }
        if self.normalize {
            l2_normalize_in_place(&mut v);
        }
        v
    }
}

impl Embedder for HashingEmbedder {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, SemanticError> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedder() -> HashingEmbedder {
        HashingEmbedder::new(&SemanticConfig::fast()).unwrap()
    }

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn dimension_follows_config() {
        let cfg = SemanticConfig {
            stub_dimension: 64,
            ..SemanticConfig::fast()
        };
        let e = HashingEmbedder::new(&cfg).unwrap();
        assert_eq!(e.embed("hello world").unwrap().len(), 64);
        assert_eq!(e.dimension(), 64);
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let cfg = SemanticConfig {
            stub_dimension: 0,
            ..SemanticConfig::fast()
        };
        assert!(matches!(
            HashingEmbedder::new(&cfg),
            Err(SemanticError::InvalidConfig(_))
        ));
    }

    #[test]
    fn deterministic_for_same_text() {
        let e = embedder();
        assert_eq!(e.embed("same text").unwrap(), e.embed("same text").unwrap());
    }

    #[test]
    fn case_and_punctuation_do_not_matter() {
        let e = embedder();
        assert_eq!(
            e.embed("Cozy, rainy day!").unwrap(),
            e.embed("cozy rainy day").unwrap()
        );
    }

    #[test]
    fn normalized_output_has_unit_length() {
        let v = embedder().embed("a modern athletic techwear sneaker").unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4, "norm={norm}");
    }

    #[test]
    fn empty_text_is_zero_vector() {
        let v = embedder().embed("").unwrap();
        assert_eq!(v.len(), 768);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn shared_words_score_higher() {
        let e = embedder();
        let query = e.embed("cozy rainy day book").unwrap();
        let close = e.embed("cozy rainy day book. a perfect cozy knit cardigan.").unwrap();
        let far = e.embed("a high-shine metallic silver jacket").unwrap();
        assert!(cosine(&query, &close) > cosine(&query, &far));
    }

    #[test]
    fn batch_preserves_order() {
        let e = embedder();
        let batch = e.embed_batch(&["first", "second"]).unwrap();
        assert_eq!(batch[0], e.embed("first").unwrap());
        assert_eq!(batch[1], e.embed("second").unwrap());
    }

    #[test]
    fn unicode_text_embeds() {
        let v = embedder().embed("Hello 世界 🌍").unwrap();
        assert!(!v.iter().all(|&x| x == 0.0));
    }
}
