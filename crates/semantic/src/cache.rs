use once_cell::sync::OnceCell;
use onnxruntime::{environment::Environment, session::Session, GraphOptimizationLevel};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::info;

use crate::assets::ModelAssets;
use crate::SemanticError;

static ORT_ENV: OnceCell<Environment> = OnceCell::new();
const ORT_NAME: &str = "vibe_semantic";

/// Tokenizer + ONNX session pair. Owned by exactly one worker thread.
pub(crate) struct LoadedModel {
    pub(crate) tokenizer: Tokenizer,
    pub(crate) session: Session<'static>,
}

impl LoadedModel {
    pub(crate) fn load(
        assets: &ModelAssets,
        max_sequence_length: usize,
    ) -> Result<Self, SemanticError> {
        let mut tokenizer = Tokenizer::from_file(&assets.tokenizer_path)
            .map_err(|e| SemanticError::Inference(e.to_string()))?;
        limit_sequence_length(&mut tokenizer, max_sequence_length)?;

        let env = ort_environment()?;
        let session = env
            .new_session_builder()
            .map_err(|e| SemanticError::Inference(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Basic)
            .map_err(|e| SemanticError::Inference(e.to_string()))?
            .with_model_from_file(assets.model_path.clone())
            .map_err(|e| SemanticError::Inference(e.to_string()))?;

        info!(
            model = %assets.model_path.display(),
            inputs = session.inputs.len(),
            "onnx session ready"
        );

        Ok(Self { tokenizer, session })
    }
}

/// Lazily constructs a global ONNX Runtime environment that can be shared by all sessions.
fn ort_environment() -> Result<&'static Environment, SemanticError> {
    ORT_ENV.get_or_try_init(|| {
        Environment::builder()
            .with_name(ORT_NAME)
            .build()
            .map_err(|e| SemanticError::Inference(e.to_string()))
    })
}

/// Cap encodings at `max_length` tokens, special tokens included. The tokenizer trims the text
/// before adding `<s>`/`</s>`, so both survive on long inputs.
pub(crate) fn limit_sequence_length(
    tokenizer: &mut Tokenizer,
    max_length: usize,
) -> Result<(), SemanticError> {
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length,
            ..TruncationParams::default()
        }))
        .map_err(|e| SemanticError::InvalidConfig(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    // Word-level vocabulary with a `<s> $A </s>` template, shaped like a sentence-encoder tokenizer.
    const TOKENIZER_JSON: &str = r#"{
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": null,
        "pre_tokenizer": {"type": "Whitespace"},
        "post_processor": {
            "type": "TemplateProcessing",
            "single": [
                {"SpecialToken": {"id": "<s>", "type_id": 0}},
                {"Sequence": {"id": "A", "type_id": 0}},
                {"SpecialToken": {"id": "</s>", "type_id": 0}}
            ],
            "pair": [
                {"SpecialToken": {"id": "<s>", "type_id": 0}},
                {"Sequence": {"id": "A", "type_id": 0}},
                {"SpecialToken": {"id": "</s>", "type_id": 0}},
                {"Sequence": {"id": "B", "type_id": 1}},
                {"SpecialToken": {"id": "</s>", "type_id": 1}}
            ],
            "special_tokens": {
                "<s>": {"id": "<s>", "ids": [0], "tokens": ["<s>"]},
                "</s>": {"id": "</s>", "ids": [2], "tokens": ["</s>"]}
            }
        },
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": {"<s>": 0, "[UNK]": 1, "</s>": 2, "cozy": 3, "rainy": 4, "day": 5, "book": 6},
            "unk_token": "[UNK]"
        }
    }"#;

    #[test]
    fn truncation_keeps_closing_special_token() {
        let mut tokenizer = Tokenizer::from_str(TOKENIZER_JSON).unwrap();
        limit_sequence_length(&mut tokenizer, 4).unwrap();

        let encoding = tokenizer.encode("cozy rainy day book cozy", true).unwrap();
        assert_eq!(encoding.get_ids().to_vec(), vec![0u32, 3, 4, 2]);
        assert_eq!(encoding.get_attention_mask().to_vec(), vec![1u32; 4]);
    }

    #[test]
    fn short_inputs_are_untouched() {
        let mut tokenizer = Tokenizer::from_str(TOKENIZER_JSON).unwrap();
        limit_sequence_length(&mut tokenizer, 16).unwrap();

        let encoding = tokenizer.encode("rainy day", true).unwrap();
        assert_eq!(encoding.get_ids().to_vec(), vec![0u32, 4, 5, 2]);
    }
}
