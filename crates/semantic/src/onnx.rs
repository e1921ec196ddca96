use onnxruntime::ndarray::{Array, Array2};
use onnxruntime::session::Session;
use std::sync::mpsc;
use std::thread;
use tokenizers::Tokenizer;
use tracing::{debug, error};

use crate::assets::ModelAssets;
use crate::cache::LoadedModel;
use crate::normalize::{l2_normalize_in_place, masked_mean_pool};
use crate::{Embedder, SemanticConfig, SemanticError};

type Reply = mpsc::SyncSender<Result<Vec<Vec<f32>>, SemanticError>>;

struct EmbedJob {
    texts: Vec<String>,
    reply: Reply,
}

/// Sentence encoder backed by a local ONNX model.
///
/// The tokenizer and session live on one dedicated worker thread and are loaded exactly once;
/// callers hand texts over a channel and block on the reply. That keeps the handle `Send + Sync`
/// without sharing the session itself between threads.
pub struct OnnxEmbedder {
    model_name: String,
    jobs: mpsc::Sender<EmbedJob>,
}

impl OnnxEmbedder {
    /// Spawns the worker and waits until the model is loaded. A load failure is returned here,
    /// so callers find out at startup rather than on the first query.
    pub(crate) fn spawn(assets: ModelAssets, cfg: &SemanticConfig) -> Result<Self, SemanticError> {
        if cfg.max_sequence_length == 0 {
            return Err(SemanticError::InvalidConfig(
                "max_sequence_length must be greater than zero".into(),
            ));
        }

        let (jobs_tx, jobs_rx) = mpsc::channel::<EmbedJob>();
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<(), SemanticError>>(1);
        let max_sequence_length = cfg.max_sequence_length;
        let normalize = cfg.normalize;

        thread::Builder::new()
            .name("vibe-onnx".into())
            .spawn(move || {
                let mut model = match LoadedModel::load(&assets, max_sequence_length) {
                    Ok(model) => {
                        let _ = ready_tx.send(Ok(()));
                        model
                    }
                    Err(err) => {
                        error!(error = %err, "failed to load onnx model");
                        let _ = ready_tx.send(Err(err));
                        return;
                    }
                };

                while let Ok(job) = jobs_rx.recv() {
                    let result = run_onnx_embeddings(&mut model, &job.texts)
                        .map(|mut vectors| {
                            if normalize {
                                vectors.iter_mut().for_each(|v| l2_normalize_in_place(v));
                            }
                            vectors
                        });
                    let _ = job.reply.send(result);
                }
                debug!("onnx worker shutting down");
            })?;

        ready_rx
            .recv()
            .map_err(|_| SemanticError::WorkerUnavailable)??;

        Ok(Self {
            model_name: cfg.model_name.clone(),
            jobs: jobs_tx,
        })
    }
}

impl Embedder for OnnxEmbedder {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, SemanticError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let (reply_tx, reply_rx) = mpsc::sync_channel(1);
        self.jobs
            .send(EmbedJob {
                texts: texts.iter().map(|t| t.to_string()).collect(),
                reply: reply_tx,
            })
            .map_err(|_| SemanticError::WorkerUnavailable)?;
        let vectors = reply_rx
            .recv()
            .map_err(|_| SemanticError::WorkerUnavailable)??;
        if vectors.len() != texts.len() {
            return Err(SemanticError::Inference(format!(
                "model returned {} embeddings for {} inputs",
                vectors.len(),
                texts.len()
            )));
        }
        Ok(vectors)
    }
}

/// Tokenize, pad, run the session and pool one vector per input text.
fn run_onnx_embeddings<T>(
    model: &mut LoadedModel,
    texts: &[T],
) -> Result<Vec<Vec<f32>>, SemanticError>
where
    T: AsRef<str>,
{
    if texts.is_empty() {
        return Ok(Vec::new());
    }

    let (encoded, max_len) = encode_documents(&model.tokenizer, texts)?;
    let (input_ids, attn_mask) = build_padded_arrays(encoded, max_len)?;
    execute_session(&mut model.session, input_ids, attn_mask)
}

struct EncodedDoc {
    ids: Vec<i64>,
    mask: Vec<i64>,
}

/// Sequences come back already capped by the tokenizer's truncation settings.
fn encode_documents<T>(
    tokenizer: &Tokenizer,
    texts: &[T],
) -> Result<(Vec<EncodedDoc>, usize), SemanticError>
where
    T: AsRef<str>,
{
    let mut encoded = Vec::with_capacity(texts.len());
    let mut max_len = 0usize;

    for text in texts {
        let encoding = tokenizer
            .encode(text.as_ref(), true)
            .map_err(|e| SemanticError::Inference(e.to_string()))?;
        let ids: Vec<i64> = encoding.get_ids().iter().map(|&x| x as i64).collect();
        let mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&x| x as i64)
            .collect();
        max_len = max_len.max(ids.len());
        encoded.push(EncodedDoc { ids, mask });
    }

    Ok((encoded, max_len))
}

fn build_padded_arrays(
    encoded: Vec<EncodedDoc>,
    max_len: usize,
) -> Result<(Array2<i64>, Array2<i64>), SemanticError> {
    let seq_len = max_len.max(1);
    let batch = encoded.len();
    let mut id_storage = Vec::with_capacity(batch * seq_len);
    let mut mask_storage = Vec::with_capacity(batch * seq_len);

    for EncodedDoc { ids, mask } in encoded {
        if ids.len() != mask.len() {
            return Err(SemanticError::Inference(
                "tokenizer produced mismatched id/mask lengths".into(),
            ));
        }
        let pad = seq_len.saturating_sub(ids.len());
        id_storage.extend(ids);
        mask_storage.extend(mask);
        id_storage.extend(std::iter::repeat_n(0, pad));
        mask_storage.extend(std::iter::repeat_n(0, pad));
    }

    let input_ids = Array::from_shape_vec((batch, seq_len), id_storage)
        .map_err(|e| SemanticError::Inference(e.to_string()))?;
    let attn_mask = Array::from_shape_vec((batch, seq_len), mask_storage)
        .map_err(|e| SemanticError::Inference(e.to_string()))?;
    Ok((input_ids, attn_mask))
}

fn execute_session(
    session: &mut Session<'static>,
    input_ids: Array2<i64>,
    attn_mask: Array2<i64>,
) -> Result<Vec<Vec<f32>>, SemanticError> {
    let (batch, seq_len) = input_ids.dim();
    let mask_rows: Vec<i64> = attn_mask.iter().copied().collect();
    let mut runtime_inputs = Vec::with_capacity(session.inputs.len());
    let mut input_ids_tensor = Some(input_ids);
    let mut attn_mask_tensor = Some(attn_mask);

    for input in &session.inputs {
        match input.name.as_str() {
            "input_ids" => {
                let tensor = input_ids_tensor.take().ok_or_else(|| {
                    SemanticError::InvalidConfig(
                        "model requested `input_ids` multiple times".into(),
                    )
                })?;
                runtime_inputs.push(tensor.into_dyn());
            }
            "attention_mask" => {
                let tensor = attn_mask_tensor.take().ok_or_else(|| {
                    SemanticError::InvalidConfig(
                        "model requested `attention_mask` multiple times".into(),
                    )
                })?;
                runtime_inputs.push(tensor.into_dyn());
            }
            "token_type_ids" => {
                runtime_inputs.push(Array::from_elem((batch, seq_len), 0_i64).into_dyn());
            }
            other => {
                return Err(SemanticError::Inference(format!(
                    "unsupported model input '{other}'"
                )))
            }
        }
    }

    if runtime_inputs.is_empty() {
        return Err(SemanticError::Inference(
            "model did not declare any inputs".into(),
        ));
    }

    let outputs = session
        .run::<i64, f32, _>(runtime_inputs)
        .map_err(|e| SemanticError::Inference(e.to_string()))?;
    let output_tensor = outputs
        .into_iter()
        .next()
        .ok_or_else(|| SemanticError::Inference("model returned no outputs".into()))?;

    let shape = output_tensor.shape().to_vec();
    let flat: Vec<f32> = output_tensor.iter().copied().collect();
    pool_output(&shape, &flat, &mask_rows, batch, seq_len)
}

/// Turn the raw model output into one vector per input.
///
/// Rank-3 outputs (`[batch, seq, hidden]`, i.e. token embeddings) are mean-pooled over the
/// attention mask; rank-2 outputs (`[batch, hidden]`) are already sentence embeddings.
fn pool_output(
    shape: &[usize],
    flat: &[f32],
    mask: &[i64],
    batch: usize,
    seq_len: usize,
) -> Result<Vec<Vec<f32>>, SemanticError> {
    match *shape {
        [b, s, hidden] if b == batch && s == seq_len && hidden > 0 => Ok(flat
            .chunks_exact(seq_len * hidden)
            .zip(mask.chunks_exact(seq_len))
            .map(|(tokens, row_mask)| masked_mean_pool(tokens, row_mask, hidden))
            .collect()),
        [b, hidden] if b == batch && hidden > 0 => {
            Ok(flat.chunks_exact(hidden).map(<[f32]>::to_vec).collect())
        }
        _ => Err(SemanticError::Inference(format!(
            "unexpected model output shape {shape:?} for batch {batch} x {seq_len} tokens"
        ))),
    }
}
