//! ONNX-based word and phrase vectors from a sentence-transformer model.
//!
//! Loads a SentenceTransformers ONNX export and its tokenizer. Requires the
//! `onnx` feature.

#[cfg(feature = "onnx")]
mod inner {
    use std::path::Path;

    use ndarray::Array1;
    use ort::session::Session;
    use parking_lot::Mutex;
    use tokenizers::Tokenizer;
    use tracing::{info, warn};

    use cvsift_core::Result;

    use crate::embedder::{EmbedderBackend, EmbeddingResult};
    use crate::onnx_session::{encode, load_session, load_tokenizer, model_files};

    /// Default embedding dimension (all-MiniLM-L6-v2).
    const DEFAULT_DIM: usize = 384;

    pub struct OnnxEmbedder {
        session: Mutex<Session>,
        tokenizer: Tokenizer,
        dimension: usize,
    }

    impl OnnxEmbedder {
        /// Load `model.onnx` and `tokenizer.json` from the given directory.
        pub fn load(model_dir: &Path) -> Result<Self> {
            let (model_path, tokenizer_path) = model_files(model_dir)?;
            let session = load_session(&model_path)?;
            let tokenizer = load_tokenizer(&tokenizer_path)?;

            info!(
                "ONNX embedder loaded: dim={}, model={}",
                DEFAULT_DIM,
                model_path.display()
            );

            Ok(Self {
                session: Mutex::new(session),
                tokenizer,
                dimension: DEFAULT_DIM,
            })
        }

        fn infer(&self, text: &str) -> Option<Array1<f32>> {
            let (encoding, input) = encode(&self.tokenizer, text)
                .map_err(|e| warn!("{}", e))
                .ok()?;
            let attention_mask = &encoding.get_attention_mask()[..input.seq_len];

            let mut session = self.session.lock();
            let outputs = session
                .run(ort::inputs![input.input_ids, input.attention_mask, input.token_type_ids])
                .map_err(|e| warn!("ONNX inference failed: {}", e))
                .ok()?;

            // Either token embeddings [1, seq_len, dim] that need mean pooling,
            // or an already pooled sentence embedding [1, dim].
            let (shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| warn!("Failed to extract output tensor: {}", e))
                .ok()?;
            let shape_dims: Vec<i64> = shape.iter().copied().collect();

            match shape_dims.len() {
                3 => {
                    let dim = shape_dims[2] as usize;
                    let mask_sum: f32 = attention_mask.iter().map(|&m| m as f32).sum();
                    if mask_sum < 1e-9 {
                        return None;
                    }
                    let mut pooled = Array1::zeros(dim);
                    for (i, &m) in attention_mask.iter().enumerate() {
                        if m > 0 {
                            let offset = i * dim;
                            for d in 0..dim {
                                pooled[d] += data[offset + d];
                            }
                        }
                    }
                    Some(pooled / mask_sum)
                }
                2 => {
                    let dim = shape_dims[1] as usize;
                    Some(Array1::from_vec(data[..dim].to_vec()))
                }
                _ => {
                    warn!("Unexpected output shape: {:?}", shape_dims);
                    None
                }
            }
        }
    }

    impl EmbedderBackend for OnnxEmbedder {
        fn embed(&self, text: &str) -> Option<EmbeddingResult> {
            let embedding = self.infer(text)?;
            Some(EmbeddingResult {
                embedding,
                cached: false,
            })
        }

        fn dimension(&self) -> usize {
            self.dimension
        }

        fn name(&self) -> &'static str {
            "onnx"
        }
    }
}

#[cfg(feature = "onnx")]
pub use inner::OnnxEmbedder;
