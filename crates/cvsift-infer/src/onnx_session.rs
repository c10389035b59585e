//! Shared ONNX Runtime plumbing for the embedder and the NER model.

#[cfg(feature = "onnx")]
mod inner {
    use std::path::{Path, PathBuf};

    use ort::session::Session;
    use ort::value::Tensor;
    use tokenizers::{Encoding, Tokenizer};

    use cvsift_core::{Error, Result};

    /// Maximum sequence length for BERT-family models.
    pub const MAX_SEQ_LEN: usize = 512;

    /// Locate `model.onnx` and `tokenizer.json` in a model directory.
    pub fn model_files(model_dir: &Path) -> Result<(PathBuf, PathBuf)> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !model_path.exists() {
            return Err(Error::Inference(format!("Model not found: {}", model_path.display())));
        }
        if !tokenizer_path.exists() {
            return Err(Error::Inference(format!(
                "Tokenizer not found: {}",
                tokenizer_path.display()
            )));
        }
        Ok((model_path, tokenizer_path))
    }

    /// Create an inference session.
    ///
    /// With the load-dynamic feature, ORT_DYLIB_PATH must point to libonnxruntime.
    pub fn load_session(model_path: &Path) -> Result<Session> {
        ort::init().commit();

        Session::builder()
            .map_err(|e| Error::Inference(format!("Failed to create session builder: {}", e)))?
            .with_intra_threads(2)
            .map_err(|e| Error::Inference(format!("Failed to set threads: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| Error::Inference(format!("Failed to load ONNX model: {}", e)))
    }

    pub fn load_tokenizer(tokenizer_path: &Path) -> Result<Tokenizer> {
        Tokenizer::from_file(tokenizer_path)
            .map_err(|e| Error::Inference(format!("Failed to load tokenizer: {}", e)))
    }

    /// Model inputs for one sequence, truncated to [`MAX_SEQ_LEN`].
    pub struct EncodedInput {
        pub input_ids: Tensor<i64>,
        pub attention_mask: Tensor<i64>,
        pub token_type_ids: Tensor<i64>,
        pub seq_len: usize,
    }

    pub fn encode(tokenizer: &Tokenizer, text: &str) -> Result<(Encoding, EncodedInput)> {
        let encoding = tokenizer
            .encode(text, true)
            .map_err(|e| Error::Inference(format!("Tokenization failed: {}", e)))?;

        let seq_len = encoding.get_ids().len().min(MAX_SEQ_LEN);
        let ids: Vec<i64> = encoding.get_ids()[..seq_len].iter().map(|&id| id as i64).collect();
        let mask: Vec<i64> = encoding.get_attention_mask()[..seq_len]
            .iter()
            .map(|&m| m as i64)
            .collect();
        let type_ids: Vec<i64> = vec![0i64; seq_len];

        let tensor = |data: Vec<i64>, what: &str| {
            Tensor::from_array(([1usize, seq_len], data))
                .map_err(|e| Error::Inference(format!("Failed to create {} tensor: {}", what, e)))
        };

        let input = EncodedInput {
            input_ids: tensor(ids, "ids")?,
            attention_mask: tensor(mask, "mask")?,
            token_type_ids: tensor(type_ids, "type_ids")?,
            seq_len,
        };
        Ok((encoding, input))
    }
}

#[cfg(feature = "onnx")]
pub use inner::*;
