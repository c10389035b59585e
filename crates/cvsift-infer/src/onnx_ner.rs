//! ONNX token-classification NER (BERT-style, BIO tags).
//!
//! Expects a model directory with `model.onnx`, `tokenizer.json` and the
//! HuggingFace `config.json` carrying `id2label`. Requires the `onnx` feature.

#[cfg(feature = "onnx")]
mod inner {
    use std::collections::HashMap;
    use std::path::Path;

    use ort::session::Session;
    use parking_lot::Mutex;
    use serde::Deserialize;
    use tokenizers::Tokenizer;
    use tracing::{debug, info, warn};

    use cvsift_core::{Error, Result};

    use crate::ner::{Entity, EntityLabel, EntityRecognizer};
    use crate::onnx_session::{encode, load_session, load_tokenizer, model_files};

    /// Characters per inference window; keeps windows well under 512 tokens.
    const WINDOW_CHARS: usize = 1200;

    /// Architectures exported without a `token_type_ids` input.
    const NO_TOKEN_TYPES: &[&str] = &["distilbert", "roberta", "xlm-roberta", "camembert"];

    #[derive(Deserialize)]
    struct ModelConfig {
        id2label: HashMap<String, String>,
        #[serde(default)]
        model_type: Option<String>,
    }

    pub struct OnnxRecognizer {
        session: Mutex<Session>,
        tokenizer: Tokenizer,
        labels: Vec<String>,
        token_types: bool,
    }

    impl OnnxRecognizer {
        pub fn load(model_dir: &Path) -> Result<Self> {
            let (model_path, tokenizer_path) = model_files(model_dir)?;
            let config: ModelConfig =
                serde_json::from_str(&std::fs::read_to_string(model_dir.join("config.json"))?)?;

            let mut labels = vec!["O".to_string(); config.id2label.len()];
            for (id, label) in &config.id2label {
                let idx: usize = id
                    .parse()
                    .map_err(|_| Error::Config(format!("Bad id2label key: {}", id)))?;
                if idx >= labels.len() {
                    labels.resize(idx + 1, "O".to_string());
                }
                labels[idx] = label.clone();
            }

            let token_types = !config
                .model_type
                .as_deref()
                .is_some_and(|t| NO_TOKEN_TYPES.contains(&t));

            let session = load_session(&model_path)?;
            let tokenizer = load_tokenizer(&tokenizer_path)?;

            info!(
                "ONNX recognizer loaded: {} labels, model={}",
                labels.len(),
                model_path.display()
            );

            Ok(Self {
                session: Mutex::new(session),
                tokenizer,
                labels,
                token_types,
            })
        }

        fn recognize_window(&self, window: &str, base: usize) -> Result<Vec<Entity>> {
            let (encoding, input) = encode(&self.tokenizer, window)?;
            let seq_len = input.seq_len;

            let mut session = self.session.lock();
            let outputs = if self.token_types {
                session.run(ort::inputs![input.input_ids, input.attention_mask, input.token_type_ids])
            } else {
                session.run(ort::inputs![input.input_ids, input.attention_mask])
            }
            .map_err(|e| Error::Inference(format!("ONNX inference failed: {}", e)))?;

            let (shape, logits) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| Error::Inference(format!("Failed to extract logits: {}", e)))?;
            let num_labels = shape.last().copied().unwrap_or(0) as usize;
            if num_labels == 0 || logits.len() < seq_len * num_labels {
                return Err(Error::Inference(format!("Unexpected logits shape: {:?}", shape)));
            }

            let tags: Vec<&str> = (0..seq_len)
                .map(|t| {
                    let row = &logits[t * num_labels..(t + 1) * num_labels];
                    let best = row
                        .iter()
                        .enumerate()
                        .max_by(|a, b| a.1.total_cmp(b.1))
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    self.labels.get(best).map(String::as_str).unwrap_or("O")
                })
                .collect();

            Ok(aggregate_bio(
                window,
                base,
                &tags,
                &encoding.get_offsets()[..seq_len],
                &encoding.get_tokens()[..seq_len],
                &encoding.get_special_tokens_mask()[..seq_len],
            ))
        }
    }

    impl EntityRecognizer for OnnxRecognizer {
        fn recognize(&self, text: &str) -> Vec<Entity> {
            let mut entities = Vec::new();
            for (base, window) in windows(text) {
                match self.recognize_window(window, base) {
                    Ok(found) => entities.extend(found),
                    Err(e) => warn!("NER window at byte {} skipped: {}", base, e),
                }
            }
            debug!("ONNX recognizer found {} entities", entities.len());
            entities
        }

        fn name(&self) -> &'static str {
            "onnx"
        }
    }

    /// Split text into line-aligned windows of at most [`WINDOW_CHARS`] bytes
    /// (a single longer line forms its own window).
    fn windows(text: &str) -> Vec<(usize, &str)> {
        let mut out = Vec::new();
        let mut start = 0;
        let mut end = 0;
        for line in text.split_inclusive('\n') {
            if end > start && end - start + line.len() > WINDOW_CHARS {
                out.push((start, &text[start..end]));
                start = end;
            }
            end += line.len();
        }
        if end > start {
            out.push((start, &text[start..end]));
        }
        out
    }

    /// Merge BIO-tagged word pieces into entity spans.
    ///
    /// `##` continuation pieces always extend the open span, so a word is never
    /// split across two entities.
    fn aggregate_bio(
        window: &str,
        base: usize,
        tags: &[&str],
        offsets: &[(usize, usize)],
        tokens: &[String],
        special: &[u32],
    ) -> Vec<Entity> {
        let mut entities = Vec::new();
        let mut open: Option<(EntityLabel, usize, usize)> = None;

        let mut flush = |open: &mut Option<(EntityLabel, usize, usize)>| {
            if let Some((label, s, e)) = open.take() {
                if let Some(span) = window.get(s..e) {
                    entities.push(Entity {
                        label,
                        text: span.to_string(),
                        start: base + s,
                        end: base + e,
                    });
                }
            }
        };

        for (t, tag) in tags.iter().enumerate() {
            let (s, e) = offsets[t];
            if special[t] == 1 || e <= s {
                continue;
            }
            if tokens[t].starts_with("##") {
                if let Some((_, _, end)) = open.as_mut() {
                    *end = e;
                    continue;
                }
            }

            let Some(label) = EntityLabel::from_model_label(tag) else {
                flush(&mut open);
                continue;
            };
            let begins = tag.starts_with("B-");
            let extends = matches!(open, Some((l, _, _)) if l == label && !begins);
            if extends {
                if let Some((_, _, end)) = open.as_mut() {
                    *end = e;
                }
            } else {
                flush(&mut open);
                open = Some((label, s, e));
            }
        }
        flush(&mut open);
        entities
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_windows_cover_text() {
            let text = "line one\nline two\n".repeat(200);
            let parts = windows(&text);
            assert!(parts.len() > 1);
            let rebuilt: String = parts.iter().map(|(_, w)| *w).collect();
            assert_eq!(rebuilt, text);
        }

        #[test]
        fn test_aggregate_bio_merges_pieces() {
            let window = "John Doe lives in Berlin";
            let tags = ["O", "B-PER", "I-PER", "O", "O", "B-LOC", "O"];
            let offsets = [(0, 0), (0, 4), (5, 8), (9, 14), (15, 17), (18, 24), (0, 0)];
            let tokens: Vec<String> = ["[CLS]", "John", "Doe", "lives", "in", "Berlin", "[SEP]"]
                .iter()
                .map(|s| s.to_string())
                .collect();
            let special = [1, 0, 0, 0, 0, 0, 1];

            let entities = aggregate_bio(window, 10, &tags, &offsets, &tokens, &special);
            assert_eq!(entities.len(), 2);
            assert_eq!(entities[0].label, EntityLabel::Person);
            assert_eq!(entities[0].text, "John Doe");
            assert_eq!(entities[0].start, 10);
            assert_eq!(entities[1].label, EntityLabel::Gpe);
            assert_eq!(entities[1].text, "Berlin");
        }
    }
}

#[cfg(feature = "onnx")]
pub use inner::OnnxRecognizer;
