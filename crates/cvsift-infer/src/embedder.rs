//! Word-vector backends for similarity scoring.
//!
//! The `EmbedderBackend` trait abstracts over vector generation.
//! Implementations:
//! - `OnnxEmbedder`: ONNX Runtime sentence-transformer (requires the `onnx` feature)
//! - `SubwordEmbedder`: hashed character n-grams, always available, no model files

use ndarray::Array1;

/// Result of an embedding operation.
pub struct EmbeddingResult {
    pub embedding: Array1<f32>,
    /// Whether this was served from cache.
    pub cached: bool,
}

/// Trait for embedding backends.
pub trait EmbedderBackend: Send + Sync {
    /// Generate a vector for a word or short phrase.
    /// Returns None if no vector can be produced for this input.
    fn embed(&self, text: &str) -> Option<EmbeddingResult>;

    /// Generate vectors for a batch of texts.
    fn embed_batch(&self, texts: &[&str]) -> Vec<Option<EmbeddingResult>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Vector for a multi-word phrase: the mean of its word vectors.
    ///
    /// Words without a vector are skipped; None when no word has one.
    fn embed_phrase(&self, phrase: &str) -> Option<Array1<f32>> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        let vectors: Vec<Array1<f32>> = self
            .embed_batch(&words)
            .into_iter()
            .flatten()
            .map(|r| r.embedding)
            .collect();
        let first = vectors.first()?;
        let mut sum = Array1::<f32>::zeros(first.len());
        for v in &vectors {
            if v.len() == sum.len() {
                sum += v;
            }
        }
        Some(sum / vectors.len() as f32)
    }

    fn dimension(&self) -> usize;

    /// Human-readable backend name for logs.
    fn name(&self) -> &'static str;
}

/// Cosine similarity; 0.0 for mismatched or zero-length vectors.
pub fn cosine_similarity(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let norm_a = a.dot(a).sqrt();
    let norm_b = b.dot(b).sqrt();
    if norm_a < 1e-9 || norm_b < 1e-9 {
        return 0.0;
    }
    a.dot(b) / (norm_a * norm_b)
}

/// Default dimension of the hashed subword space.
pub const SUBWORD_DIM: usize = 512;
const MIN_NGRAM: usize = 3;
const MAX_NGRAM: usize = 5;

/// Deterministic word vectors from hashed character n-grams.
///
/// Each word is wrapped as `<word>`; its 3- to 5-grams and the whole wrapped
/// word are hashed into a fixed-size signed feature vector, then normalized.
/// Identical words score 1.0, spelling variants score by shared n-grams.
pub struct SubwordEmbedder {
    dim: usize,
}

impl SubwordEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    fn vectorize(&self, word: &str) -> Option<Array1<f32>> {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return None;
        }
        let wrapped: Vec<char> = format!("<{}>", word).chars().collect();
        let mut vector = Array1::<f32>::zeros(self.dim);

        let mut add = |feature: &[char]| {
            let h = fnv1a(feature);
            let idx = (h % self.dim as u64) as usize;
            let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
            vector[idx] += sign;
        };

        for n in MIN_NGRAM..=MAX_NGRAM {
            if wrapped.len() < n {
                break;
            }
            for gram in wrapped.windows(n) {
                add(gram);
            }
        }
        if wrapped.len() > MAX_NGRAM {
            add(&wrapped[..]);
        }

        let norm = vector.dot(&vector).sqrt();
        if norm < 1e-9 {
            return None;
        }
        Some(vector / norm)
    }
}

impl Default for SubwordEmbedder {
    fn default() -> Self {
        Self::new(SUBWORD_DIM)
    }
}

impl EmbedderBackend for SubwordEmbedder {
    fn embed(&self, text: &str) -> Option<EmbeddingResult> {
        self.vectorize(text).map(|embedding| EmbeddingResult {
            embedding,
            cached: false,
        })
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn name(&self) -> &'static str {
        "subword"
    }
}

/// 64-bit FNV-1a over the UTF-8 bytes of a char slice.
fn fnv1a(chars: &[char]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    let mut hash = OFFSET;
    let mut buf = [0u8; 4];
    for c in chars {
        for b in c.encode_utf8(&mut buf).bytes() {
            hash ^= u64::from(b);
            hash = hash.wrapping_mul(PRIME);
        }
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    fn similarity(embedder: &SubwordEmbedder, a: &str, b: &str) -> f32 {
        let va = embedder.embed(a).unwrap().embedding;
        let vb = embedder.embed(b).unwrap().embedding;
        cosine_similarity(&va, &vb)
    }

    #[test]
    fn test_identical_words_score_one() {
        let embedder = SubwordEmbedder::default();
        assert!((similarity(&embedder, "python", "Python") - 1.0).abs() < 1e-5);
        assert!((similarity(&embedder, "c++", "c++") - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_related_words_stay_below_threshold() {
        let embedder = SubwordEmbedder::default();
        assert!(similarity(&embedder, "java", "javascript") < 0.85);
        assert!(similarity(&embedder, "sql", "mysql") < 0.85);
        assert!(similarity(&embedder, "react", "reactor") < 0.85);
    }

    #[test]
    fn test_phrase_vector_is_mean_of_words() {
        let embedder = SubwordEmbedder::default();
        let phrase = embedder.embed_phrase("machine learning").unwrap();
        let word = embedder.embed("machine").unwrap().embedding;
        let score = cosine_similarity(&phrase, &word);
        assert!(score > 0.3 && score < 0.85, "score was {score}");
    }

    #[test]
    fn test_empty_input_has_no_vector() {
        let embedder = SubwordEmbedder::default();
        assert!(embedder.embed("   ").is_none());
        assert!(embedder.embed_phrase("").is_none());
    }

    #[test]
    fn test_cosine_mismatched_lengths() {
        let a = Array1::from_vec(vec![1.0, 0.0]);
        let b = Array1::from_vec(vec![1.0, 0.0, 0.0]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }
}
