//! Embedding provider seam. The scorer and recommender depend on this trait
//! only; the concrete ONNX backend lives behind the `model` feature so that
//! default builds and tests never touch model weights.

#[cfg(feature = "model")]
pub mod minilm;

use crate::errors::EngineError;

/// Sentence-embedding provider. Implementations must be deterministic for
/// identical input text within a process lifetime.
pub trait Embedder: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EngineError>;

    fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EngineError> {
        texts.iter().map(|t| self.encode(t)).collect()
    }
}

/// Cosine similarity between two vectors; zero when either has zero norm or
/// the dimensions disagree.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors_score_one() {
        let v = vec![0.5, 0.5, 0.5];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_orthogonal_vectors_score_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_opposite_vectors_score_negative_one() {
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_norm_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_mismatched_dimensions_score_zero() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_default_encode_batch_delegates() {
        struct Doubling;
        impl Embedder for Doubling {
            fn encode(&self, text: &str) -> Result<Vec<f32>, crate::errors::EngineError> {
                Ok(vec![text.len() as f32 * 2.0])
            }
        }
        let batch = Doubling
            .encode_batch(&["ab".to_string(), "abc".to_string()])
            .unwrap();
        assert_eq!(batch, vec![vec![4.0], vec![6.0]]);
    }
}
