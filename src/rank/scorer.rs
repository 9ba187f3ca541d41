//! Relevance scoring with an optional embedding strategy and a TF-IDF fallback.
//!
//! The [`RelevanceScorer`] tries its primary strategy (usually dense
//! embeddings behind an [`Embedder`]) and falls back to pairwise TF-IDF. The
//! first failure of the primary disables it for the scorer's lifetime; the
//! fallback is used from then on without retrying.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::tfidf::tfidf_similarity;
use crate::error::{Error, Result};

/// A dense text-embedding backend.
///
/// Implement this to plug a sentence-embedding model into relevance scoring.
pub trait Embedder: Send + Sync {
    /// Name of the backend (for logging).
    fn name(&self) -> &str;

    /// Encode a text as a dense vector.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Check if the backend can currently serve requests.
    fn is_available(&self) -> bool {
        true
    }
}

/// A way of measuring similarity between a candidate text and a query.
pub trait SimilarityStrategy: Send + Sync {
    /// Name of the strategy (for logging).
    fn name(&self) -> &str;

    /// Similarity of `candidate` to `query`, conceptually in `[0, 1]`.
    fn similarity(&self, candidate: &str, query: &str) -> Result<f64>;

    /// Check if the strategy can currently serve requests.
    fn is_available(&self) -> bool {
        true
    }
}

/// Cosine similarity between two vectors; 0.0 for empty or zero vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Pairwise TF-IDF similarity; always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfStrategy;

impl SimilarityStrategy for TfIdfStrategy {
    fn name(&self) -> &str {
        "tfidf"
    }

    fn similarity(&self, candidate: &str, query: &str) -> Result<f64> {
        Ok(tfidf_similarity(query, candidate))
    }
}

/// Cosine similarity of dense embeddings.
#[derive(Clone)]
pub struct EmbeddingStrategy {
    embedder: Arc<dyn Embedder>,
}

impl EmbeddingStrategy {
    /// Wrap an embedding backend.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }
}

impl fmt::Debug for EmbeddingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingStrategy")
            .field("embedder", &self.embedder.name())
            .finish()
    }
}

impl SimilarityStrategy for EmbeddingStrategy {
    fn name(&self) -> &str {
        self.embedder.name()
    }

    fn similarity(&self, candidate: &str, query: &str) -> Result<f64> {
        let query_vec = self.embedder.embed(query)?;
        let candidate_vec = self.embedder.embed(candidate)?;
        if query_vec.is_empty() || query_vec.len() != candidate_vec.len() {
            return Err(Error::Embedding(format!(
                "{} returned vectors of length {} and {}",
                self.embedder.name(),
                query_vec.len(),
                candidate_vec.len()
            )));
        }
        Ok(cosine_similarity(&query_vec, &candidate_vec) as f64)
    }

    fn is_available(&self) -> bool {
        self.embedder.is_available()
    }
}

/// Scores text against a query, degrading from the primary strategy to
/// TF-IDF on the first primary failure.
pub struct RelevanceScorer {
    primary: Option<Arc<dyn SimilarityStrategy>>,
    fallback: TfIdfStrategy,
    primary_disabled: AtomicBool,
}

impl RelevanceScorer {
    /// Create a scorer that only uses TF-IDF.
    pub fn new() -> Self {
        Self {
            primary: None,
            fallback: TfIdfStrategy,
            primary_disabled: AtomicBool::new(false),
        }
    }

    /// Create a scorer with a primary strategy in front of TF-IDF.
    pub fn with_primary(strategy: Arc<dyn SimilarityStrategy>) -> Self {
        Self {
            primary: Some(strategy),
            ..Self::new()
        }
    }

    /// Create a scorer that tries embeddings first.
    pub fn with_embedder(embedder: Arc<dyn Embedder>) -> Self {
        Self::with_primary(Arc::new(EmbeddingStrategy::new(embedder)))
    }

    /// Check if the primary strategy is configured and not disabled.
    pub fn primary_active(&self) -> bool {
        self.primary.is_some() && !self.primary_disabled.load(Ordering::Acquire)
    }

    /// Name of the strategy the next call would try first.
    pub fn active_strategy(&self) -> &str {
        match &self.primary {
            Some(primary) if self.primary_active() => primary.name(),
            _ => self.fallback.name(),
        }
    }

    /// Score `candidate` against `query`.
    ///
    /// Either text empty (or whitespace only) scores exactly 0.0 without
    /// consulting any strategy.
    pub fn score(&self, candidate: &str, query: &str) -> f64 {
        if candidate.trim().is_empty() || query.trim().is_empty() {
            return 0.0;
        }

        if let Some(primary) = &self.primary {
            if !self.primary_disabled.load(Ordering::Acquire) && primary.is_available() {
                match primary.similarity(candidate, query) {
                    Ok(score) => return score,
                    Err(e) => self.disable_primary(primary.name(), &e),
                }
            }
        }

        // TF-IDF never fails
        self.fallback
            .similarity(candidate, query)
            .unwrap_or_default()
    }

    fn disable_primary(&self, name: &str, error: &Error) {
        // Only the first failing caller logs
        if !self.primary_disabled.swap(true, Ordering::AcqRel) {
            log::warn!(
                "Similarity strategy {} failed, falling back to TF-IDF for the rest of the run: {}",
                name,
                error
            );
        }
    }
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RelevanceScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelevanceScorer")
            .field("primary", &self.primary.as_ref().map(|p| p.name().to_string()))
            .field(
                "primary_disabled",
                &self.primary_disabled.load(Ordering::Acquire),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    struct FailingEmbedder {
        calls: AtomicUsize,
    }

    impl Embedder for FailingEmbedder {
        fn name(&self) -> &str {
            "failing"
        }

        fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::Embedding("model not loaded".to_string()))
        }
    }

    struct ConstantStrategy(f64);

    impl SimilarityStrategy for ConstantStrategy {
        fn name(&self) -> &str {
            "constant"
        }

        fn similarity(&self, _candidate: &str, _query: &str) -> Result<f64> {
            Ok(self.0)
        }
    }

    struct OfflineEmbedder;

    impl Embedder for OfflineEmbedder {
        fn name(&self) -> &str {
            "offline"
        }

        fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        fn is_available(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        let scorer = RelevanceScorer::with_primary(Arc::new(ConstantStrategy(0.9)));
        assert_eq!(scorer.score("", "query"), 0.0);
        assert_eq!(scorer.score("text", ""), 0.0);
        assert_eq!(scorer.score("  ", "query"), 0.0);
    }

    #[test]
    fn test_primary_used_when_healthy() {
        let scorer = RelevanceScorer::with_primary(Arc::new(ConstantStrategy(0.42)));
        assert_eq!(scorer.score("anything", "else"), 0.42);
        assert!(scorer.primary_active());
        assert_eq!(scorer.active_strategy(), "constant");
    }

    #[test]
    fn test_failure_disables_primary_permanently() {
        let embedder = Arc::new(FailingEmbedder {
            calls: AtomicUsize::new(0),
        });
        let scorer = RelevanceScorer::with_embedder(embedder.clone());

        let first = scorer.score("revenue grew", "revenue figures");
        assert!(first > 0.0);
        assert!(!scorer.primary_active());
        assert_eq!(scorer.active_strategy(), "tfidf");

        scorer.score("revenue grew", "revenue figures");
        // Query embedding failed once, never retried
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unavailable_embedder_skipped() {
        let scorer = RelevanceScorer::with_embedder(Arc::new(OfflineEmbedder));
        let s = scorer.score("weather", "revenue");
        assert_eq!(s, 0.0);
        // Unavailability is not a failure
        assert!(scorer.primary_active());
    }

    #[test]
    fn test_tfidf_only() {
        let scorer = RelevanceScorer::new();
        assert_eq!(scorer.active_strategy(), "tfidf");
        assert!(!scorer.primary_active());
        let related = scorer.score("Revenue grew 10% this quarter.", "Analyst find revenue figures");
        let unrelated = scorer.score("The weather was pleasant.", "Analyst find revenue figures");
        assert!(related > unrelated);
    }
}
