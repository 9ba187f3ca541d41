//! Persona-driven relevance ranking.
//!
//! Scoring ([`RelevanceScorer`]), extractive refinement ([`refine_text`])
//! and the collection orchestrator ([`CollectionAnalyzer`]).

mod collection;
mod options;
mod refine;
mod scorer;
mod tfidf;

pub use collection::{rank_sections, CollectionAnalyzer, DocumentDigest, ScoredSection};
pub use options::{AnalyzeOptions, ErrorMode};
pub use refine::{refine_text, split_sentences, SECTION_SENTENCES, SUBSECTION_SENTENCES};
pub use scorer::{
    cosine_similarity, Embedder, EmbeddingStrategy, RelevanceScorer, SimilarityStrategy,
    TfIdfStrategy,
};
pub use tfidf::{tfidf_similarity, tokenize};
