//! Persona-driven analysis of a document collection.
//!
//! Each document is turned into a section forest, every section is scored
//! against the shared persona + job query, and subsections are refined into
//! short extractive summaries. Ranks are assigned once, after all documents
//! are done, by a single stable sort over the raw scores.

use std::sync::Arc;

use chrono::Utc;
use rayon::prelude::*;

use super::options::{AnalyzeOptions, ErrorMode};
use super::refine::refine_text;
use super::scorer::RelevanceScorer;
use crate::error::Result;
use crate::model::{
    CollectionInput, CollectionMetadata, CollectionResult, DocumentRef, ExtractedSection, Section,
    SubsectionAnalysis,
};
use crate::source::FragmentSource;
use crate::structure::build_sections;

/// A section with its raw relevance score, before ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSection {
    /// Source document filename
    pub document: String,
    /// Page of the section heading
    pub page_number: u32,
    /// Section heading text
    pub section_title: String,
    /// Similarity to the query
    pub score: f64,
}

/// Everything one document contributes to the collection result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentDigest {
    /// Scored sections in discovery order
    pub sections: Vec<ScoredSection>,
    /// Refined subsections in discovery order
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

/// Sort sections by score (descending) and assign 1-based ranks.
///
/// The sort is stable: equal scores keep their input order, which is
/// document order, then page order, then discovery order.
pub fn rank_sections(mut scored: Vec<ScoredSection>) -> Vec<ExtractedSection> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
        .into_iter()
        .enumerate()
        .map(|(i, s)| ExtractedSection {
            document: s.document,
            page_number: s.page_number,
            section_title: s.section_title,
            importance_rank: (i + 1) as u32,
        })
        .collect()
}

/// Analyzes document collections against a persona and job.
pub struct CollectionAnalyzer {
    source: Arc<dyn FragmentSource>,
    scorer: RelevanceScorer,
    options: AnalyzeOptions,
}

impl CollectionAnalyzer {
    /// Create an analyzer reading fragments from `source`, scoring with TF-IDF.
    pub fn new(source: Arc<dyn FragmentSource>) -> Self {
        Self {
            source,
            scorer: RelevanceScorer::new(),
            options: AnalyzeOptions::default(),
        }
    }

    /// Use a specific scorer (e.g. one with an embedding backend).
    pub fn with_scorer(mut self, scorer: RelevanceScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Set analyze options.
    pub fn with_options(mut self, options: AnalyzeOptions) -> Self {
        self.options = options;
        self
    }

    /// The scorer in use.
    pub fn scorer(&self) -> &RelevanceScorer {
        &self.scorer
    }

    /// The options in use.
    pub fn options(&self) -> &AnalyzeOptions {
        &self.options
    }

    /// Analyze a collection.
    ///
    /// In lenient mode a document whose fragments cannot be loaded is logged
    /// and contributes nothing; in strict mode the first such failure aborts
    /// the run.
    pub fn analyze(&self, input: &CollectionInput) -> Result<CollectionResult> {
        input.validate()?;
        let query = input.query();

        log::debug!(
            "Analyzing {} documents with {} scoring",
            input.documents.len(),
            self.scorer.active_strategy()
        );

        let digests: Vec<DocumentDigest> = if self.options.parallel {
            input
                .documents
                .par_iter()
                .map(|doc| self.process_document(doc, &query))
                .collect::<Result<_>>()?
        } else {
            input
                .documents
                .iter()
                .map(|doc| self.process_document(doc, &query))
                .collect::<Result<_>>()?
        };

        let mut scored = Vec::new();
        let mut subsection_analysis = Vec::new();
        for digest in digests {
            scored.extend(digest.sections);
            subsection_analysis.extend(digest.subsection_analysis);
        }

        Ok(CollectionResult {
            metadata: CollectionMetadata {
                input_documents: input.documents.clone(),
                persona: input.persona.clone(),
                job_to_be_done: input.job_to_be_done.clone(),
                processing_timestamp: Utc::now(),
            },
            extracted_sections: rank_sections(scored),
            subsection_analysis,
        })
    }

    fn process_document(&self, doc: &DocumentRef, query: &str) -> Result<DocumentDigest> {
        let fragments = match self.source.load(&doc.filename) {
            Ok(fragments) => fragments,
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("Skipping {}: {}", doc.filename, e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let sections = build_sections(&fragments);
        log::debug!(
            "{}: {} fragments, {} sections",
            doc.filename,
            fragments.len(),
            sections.len()
        );
        Ok(self.digest_sections(&doc.filename, &sections, query))
    }

    /// Score and refine one document's sections.
    pub fn digest_sections(
        &self,
        document: &str,
        sections: &[Section],
        query: &str,
    ) -> DocumentDigest {
        let mut digest = DocumentDigest::default();

        for section in sections.iter().filter(|s| s.has_content()) {
            digest.sections.push(ScoredSection {
                document: document.to_string(),
                page_number: section.page_number,
                section_title: section.title.clone(),
                score: self.scorer.score(&section.text, query),
            });

            if section.subsections.is_empty() {
                let refined = refine_text(
                    &self.scorer,
                    &section.text,
                    query,
                    self.options.section_sentences,
                );
                if !refined.is_empty() {
                    digest.subsection_analysis.push(SubsectionAnalysis {
                        document: document.to_string(),
                        page_number: section.page_number,
                        refined_text: refined,
                    });
                }
                continue;
            }

            for subsection in section.subsections.iter().filter(|s| !s.text.is_empty()) {
                digest.subsection_analysis.push(SubsectionAnalysis {
                    document: document.to_string(),
                    page_number: subsection.page_number,
                    refined_text: refine_text(
                        &self.scorer,
                        &subsection.text,
                        query,
                        self.options.subsection_sentences,
                    ),
                });
            }
        }

        digest
    }
}
