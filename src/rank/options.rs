//! Collection analysis options.

use super::refine::{SECTION_SENTENCES, SUBSECTION_SENTENCES};

/// Options for analyzing a document collection.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Error handling mode for per-document failures
    pub error_mode: ErrorMode,

    /// Whether to process documents in parallel
    pub parallel: bool,

    /// Sentences kept per refined subsection (0 = all)
    pub subsection_sentences: usize,

    /// Sentences kept when a section without subsections is refined (0 = all)
    pub section_sentences: usize,
}

impl AnalyzeOptions {
    /// Create new analyze options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail the whole run on the first document error.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set sentences kept per subsection.
    pub fn with_subsection_sentences(mut self, count: usize) -> Self {
        self.subsection_sentences = count;
        self
    }

    /// Set sentences kept per whole-section refinement.
    pub fn with_section_sentences(mut self, count: usize) -> Self {
        self.section_sentences = count;
        self
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            parallel: true,
            subsection_sentences: SUBSECTION_SENTENCES,
            section_sentences: SECTION_SENTENCES,
        }
    }
}

/// Error handling mode for per-document failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any document error
    Strict,
    /// Log the failure, treat the document as empty, and continue
    #[default]
    Lenient,
}
