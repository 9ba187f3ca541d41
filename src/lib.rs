//! # docsift
//!
//! Document outlines and persona-driven digests from PDF layout fragments.
//!
//! The crate consumes text fragments (one line of text with page, bounding
//! box, font size and boldness) produced by an external PDF layout
//! extractor, and offers two modes:
//!
//! - **Outline mode**: detect the title and H1/H2/H3 headings of a document.
//! - **Collection mode**: split every document into sections, rank the
//!   sections against a persona and job, and refine subsections into short
//!   extractive summaries.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsift::{outline_from_file, render};
//!
//! fn main() -> docsift::Result<()> {
//!     let outline = outline_from_file("report.fragments.json")?;
//!     println!("{}", render::to_json(&outline, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Heuristic heading detection**: font tiers, numbering patterns
//!   (including Japanese chapter markers), and vertical spacing
//! - **Section forest**: H1 sections owning H2 subsections
//! - **Relevance ranking**: pluggable embedding scorer with a pairwise
//!   TF-IDF fallback
//! - **Parallel processing**: uses Rayon across documents

pub mod error;
pub mod model;
pub mod rank;
pub mod render;
pub mod source;
pub mod structure;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    CollectionInput, CollectionMetadata, CollectionResult, DocumentOutline, DocumentRef,
    ExtractedSection, Heading, HeadingLevel, JobToBeDone, Persona, Section, Subsection,
    SubsectionAnalysis, TextFragment,
};
pub use rank::{AnalyzeOptions, CollectionAnalyzer, Embedder, ErrorMode, RelevanceScorer};
pub use render::JsonFormat;
pub use source::{FragmentSource, JsonFragmentSource, MemoryFragmentSource};
pub use structure::{build_sections, detect_headings, extract_outline};

use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Extract the outline of a document from its fragment dump.
///
/// A dump that cannot be read or parsed is logged and yields an empty
/// outline. Use [`outline_from_file_with_mode`] with [`ErrorMode::Strict`]
/// to get the error instead.
///
/// # Example
///
/// ```no_run
/// use docsift::outline_from_file;
///
/// let outline = outline_from_file("report.fragments.json").unwrap();
/// println!("{} headings", outline.outline.len());
/// ```
pub fn outline_from_file<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    outline_from_file_with_mode(path, ErrorMode::Lenient)
}

/// Extract the outline of a document, handling load failures per `mode`.
pub fn outline_from_file_with_mode<P: AsRef<Path>>(
    path: P,
    mode: ErrorMode,
) -> Result<DocumentOutline> {
    let fragments = load_fragments(path.as_ref(), mode)?;
    Ok(extract_outline(&fragments))
}

/// Build the section forest of a document from its fragment dump.
///
/// Load failures yield an empty forest, as with [`outline_from_file`].
pub fn sections_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Section>> {
    sections_from_file_with_mode(path, ErrorMode::Lenient)
}

/// Build the section forest of a document, handling load failures per `mode`.
pub fn sections_from_file_with_mode<P: AsRef<Path>>(
    path: P,
    mode: ErrorMode,
) -> Result<Vec<Section>> {
    let fragments = load_fragments(path.as_ref(), mode)?;
    Ok(build_sections(&fragments))
}

fn load_fragments(path: &Path, mode: ErrorMode) -> Result<Vec<TextFragment>> {
    match source::read_fragments(path) {
        Ok(fragments) => Ok(fragments),
        Err(e) if mode == ErrorMode::Lenient => {
            log::warn!("Treating {} as empty: {}", path.display(), e);
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// Analyze a collection whose fragment dumps live in `fragments_dir`.
///
/// # Example
///
/// ```no_run
/// use docsift::{analyze_collection, CollectionInput, DocumentRef, JobToBeDone, Persona};
///
/// let input = CollectionInput::new(
///     vec![DocumentRef::new("q3.pdf", "Q3 Report")],
///     Persona::new("Investment Analyst"),
///     JobToBeDone::new("Summarize revenue trends"),
/// );
/// let result = analyze_collection(&input, "./fragments").unwrap();
/// println!("{} sections ranked", result.extracted_sections.len());
/// ```
pub fn analyze_collection<P: AsRef<Path>>(
    input: &CollectionInput,
    fragments_dir: P,
) -> Result<CollectionResult> {
    let source = JsonFragmentSource::new(fragments_dir.as_ref());
    CollectionAnalyzer::new(Arc::new(source)).analyze(input)
}

/// Read collection input JSON from `input_path` and analyze it.
pub fn analyze_collection_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    fragments_dir: Q,
) -> Result<CollectionResult> {
    let data = fs::read_to_string(input_path)?;
    let input = CollectionInput::from_json(&data)?;
    analyze_collection(&input, fragments_dir)
}
