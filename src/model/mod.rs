//! Data model shared by structure extraction and relevance ranking.
//!
//! Fragments come in from the external layout extractor; headings and the
//! section forest are derived from them; the collection types describe the
//! persona-driven digest.

mod collection;
mod fragment;
mod outline;
mod section;

pub use collection::{
    CollectionInput, CollectionMetadata, CollectionResult, DocumentRef, ExtractedSection,
    JobToBeDone, Persona, SubsectionAnalysis,
};
pub use fragment::{sort_reading_order, TextFragment};
pub use outline::{DocumentOutline, Heading, HeadingLevel};
pub use section::{normalize_whitespace, Section, Subsection};

pub(crate) use section::append_text;
