//! Document structure extraction.
//!
//! Turns a reading-ordered fragment stream into headings, a document
//! outline, and a forest of sections and subsections.

mod font_levels;
mod headings;
mod sections;
mod title;

pub use font_levels::FontLevels;
pub use headings::{default_rules, detect_headings, is_title_case, HeadingDetector, HeadingRule, Script};
pub use sections::{build_sections, SectionBuilder};
pub use title::detect_title;

use crate::model::{DocumentOutline, TextFragment};

/// Extract the title and heading outline of one document.
pub fn extract_outline(fragments: &[TextFragment]) -> DocumentOutline {
    DocumentOutline {
        title: detect_title(fragments),
        outline: detect_headings(fragments),
    }
}
