//! Section forest types built from detected headings.

use serde::{Deserialize, Serialize};

use super::HeadingLevel;

/// An H1-rooted container of body text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text that opened the section
    pub title: String,
    /// Accumulated body text (whitespace-normalized once building ends)
    pub text: String,
    /// Page of the opening heading (0-based)
    pub page_number: u32,
    /// Always `H1`
    pub level: HeadingLevel,
    /// Subsections in discovery order
    pub subsections: Vec<Subsection>,
}

impl Section {
    /// Create an empty section.
    pub fn new(title: impl Into<String>, page_number: u32) -> Self {
        Self {
            title: title.into(),
            text: String::new(),
            page_number,
            level: HeadingLevel::H1,
            subsections: Vec::new(),
        }
    }

    /// Set the section's body text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add a subsection.
    pub fn with_subsection(mut self, subsection: Subsection) -> Self {
        self.subsections.push(subsection);
        self
    }

    /// Check if the section has both a title and body text.
    pub fn has_content(&self) -> bool {
        !self.title.is_empty() && !self.text.is_empty()
    }
}

/// An H2-rooted container of body text, owned by a [`Section`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    /// Heading text that opened the subsection
    pub title: String,
    /// Accumulated body text, including folded H3 headings
    pub text: String,
    /// Page of the opening heading (0-based)
    pub page_number: u32,
    /// Always `H2`
    pub level: HeadingLevel,
}

impl Subsection {
    /// Create an empty subsection.
    pub fn new(title: impl Into<String>, page_number: u32) -> Self {
        Self {
            title: title.into(),
            text: String::new(),
            page_number,
            level: HeadingLevel::H2,
        }
    }

    /// Set the subsection's body text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// Append a trimmed piece of text to an accumulator, space-separated.
pub(crate) fn append_text(target: &mut String, piece: &str) {
    target.push(' ');
    target.push_str(piece.trim());
}

/// Collapse whitespace runs to single spaces and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \n\t b   c "), "a b c");
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn test_section_has_content() {
        assert!(!Section::new("Intro", 0).has_content());
        assert!(!Section::new("", 0).with_text("body").has_content());
        assert!(Section::new("Intro", 0).with_text("body").has_content());
    }

    #[test]
    fn test_levels_fixed() {
        assert_eq!(Section::new("a", 0).level, HeadingLevel::H1);
        assert_eq!(Subsection::new("b", 0).level, HeadingLevel::H2);
    }
}
