//! Heading and outline types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse outline depth tier.
///
/// Ordering follows depth: `H1 < H2 < H3`, so the shallowest level compares
/// smallest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading; roots a section
    H1,
    /// Second-level heading; roots a subsection
    H2,
    /// Third-level heading; folded into its subsection's text
    H3,
}

impl HeadingLevel {
    /// All levels, shallowest first.
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];

    /// Label used in JSON output ("H1", "H2", "H3").
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Outline level
    pub level: HeadingLevel,
    /// Trimmed heading text
    pub text: String,
    /// Page index (0-based)
    pub page: u32,
    /// Position of the source fragment in the document's fragment stream
    #[serde(skip)]
    pub fragment_index: usize,
}

/// Outline-mode result for a single document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Detected document title (empty when none found)
    pub title: String,
    /// Headings in document order
    pub outline: Vec<Heading>,
}

impl DocumentOutline {
    /// Count headings at a level.
    pub fn count_level(&self, level: HeadingLevel) -> usize {
        self.outline.iter().filter(|h| h.level == level).count()
    }

    /// Check if no headings were detected.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(HeadingLevel::H1 < HeadingLevel::H2);
        assert!(HeadingLevel::H2 < HeadingLevel::H3);
        assert_eq!(HeadingLevel::H3.to_string(), "H3");
    }

    #[test]
    fn test_heading_json_shape() {
        let heading = Heading {
            level: HeadingLevel::H2,
            text: "1.1 Scope".to_string(),
            page: 3,
            fragment_index: 42,
        };
        let json = serde_json::to_string(&heading).unwrap();
        assert_eq!(json, r#"{"level":"H2","text":"1.1 Scope","page":3}"#);
    }
}
