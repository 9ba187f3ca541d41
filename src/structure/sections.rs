//! Section forest construction.
//!
//! The builder walks the fragment stream once, folding each fragment into a
//! two-slot state: the open section and the open subsection. H1 headings
//! open sections, H2 headings open subsections under the open section, and
//! H3 headings are folded into the open subsection's text. Everything else
//! is body text for the innermost open container.

use std::collections::HashMap;

use super::headings::detect_headings;
use crate::model::{
    append_text, normalize_whitespace, Heading, HeadingLevel, Section, Subsection, TextFragment,
};

/// Fold state while building the forest.
#[derive(Debug, Default)]
struct ForestState {
    forest: Vec<Section>,
    open_section: Option<Section>,
    open_subsection: Option<Subsection>,
}

impl ForestState {
    fn close_subsection(&mut self) {
        if let Some(subsection) = self.open_subsection.take() {
            // A subsection is only ever opened under an open section
            if let Some(section) = self.open_section.as_mut() {
                section.subsections.push(subsection);
            }
        }
    }

    fn close_section(&mut self) {
        self.close_subsection();
        if let Some(section) = self.open_section.take() {
            self.forest.push(section);
        }
    }

    fn step(mut self, fragment: &TextFragment, heading: Option<&Heading>) -> Self {
        let Some(heading) = heading else {
            if let Some(subsection) = self.open_subsection.as_mut() {
                append_text(&mut subsection.text, &fragment.text);
            } else if let Some(section) = self.open_section.as_mut() {
                append_text(&mut section.text, &fragment.text);
            }
            return self;
        };

        match heading.level {
            HeadingLevel::H1 => {
                self.close_section();
                self.open_section = Some(Section::new(heading.text.as_str(), heading.page));
            }
            HeadingLevel::H2 if self.open_section.is_some() => {
                self.close_subsection();
                self.open_subsection = Some(Subsection::new(heading.text.as_str(), heading.page));
            }
            HeadingLevel::H3 if self.open_subsection.is_some() => {
                if let Some(subsection) = self.open_subsection.as_mut() {
                    append_text(&mut subsection.text, &fragment.text);
                }
            }
            level => log::debug!(
                "Dropping {} heading with no open parent: {:?}",
                level,
                heading.text
            ),
        }
        self
    }

    fn finish(mut self) -> Vec<Section> {
        self.close_section();
        for section in &mut self.forest {
            section.text = normalize_whitespace(&section.text);
            for subsection in &mut section.subsections {
                subsection.text = normalize_whitespace(&subsection.text);
            }
        }
        self.forest
    }
}

/// Builds a section forest from fragments and their detected headings.
#[derive(Debug, Clone)]
pub struct SectionBuilder<'a> {
    headings: HashMap<usize, &'a Heading>,
}

impl<'a> SectionBuilder<'a> {
    /// Create a builder for headings detected on the same fragment stream.
    pub fn new(headings: &'a [Heading]) -> Self {
        Self {
            headings: headings.iter().map(|h| (h.fragment_index, h)).collect(),
        }
    }

    /// Heading for the fragment at `index`, matched on position, page and text.
    fn heading_at(&self, index: usize, fragment: &TextFragment) -> Option<&'a Heading> {
        self.headings
            .get(&index)
            .copied()
            .filter(|h| h.page == fragment.page && h.text == fragment.trimmed())
    }

    /// Fold the whole fragment stream into a forest of sections.
    pub fn build(&self, fragments: &[TextFragment]) -> Vec<Section> {
        let state = fragments
            .iter()
            .enumerate()
            .fold(ForestState::default(), |state, (index, fragment)| {
                state.step(fragment, self.heading_at(index, fragment))
            });
        state.finish()
    }
}

/// Detect headings and build the section forest in one call.
pub fn build_sections(fragments: &[TextFragment]) -> Vec<Section> {
    let headings = detect_headings(fragments);
    SectionBuilder::new(&headings).build(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(level: HeadingLevel, text: &str, page: u32, index: usize) -> Heading {
        Heading {
            level,
            text: text.to_string(),
            page,
            fragment_index: index,
        }
    }

    fn body(text: &str) -> TextFragment {
        TextFragment::new(text, 0)
    }

    #[test]
    fn test_intro_scenario() {
        let fragments = vec![
            TextFragment::new("1. Introduction", 0)
                .with_font_size(18.0)
                .bold()
                .with_vertical(700.0, 718.0),
            TextFragment::new("Body text follows.", 0)
                .with_font_size(10.0)
                .with_vertical(680.0, 690.0),
        ];
        let sections = build_sections(&fragments);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "1. Introduction");
        assert_eq!(sections[0].text, "Body text follows.");
        assert!(sections[0].subsections.is_empty());
    }

    #[test]
    fn test_state_transitions() {
        let fragments = vec![
            body("preamble is discarded"),
            body("Intro"),
            body("intro  body"),
            body("Scope"),
            body("scope body"),
            body("Detail"),
            body("more scope"),
            body("Methods"),
            body("methods body"),
        ];
        let headings = vec![
            heading(HeadingLevel::H1, "Intro", 0, 1),
            heading(HeadingLevel::H2, "Scope", 0, 3),
            heading(HeadingLevel::H3, "Detail", 0, 5),
            heading(HeadingLevel::H1, "Methods", 0, 7),
        ];
        let sections = SectionBuilder::new(&headings).build(&fragments);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Intro");
        assert_eq!(sections[0].text, "intro body");
        assert_eq!(sections[0].subsections.len(), 1);
        assert_eq!(sections[0].subsections[0].title, "Scope");
        assert_eq!(
            sections[0].subsections[0].text,
            "scope body Detail more scope"
        );
        assert_eq!(sections[1].title, "Methods");
        assert_eq!(sections[1].text, "methods body");
        assert!(sections[1].subsections.is_empty());
    }

    #[test]
    fn test_orphan_headings_dropped() {
        let fragments = vec![body("Orphan"), body("Deep"), body("Top"), body("Deep2")];
        let headings = vec![
            heading(HeadingLevel::H2, "Orphan", 0, 0),
            heading(HeadingLevel::H3, "Deep", 0, 1),
            heading(HeadingLevel::H1, "Top", 0, 2),
            heading(HeadingLevel::H3, "Deep2", 0, 3),
        ];
        let sections = SectionBuilder::new(&headings).build(&fragments);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].text, "");
        assert!(sections[0].subsections.is_empty());
    }

    #[test]
    fn test_subsections_keep_order() {
        let fragments = vec![
            body("A"),
            body("A.1"),
            body("one"),
            body("A.2"),
            body("two"),
        ];
        let headings = vec![
            heading(HeadingLevel::H1, "A", 0, 0),
            heading(HeadingLevel::H2, "A.1", 0, 1),
            heading(HeadingLevel::H2, "A.2", 0, 3),
        ];
        let sections = SectionBuilder::new(&headings).build(&fragments);
        let titles: Vec<&str> = sections[0]
            .subsections
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, vec!["A.1", "A.2"]);
        assert_eq!(sections[0].subsections[1].text, "two");
    }

    #[test]
    fn test_same_text_elsewhere_is_body() {
        // Only the fragment the heading came from opens a section
        let fragments = vec![body("Summary"), body("text"), body("Summary")];
        let headings = vec![heading(HeadingLevel::H1, "Summary", 0, 0)];
        let sections = SectionBuilder::new(&headings).build(&fragments);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].text, "text Summary");
    }

    #[test]
    fn test_page_numbers_from_headings() {
        let fragments = vec![
            TextFragment::new("Chapter 1", 2),
            TextFragment::new("2.1 Part", 3),
            TextFragment::new("words", 3),
        ];
        let sections = build_sections(&fragments);
        assert_eq!(sections[0].page_number, 2);
        assert_eq!(sections[0].subsections[0].page_number, 3);
        assert_eq!(sections[0].subsections[0].text, "words");
    }

    #[test]
    fn test_empty_stream() {
        assert!(build_sections(&[]).is_empty());
    }
}
