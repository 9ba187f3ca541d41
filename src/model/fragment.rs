//! Text fragments produced by the external PDF layout extractor.

use serde::{Deserialize, Serialize};

/// One line of text with geometry and font metadata.
///
/// Coordinates follow PDF user space: `y` grows upwards, so a larger `y0`
/// means the fragment sits higher on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// The text content
    pub text: String,
    /// Page index (0-based)
    pub page: u32,
    /// Left edge
    pub x0: f64,
    /// Bottom edge
    pub y0: f64,
    /// Right edge
    pub x1: f64,
    /// Top edge
    pub y1: f64,
    /// Average font size in points, if any glyph carried one
    #[serde(default)]
    pub font_size: Option<f64>,
    /// Whether most glyphs use a bold font
    #[serde(default)]
    pub is_bold: bool,
    /// Line height (0 when unknown)
    #[serde(default)]
    pub line_height: f64,
}

impl TextFragment {
    /// Create a fragment with text and page, all geometry zeroed.
    pub fn new(text: impl Into<String>, page: u32) -> Self {
        Self {
            text: text.into(),
            page,
            x0: 0.0,
            y0: 0.0,
            x1: 0.0,
            y1: 0.0,
            font_size: None,
            is_bold: false,
            line_height: 0.0,
        }
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Mark the fragment bold.
    pub fn bold(mut self) -> Self {
        self.is_bold = true;
        self
    }

    /// Set the vertical extent; line height becomes `top - bottom`.
    pub fn with_vertical(mut self, bottom: f64, top: f64) -> Self {
        self.y0 = bottom;
        self.y1 = top;
        self.line_height = top - bottom;
        self
    }

    /// Trimmed text.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Check if the fragment carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Sort fragments into reading order: page ascending, then top to bottom.
///
/// The sort is stable, so fragments sharing a baseline keep their input order.
/// NaN coordinates get a fixed position instead of breaking the order.
pub fn sort_reading_order(fragments: &mut [TextFragment]) {
    fragments.sort_by(|a, b| a.page.cmp(&b.page).then_with(|| b.y0.total_cmp(&a.y0)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_reading_order() {
        let mut fragments = vec![
            TextFragment::new("p1 bottom", 1).with_vertical(100.0, 110.0),
            TextFragment::new("p0 bottom", 0).with_vertical(100.0, 110.0),
            TextFragment::new("p0 top", 0).with_vertical(700.0, 712.0),
            TextFragment::new("p1 top", 1).with_vertical(650.0, 660.0),
        ];
        sort_reading_order(&mut fragments);

        let order: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(order, vec!["p0 top", "p0 bottom", "p1 top", "p1 bottom"]);
    }

    #[test]
    fn test_sort_reading_order_with_nan() {
        let mut fragments: Vec<TextFragment> = (0..40)
            .map(|i| {
                let y = if i % 3 == 0 { f64::NAN } else { i as f64 };
                TextFragment::new(format!("line {}", i), i % 2).with_vertical(y, y + 10.0)
            })
            .collect();
        sort_reading_order(&mut fragments);

        assert_eq!(fragments.len(), 40);
        assert!(fragments.windows(2).all(|w| w[0].page <= w[1].page));
        let page0: Vec<f64> = fragments
            .iter()
            .filter(|f| f.page == 0 && !f.y0.is_nan())
            .map(|f| f.y0)
            .collect();
        assert!(page0.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_fragment_deserialize_defaults() {
        let json = r#"{"text":"Hello","page":0,"x0":1,"y0":2,"x1":3,"y1":4}"#;
        let fragment: TextFragment = serde_json::from_str(json).unwrap();
        assert_eq!(fragment.font_size, None);
        assert!(!fragment.is_bold);
        assert_eq!(fragment.line_height, 0.0);
    }

    #[test]
    fn test_fragment_null_font_size() {
        let json = r#"{"text":"x","page":2,"x0":0,"y0":0,"x1":0,"y1":0,
            "font_size":null,"is_bold":true,"line_height":11.5}"#;
        let fragment: TextFragment = serde_json::from_str(json).unwrap();
        assert_eq!(fragment.font_size, None);
        assert!(fragment.is_bold);
        assert_eq!(fragment.page, 2);
    }

    #[test]
    fn test_blank_fragment() {
        assert!(TextFragment::new("   ", 0).is_blank());
        assert!(!TextFragment::new(" a ", 0).is_blank());
        assert_eq!(TextFragment::new(" a ", 0).trimmed(), "a");
    }
}
