//! Document title detection.

use crate::model::TextFragment;

/// Pick the document title from the first page.
///
/// First-page fragments are ranked by font size, then by height on the page
/// (both descending). The title is the first bold fragment at least as large
/// as the top-ranked one; without such a fragment the title is empty.
pub fn detect_title(fragments: &[TextFragment]) -> String {
    let mut first_page: Vec<&TextFragment> = fragments.iter().filter(|f| f.page == 0).collect();
    if first_page.is_empty() {
        return String::new();
    }

    first_page.sort_by(|a, b| {
        size_of(b)
            .total_cmp(&size_of(a))
            .then_with(|| b.y0.total_cmp(&a.y0))
    });

    let top_size = size_of(first_page[0]);
    first_page
        .iter()
        .find(|f| f.is_bold && size_of(f) >= top_size)
        .map(|f| f.trimmed().to_string())
        .unwrap_or_default()
}

/// Font size for ranking; missing or non-finite sizes count as 0.
fn size_of(fragment: &TextFragment) -> f64 {
    fragment
        .font_size
        .filter(|size| size.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(detect_title(&[]), "");
        assert_eq!(detect_title(&[TextFragment::new("x", 1).bold()]), "");
    }

    #[test]
    fn test_largest_bold_wins() {
        let fragments = vec![
            TextFragment::new("Body", 0).with_font_size(10.0),
            TextFragment::new(" Annual Report ", 0)
                .with_font_size(24.0)
                .bold()
                .with_vertical(700.0, 724.0),
            TextFragment::new("Subtitle", 0).with_font_size(16.0).bold(),
        ];
        assert_eq!(detect_title(&fragments), "Annual Report");
    }

    #[test]
    fn test_largest_not_bold_gives_empty() {
        let fragments = vec![
            TextFragment::new("Big Plain", 0).with_font_size(30.0),
            TextFragment::new("Bold Smaller", 0).with_font_size(20.0).bold(),
        ];
        assert_eq!(detect_title(&fragments), "");
    }

    #[test]
    fn test_higher_fragment_wins_tie() {
        let fragments = vec![
            TextFragment::new("Lower", 0)
                .with_font_size(20.0)
                .bold()
                .with_vertical(600.0, 620.0),
            TextFragment::new("Upper", 0)
                .with_font_size(20.0)
                .bold()
                .with_vertical(700.0, 720.0),
        ];
        assert_eq!(detect_title(&fragments), "Upper");
    }

    #[test]
    fn test_nan_geometry_does_not_panic() {
        let fragments: Vec<TextFragment> = (0..30)
            .map(|i| {
                let mut fragment = TextFragment::new(format!("Line {}", i), 0)
                    .with_font_size(if i % 4 == 0 { f64::NAN } else { 12.0 });
                fragment.y0 = if i % 3 == 0 { f64::NAN } else { i as f64 };
                fragment
            })
            .chain(std::iter::once(
                TextFragment::new("Real Title", 0)
                    .with_font_size(20.0)
                    .bold()
                    .with_vertical(700.0, 720.0),
            ))
            .collect();
        assert_eq!(detect_title(&fragments), "Real Title");
    }
}
