//! Extractive refinement: keep the sentences most relevant to a query.

use super::scorer::RelevanceScorer;

/// Sentences kept when refining a subsection.
pub const SUBSECTION_SENTENCES: usize = 2;
/// Sentences kept when refining a whole section that has no subsections.
pub const SECTION_SENTENCES: usize = 5;

/// Split text on periods, trimming and dropping empty pieces.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Select up to `max_sentences` of the most query-relevant sentences.
///
/// Selection is by score (ties keep the earlier sentence); the output keeps
/// the selected sentences in their original order, joined with `". "` and
/// ending with a period. An empty query returns the first sentence as is.
/// `max_sentences == 0` keeps every sentence.
pub fn refine_text(
    scorer: &RelevanceScorer,
    text: &str,
    query: &str,
    max_sentences: usize,
) -> String {
    let sentences = split_sentences(text);
    let Some(&first) = sentences.first() else {
        return String::new();
    };
    if query.trim().is_empty() {
        return first.to_string();
    }

    let scores: Vec<f64> = sentences.iter().map(|s| scorer.score(s, query)).collect();

    let mut ranked: Vec<usize> = (0..sentences.len()).collect();
    ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let keep = if max_sentences == 0 {
        sentences.len()
    } else {
        max_sentences.min(sentences.len())
    };
    let mut selected: Vec<usize> = ranked.into_iter().take(keep).collect();
    selected.sort_unstable();

    let mut refined = selected
        .iter()
        .map(|&i| sentences[i])
        .collect::<Vec<_>>()
        .join(". ");
    if !refined.ends_with('.') {
        refined.push('.');
    }
    refined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        assert_eq!(
            split_sentences(" One. Two..  Three "),
            vec!["One", "Two", "Three"]
        );
        assert!(split_sentences(" . . ").is_empty());
    }

    #[test]
    fn test_empty_text() {
        let scorer = RelevanceScorer::new();
        assert_eq!(refine_text(&scorer, "", "query", 2), "");
        assert_eq!(refine_text(&scorer, "...", "query", 2), "");
    }

    #[test]
    fn test_empty_query_returns_first_sentence() {
        let scorer = RelevanceScorer::new();
        assert_eq!(refine_text(&scorer, "First one. Second.", "  ", 2), "First one");
    }

    #[test]
    fn test_all_sentences_when_k_covers() {
        let scorer = RelevanceScorer::new();
        let text = "Alpha beta. Gamma delta. Epsilon zeta.";
        let refined = refine_text(&scorer, text, "unrelated query", 5);
        assert_eq!(refined, "Alpha beta. Gamma delta. Epsilon zeta.");
        assert_eq!(refine_text(&scorer, text, "unrelated query", 0), refined);
    }

    #[test]
    fn test_selects_relevant_in_original_order() {
        let scorer = RelevanceScorer::new();
        let text = "Hotels near the beach are expensive. \
                    The museum opens at nine. \
                    Cheap hotels cluster near the station. \
                    Trains run hourly.";
        let refined = refine_text(&scorer, text, "cheap hotels", 2);
        assert_eq!(
            refined,
            "Hotels near the beach are expensive. Cheap hotels cluster near the station."
        );
    }

    #[test]
    fn test_ties_prefer_earlier() {
        let scorer = RelevanceScorer::new();
        let refined = refine_text(&scorer, "Aa bb. Cc dd. Ee ff.", "zz yy", 1);
        assert_eq!(refined, "Aa bb.");
    }
}
