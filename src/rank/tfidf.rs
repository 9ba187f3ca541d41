//! Pairwise TF-IDF cosine similarity.
//!
//! The vector space is fit over exactly the two strings being compared, so
//! every call is independent of any corpus: a term shared by both strings
//! gets the minimum idf, a term unique to one gets a higher weight.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Words of two or more word characters.
fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern compiles"))
}

/// Lowercased tokens after NFKC normalization.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    token_regex()
        .find_iter(&normalized)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn term_counts(text: &str) -> BTreeMap<String, f64> {
    let mut counts = BTreeMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0.0) += 1.0;
    }
    counts
}

/// Smoothed idf: `ln((1 + n) / (1 + df)) + 1`.
fn idf(documents: f64, document_frequency: f64) -> f64 {
    ((1.0 + documents) / (1.0 + document_frequency)).ln() + 1.0
}

fn weighted_norm(counts: &BTreeMap<String, f64>, idf_of: &BTreeMap<&str, f64>) -> f64 {
    counts
        .iter()
        .map(|(term, count)| {
            let w = count * idf_of[term.as_str()];
            w * w
        })
        .sum::<f64>()
        .sqrt()
}

/// Cosine similarity of two texts in a TF-IDF space fit over just the pair.
///
/// Returns 0.0 when either text has no tokens.
pub fn tfidf_similarity(a: &str, b: &str) -> f64 {
    let counts_a = term_counts(a);
    let counts_b = term_counts(b);
    if counts_a.is_empty() || counts_b.is_empty() {
        return 0.0;
    }

    let vocabulary: BTreeSet<&str> = counts_a
        .keys()
        .chain(counts_b.keys())
        .map(String::as_str)
        .collect();
    let idf_of: BTreeMap<&str, f64> = vocabulary
        .into_iter()
        .map(|term| {
            let df = counts_a.contains_key(term) as u8 + counts_b.contains_key(term) as u8;
            (term, idf(2.0, df as f64))
        })
        .collect();

    let dot: f64 = counts_a
        .iter()
        .filter_map(|(term, count_a)| {
            counts_b.get(term).map(|count_b| {
                let w = idf_of[term.as_str()];
                count_a * w * count_b * w
            })
        })
        .sum();

    let norm_a = weighted_norm(&counts_a, &idf_of);
    let norm_b = weighted_norm(&counts_b, &idf_of);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
