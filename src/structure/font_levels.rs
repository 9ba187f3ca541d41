//! Font-size tiers for heading detection.

use crate::model::{HeadingLevel, TextFragment};

/// Minimum drop between the two largest sizes for the second to count as H2.
const H2_GAP: i64 = 200;
/// Minimum drop between the second and third sizes for the third to count as H3.
const H3_GAP: i64 = 100;

/// Round a font size to 0.01pt and return it as an integer key.
///
/// The layout extractor already rounds sizes to two decimals, so keys make
/// equality exact without float comparisons.
pub(crate) fn size_key(size: f64) -> i64 {
    (size * 100.0).round() as i64
}

fn key_to_size(key: i64) -> f64 {
    key as f64 / 100.0
}

/// Font sizes assigned to each heading level for one document.
///
/// This is a coarse two-tier gap heuristic over the distinct sizes, not a
/// clustering: the largest size is H1; the next is H2 only when it is more
/// than 2pt smaller; the third is H3 only when it is more than 1pt smaller
/// than the second. Documents with one or two sizes get synthesized sizes
/// for the missing tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontLevels {
    h1: Option<i64>,
    h2: Option<i64>,
    h3: Option<i64>,
}

impl FontLevels {
    /// Classify the non-null font sizes of a document's fragments.
    pub fn from_fragments(fragments: &[TextFragment]) -> Self {
        Self::from_sizes(fragments.iter().filter_map(|f| f.font_size))
    }

    /// Classify a set of font sizes (duplicates allowed).
    pub fn from_sizes(sizes: impl IntoIterator<Item = f64>) -> Self {
        let mut keys: Vec<i64> = sizes
            .into_iter()
            .filter(|s| s.is_finite())
            .map(size_key)
            .collect();
        keys.sort_unstable_by(|a, b| b.cmp(a));
        keys.dedup();

        let mut levels = FontLevels::default();

        if let Some(&largest) = keys.first() {
            levels.h1 = Some(largest);
        }

        if keys.len() > 1 && keys[0] - keys[1] > H2_GAP {
            levels.h2 = Some(keys[1]);
        } else if keys.len() == 1 {
            levels.h2 = Some(keys[0] - H2_GAP);
        }

        if keys.len() > 2 && keys[1] - keys[2] > H3_GAP {
            levels.h3 = Some(keys[2]);
        } else if keys.len() == 2 {
            levels.h3 = Some(keys[1] - H3_GAP);
        }

        log::debug!(
            "Font levels from {} distinct sizes: H1={:?} H2={:?} H3={:?}",
            keys.len(),
            levels.get(HeadingLevel::H1),
            levels.get(HeadingLevel::H2),
            levels.get(HeadingLevel::H3)
        );

        levels
    }

    /// Font size assigned to a level, if any.
    pub fn get(&self, level: HeadingLevel) -> Option<f64> {
        self.key(level).map(key_to_size)
    }

    fn key(&self, level: HeadingLevel) -> Option<i64> {
        match level {
            HeadingLevel::H1 => self.h1,
            HeadingLevel::H2 => self.h2,
            HeadingLevel::H3 => self.h3,
        }
    }

    /// Check if a size equals any assigned level size.
    pub fn contains_size(&self, size: f64) -> bool {
        let key = size_key(size);
        HeadingLevel::ALL
            .iter()
            .any(|&level| self.key(level) == Some(key))
    }

    /// Level for an exact `(size, bold)` match; bold is required.
    ///
    /// Levels are tried shallowest first.
    pub fn level_for(&self, size: f64, is_bold: bool) -> Option<HeadingLevel> {
        if !is_bold {
            return None;
        }
        let key = size_key(size);
        HeadingLevel::ALL
            .into_iter()
            .find(|&level| self.key(level) == Some(key))
    }

    /// Check if no level has a size (document had no font sizes).
    pub fn is_empty(&self) -> bool {
        self.h1.is_none() && self.h2.is_none() && self.h3.is_none()
    }
}
