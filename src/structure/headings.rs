//! Heading detection over a document's fragment stream.
//!
//! A fragment becomes a heading candidate through any of three cues:
//! bold text at a tier font size, a numbering/keyword pattern, or a large
//! vertical gap before a short title-cased line. Candidates then need a
//! level, taken from the font tier first and the pattern rules second;
//! candidates without a level are dropped.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

use super::font_levels::FontLevels;
use crate::error::Result;
use crate::model::{Heading, HeadingLevel, TextFragment};

/// Gap multiplier applied to the previous fragment's line height.
const GAP_LINE_HEIGHT_FACTOR: f64 = 1.5;
/// Gap threshold when the previous fragment has no line height.
const DEFAULT_GAP_THRESHOLD: f64 = 10.0;
/// Gap-cued headings must have fewer words than this.
const MAX_GAP_HEADING_WORDS: usize = 10;

/// Writing system a pattern rule targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    /// English numbering and keywords
    Latin,
    /// Japanese chapter markers and keywords
    Japanese,
}

/// A text pattern that marks a heading at a given level.
///
/// Patterns are matched case-insensitively against the start of the
/// trimmed fragment text.
#[derive(Debug, Clone)]
pub struct HeadingRule {
    /// Evaluation order; lower runs first
    pub priority: u16,
    /// Level assigned on match
    pub level: HeadingLevel,
    /// Script the rule targets
    pub script: Script,
    source: String,
    regex: Regex,
}

impl HeadingRule {
    /// Compile a rule. The pattern is implicitly anchored at the start.
    pub fn new(priority: u16, level: HeadingLevel, pattern: &str, script: Script) -> Result<Self> {
        let regex = RegexBuilder::new(&format!("^(?:{})", pattern))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            priority,
            level,
            script,
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written.
    pub fn pattern(&self) -> &str {
        &self.source
    }

    /// Check if the rule matches the start of `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

const BUILTIN_RULES: &[(u16, HeadingLevel, &str, Script)] = &[
    (10, HeadingLevel::H1, r"(Chapter|Section)\s+\d+", Script::Latin),
    (20, HeadingLevel::H1, r"\d+\.?\s+Introduction", Script::Latin),
    (30, HeadingLevel::H1, r"\d+\.?\s+Conclusion", Script::Latin),
    (40, HeadingLevel::H2, r"\d+\.\d+\s+", Script::Latin),
    (50, HeadingLevel::H3, r"\d+\.\d+\.\d+\s+", Script::Latin),
    // Chapter N, Overview, Introduction
    (60, HeadingLevel::H1, r"(第\d+章|概要|はじめに)", Script::Japanese),
    (
        70,
        HeadingLevel::H2,
        r"\d+\.\d+\s*[\x{3040}-\x{30FF}\x{4E00}-\x{9FAF}\x{20}-\x{7F}]+",
        Script::Japanese,
    ),
];

/// The built-in rule set, in priority order.
pub fn default_rules() -> Vec<HeadingRule> {
    static RULES: OnceLock<Vec<HeadingRule>> = OnceLock::new();
    RULES
        .get_or_init(|| {
            BUILTIN_RULES
                .iter()
                .map(|&(priority, level, pattern, script)| {
                    HeadingRule::new(priority, level, pattern, script)
                        .expect("built-in heading pattern compiles")
                })
                .collect()
        })
        .clone()
}

/// Check if `text` equals its own title-cased form.
///
/// Title casing uppercases every cased letter that follows an uncased
/// character and lowercases the rest, so "Results And Discussion" passes
/// while "Results and discussion" and "RESULTS" do not. Text without any
/// cased letter is not title case.
pub fn is_title_case(text: &str) -> bool {
    let mut prev_cased = false;
    let mut seen_cased = false;
    for c in text.chars() {
        let cased = c.is_uppercase() || c.is_lowercase();
        if cased {
            if prev_cased && c.is_uppercase() {
                return false;
            }
            if !prev_cased && c.is_lowercase() {
                return false;
            }
            seen_cased = true;
        }
        prev_cased = cased;
    }
    seen_cased
}

/// Classifies fragments as headings.
#[derive(Debug, Clone)]
pub struct HeadingDetector {
    levels: FontLevels,
    rules: Vec<HeadingRule>,
}

impl HeadingDetector {
    /// Create a detector with precomputed font levels and the built-in rules.
    pub fn new(levels: FontLevels) -> Self {
        Self {
            levels,
            rules: default_rules(),
        }
    }

    /// Create a detector whose font levels come from the fragments themselves.
    pub fn for_fragments(fragments: &[TextFragment]) -> Self {
        Self::new(FontLevels::from_fragments(fragments))
    }

    /// Replace the pattern rules.
    pub fn with_rules(mut self, rules: Vec<HeadingRule>) -> Self {
        self.rules = rules;
        self.rules.sort_by_key(|r| r.priority);
        self
    }

    /// Add a pattern rule, keeping priority order.
    pub fn with_rule(mut self, rule: HeadingRule) -> Self {
        self.rules.push(rule);
        self.rules.sort_by_key(|r| r.priority);
        self
    }

    /// Font levels in use.
    pub fn font_levels(&self) -> &FontLevels {
        &self.levels
    }

    /// Pattern rules in evaluation order.
    pub fn rules(&self) -> &[HeadingRule] {
        &self.rules
    }

    fn matching_rule(&self, text: &str) -> Option<&HeadingRule> {
        self.rules.iter().find(|rule| rule.is_match(text))
    }

    /// Check if a fragment is a heading candidate given its predecessor.
    pub fn is_candidate(&self, fragment: &TextFragment, prev: Option<&TextFragment>) -> bool {
        let text = fragment.trimmed();
        if text.is_empty() {
            return false;
        }

        if fragment.is_bold
            && fragment
                .font_size
                .is_some_and(|size| self.levels.contains_size(size))
        {
            return true;
        }

        if self.matching_rule(text).is_some() {
            return true;
        }

        has_heading_gap(fragment, prev)
    }

    /// Assign a level: exact font tier match first, then the first matching rule.
    pub fn level_of(&self, fragment: &TextFragment) -> Option<HeadingLevel> {
        if let Some(level) = fragment
            .font_size
            .and_then(|size| self.levels.level_for(size, fragment.is_bold))
        {
            return Some(level);
        }
        self.matching_rule(fragment.trimmed()).map(|rule| rule.level)
    }

    /// Detect headings in a fragment stream sorted in reading order.
    pub fn detect(&self, fragments: &[TextFragment]) -> Vec<Heading> {
        let mut headings = Vec::new();

        for (index, fragment) in fragments.iter().enumerate() {
            let prev = index.checked_sub(1).map(|i| &fragments[i]);
            if !self.is_candidate(fragment, prev) {
                continue;
            }

            match self.level_of(fragment) {
                Some(level) => headings.push(Heading {
                    level,
                    text: fragment.trimmed().to_string(),
                    page: fragment.page,
                    fragment_index: index,
                }),
                None => log::debug!(
                    "Dropping heading candidate without level on page {}: {:?}",
                    fragment.page,
                    fragment.trimmed()
                ),
            }
        }

        headings
    }
}

/// Large gap above a short, title-cased line on the same page.
fn has_heading_gap(fragment: &TextFragment, prev: Option<&TextFragment>) -> bool {
    let Some(prev) = prev else {
        return false;
    };
    if prev.page != fragment.page {
        return false;
    }

    // y grows upwards: the gap is from the previous line's bottom to this line's top
    let gap = prev.y0 - fragment.y1;
    let threshold = if prev.line_height > 0.0 {
        prev.line_height * GAP_LINE_HEIGHT_FACTOR
    } else {
        DEFAULT_GAP_THRESHOLD
    };
    if gap <= threshold {
        return false;
    }

    let text = fragment.trimmed();
    text.split_whitespace().count() < MAX_GAP_HEADING_WORDS && is_title_case(text)
}

/// Detect headings using font levels derived from the same fragments.
pub fn detect_headings(fragments: &[TextFragment]) -> Vec<Heading> {
    HeadingDetector::for_fragments(fragments).detect(fragments)
}
