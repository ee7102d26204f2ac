//! # Validity Classification
//!
//! Decides whether a cleaned comment value survives, and why not.
//!
//! Two policies are available. [`ValidityPolicy::UnicodeAdaptive`] checks for
//! meaningful content first and then applies a script-dependent minimum
//! length. [`ValidityPolicy::StrictAscii`] applies the flat minimum length and
//! then rejects anything without an ASCII letter, which discards every
//! comment written in a non-Latin script.

use crate::script::{adaptive_min_length, classify_script};
use crate::transform::strip_emoji_str;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::sync::LazyLock;

static RE_LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{L}").unwrap());

/// Text made only of punctuation, symbols and separators (whitespace ignored).
static RE_ONLY_PUNCT_SYMBOL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{Po}\p{Ps}\p{Pe}\p{Pd}\p{Pc}\p{Sk}\p{Sm}\p{Zs}\s]*$").unwrap()
});

static RE_ASCII_LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-zA-Z]").unwrap());

/// Why a row was excluded from the cleaned output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalCategory {
    /// Null, empty or whitespace-only value
    BlankEmpty,
    /// Shorter than the (possibly script-adapted) minimum length
    TooShort,
    /// No meaningful linguistic content
    OnlySpecialChars,
    /// Nothing but emoji
    OnlyEmojis,
}

impl RemovalCategory {
    pub const ALL: [RemovalCategory; 4] = [
        RemovalCategory::BlankEmpty,
        RemovalCategory::TooShort,
        RemovalCategory::OnlySpecialChars,
        RemovalCategory::OnlyEmojis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RemovalCategory::BlankEmpty => "blank_empty",
            RemovalCategory::TooShort => "too_short",
            RemovalCategory::OnlySpecialChars => "only_special_chars",
            RemovalCategory::OnlyEmojis => "only_emojis",
        }
    }
}

impl fmt::Display for RemovalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which validity rule set to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidityPolicy {
    /// Meaningful-content test, then script-adaptive minimum length.
    #[default]
    UnicodeAdaptive,
    /// Flat minimum length, then require at least one ASCII letter.
    StrictAscii,
}

/// Outcome of classifying one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    Reject(RemovalCategory),
}

impl Verdict {
    pub fn is_keep(&self) -> bool {
        matches!(self, Verdict::Keep)
    }

    /// The removal reason, if rejected.
    pub fn category(&self) -> Option<RemovalCategory> {
        match self {
            Verdict::Keep => None,
            Verdict::Reject(category) => Some(*category),
        }
    }
}

/// Per-category removal tallies.
///
/// A plain value: fold verdicts into it, and [`merge`](Self::merge) partial
/// tallies from separate workers or datasets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalCounts {
    pub blank_empty: usize,
    pub too_short: usize,
    pub only_special_chars: usize,
    pub only_emojis: usize,
}

impl RemovalCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one removal.
    pub fn record(&mut self, category: RemovalCategory) {
        self.add_n(category, 1);
    }

    /// Count `n` removals of the same kind.
    pub fn add_n(&mut self, category: RemovalCategory, n: usize) {
        *self.slot_mut(category) += n;
    }

    /// Count a verdict; kept rows are ignored.
    pub fn observe(&mut self, verdict: Verdict) {
        if let Verdict::Reject(category) = verdict {
            self.record(category);
        }
    }

    pub fn get(&self, category: RemovalCategory) -> usize {
        match category {
            RemovalCategory::BlankEmpty => self.blank_empty,
            RemovalCategory::TooShort => self.too_short,
            RemovalCategory::OnlySpecialChars => self.only_special_chars,
            RemovalCategory::OnlyEmojis => self.only_emojis,
        }
    }

    /// Sum across every category.
    pub fn total(&self) -> usize {
        self.blank_empty + self.too_short + self.only_special_chars + self.only_emojis
    }

    pub fn merge(self, other: RemovalCounts) -> RemovalCounts {
        self + other
    }

    /// `(category, count)` pairs in category order.
    pub fn iter(&self) -> impl Iterator<Item = (RemovalCategory, usize)> + '_ {
        RemovalCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    fn slot_mut(&mut self, category: RemovalCategory) -> &mut usize {
        match category {
            RemovalCategory::BlankEmpty => &mut self.blank_empty,
            RemovalCategory::TooShort => &mut self.too_short,
            RemovalCategory::OnlySpecialChars => &mut self.only_special_chars,
            RemovalCategory::OnlyEmojis => &mut self.only_emojis,
        }
    }
}

impl Add for RemovalCounts {
    type Output = RemovalCounts;

    fn add(self, other: RemovalCounts) -> RemovalCounts {
        RemovalCounts {
            blank_empty: self.blank_empty + other.blank_empty,
            too_short: self.too_short + other.too_short,
            only_special_chars: self.only_special_chars + other.only_special_chars,
            only_emojis: self.only_emojis + other.only_emojis,
        }
    }
}

impl AddAssign for RemovalCounts {
    fn add_assign(&mut self, other: RemovalCounts) {
        *self = *self + other;
    }
}

impl FromIterator<Verdict> for RemovalCounts {
    fn from_iter<I: IntoIterator<Item = Verdict>>(iter: I) -> Self {
        let mut counts = RemovalCounts::new();
        for verdict in iter {
            counts.observe(verdict);
        }
        counts
    }
}

// ============================================================================
// Meaningful-content test
// ============================================================================

/// Heuristic for "has real linguistic content".
///
/// After removing emoji: two or more Unicode letters pass; text made only of
/// punctuation, symbols and separators fails; otherwise a single letter is
/// enough. That last rule is loose on purpose: `"a1"` passes.
pub fn has_meaningful_content(text: &str) -> bool {
    let remainder = strip_emoji_str(text);
    if remainder.is_empty() {
        return false;
    }

    let letters = RE_LETTER.find_iter(&remainder).count();
    if letters >= 2 {
        return true;
    }

    if RE_ONLY_PUNCT_SYMBOL.is_match(&remainder) {
        return false;
    }

    letters > 0
}

// ============================================================================
// Classifier
// ============================================================================

/// Validity classifier for cleaned comment values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityClassifier {
    min_length: usize,
    policy: ValidityPolicy,
}

impl ValidityClassifier {
    /// Creates a classifier with the Unicode-adaptive policy.
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            policy: ValidityPolicy::UnicodeAdaptive,
        }
    }

    pub fn with_policy(mut self, policy: ValidityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn policy(&self) -> ValidityPolicy {
        self.policy
    }

    /// Classify one value. Checks short-circuit; the first failing check names
    /// the removal category.
    pub fn classify(&self, text: Option<&str>) -> Verdict {
        let trimmed = match text {
            Some(t) if !t.is_empty() => t.trim(),
            _ => return Verdict::Reject(RemovalCategory::BlankEmpty),
        };
        if trimmed.is_empty() {
            return Verdict::Reject(RemovalCategory::BlankEmpty);
        }

        let length = trimmed.chars().count();

        match self.policy {
            ValidityPolicy::UnicodeAdaptive => {
                if !has_meaningful_content(trimmed) {
                    return Verdict::Reject(RemovalCategory::OnlySpecialChars);
                }
                let script = classify_script(Some(trimmed));
                if length < adaptive_min_length(script, self.min_length) {
                    return Verdict::Reject(RemovalCategory::TooShort);
                }
            }
            ValidityPolicy::StrictAscii => {
                if length < self.min_length {
                    return Verdict::Reject(RemovalCategory::TooShort);
                }
                if !RE_ASCII_LETTER.is_match(trimmed) {
                    return Verdict::Reject(RemovalCategory::OnlySpecialChars);
                }
            }
        }

        Verdict::Keep
    }

    /// Classify and record a rejection in `counts`. Returns true when kept.
    pub fn retain(&self, text: Option<&str>, counts: &mut RemovalCounts) -> bool {
        let verdict = self.classify(text);
        counts.observe(verdict);
        verdict.is_keep()
    }
}

/// Classify one value with the Unicode-adaptive policy.
pub fn is_valid_comment(text: Option<&str>, min_length: usize) -> bool {
    ValidityClassifier::new(min_length).classify(text).is_keep()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reject(category: RemovalCategory) -> Verdict {
        Verdict::Reject(category)
    }

    #[test]
    fn test_blank_values() {
        let classifier = ValidityClassifier::new(10);
        assert_eq!(classifier.classify(None), reject(RemovalCategory::BlankEmpty));
        assert_eq!(classifier.classify(Some("")), reject(RemovalCategory::BlankEmpty));
        assert_eq!(classifier.classify(Some("   ")), reject(RemovalCategory::BlankEmpty));
    }

    #[test]
    fn test_short_latin_rejected() {
        let classifier = ValidityClassifier::new(10);
        assert_eq!(classifier.classify(Some("ok")), reject(RemovalCategory::TooShort));
        assert_eq!(classifier.classify(Some("This is a great video")), Verdict::Keep);
    }

    #[test]
    fn test_cjk_adaptive_minimum() {
        let classifier = ValidityClassifier::new(10);
        assert_eq!(classifier.classify(Some("你好")), reject(RemovalCategory::TooShort));
        assert_eq!(classifier.classify(Some("你好吗")), Verdict::Keep);
    }

    #[test]
    fn test_other_scripts_adaptive_minimum() {
        let classifier = ValidityClassifier::new(10);
        // thai min 5, devanagari/arabic min 6
        assert_eq!(classifier.classify(Some("ดีมาก")), Verdict::Keep);
        assert_eq!(classifier.classify(Some("ดีมา")), reject(RemovalCategory::TooShort));
        assert_eq!(classifier.classify(Some("बहुत अच्छा")), Verdict::Keep);
        assert_eq!(classifier.classify(Some("شكرا")), reject(RemovalCategory::TooShort));
        assert_eq!(classifier.classify(Some("شكرا لك")), Verdict::Keep);
    }

    #[test]
    fn test_only_special_chars() {
        let classifier = ValidityClassifier::new(3);
        assert_eq!(
            classifier.classify(Some("!!! ??? ...")),
            reject(RemovalCategory::OnlySpecialChars)
        );
        assert_eq!(
            classifier.classify(Some("12345 678")),
            reject(RemovalCategory::OnlySpecialChars)
        );
        assert_eq!(
            classifier.classify(Some("😂 😂")),
            reject(RemovalCategory::OnlySpecialChars)
        );
    }

    #[test]
    fn test_meaningful_before_length() {
        // "?!" fails content before it could fail length
        let classifier = ValidityClassifier::new(10);
        assert_eq!(
            classifier.classify(Some("?!")),
            reject(RemovalCategory::OnlySpecialChars)
        );
    }

    #[test]
    fn test_meaningful_content_rules() {
        assert!(has_meaningful_content("hi"));
        assert!(has_meaningful_content("你好"));
        assert!(has_meaningful_content("a1"));
        assert!(has_meaningful_content("Great 😂"));
        assert!(!has_meaningful_content("😂😂"));
        assert!(!has_meaningful_content("- + = !"));
        assert!(!has_meaningful_content("42"));
        assert!(!has_meaningful_content(""));
    }

    #[test]
    fn test_strict_ascii_policy() {
        let classifier = ValidityClassifier::new(3).with_policy(ValidityPolicy::StrictAscii);
        assert_eq!(classifier.classify(Some("nice one")), Verdict::Keep);
        assert_eq!(classifier.classify(Some("ok")), reject(RemovalCategory::TooShort));
        // length is checked before letters
        assert_eq!(classifier.classify(Some("!!")), reject(RemovalCategory::TooShort));
        assert_eq!(
            classifier.classify(Some("你好吗朋友")),
            reject(RemovalCategory::OnlySpecialChars)
        );
        assert_eq!(
            classifier.classify(Some("12345")),
            reject(RemovalCategory::OnlySpecialChars)
        );
    }

    #[test]
    fn test_policies_disagree_on_non_latin() {
        let text = Some("这个视频真的很好看");
        assert!(ValidityClassifier::new(10).classify(text).is_keep());
        assert!(!ValidityClassifier::new(5)
            .with_policy(ValidityPolicy::StrictAscii)
            .classify(text)
            .is_keep());
    }

    #[test]
    fn test_retain_records_counts() {
        let classifier = ValidityClassifier::new(10);
        let mut counts = RemovalCounts::new();
        assert!(!classifier.retain(Some("ok"), &mut counts));
        assert!(!classifier.retain(None, &mut counts));
        assert!(classifier.retain(Some("perfectly fine comment"), &mut counts));
        assert_eq!(counts.too_short, 1);
        assert_eq!(counts.blank_empty, 1);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn test_counts_merge_and_collect() {
        let a: RemovalCounts = [
            reject(RemovalCategory::TooShort),
            Verdict::Keep,
            reject(RemovalCategory::OnlyEmojis),
        ]
        .into_iter()
        .collect();
        let mut b = RemovalCounts::new();
        b.add_n(RemovalCategory::TooShort, 2);

        let merged = a.merge(b);
        assert_eq!(merged.too_short, 3);
        assert_eq!(merged.only_emojis, 1);
        assert_eq!(merged.total(), 4);
        assert_eq!(
            merged.iter().map(|(_, n)| n).collect::<Vec<_>>(),
            vec![0, 3, 0, 1]
        );
    }

    #[test]
    fn test_counts_serialize_as_mapping() {
        let mut counts = RemovalCounts::new();
        counts.record(RemovalCategory::OnlySpecialChars);
        let json = serde_json::to_value(counts).unwrap();
        assert_eq!(json["only_special_chars"], 1);
        assert_eq!(json["blank_empty"], 0);
    }

    #[test]
    fn test_is_valid_comment() {
        assert!(is_valid_comment(Some("this is long enough"), 10));
        assert!(!is_valid_comment(Some("short"), 10));
    }
}
