//! # Script Classification
//!
//! Coarse writing-system detection by Unicode code-point ranges.
//!
//! This is a counting heuristic, not language identification: mixed-script
//! text goes to whichever bucket counts the most characters, and scripts
//! outside the six enumerated ranges (Greek, Hebrew, Tamil, ...) all land in
//! [`ScriptCategory::Other`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse writing-system bucket for a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptCategory {
    /// ASCII letters
    Latin,
    /// CJK ideographs, Hiragana/Katakana and Hangul syllables
    Cjk,
    Thai,
    Devanagari,
    Arabic,
    Cyrillic,
    /// Text with no character in any counted range
    Other,
    /// Null or empty input
    Unknown,
}

impl ScriptCategory {
    /// Counted categories in tie-break order.
    const COUNTED: [ScriptCategory; 6] = [
        ScriptCategory::Latin,
        ScriptCategory::Cjk,
        ScriptCategory::Thai,
        ScriptCategory::Devanagari,
        ScriptCategory::Arabic,
        ScriptCategory::Cyrillic,
    ];

    /// Returns the lowercase name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptCategory::Latin => "latin",
            ScriptCategory::Cjk => "cjk",
            ScriptCategory::Thai => "thai",
            ScriptCategory::Devanagari => "devanagari",
            ScriptCategory::Arabic => "arabic",
            ScriptCategory::Cyrillic => "cyrillic",
            ScriptCategory::Other => "other",
            ScriptCategory::Unknown => "unknown",
        }
    }

    fn slot(&self) -> Option<usize> {
        Self::COUNTED.iter().position(|c| c == self)
    }
}

impl fmt::Display for ScriptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Code-point ranges
// ============================================================================

/// CJK Unified Ideographs, Hiragana/Katakana, or Hangul Syllables.
pub fn is_cjk_char(c: char) -> bool {
    let code = c as u32;
    (0x4E00..=0x9FFF).contains(&code)
        || (0x3040..=0x30FF).contains(&code)
        || (0xAC00..=0xD7AF).contains(&code)
}

pub fn is_thai_char(c: char) -> bool {
    ('\u{0E00}'..='\u{0E7F}').contains(&c)
}

pub fn is_devanagari_char(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c)
}

pub fn is_arabic_char(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

pub fn is_cyrillic_char(c: char) -> bool {
    ('\u{0400}'..='\u{04FF}').contains(&c)
}

/// Bucket a single character; first matching range wins.
fn char_category(c: char) -> Option<ScriptCategory> {
    if is_cjk_char(c) {
        Some(ScriptCategory::Cjk)
    } else if is_thai_char(c) {
        Some(ScriptCategory::Thai)
    } else if is_devanagari_char(c) {
        Some(ScriptCategory::Devanagari)
    } else if is_arabic_char(c) {
        Some(ScriptCategory::Arabic)
    } else if is_cyrillic_char(c) {
        Some(ScriptCategory::Cyrillic)
    } else if c.is_ascii_alphabetic() {
        Some(ScriptCategory::Latin)
    } else {
        None
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Classify the dominant script of a text value.
///
/// Ties go to the earlier category in [`ScriptCategory`] declaration order
/// (latin, cjk, thai, devanagari, arabic, cyrillic). Text with no counted
/// character is `Other`; null or empty text is `Unknown`.
///
/// # Example
///
/// ```
/// use comment_cleaner::script::{classify_script, ScriptCategory};
///
/// assert_eq!(classify_script(Some("你好吗")), ScriptCategory::Cjk);
/// assert_eq!(classify_script(Some("hello")), ScriptCategory::Latin);
/// assert_eq!(classify_script(None), ScriptCategory::Unknown);
/// ```
pub fn classify_script(text: Option<&str>) -> ScriptCategory {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return ScriptCategory::Unknown,
    };

    let mut counts = [0usize; ScriptCategory::COUNTED.len()];
    for c in text.chars() {
        if let Some(slot) = char_category(c).and_then(|cat| cat.slot()) {
            counts[slot] += 1;
        }
    }

    let mut best: Option<(usize, usize)> = None;
    for (slot, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        // strict > keeps the earliest slot on ties
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((slot, count));
        }
    }

    best.map(|(slot, _)| ScriptCategory::COUNTED[slot])
        .unwrap_or(ScriptCategory::Other)
}

/// Minimum character count a comment in `script` must reach.
///
/// Scripts that pack more meaning per character get a lower bar:
///
/// | script | minimum |
/// |---|---|
/// | cjk | `max(3, base / 3)` |
/// | thai | `max(5, base / 2)` |
/// | devanagari, arabic | `max(5, floor(base * 0.6))` |
/// | anything else | `base` |
pub fn adaptive_min_length(script: ScriptCategory, base_min: usize) -> usize {
    match script {
        ScriptCategory::Cjk => (base_min / 3).max(3),
        ScriptCategory::Thai => (base_min / 2).max(5),
        ScriptCategory::Devanagari | ScriptCategory::Arabic => (base_min * 3 / 5).max(5),
        _ => base_min,
    }
}

/// Script-aware word count, used for diagnostics only.
///
/// CJK text counts one word per CJK character, Thai (which has no word
/// separators) approximates one word per four Thai characters, and
/// everything else counts whitespace-separated tokens.
pub fn word_count(text: Option<&str>) -> usize {
    let Some(text) = text else {
        return 0;
    };

    match classify_script(Some(text)) {
        ScriptCategory::Cjk => text.chars().filter(|&c| is_cjk_char(c)).count(),
        ScriptCategory::Thai => {
            let thai = text.chars().filter(|&c| is_thai_char(c)).count();
            (thai / 4).max(1)
        }
        _ => text.split_whitespace().count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_script() {
        assert_eq!(classify_script(Some("Great video")), ScriptCategory::Latin);
        assert_eq!(classify_script(Some("你好世界")), ScriptCategory::Cjk);
        assert_eq!(classify_script(Some("こんにちは")), ScriptCategory::Cjk);
        assert_eq!(classify_script(Some("안녕하세요")), ScriptCategory::Cjk);
        assert_eq!(classify_script(Some("สวัสดีครับ")), ScriptCategory::Thai);
        assert_eq!(classify_script(Some("नमस्ते दोस्तों")), ScriptCategory::Devanagari);
        assert_eq!(classify_script(Some("مرحبا بالجميع")), ScriptCategory::Arabic);
        assert_eq!(classify_script(Some("Привет всем")), ScriptCategory::Cyrillic);
    }

    #[test]
    fn test_classify_null_and_empty() {
        assert_eq!(classify_script(None), ScriptCategory::Unknown);
        assert_eq!(classify_script(Some("")), ScriptCategory::Unknown);
    }

    #[test]
    fn test_classify_uncounted_is_other() {
        assert_eq!(classify_script(Some("123 !!! ???")), ScriptCategory::Other);
        // Greek is outside every counted range
        assert_eq!(classify_script(Some("Καλημέρα")), ScriptCategory::Other);
    }

    #[test]
    fn test_accented_latin_counts_only_ascii_letters() {
        // é and ü are not ASCII, so only "caf" and "ber" count
        assert_eq!(classify_script(Some("café über")), ScriptCategory::Latin);
    }

    #[test]
    fn test_majority_wins_in_mixed_text() {
        assert_eq!(classify_script(Some("ok 你好世界")), ScriptCategory::Cjk);
        assert_eq!(classify_script(Some("hello 你")), ScriptCategory::Latin);
    }

    #[test]
    fn test_tie_prefers_declaration_order() {
        assert_eq!(classify_script(Some("ab你好")), ScriptCategory::Latin);
        assert_eq!(classify_script(Some("你好สว")), ScriptCategory::Cjk);
        assert_eq!(classify_script(Some("ру مر")), ScriptCategory::Arabic);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let text = "mixed 文本 ไทย текст";
        assert_eq!(classify_script(Some(text)), classify_script(Some(text)));
    }

    #[test]
    fn test_adaptive_min_length_base_ten() {
        assert_eq!(adaptive_min_length(ScriptCategory::Cjk, 10), 3);
        assert_eq!(adaptive_min_length(ScriptCategory::Thai, 10), 5);
        assert_eq!(adaptive_min_length(ScriptCategory::Devanagari, 10), 6);
        assert_eq!(adaptive_min_length(ScriptCategory::Arabic, 10), 6);
        assert_eq!(adaptive_min_length(ScriptCategory::Latin, 10), 10);
        assert_eq!(adaptive_min_length(ScriptCategory::Cyrillic, 10), 10);
        assert_eq!(adaptive_min_length(ScriptCategory::Other, 10), 10);
    }

    #[test]
    fn test_adaptive_min_length_monotonic() {
        for base in 10..200 {
            let cjk = adaptive_min_length(ScriptCategory::Cjk, base);
            let thai = adaptive_min_length(ScriptCategory::Thai, base);
            let deva = adaptive_min_length(ScriptCategory::Devanagari, base);
            let latin = adaptive_min_length(ScriptCategory::Latin, base);
            assert!(cjk <= thai, "base {base}");
            assert!(thai <= deva, "base {base}");
            assert!(deva <= latin, "base {base}");
        }
    }

    #[test]
    fn test_adaptive_floor_exceeds_small_base() {
        assert_eq!(adaptive_min_length(ScriptCategory::Thai, 2), 5);
        assert_eq!(adaptive_min_length(ScriptCategory::Cjk, 0), 3);
    }

    #[test]
    fn test_word_count_by_script() {
        assert_eq!(word_count(Some("this is a comment")), 4);
        assert_eq!(word_count(Some("你好 世界")), 4);
        assert_eq!(word_count(Some("สวัสดีครับ")), 2);
        assert_eq!(word_count(Some("ดี")), 1);
        assert_eq!(word_count(None), 0);
        assert_eq!(word_count(Some("")), 0);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(ScriptCategory::Devanagari.to_string(), "devanagari");
        assert_eq!(
            serde_json::to_string(&ScriptCategory::Cjk).unwrap(),
            "\"cjk\""
        );
    }
}
