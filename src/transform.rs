//! # Text Transformers
//!
//! Stateless string transformations applied to comment values.
//!
//! Every transformer takes `Option<&str>` and returns `Option<String>`: a null
//! value stays null, anything else is transformed. The `*_str` variants work
//! on plain `&str` for callers that already have text in hand.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// Patterns (compiled once using LazyLock)
// ============================================================================

/// One emoji sequence: keycaps, flag pairs, and pictographs with their
/// variation selectors, skin-tone modifiers, tag sequences and ZWJ joins.
/// Stray selectors are swept up by the last alternative; a joiner is only
/// removed inside an emoji sequence.
static RE_EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"[0-9#*]\x{FE0F}?\x{20E3}",
        r"|[\x{1F1E6}-\x{1F1FF}]{1,2}",
        r"|[\p{Extended_Pictographic}\p{Emoji_Presentation}]",
        r"(?:[\x{FE0E}\x{FE0F}]|\p{Emoji_Modifier}|[\x{E0020}-\x{E007F}])*",
        r"(?:\x{200D}[\p{Extended_Pictographic}\p{Emoji_Presentation}]",
        r"(?:[\x{FE0E}\x{FE0F}]|\p{Emoji_Modifier})*)*",
        r"|[\x{FE0E}\x{FE0F}\x{20E3}]|\p{Emoji_Modifier}",
    ))
    .unwrap()
});

static RE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)https?://(?:[a-z0-9\-._~:/?#\[\]@!$&'()*+,;=]|%[0-9a-f]{2})+",
        r"|\bwww\.[a-z0-9\-]+(?:\.[a-z0-9\-]+)+(?:/(?:[a-z0-9\-._~:/?#\[\]@!$&'()*+,;=]|%[0-9a-f]{2})*)?",
    ))
    .unwrap()
});

/// Word characters plus the CJK, Kana, Hangul, Thai and Devanagari ranges.
const TAG_BODY: &str =
    r"[\w\x{4E00}-\x{9FFF}\x{3040}-\x{30FF}\x{AC00}-\x{D7AF}\x{0E00}-\x{0E7F}\x{0900}-\x{097F}]+";

static RE_MENTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(&format!("@{TAG_BODY}")).unwrap());

static RE_HASHTAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(&format!("#{TAG_BODY}")).unwrap());

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Runs of one repeated `!`, `?` or `.` (three or more).
static RE_PUNCT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!{3,}|\?{3,}|\.{3,}").unwrap());

// ============================================================================
// Transformers on &str
// ============================================================================

/// Remove every emoji sequence.
pub fn strip_emoji_str(text: &str) -> String {
    RE_EMOJI.replace_all(text, "").into_owned()
}

/// Remove `http://`, `https://` and bare `www.` URLs.
pub fn strip_urls_str(text: &str) -> String {
    RE_URL.replace_all(text, "").into_owned()
}

/// Remove `@name` mentions, including CJK/Thai/Devanagari names.
pub fn strip_mentions_str(text: &str) -> String {
    RE_MENTION.replace_all(text, "").into_owned()
}

/// Remove `#tag` hashtags, including CJK/Thai/Devanagari tags.
pub fn strip_hashtags_str(text: &str) -> String {
    RE_HASHTAG.replace_all(text, "").into_owned()
}

/// Collapse whitespace runs (newlines and tabs included) to one space, then trim.
pub fn normalize_whitespace_str(text: &str) -> String {
    RE_WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Collapse `!!!`, `???`, `....` and longer runs to a single character.
///
/// Mixed runs such as `?!?!` are left alone.
pub fn squeeze_punctuation_str(text: &str) -> String {
    RE_PUNCT_RUN
        .replace_all(text, |caps: &Captures| caps[0][..1].to_string())
        .into_owned()
}

/// Unicode NFC normalization.
pub fn normalize_unicode_str(text: &str) -> String {
    text.nfc().collect()
}

// ============================================================================
// Nullable transformers
// ============================================================================

pub fn strip_emoji(text: Option<&str>) -> Option<String> {
    text.map(strip_emoji_str)
}

pub fn strip_urls(text: Option<&str>) -> Option<String> {
    text.map(strip_urls_str)
}

pub fn strip_mentions(text: Option<&str>) -> Option<String> {
    text.map(strip_mentions_str)
}

pub fn strip_hashtags(text: Option<&str>) -> Option<String> {
    text.map(strip_hashtags_str)
}

pub fn normalize_whitespace(text: Option<&str>) -> Option<String> {
    text.map(normalize_whitespace_str)
}

pub fn squeeze_punctuation(text: Option<&str>) -> Option<String> {
    text.map(squeeze_punctuation_str)
}

pub fn normalize_unicode(text: Option<&str>) -> Option<String> {
    text.map(normalize_unicode_str)
}

// ============================================================================
// Predicates
// ============================================================================

/// True when a value is null, empty, or whitespace only.
pub fn is_blank(text: Option<&str>) -> bool {
    text.is_none_or(|t| t.trim().is_empty())
}

/// True when a non-blank value has nothing left once emoji are removed.
///
/// `"😂😂😂"` is emoji-only, `"Great 😂"` is not. Null and blank values are
/// never emoji-only; they are handled as blanks.
pub fn is_emoji_only(text: Option<&str>) -> bool {
    match text {
        Some(t) if !t.trim().is_empty() => strip_emoji_str(t).trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_emoji_basic() {
        assert_eq!(strip_emoji_str("Great 😂"), "Great ");
        assert_eq!(strip_emoji_str("😂😂😂"), "");
        assert_eq!(strip_emoji_str("no emoji here"), "no emoji here");
    }

    #[test]
    fn test_strip_emoji_sequences() {
        // ZWJ family, skin tone, flag, keycap, heart with variation selector
        assert_eq!(strip_emoji_str("a👨\u{200D}👩\u{200D}👧b"), "ab");
        assert_eq!(strip_emoji_str("👍🏽ok"), "ok");
        assert_eq!(strip_emoji_str("🇯🇵 trip"), " trip");
        assert_eq!(strip_emoji_str("press 1️⃣"), "press ");
        assert_eq!(strip_emoji_str("love ❤️"), "love ");
    }

    #[test]
    fn test_strip_emoji_keeps_script_joiners() {
        // Devanagari half form
        assert_eq!(strip_emoji_str("क्\u{200D}ष"), "क्\u{200D}ष");
        assert_eq!(strip_emoji_str("क्\u{200D}ष 🔥"), "क्\u{200D}ष ");
        assert!(!is_emoji_only(Some("\u{200D}")));
    }

    #[test]
    fn test_strip_emoji_keeps_plain_digits_and_symbols() {
        assert_eq!(strip_emoji_str("#1 fan * 2"), "#1 fan * 2");
        assert_eq!(strip_emoji_str("你好 ไทย"), "你好 ไทย");
    }

    #[test]
    fn test_strip_urls() {
        let out = strip_urls_str("Check this http://spam.com now");
        assert!(!out.contains("http://"));
        assert_eq!(normalize_whitespace_str(&out), "Check this now");

        let out = strip_urls_str("see https://example.com/a?b=1&c=%20 and www.test.co.uk/page ok");
        assert_eq!(normalize_whitespace_str(&out), "see and ok");
    }

    #[test]
    fn test_strip_urls_leaves_plain_text() {
        assert_eq!(strip_urls_str("www is not a url"), "www is not a url");
        assert_eq!(strip_urls_str("http without scheme"), "http without scheme");
    }

    #[test]
    fn test_strip_mentions() {
        assert_eq!(strip_mentions_str("@john_doe nice"), " nice");
        assert_eq!(strip_mentions_str("hi @小明 and @สมชาย"), "hi  and ");
        assert_eq!(strip_mentions_str("email me @ home"), "email me @ home");
    }

    #[test]
    fn test_strip_hashtags() {
        assert_eq!(strip_hashtags_str("fun day #summer #旅行"), "fun day  ");
        assert_eq!(strip_hashtags_str("#1 fan"), " fan");
        assert_eq!(strip_hashtags_str("C# rocks"), "C# rocks");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace_str("  a \t b\n\nc  "), "a b c");
        assert_eq!(normalize_whitespace_str("   "), "");
    }

    #[test]
    fn test_normalize_whitespace_idempotent() {
        for input in ["  a \t b\n\nc  ", "", "x", "\u{3000}wide\u{3000}space ", "a  b"] {
            let once = normalize_whitespace_str(input);
            assert_eq!(normalize_whitespace_str(&once), once);
        }
    }

    #[test]
    fn test_squeeze_punctuation() {
        assert_eq!(squeeze_punctuation_str("wow!!!!"), "wow!");
        assert_eq!(squeeze_punctuation_str("what???"), "what?");
        assert_eq!(squeeze_punctuation_str("hmm......"), "hmm.");
        assert_eq!(squeeze_punctuation_str("ok!!"), "ok!!");
        assert_eq!(squeeze_punctuation_str("?!?!?!"), "?!?!?!");
        assert_eq!(squeeze_punctuation_str("no!!!???"), "no!?");
    }

    #[test]
    fn test_null_passes_through() {
        assert_eq!(strip_emoji(None), None);
        assert_eq!(strip_urls(None), None);
        assert_eq!(strip_mentions(None), None);
        assert_eq!(strip_hashtags(None), None);
        assert_eq!(normalize_whitespace(None), None);
        assert_eq!(squeeze_punctuation(None), None);
        assert_eq!(normalize_unicode(None), None);
        assert_eq!(normalize_whitespace(Some(" x ")), Some("x".to_string()));
    }

    #[test]
    fn test_normalize_unicode_composes() {
        assert_eq!(normalize_unicode_str("cafe\u{0301}"), "caf\u{00E9}");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some("  \n\t")));
        assert!(!is_blank(Some(" x ")));
    }

    #[test]
    fn test_is_emoji_only() {
        assert!(is_emoji_only(Some("😂😂😂")));
        assert!(is_emoji_only(Some(" 🔥 👍🏽 ")));
        assert!(!is_emoji_only(Some("Great 😂")));
        assert!(!is_emoji_only(Some("")));
        assert!(!is_emoji_only(None));
    }
}
