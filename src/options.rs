//! Cleaning options.

use crate::error::Result;
use crate::validity::ValidityPolicy;
use serde::{Deserialize, Serialize};

/// Default minimum comment length, in characters.
pub const DEFAULT_MIN_LENGTH: usize = 10;

/// Options controlling a cleaning pass.
///
/// Transformers always run in this order: Unicode normalization, emoji,
/// URLs, mentions, hashtags, punctuation runs, whitespace. The last two are
/// always applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanOptions {
    /// Drop rows whose value is nothing but emoji.
    pub remove_emoji_only: bool,

    /// Also strip emoji out of kept text (older behavior; the default keeps
    /// emoji in mixed content).
    pub strip_emoji: bool,

    /// Strip `http(s)://` and `www.` links.
    pub remove_urls: bool,

    /// Strip `@mentions`.
    pub remove_mentions: bool,

    /// Strip `#hashtags`.
    pub remove_hashtags: bool,

    /// Base minimum length; adapted per script under the Unicode policy.
    pub min_length: usize,

    /// Which validity rules decide whether a row survives.
    pub validity_policy: ValidityPolicy,

    /// Apply Unicode NFC normalization before any other transformer.
    pub normalize_unicode: bool,

    /// Transform and classify rows in parallel.
    pub parallel: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            remove_emoji_only: true,
            strip_emoji: false,
            remove_urls: true,
            remove_mentions: false,
            remove_hashtags: false,
            min_length: DEFAULT_MIN_LENGTH,
            validity_policy: ValidityPolicy::UnicodeAdaptive,
            normalize_unicode: false,
            parallel: false,
        }
    }
}

impl CleanOptions {
    /// Creates new options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Earlier pipeline behavior: emoji stripped from text and the strict
    /// ASCII-letter validity test.
    pub fn legacy() -> Self {
        Self {
            strip_emoji: true,
            validity_policy: ValidityPolicy::StrictAscii,
            ..Self::default()
        }
    }

    /// Strips mentions and hashtags as well as URLs.
    pub fn aggressive() -> Self {
        Self {
            remove_mentions: true,
            remove_hashtags: true,
            ..Self::default()
        }
    }

    /// Keeps short comments and links.
    pub fn lenient() -> Self {
        Self {
            remove_urls: false,
            min_length: 3,
            ..Self::default()
        }
    }

    /// Parses options from a JSON document; missing fields take defaults.
    ///
    /// ```
    /// use comment_cleaner::CleanOptions;
    ///
    /// let options = CleanOptions::from_json(r#"{"min_length": 20}"#)?;
    /// assert_eq!(options.min_length, 20);
    /// assert!(options.remove_urls);
    /// # Ok::<(), comment_cleaner::Error>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the base minimum length.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Sets the validity policy.
    pub fn with_policy(mut self, policy: ValidityPolicy) -> Self {
        self.validity_policy = policy;
        self
    }

    /// Keeps URLs in the text.
    pub fn keep_urls(mut self) -> Self {
        self.remove_urls = false;
        self
    }

    /// Strips `@mentions`.
    pub fn strip_mentions(mut self) -> Self {
        self.remove_mentions = true;
        self
    }

    /// Strips `#hashtags`.
    pub fn strip_hashtags(mut self) -> Self {
        self.remove_hashtags = true;
        self
    }

    /// Strips emoji out of kept text.
    pub fn strip_emoji(mut self) -> Self {
        self.strip_emoji = true;
        self
    }

    /// Keeps rows that contain only emoji (they still face the validity test).
    pub fn keep_emoji_only_rows(mut self) -> Self {
        self.remove_emoji_only = false;
        self
    }

    /// Enables NFC normalization.
    pub fn with_unicode_normalization(mut self) -> Self {
        self.normalize_unicode = true;
        self
    }

    /// Enables parallel row processing.
    pub fn parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    /// Disables parallel row processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CleanOptions::default();
        assert!(options.remove_emoji_only);
        assert!(!options.strip_emoji);
        assert!(options.remove_urls);
        assert!(!options.remove_mentions);
        assert!(!options.remove_hashtags);
        assert_eq!(options.min_length, 10);
        assert_eq!(options.validity_policy, ValidityPolicy::UnicodeAdaptive);
    }

    #[test]
    fn test_presets() {
        let legacy = CleanOptions::legacy();
        assert!(legacy.strip_emoji);
        assert_eq!(legacy.validity_policy, ValidityPolicy::StrictAscii);

        let aggressive = CleanOptions::aggressive();
        assert!(aggressive.remove_mentions && aggressive.remove_hashtags);
        assert!(!aggressive.normalize_unicode);
        assert_eq!(
            aggressive,
            CleanOptions::default().strip_mentions().strip_hashtags()
        );

        let lenient = CleanOptions::lenient();
        assert!(!lenient.remove_urls);
        assert!(lenient.min_length < CleanOptions::default().min_length);
    }

    #[test]
    fn test_builder_chain() {
        let options = CleanOptions::new()
            .with_min_length(5)
            .strip_mentions()
            .strip_hashtags()
            .keep_urls()
            .keep_emoji_only_rows()
            .with_policy(ValidityPolicy::StrictAscii)
            .parallel();
        assert_eq!(options.min_length, 5);
        assert!(options.remove_mentions && options.remove_hashtags);
        assert!(!options.remove_urls && !options.remove_emoji_only);
        assert!(options.parallel);
        assert!(!options.sequential().parallel);
    }

    #[test]
    fn test_from_json_partial() {
        let options =
            CleanOptions::from_json(r#"{"validity_policy": "strict_ascii", "remove_hashtags": true}"#)
                .unwrap();
        assert_eq!(options.validity_policy, ValidityPolicy::StrictAscii);
        assert!(options.remove_hashtags);
        assert_eq!(options.min_length, DEFAULT_MIN_LENGTH);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(CleanOptions::from_json(r#"{"min_length": "ten"}"#).is_err());
        assert!(CleanOptions::from_json(r#"{"validity_policy": "fuzzy"}"#).is_err());
    }

    #[test]
    fn test_json_round_trip_names() {
        let json = serde_json::to_value(CleanOptions::legacy()).unwrap();
        assert_eq!(json["validity_policy"], "strict_ascii");
        assert_eq!(json["strip_emoji"], true);
    }
}
