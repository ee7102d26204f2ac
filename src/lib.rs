//! # comment-cleaner
//!
//! A fast Rust library for cleaning and filtering free-text comment datasets
//! exported from social platforms (Instagram, YouTube, TikTok, Reddit,
//! Facebook).
//!
//! It strips noise (URLs, mentions, hashtags, repeated punctuation, excess
//! whitespace), drops low-quality rows by configurable rules, and reports
//! retention statistics. File formats are left to the caller: the library
//! works on an in-memory [`Dataset`].
//!
//! ## Quick Start
//!
//! ```
//! use comment_cleaner::{CommentCleaner, CleanOptions, Dataset};
//!
//! fn main() -> comment_cleaner::Result<()> {
//!     let dataset = Dataset::from_columns(vec![
//!         ("username".into(), vec![Some("ana".into()), Some("ben".into())]),
//!         ("text".into(), vec![Some("Loved it!!!! www.spam.io".into()), Some("ok".into())]),
//!     ])?;
//!
//!     let report = CommentCleaner::new(CleanOptions::default().with_min_length(5))
//!         .clean(&dataset, None)?;
//!
//!     assert_eq!(report.cleaned_comments().collect::<Vec<_>>(), vec!["Loved it!"]);
//!     assert_eq!(report.stats.retention_rate, 50.0);
//!     Ok(())
//! }
//! ```
//!
//! ## Scripts
//!
//! Minimum length adapts to the dominant script of each comment, detected by
//! code-point ranges ([`script::classify_script`]). CJK comments need only a
//! third of the Latin minimum, Thai half, Devanagari and Arabic 60%.
//!
//! ## Features
//!
//! - `python`: PyO3 bindings

pub mod cleaner;
pub mod dataset;
pub mod error;
pub mod options;
pub mod script;
pub mod transform;
pub mod validity;

#[cfg(feature = "python")]
mod python;

// Re-exports
pub use cleaner::{
    clean_dataset, diagnose, retention_rate, BatchItem, BatchReport, BatchSummary, CleanReport,
    CleaningStats, CommentCleaner, CommentDiagnostics,
};
pub use dataset::{Dataset, Value, COMMENT_COLUMN_KEYWORDS};
pub use error::{Error, Result};
pub use options::{CleanOptions, DEFAULT_MIN_LENGTH};
pub use script::{adaptive_min_length, classify_script, ScriptCategory};
pub use validity::{
    is_valid_comment, RemovalCategory, RemovalCounts, ValidityClassifier, ValidityPolicy, Verdict,
};

/// Cleans a list of comment strings on their own, without a surrounding table.
///
/// Returns the kept, cleaned comments in input order together with the
/// statistics for the pass.
///
/// # Example
///
/// ```
/// use comment_cleaner::{clean_comments, CleanOptions};
///
/// let input = vec![Some("what a goal!!!".to_string()), None, Some("🔥🔥".to_string())];
/// let (kept, stats) = clean_comments(input, &CleanOptions::default().with_min_length(5));
/// assert_eq!(kept, vec!["what a goal!"]);
/// assert_eq!(stats.total_removed, 2);
/// ```
pub fn clean_comments(comments: Vec<Value>, options: &CleanOptions) -> (Vec<String>, CleaningStats) {
    let dataset = Dataset::single_column("comment", comments);
    let report = CommentCleaner::new(options.clone()).clean_column(&dataset, 0);

    let kept = report.cleaned_comments().map(str::to_string).collect();
    (kept, report.stats)
}
