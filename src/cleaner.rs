//! # Dataset Cleaner
//!
//! Runs the full cleaning pass over one comment column:
//!
//! 1. **Column resolution** - explicit name or keyword auto-detection
//! 2. **Blank removal** - null, empty and whitespace-only values
//! 3. **Emoji-only removal** - values with nothing but emoji (optional)
//! 4. **Transformation** - URL/mention/hashtag stripping, punctuation runs, whitespace
//! 5. **Validity classification** - meaningful content and minimum length
//!
//! Every removed row is attributed to exactly one [`RemovalCategory`], so the
//! category counts in [`CleaningStats`] always add up to `total_removed`.

use crate::dataset::{Dataset, Value};
use crate::error::Result;
use crate::options::CleanOptions;
use crate::script::{classify_script, word_count, ScriptCategory};
use crate::transform::{
    is_blank, is_emoji_only, normalize_unicode_str, normalize_whitespace_str,
    squeeze_punctuation_str, strip_emoji_str, strip_hashtags_str, strip_mentions_str,
    strip_urls_str,
};
use crate::validity::{RemovalCategory, RemovalCounts, ValidityClassifier, Verdict};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

/// Retention as a percentage rounded to two decimals; 0 for an empty input.
pub fn retention_rate(original_count: usize, final_count: usize) -> f64 {
    if original_count == 0 {
        return 0.0;
    }
    let pct = final_count as f64 / original_count as f64 * 100.0;
    // Formatting rounds exact halves to even
    format!("{pct:.2}").parse().unwrap_or(pct)
}

/// Outcome counts for one cleaning pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleaningStats {
    pub original_count: usize,
    pub after_blank_removal: usize,
    pub final_count: usize,
    pub total_removed: usize,
    /// Percentage of rows kept, two decimals.
    pub retention_rate: f64,
    /// Removed rows by reason.
    pub removed: RemovalCounts,
}

impl CleaningStats {
    fn new(
        original_count: usize,
        after_blank_removal: usize,
        final_count: usize,
        removed: RemovalCounts,
    ) -> Self {
        Self {
            original_count,
            after_blank_removal,
            final_count,
            total_removed: original_count - final_count,
            retention_rate: retention_rate(original_count, final_count),
            removed,
        }
    }
}

/// Per-comment diagnostics for previews. Never written into the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentDiagnostics {
    pub char_count: usize,
    pub word_count: usize,
    pub script: ScriptCategory,
}

/// Computes preview diagnostics for one value.
pub fn diagnose(text: Option<&str>) -> CommentDiagnostics {
    CommentDiagnostics {
        char_count: text.map(|t| t.chars().count()).unwrap_or(0),
        word_count: word_count(text),
        script: classify_script(text),
    }
}

/// Result of cleaning one dataset.
#[derive(Debug, Clone)]
pub struct CleanReport {
    /// Same schema as the input; kept rows with the comment column cleaned.
    pub dataset: Dataset,
    /// Name of the column that was cleaned.
    pub column: String,
    pub stats: CleaningStats,
    column_index: usize,
}

impl CleanReport {
    /// Position of the cleaned column.
    pub fn column_index(&self) -> usize {
        self.column_index
    }

    /// The cleaned comment values alone, in row order.
    pub fn cleaned_comments(&self) -> impl Iterator<Item = &str> + '_ {
        self.dataset.column_values(self.column_index).flatten()
    }

    /// Diagnostics for every kept comment, in row order.
    pub fn diagnostics(&self) -> Vec<CommentDiagnostics> {
        self.dataset
            .column_values(self.column_index)
            .map(diagnose)
            .collect()
    }
}

/// Comment dataset cleaner.
///
/// # Example
///
/// ```
/// use comment_cleaner::{CommentCleaner, CleanOptions, Dataset};
///
/// let dataset = Dataset::from_rows(
///     vec!["user".into(), "text".into()],
///     vec![
///         vec![Some("a".into()), Some("Check this http://spam.com now".into())],
///         vec![Some("b".into()), Some("😂😂😂".into())],
///         vec![Some("c".into()), None],
///     ],
/// )?;
///
/// let report = CommentCleaner::new(CleanOptions::default().with_min_length(5))
///     .clean(&dataset, None)?;
/// assert_eq!(report.cleaned_comments().collect::<Vec<_>>(), vec!["Check this now"]);
/// assert_eq!(report.stats.removed.only_emojis, 1);
/// assert_eq!(report.stats.removed.blank_empty, 1);
/// # Ok::<(), comment_cleaner::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommentCleaner {
    options: CleanOptions,
}

impl CommentCleaner {
    pub fn new(options: CleanOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CleanOptions {
        &self.options
    }

    fn classifier(&self) -> ValidityClassifier {
        ValidityClassifier::new(self.options.min_length).with_policy(self.options.validity_policy)
    }

    /// Applies the configured transformers to one value. Null stays null.
    pub fn transform(&self, text: Option<&str>) -> Value {
        let options = &self.options;
        let mut text = text?.to_string();

        if options.normalize_unicode {
            text = normalize_unicode_str(&text);
        }
        if options.strip_emoji {
            text = strip_emoji_str(&text);
        }
        if options.remove_urls {
            text = strip_urls_str(&text);
        }
        if options.remove_mentions {
            text = strip_mentions_str(&text);
        }
        if options.remove_hashtags {
            text = strip_hashtags_str(&text);
        }
        text = squeeze_punctuation_str(&text);

        Some(normalize_whitespace_str(&text))
    }

    /// Transforms and classifies one raw value.
    pub fn process(&self, text: Option<&str>) -> (Value, Verdict) {
        let cleaned = self.transform(text);
        let verdict = self.classifier().classify(cleaned.as_deref());
        (cleaned, verdict)
    }

    /// Cleans `dataset`, using `column` or auto-detecting the comment column.
    ///
    /// Fails before touching any row if the column cannot be resolved.
    pub fn clean(&self, dataset: &Dataset, column: Option<&str>) -> Result<CleanReport> {
        let column_index = dataset.resolve_column(column)?;
        Ok(self.clean_column(dataset, column_index))
    }

    /// Cleans the column at `column_index`, which callers resolve first.
    pub(crate) fn clean_column(&self, dataset: &Dataset, column_index: usize) -> CleanReport {
        let column = dataset.columns()[column_index].clone();
        debug!(column = %column, rows = dataset.len(), "resolved comment column");

        let original_count = dataset.len();
        let mut output = dataset.clone();
        let mut counts = RemovalCounts::new();

        // Blank rows never reach the classifier
        let keep: Vec<bool> = output.column_values(column_index).map(|v| !is_blank(v)).collect();
        let blanks = keep.iter().filter(|k| !**k).count();
        counts.add_n(RemovalCategory::BlankEmpty, blanks);
        output.retain_rows(&keep);
        let after_blank_removal = output.len();
        debug!(removed = blanks, "removed blank rows");

        if self.options.remove_emoji_only {
            let keep: Vec<bool> = output
                .column_values(column_index)
                .map(|v| !is_emoji_only(v))
                .collect();
            let removed = keep.iter().filter(|k| !**k).count();
            counts.add_n(RemovalCategory::OnlyEmojis, removed);
            output.retain_rows(&keep);
            debug!(removed, "removed emoji-only rows");
        }

        let values: Vec<Option<&str>> = output.column_values(column_index).collect();
        let processed: Vec<(Value, Verdict)> = if self.options.parallel {
            values.par_iter().map(|v| self.process(*v)).collect()
        } else {
            values.iter().map(|v| self.process(*v)).collect()
        };

        let rejected: RemovalCounts = processed.iter().map(|(_, verdict)| *verdict).collect();
        debug!(
            too_short = rejected.too_short,
            only_special_chars = rejected.only_special_chars,
            blank_empty = rejected.blank_empty,
            "classifier rejections"
        );
        counts += rejected;

        let keep: Vec<bool> = processed.iter().map(|(_, v)| v.is_keep()).collect();
        let cleaned: Vec<Value> = processed
            .into_iter()
            .filter(|(_, v)| v.is_keep())
            .map(|(value, _)| value)
            .collect();
        output.retain_rows(&keep);
        output.replace_column(column_index, cleaned);

        let stats = CleaningStats::new(original_count, after_blank_removal, output.len(), counts);
        debug_assert_eq!(stats.removed.total(), stats.total_removed);
        info!(
            column = %column,
            original = stats.original_count,
            kept = stats.final_count,
            retention = stats.retention_rate,
            "cleaning pass complete"
        );

        CleanReport {
            dataset: output,
            column,
            stats,
            column_index,
        }
    }

    /// Cleans several datasets independently and aggregates their statistics.
    ///
    /// A dataset whose column cannot be resolved keeps its error in the
    /// returned item; the rest of the batch still runs.
    pub fn clean_batch(&self, datasets: &[(String, Dataset)], column: Option<&str>) -> BatchReport {
        let run = |(name, dataset): &(String, Dataset)| BatchItem {
            name: name.clone(),
            result: self.clean(dataset, column),
        };

        let items: Vec<BatchItem> = if self.options.parallel {
            datasets.par_iter().map(run).collect()
        } else {
            datasets.iter().map(run).collect()
        };

        let summary = BatchSummary::from_items(&items);
        BatchReport { items, summary }
    }
}

/// Cleans a dataset with the given options.
pub fn clean_dataset(
    dataset: &Dataset,
    column: Option<&str>,
    options: &CleanOptions,
) -> Result<CleanReport> {
    CommentCleaner::new(options.clone()).clean(dataset, column)
}

// ============================================================================
// Batch processing
// ============================================================================

/// One named dataset's outcome within a batch.
#[derive(Debug)]
pub struct BatchItem {
    pub name: String,
    pub result: Result<CleanReport>,
}

/// Per-dataset results plus the aggregate.
#[derive(Debug)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
    pub summary: BatchSummary,
}

/// Statistics aggregated over the datasets of a batch that cleaned successfully.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub datasets: usize,
    pub failed: usize,
    pub original_count: usize,
    pub final_count: usize,
    pub total_removed: usize,
    pub retention_rate: f64,
    pub removed: RemovalCounts,
}

impl BatchSummary {
    pub fn from_items(items: &[BatchItem]) -> Self {
        let mut summary = BatchSummary::default();
        for item in items {
            match &item.result {
                Ok(report) => summary.add(&report.stats),
                Err(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// Folds one dataset's statistics into the aggregate.
    pub fn add(&mut self, stats: &CleaningStats) {
        self.datasets += 1;
        self.original_count += stats.original_count;
        self.final_count += stats.final_count;
        self.total_removed += stats.total_removed;
        self.removed += stats.removed;
        self.retention_rate = retention_rate(self.original_count, self.final_count);
    }
}
