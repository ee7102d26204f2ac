use crate::{
    classify_script, clean_comments, CleanOptions, CommentCleaner, Dataset, ValidityClassifier,
    ValidityPolicy,
};
use pyo3::prelude::*;

fn value_error(message: impl ToString) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(message.to_string())
}

fn parse_policy(policy: &str) -> PyResult<ValidityPolicy> {
    match policy {
        "unicode_adaptive" => Ok(ValidityPolicy::UnicodeAdaptive),
        "strict_ascii" => Ok(ValidityPolicy::StrictAscii),
        other => Err(value_error(format!(
            "Unknown validity policy '{other}' (expected 'unicode_adaptive' or 'strict_ascii')"
        ))),
    }
}

#[allow(clippy::too_many_arguments)]
fn build_options(
    remove_emoji_only: bool,
    strip_emoji: bool,
    remove_urls: bool,
    remove_mentions: bool,
    remove_hashtags: bool,
    min_length: usize,
    validity_policy: &str,
) -> PyResult<CleanOptions> {
    Ok(CleanOptions {
        remove_emoji_only,
        strip_emoji,
        remove_urls,
        remove_mentions,
        remove_hashtags,
        min_length,
        validity_policy: parse_policy(validity_policy)?,
        ..CleanOptions::default()
    })
}

/// Cleans a table given as column names plus rows.
///
/// Returns `(column, rows, stats_json)`.
#[pyfunction]
#[pyo3(signature = (
    columns,
    rows,
    column=None,
    remove_emoji_only=true,
    strip_emoji=false,
    remove_urls=true,
    remove_mentions=false,
    remove_hashtags=false,
    min_length=10,
    validity_policy="unicode_adaptive"
))]
#[allow(clippy::too_many_arguments)]
fn clean_table(
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
    column: Option<&str>,
    remove_emoji_only: bool,
    strip_emoji: bool,
    remove_urls: bool,
    remove_mentions: bool,
    remove_hashtags: bool,
    min_length: usize,
    validity_policy: &str,
) -> PyResult<(String, Vec<Vec<Option<String>>>, String)> {
    let options = build_options(
        remove_emoji_only,
        strip_emoji,
        remove_urls,
        remove_mentions,
        remove_hashtags,
        min_length,
        validity_policy,
    )?;
    let dataset = Dataset::from_rows(columns, rows).map_err(value_error)?;
    let report = CommentCleaner::new(options)
        .clean(&dataset, column)
        .map_err(value_error)?;
    let stats = serde_json::to_string(&report.stats).map_err(value_error)?;

    Ok((report.column.clone(), report.dataset.rows().to_vec(), stats))
}

/// Cleans a flat list of comments. Returns `(kept, stats_json)`.
#[pyfunction]
#[pyo3(signature = (comments, min_length=10, validity_policy="unicode_adaptive"))]
fn clean_texts(
    comments: Vec<Option<String>>,
    min_length: usize,
    validity_policy: &str,
) -> PyResult<(Vec<String>, String)> {
    let options = CleanOptions::default()
        .with_min_length(min_length)
        .with_policy(parse_policy(validity_policy)?);
    let (kept, stats) = clean_comments(comments, &options);
    let stats = serde_json::to_string(&stats).map_err(value_error)?;
    Ok((kept, stats))
}

#[pyfunction]
#[pyo3(signature = (text=None))]
fn detect_script(text: Option<&str>) -> &'static str {
    classify_script(text).as_str()
}

/// Returns the removal category for a value, or `None` if it would be kept.
#[pyfunction]
#[pyo3(signature = (text=None, min_length=10, validity_policy="unicode_adaptive"))]
fn removal_reason(
    text: Option<&str>,
    min_length: usize,
    validity_policy: &str,
) -> PyResult<Option<&'static str>> {
    let classifier = ValidityClassifier::new(min_length).with_policy(parse_policy(validity_policy)?);
    Ok(classifier.classify(text).category().map(|c| c.as_str()))
}

#[pymodule]
fn _comment_cleaner(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(clean_table, m)?)?;
    m.add_function(wrap_pyfunction!(clean_texts, m)?)?;
    m.add_function(wrap_pyfunction!(detect_script, m)?)?;
    m.add_function(wrap_pyfunction!(removal_reason, m)?)?;

    Ok(())
}
