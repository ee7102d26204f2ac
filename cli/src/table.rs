//! CSV reading and writing for comment datasets.

use comment_cleaner::Dataset;
use csv::{ReaderBuilder, WriterBuilder};
use std::error::Error;
use std::path::Path;

/// Reads a CSV file with a header row. Empty fields become nulls; invalid
/// UTF-8 is replaced rather than rejected. A leading byte order mark is
/// dropped from the header.
pub fn read_csv(path: &Path) -> Result<Dataset, Box<dyn Error>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let columns: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| {
            String::from_utf8_lossy(h)
                .trim_start_matches('\u{FEFF}')
                .trim()
                .to_string()
        })
        .collect();

    let mut dataset = Dataset::new(columns);
    for (index, record) in reader.byte_records().enumerate() {
        let record = record.map_err(|e| format!("Failed to parse CSV row {}: {}", index + 1, e))?;
        let row = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    None
                } else {
                    Some(String::from_utf8_lossy(field).into_owned())
                }
            })
            .collect();
        dataset.push_row(row)?;
    }

    Ok(dataset)
}

/// Writes a dataset as CSV with a header row. Nulls become empty fields.
pub fn write_csv(path: &Path, dataset: &Dataset) -> Result<(), Box<dyn Error>> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record(dataset.columns())?;
    for row in dataset.rows() {
        writer.write_record(row.iter().map(|v| v.as_deref().unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
}
