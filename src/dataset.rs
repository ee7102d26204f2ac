//! Tabular dataset model.
//!
//! A [`Dataset`] is an ordered list of named columns and a list of rows, each
//! row holding one nullable text value per column. Rows have no key; their
//! identity is their position.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A nullable cell value.
pub type Value = Option<String>;

/// Column names recognized as comment text, in priority order.
///
/// Covers English plus common translations (Spanish, Portuguese, French,
/// German, Italian, Indonesian, Russian, Chinese, Japanese, Korean, Thai,
/// Hindi, Arabic).
pub const COMMENT_COLUMN_KEYWORDS: &[&str] = &[
    "text",
    "comment",
    "content",
    "message",
    "caption",
    // plural and compound export headers
    "comments",
    "comment_text",
    "body",
    // es / pt / it
    "texto",
    "comentario",
    "comentário",
    "contenido",
    "conteúdo",
    "mensaje",
    "mensagem",
    "leyenda",
    "legenda",
    "testo",
    "commento",
    "contenuto",
    "messaggio",
    // fr / de
    "texte",
    "commentaire",
    "contenu",
    "légende",
    "kommentar",
    "inhalt",
    "nachricht",
    "beschriftung",
    // id
    "teks",
    "komentar",
    "konten",
    "pesan",
    "keterangan",
    // ru
    "текст",
    "комментарий",
    "содержание",
    "сообщение",
    "подпись",
    // zh / ja / ko
    "文本",
    "评论",
    "評論",
    "内容",
    "消息",
    "标题",
    "テキスト",
    "コメント",
    "本文",
    "メッセージ",
    "キャプション",
    "텍스트",
    "댓글",
    "내용",
    "메시지",
    "캡션",
    // th / hi / ar
    "ข้อความ",
    "ความคิดเห็น",
    "เนื้อหา",
    "पाठ",
    "टिप्पणी",
    "सामग्री",
    "संदेश",
    "نص",
    "تعليق",
    "محتوى",
    "رسالة",
];

/// An in-memory table of nullable text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Creates an empty dataset with the given schema.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Builds a one-column dataset.
    pub fn single_column(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            columns: vec![name.into()],
            rows: values.into_iter().map(|v| vec![v]).collect(),
        }
    }

    /// Builds a dataset from row-major data.
    ///
    /// Every row must have exactly one value per column.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let mut dataset = Self {
            columns,
            rows: Vec::with_capacity(rows.len()),
        };
        for row in rows {
            dataset.push_row(row)?;
        }
        Ok(dataset)
    }

    /// Builds a dataset from `(name, values)` column pairs of equal length.
    pub fn from_columns(columns: Vec<(String, Vec<Value>)>) -> Result<Self> {
        let len = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
        if let Some((name, values)) = columns.iter().find(|(_, v)| v.len() != len) {
            return Err(Error::InvalidDataset(format!(
                "column '{}' has {} values, expected {}",
                name,
                values.len(),
                len
            )));
        }

        let names: Vec<String> = columns.iter().map(|(n, _)| n.clone()).collect();
        let mut iters: Vec<_> = columns.into_iter().map(|(_, v)| v.into_iter()).collect();
        let rows = (0..len)
            .map(|_| iters.iter_mut().map(|it| it.next().flatten()).collect())
            .collect();

        Ok(Self {
            columns: names,
            rows,
        })
    }

    /// Appends a row, checking its width against the schema.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::InvalidDataset(format!(
                "row {} has {} values, expected {}",
                self.rows.len(),
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of one column, top to bottom.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).and_then(|v| v.as_deref()))
    }

    /// Gets a cell at the specified position.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }

    /// Resolves the comment column.
    ///
    /// With an explicit name the column must exist. Without one, the first
    /// entry of [`COMMENT_COLUMN_KEYWORDS`] that matches a column name
    /// (case-insensitively) wins.
    pub fn resolve_column(&self, requested: Option<&str>) -> Result<usize> {
        match requested {
            Some(name) => self.column_index(name).ok_or_else(|| Error::ColumnNotFound {
                column: name.to_string(),
                available: self.columns.clone(),
            }),
            None => self.detect_comment_column(),
        }
    }

    /// Auto-detects the comment column from its name.
    pub fn detect_comment_column(&self) -> Result<usize> {
        let lowered: Vec<String> = self
            .columns
            .iter()
            .map(|c| c.trim_start_matches('\u{FEFF}').trim().to_lowercase())
            .collect();

        COMMENT_COLUMN_KEYWORDS
            .iter()
            .find_map(|keyword| lowered.iter().position(|c| c == keyword))
            .ok_or_else(|| Error::ColumnUndetectable {
                available: self.columns.clone(),
            })
    }

    /// Keeps only the rows whose mask entry is true.
    pub(crate) fn retain_rows(&mut self, keep: &[bool]) {
        let mut flags = keep.iter();
        self.rows.retain(|_| flags.next().copied().unwrap_or(false));
    }

    /// Replaces the values of one column; `values` must match the row count.
    pub(crate) fn replace_column(&mut self, index: usize, values: Vec<Value>) {
        debug_assert_eq!(values.len(), self.rows.len());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[index] = value;
        }
    }
}
