use serde::{Deserialize, Serialize};

/// Tabular content: an optional header row followed by body rows.
///
/// The column count is fixed by `headers`, or by the first body row when
/// there are no headers. Rows are normalised to that count when read through
/// [`TableModel::cell`]: missing cells read as empty, surplus cells are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableModel {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableModel {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn without_headers(rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: Vec::new(),
            rows,
        }
    }

    pub fn column_count(&self) -> usize {
        if !self.headers.is_empty() {
            self.headers.len()
        } else {
            self.rows.first().map_or(0, Vec::len)
        }
    }

    pub fn has_headers(&self) -> bool {
        !self.headers.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// Returns the cell at `col` of `row`, or `""` when the row is short.
    pub fn cell<'a>(row: &'a [String], col: usize) -> &'a str {
        row.get(col).map_or("", String::as_str)
    }
}
