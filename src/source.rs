//! Recognising and decoding the input formats.

use ficopdf_types::TableModel;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Text,
    Csv,
}

impl SourceKind {
    /// Classifies a document by its extension, case-insensitively.
    /// Hidden files are never sources.
    pub fn detect(name: &str) -> Option<Self> {
        if name.starts_with('.') {
            return None;
        }
        let extension = Path::new(name).extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("txt") {
            Some(SourceKind::Text)
        } else if extension.eq_ignore_ascii_case("csv") {
            Some(SourceKind::Csv)
        } else {
            None
        }
    }
}

/// The name of the PDF generated from `name`: `report.TXT` becomes `report.pdf`.
pub fn pdf_name(name: &str) -> String {
    Path::new(name)
        .with_extension("pdf")
        .to_string_lossy()
        .into_owned()
}

/// Decodes text input. Invalid UTF-8 is replaced rather than rejected.
pub fn decode_text(data: &[u8]) -> String {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    String::from_utf8_lossy(data).into_owned()
}

/// Reads CSV records into a table. With `has_headers` the first record
/// becomes the header row. Records may have differing lengths; the layout
/// pads or truncates them to the column count.
pub fn parse_csv(data: &[u8], has_headers: bool) -> Result<TableModel, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut records = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        records.push(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect::<Vec<_>>(),
        );
    }

    if has_headers && !records.is_empty() {
        let headers = records.remove(0);
        Ok(TableModel::new(headers, records))
    } else {
        Ok(TableModel::without_headers(records))
    }
}
