use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Required column '{0}' not found in export")]
    MissingColumn(String),
}

/// One cell of a loaded export. Spreadsheet loaders produce text, numbers,
/// or nothing; a delimited-text load only ever produces `Text` and `Empty`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Text rendering used for amount parsing and diagnostics.
    pub fn render(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

/// A row maps column name → cell value, mirroring how the upstream
/// spreadsheet loader hands rows over.
pub type TableRow = HashMap<String, CellValue>;

#[derive(Debug, Clone, Default)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// Parse a headed, comma-delimited export into the row model. IO and CSV
/// syntax problems are fatal for the whole load; value-level problems are
/// the extractor's per-row concern, not the loader's.
pub fn load_rows<R: Read>(data: R) -> Result<TableData, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let columns: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = TableRow::new();
        for (idx, column) in columns.iter().enumerate() {
            let value = match record.get(idx) {
                None | Some("") => CellValue::Empty,
                Some(cell) => CellValue::Text(cell.to_string()),
            };
            row.insert(column.clone(), value);
        }
        rows.push(row);
    }

    Ok(TableData { columns, rows })
}

pub fn load_file(path: &Path) -> Result<TableData, TableError> {
    load_rows(std::fs::File::open(path)?)
}
