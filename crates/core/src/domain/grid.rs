use serde_json::Value;

use super::record::{Record, RecordBatch};

/// Bookkeeping columns of the store table that never reach the spreadsheet.
pub const ADMINISTRATIVE_COLUMNS: [&str; 4] = ["id", "created_at", "updated_at", "exported"];

/// Rows ready to be appended to the worksheet, plus the header to write when the sheet is
/// still empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExportGrid {
    header: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl ExportGrid {
    pub fn from_batch<S: AsRef<str>>(batch: &RecordBatch, excluded_columns: &[S]) -> Self {
        let header = batch
            .columns()
            .into_iter()
            .filter(|column| !excluded_columns.iter().any(|ex| ex.as_ref() == column))
            .collect::<Vec<_>>();

        let rows = batch
            .iter()
            .map(|record| row_for(record, &header))
            .collect::<Vec<_>>();

        ExportGrid { header, rows }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn header_row(&self) -> Vec<Value> {
        self.header.iter().cloned().map(Value::String).collect()
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// False when every column of the batch was administrative, i.e. there is no cell to write.
    pub fn has_columns(&self) -> bool {
        !self.header.is_empty()
    }
}

fn row_for(record: &Record, header: &[String]) -> Vec<Value> {
    header
        .iter()
        .map(|column| to_cell(record.get(column)))
        .collect()
}

fn to_cell(value: Option<&Value>) -> Value {
    match value {
        None | Some(Value::Null) => Value::String(String::new()),
        Some(nested @ (Value::Array(_) | Value::Object(_))) => Value::String(nested.to_string()),
        Some(scalar) => scalar.clone(),
    }
}
