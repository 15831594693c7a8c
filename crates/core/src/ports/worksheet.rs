use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorksheetError {
    #[error("Failed to resolve the target worksheet")]
    ResolutionFailed,
    #[error("Failed to read worksheet values")]
    ReadFailed,
    #[error("Failed to write to the worksheet")]
    WriteFailed,
}

/// The named tab that receives exported rows.
#[async_trait::async_trait]
pub trait Worksheet: Send + Sync {
    fn title(&self) -> &str;

    /// Every non-empty row currently in the sheet. Empty when the sheet has no content.
    async fn read_all_values(&self) -> error_stack::Result<Vec<Vec<Value>>, WorksheetError>;

    /// Writes `header` into the first row. Only meant for a sheet that is still empty.
    async fn write_header(&self, header: Vec<Value>) -> error_stack::Result<(), WorksheetError>;

    /// Appends `rows` after the last row with content, in a single request.
    async fn append_rows(&self, rows: Vec<Vec<Value>>) -> error_stack::Result<(), WorksheetError>;

    /// Resolves spreadsheet and worksheet without touching any cell.
    async fn check_access(&self) -> error_stack::Result<(), WorksheetError>;
}
