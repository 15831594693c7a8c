use std::sync::Arc;

use error_stack::ResultExt;
use serde_json::Value;
use tracing::instrument;

use crate::domain::sheets::a1_notation::A1Notation;
use crate::ports::worksheet::{Worksheet, WorksheetError};

use super::{
    spreadsheet_manager::SpreadsheetManager, spreadsheet_read::SpreadsheetRead,
    spreadsheet_write::SpreadsheetWrite,
};

/// A tab of the configured spreadsheet, addressed by title. Spreadsheet and tab are looked up
/// on first use, so a run that has nothing to export never talks to Google.
#[derive(Debug)]
pub struct SheetsWorksheet {
    spreadsheet_manager: Arc<SpreadsheetManager>,
    title: String,
}

impl SheetsWorksheet {
    pub fn new(spreadsheet_manager: Arc<SpreadsheetManager>, title: impl Into<String>) -> Self {
        Self {
            spreadsheet_manager,
            title: title.into(),
        }
    }

    async fn resolve(&self) -> error_stack::Result<(), WorksheetError> {
        self.spreadsheet_manager
            .resolve_worksheet(&self.title)
            .await
            .change_context(WorksheetError::ResolutionFailed)
    }
}

#[async_trait::async_trait]
impl Worksheet for SheetsWorksheet {
    fn title(&self) -> &str {
        &self.title
    }

    #[instrument(name = "SheetsWorksheet::read_all_values")]
    async fn read_all_values(&self) -> error_stack::Result<Vec<Vec<Value>>, WorksheetError> {
        self.resolve().await?;

        let rows = self
            .spreadsheet_manager
            .read_range(&A1Notation::sheet(&self.title))
            .await
            .change_context(WorksheetError::ReadFailed)?;

        Ok(rows.into_iter().filter(|row| !row.is_empty()).collect())
    }

    #[instrument(name = "SheetsWorksheet::write_header", skip(header))]
    async fn write_header(&self, header: Vec<Value>) -> error_stack::Result<(), WorksheetError> {
        self.resolve().await?;

        self.spreadsheet_manager
            .write_row(&A1Notation::cell(&self.title, "A1"), header)
            .await
            .change_context(WorksheetError::WriteFailed)
    }

    #[instrument(name = "SheetsWorksheet::append_rows", skip(rows), fields(rows = rows.len()))]
    async fn append_rows(&self, rows: Vec<Vec<Value>>) -> error_stack::Result<(), WorksheetError> {
        self.resolve().await?;

        self.spreadsheet_manager
            .append_rows(&A1Notation::cell(&self.title, "A1"), rows)
            .await
            .change_context(WorksheetError::WriteFailed)
    }

    #[instrument(name = "SheetsWorksheet::check_access")]
    async fn check_access(&self) -> error_stack::Result<(), WorksheetError> {
        self.resolve().await
    }
}
