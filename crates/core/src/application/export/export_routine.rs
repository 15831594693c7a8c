use std::{fmt, sync::Arc};

use error_stack::ResultExt;
use thiserror::Error;
use tracing::instrument;

use crate::domain::{
    gate::AdminSession,
    grid::ExportGrid,
    outcome::{ExportOutcome, ExportPreview},
};
use crate::ports::{record_store::RecordStore, worksheet::Worksheet};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("Failed to fetch unexported records")]
    FetchFailed,
    #[error("Fetched records are not usable")]
    InvalidRecords,
    #[error("Failed to append records to the worksheet")]
    AppendFailed,
    #[error("Failed to mark records as exported")]
    MarkFailed,
}

/// Fetch → append → mark. Records are only marked after the append succeeded, so a failure
/// anywhere leaves them eligible for the next run.
pub struct ExportRoutine {
    store: Arc<dyn RecordStore>,
    worksheet: Arc<dyn Worksheet>,
    excluded_columns: Vec<String>,
}

impl fmt::Debug for ExportRoutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportRoutine")
            .field("worksheet", &self.worksheet.title())
            .field("excluded_columns", &self.excluded_columns)
            .finish()
    }
}

impl ExportRoutine {
    pub fn new(
        store: Arc<dyn RecordStore>,
        worksheet: Arc<dyn Worksheet>,
        excluded_columns: Vec<String>,
    ) -> Self {
        Self {
            store,
            worksheet,
            excluded_columns,
        }
    }

    #[instrument(skip_all, name = "ExportRoutine::run")]
    pub async fn run(
        &self,
        _session: &AdminSession,
    ) -> error_stack::Result<ExportOutcome, ExportError> {
        tracing::trace!("☁️  Fetching unexported records");
        let batch = self
            .store
            .fetch_unexported()
            .await
            .change_context(ExportError::FetchFailed)?;

        if batch.is_empty() {
            tracing::info!("📭 No unexported records");
            return Ok(ExportOutcome::NothingToExport);
        }

        let ids = batch.ids().change_context(ExportError::InvalidRecords)?;

        tracing::trace!("📊 Building grid for {} record(s)", batch.len());
        let grid = ExportGrid::from_batch(&batch, self.excluded_columns.as_slice());

        tracing::trace!("📝 Appending to worksheet '{}'", self.worksheet.title());
        self.append(grid).await?;

        tracing::trace!("🏷️  Marking {} record(s) as exported", ids.len());
        self.store
            .mark_exported(&ids)
            .await
            .change_context(ExportError::MarkFailed)
            .attach_printable(
                "Rows already reached the worksheet; unmarked records will be exported again on the next run",
            )?;

        tracing::info!("✅ Exported {} record(s)", batch.len());
        Ok(ExportOutcome::Exported { count: batch.len() })
    }

    #[instrument(skip_all, name = "ExportRoutine::preview")]
    pub async fn preview(
        &self,
        _session: &AdminSession,
    ) -> error_stack::Result<ExportPreview, ExportError> {
        let batch = self
            .store
            .fetch_unexported()
            .await
            .change_context(ExportError::FetchFailed)?;

        Ok(ExportPreview {
            record_count: batch.len(),
            grid: ExportGrid::from_batch(&batch, self.excluded_columns.as_slice()),
        })
    }

    async fn append(&self, grid: ExportGrid) -> error_stack::Result<(), ExportError> {
        if !grid.has_columns() {
            tracing::warn!("Every column is excluded from export, nothing to write");
            return Ok(());
        }

        let existing = self
            .worksheet
            .read_all_values()
            .await
            .change_context(ExportError::AppendFailed)?;

        if existing.is_empty() {
            tracing::trace!("🆕 Worksheet is empty, writing header row");
            self.worksheet
                .write_header(grid.header_row())
                .await
                .change_context(ExportError::AppendFailed)?;
        }

        self.worksheet
            .append_rows(grid.rows().to_vec())
            .await
            .change_context(ExportError::AppendFailed)
    }
}
