use google_sheets4::api::ValueRange;
use serde_json::Value;
use tracing::instrument;

use crate::domain::sheets::a1_notation::A1Notation;

use super::{
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError},
    value_range_factory::ValueRangeFactory,
};

pub trait SpreadsheetWrite {
    /// Overwrites the cells starting at `range` with a single row.
    fn write_row(
        &self,
        range: &A1Notation,
        row: Vec<Value>,
    ) -> impl std::future::Future<Output = error_stack::Result<(), SpreadsheetManagerError>> + Send;

    /// Appends `rows` below the table found in `range`.
    fn append_rows(
        &self,
        range: &A1Notation,
        rows: Vec<Vec<Value>>,
    ) -> impl std::future::Future<Output = error_stack::Result<(), SpreadsheetManagerError>> + Send;
}

impl SpreadsheetWrite for SpreadsheetManager {
    #[instrument(skip(row))]
    async fn write_row(
        &self,
        range: &A1Notation,
        row: Vec<Value>,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        let value_range = ValueRange::from_single_row(row);
        self.write_range(range, value_range).await
    }

    #[instrument(skip(rows), fields(rows = rows.len()))]
    async fn append_rows(
        &self,
        range: &A1Notation,
        rows: Vec<Vec<Value>>,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        let value_range = ValueRange::from_rows(rows);
        self.append_range(range, value_range).await
    }
}
