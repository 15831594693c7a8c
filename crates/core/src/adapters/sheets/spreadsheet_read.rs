use error_stack::ResultExt;
use serde_json::Value;
use tracing::instrument;

use crate::domain::sheets::a1_notation::A1Notation;

use super::spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError};

pub trait SpreadsheetRead {
    /// Row-major values of `range`. A range without content yields no rows.
    fn read_range(
        &self,
        range: &A1Notation,
    ) -> impl std::future::Future<
        Output = error_stack::Result<Vec<Vec<Value>>, SpreadsheetManagerError>,
    > + Send;
}

impl SpreadsheetRead for SpreadsheetManager {
    #[instrument]
    async fn read_range(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<Vec<Vec<Value>>, SpreadsheetManagerError> {
        let spreadsheet_id = self.spreadsheet_id().await?;

        let response = self
            .hub
            .spreadsheets()
            .values_get(&spreadsheet_id, range.as_ref())
            .major_dimension("ROWS")
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchRange)
            .attach_printable_lazy(|| format!("Failed to fetch values for range {}", range))?;

        Ok(response.1.values.unwrap_or_default())
    }
}
