use crate::adapters::config::sheets_config::SheetsConfig;
use crate::domain::sheets::a1_notation::A1Notation;
use error_stack::{report, ResultExt};
use google_sheets4::{api::ValueRange, client::GetToken, Sheets};
use std::fmt::Debug;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::instrument;

use super::{
    auth,
    drive_lookup::{DriveLookup, DRIVE_READONLY_SCOPE},
    http_client::{self, HttpsConnector},
};

pub struct SpreadsheetManager {
    pub config: SheetsConfig,
    pub(super) hub: Sheets<HttpsConnector>,
    drive_auth: Box<dyn GetToken>,
    drive: DriveLookup,
    spreadsheet_id_cache: RwLock<Option<String>>,
    sheet_titles_cache: RwLock<Option<Vec<String>>>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager {{ config: {:?} }}", self.config)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpreadsheetManagerError {
    #[error("Service account credential is invalid")]
    InvalidCredential,
    #[error("Failed to resolve spreadsheet by name")]
    FailedToResolveSpreadsheet,
    #[error("Spreadsheet not found")]
    SpreadsheetNotFound,
    #[error("Spreadsheet name is ambiguous")]
    AmbiguousSpreadsheet,
    #[error("Failed to fetch sheet titles")]
    FailedToFetchSheetTitle,
    #[error("Worksheet not found")]
    WorksheetNotFound,
    #[error("Failed to fetch range")]
    FailedToFetchRange,
    #[error("Failed to write range")]
    FailedToWriteRange,
}

impl SpreadsheetManager {
    #[instrument(name = "SpreadsheetManager::new", skip(config))]
    pub async fn new(config: SheetsConfig) -> error_stack::Result<Self, SpreadsheetManagerError> {
        let client = http_client::http_client();
        let key = auth::service_account_key(&config).await?;
        let sheets_auth = auth::auth(key.clone(), client.clone()).await?;
        let drive_auth = auth::auth(key, client.clone()).await?;
        let hub: Sheets<HttpsConnector> = Sheets::new(client, sheets_auth);

        Ok(Self::with_hub(config, hub, drive_auth))
    }

    /// Builds a manager around an existing hub. `drive_auth` supplies the token for the Drive
    /// name lookup; a plain `String` works as a fixed token.
    pub fn with_hub(
        config: SheetsConfig,
        hub: Sheets<HttpsConnector>,
        drive_auth: impl GetToken + 'static,
    ) -> Self {
        let drive = DriveLookup::new(&config.drive_api_url);

        SpreadsheetManager {
            config,
            hub,
            drive_auth: Box::new(drive_auth),
            drive,
            spreadsheet_id_cache: RwLock::new(None),
            sheet_titles_cache: RwLock::new(None),
        }
    }

    /// The configured id, or the id of the only spreadsheet named `spreadsheet_name`.
    #[instrument]
    pub async fn spreadsheet_id(&self) -> error_stack::Result<String, SpreadsheetManagerError> {
        if let Some(id) = self.config.spreadsheet_id.as_deref() {
            return Ok(id.to_string());
        }

        if let Some(id) = self.spreadsheet_id_cache.read().await.clone() {
            return Ok(id);
        }

        let token = self
            .drive_auth
            .get_token(&[DRIVE_READONLY_SCOPE])
            .await
            .map_err(|e| {
                report!(SpreadsheetManagerError::InvalidCredential)
                    .attach_printable("Could not obtain a Drive access token")
                    .attach_printable(e.to_string())
            })?
            .ok_or_else(|| report!(SpreadsheetManagerError::InvalidCredential))
            .attach_printable("Drive access token is empty")?;

        let id = self
            .drive
            .find_spreadsheet_id(&token, &self.config.spreadsheet_name)
            .await?;

        {
            // -- MUTEX WRITE --
            let mut guard = self.spreadsheet_id_cache.write().await;
            guard.replace(id.clone());
            // -- END MUTEX WRITE --
        }

        Ok(id)
    }

    #[instrument]
    pub async fn sheet_titles(&self) -> error_stack::Result<Vec<String>, SpreadsheetManagerError> {
        if let Some(titles) = self.sheet_titles_cache.read().await.clone() {
            return Ok(titles);
        }

        let spreadsheet_id = self.spreadsheet_id().await?;
        let response = self
            .hub
            .spreadsheets()
            .get(&spreadsheet_id)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchSheetTitle)?;

        let sheets = response
            .1
            .sheets
            .ok_or(report!(SpreadsheetManagerError::FailedToFetchSheetTitle))
            .attach_printable("Sheets not present in spreadsheet response")?;

        let titles = sheets
            .into_iter()
            .filter_map(|sheet| sheet.properties.and_then(|p| p.title))
            .collect::<Vec<_>>();

        {
            // -- MUTEX WRITE --
            let mut guard = self.sheet_titles_cache.write().await;
            guard.replace(titles.clone());
            // -- END MUTEX WRITE --
        }

        Ok(titles)
    }

    /// Fails unless the spreadsheet has a tab titled exactly `title`.
    #[instrument]
    pub async fn resolve_worksheet(
        &self,
        title: &str,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        let titles = self.sheet_titles().await?;

        if titles.iter().any(|t| t == title) {
            Ok(())
        } else {
            Err(report!(SpreadsheetManagerError::WorksheetNotFound)).attach_printable_lazy(|| {
                format!(
                    "Worksheet '{}' not found in '{}', available: {:?}",
                    title, self.config.spreadsheet_name, titles
                )
            })
        }
    }

    #[instrument(skip(value_range))]
    pub(super) async fn write_range(
        &self,
        range: &A1Notation,
        value_range: ValueRange,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        let spreadsheet_id = self.spreadsheet_id().await?;

        self.hub
            .spreadsheets()
            .values_update(value_range, &spreadsheet_id, range.as_ref())
            .value_input_option("RAW")
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetManagerError::FailedToWriteRange)
            .attach_printable_lazy(|| format!("Failed to write to range {} ", range))
    }

    #[instrument(skip(value_range))]
    pub(super) async fn append_range(
        &self,
        range: &A1Notation,
        value_range: ValueRange,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        let spreadsheet_id = self.spreadsheet_id().await?;

        self.hub
            .spreadsheets()
            .values_append(value_range, &spreadsheet_id, range.as_ref())
            .value_input_option("RAW")
            .insert_data_option("INSERT_ROWS")
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetManagerError::FailedToWriteRange)
            .attach_printable_lazy(|| format!("Failed to append to range {} ", range))
    }
}
