use error_stack::ResultExt;
use google_sheets4::oauth2::{self, authenticator::Authenticator};

use crate::adapters::config::sheets_config::{ServiceAccountCredential, SheetsConfig};

use super::http_client::{HttpClient, HttpsConnector};
use super::spreadsheet_manager::SpreadsheetManagerError;

pub type SheetsAuthenticator = Authenticator<HttpsConnector>;

pub async fn service_account_key(
    config: &SheetsConfig,
) -> error_stack::Result<oauth2::ServiceAccountKey, SpreadsheetManagerError> {
    match config.credential() {
        Some(ServiceAccountCredential::Path(path)) => oauth2::read_service_account_key(path)
            .await
            .change_context(SpreadsheetManagerError::InvalidCredential)
            .attach_printable_lazy(|| {
                format!("Could not read service account private key at '{}'", path)
            }),
        Some(ServiceAccountCredential::Json(json)) => oauth2::parse_service_account_key(json)
            .change_context(SpreadsheetManagerError::InvalidCredential)
            .attach_printable("Inline service account key is not valid JSON"),
        None => Err(error_stack::report!(
            SpreadsheetManagerError::InvalidCredential
        ))
        .attach_printable("No service account key configured"),
    }
}

pub async fn auth(
    key: oauth2::ServiceAccountKey,
    client: HttpClient,
) -> error_stack::Result<SheetsAuthenticator, SpreadsheetManagerError> {
    oauth2::ServiceAccountAuthenticator::with_client(key, client)
        .build()
        .await
        .change_context(SpreadsheetManagerError::InvalidCredential)
        .attach_printable("Could not create a service account authenticator")
}
