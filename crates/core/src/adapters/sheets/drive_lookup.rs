use error_stack::{report, ResultExt};
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use super::spreadsheet_manager::SpreadsheetManagerError;

pub const DRIVE_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/drive.metadata.readonly";
const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
    name: String,
}

/// Resolves a spreadsheet title to its id through the Drive v3 files listing, the way
/// "open by name" works for a service account.
#[derive(Debug, Clone)]
pub struct DriveLookup {
    client: Client,
    api_url: String,
}

impl DriveLookup {
    pub fn new(api_url: &str) -> Self {
        Self::with_client(api_url, Client::new())
    }

    pub fn with_client(api_url: &str, client: Client) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    #[instrument(skip(self, access_token))]
    pub async fn find_spreadsheet_id(
        &self,
        access_token: &str,
        name: &str,
    ) -> error_stack::Result<String, SpreadsheetManagerError> {
        let query = format!(
            "name = '{}' and mimeType = '{}' and trashed = false",
            escape_query_literal(name),
            SPREADSHEET_MIME_TYPE
        );

        let response = self
            .client
            .get(format!("{}/files", self.api_url))
            .bearer_auth(access_token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id,name)"),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()
            .await
            .change_context(SpreadsheetManagerError::FailedToResolveSpreadsheet)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(report!(SpreadsheetManagerError::FailedToResolveSpreadsheet))
                .attach_printable(format!("Drive files listing returned {}", status))
                .attach_printable(body);
        }

        let list: FileList = response
            .json()
            .await
            .change_context(SpreadsheetManagerError::FailedToResolveSpreadsheet)?;

        // Drive `name =` is case-insensitive; keep exact title matches only.
        let mut matches = list.files.into_iter().filter(|f| f.name == name);
        match (matches.next(), matches.next()) {
            (Some(file), None) => {
                tracing::trace!("📄 Spreadsheet '{}' resolved to {}", name, file.id);
                Ok(file.id)
            }
            (None, _) => Err(report!(SpreadsheetManagerError::SpreadsheetNotFound))
                .attach_printable_lazy(|| {
                    format!(
                        "No spreadsheet named '{}' is shared with the service account",
                        name
                    )
                }),
            (Some(_), Some(_)) => Err(report!(SpreadsheetManagerError::AmbiguousSpreadsheet))
                .attach_printable_lazy(|| {
                    format!("More than one spreadsheet is named '{}'", name)
                }),
        }
    }
}

fn escape_query_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_query_literal() {
        assert_eq!(escape_query_literal("Sato's sheet"), "Sato\\'s sheet");
        assert_eq!(escape_query_literal(r"a\b"), r"a\\b");
        assert_eq!(
            escape_query_literal("2025年度_起床時コンディションチェック（実業団・NF）"),
            "2025年度_起床時コンディションチェック（実業団・NF）"
        );
    }
}
