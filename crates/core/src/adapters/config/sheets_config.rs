use super::secret::Secret;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct SheetsConfig {
    /// Path to the service account JSON key.
    #[serde(default)]
    pub service_account_key_path: Option<Box<str>>,
    /// The same key, inline. Takes the place of `service_account_key_path`.
    #[serde(default)]
    pub service_account_key_json: Option<Secret>,
    pub spreadsheet_name: Box<str>,
    pub worksheet_name: Box<str>,
    /// Skips the Drive lookup of `spreadsheet_name` when set.
    #[serde(default)]
    pub spreadsheet_id: Option<Box<str>>,
    #[serde(default = "default_drive_api_url")]
    pub drive_api_url: Box<str>,
}

fn default_drive_api_url() -> Box<str> {
    "https://www.googleapis.com/drive/v3".into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAccountCredential<'a> {
    Path(&'a str),
    Json(&'a str),
}

impl SheetsConfig {
    /// `None` unless exactly one of the two key settings is present.
    pub fn credential(&self) -> Option<ServiceAccountCredential<'_>> {
        match (
            self.service_account_key_path.as_deref(),
            self.service_account_key_json.as_ref(),
        ) {
            (Some(path), None) => Some(ServiceAccountCredential::Path(path)),
            (None, Some(json)) => Some(ServiceAccountCredential::Json(json.expose())),
            _ => None,
        }
    }
}
