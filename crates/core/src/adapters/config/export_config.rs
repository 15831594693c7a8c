use crate::domain::grid::ADMINISTRATIVE_COLUMNS;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ExportConfig {
    /// Store columns left out of the spreadsheet.
    #[serde(default = "default_excluded_columns")]
    pub excluded_columns: Vec<String>,
}

fn default_excluded_columns() -> Vec<String> {
    ADMINISTRATIVE_COLUMNS.iter().map(|c| c.to_string()).collect()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            excluded_columns: default_excluded_columns(),
        }
    }
}
