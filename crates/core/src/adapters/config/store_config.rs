use super::secret::Secret;

#[derive(serde::Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MarkMode {
    /// One `PATCH ?id=in.(...)` per chunk of ids.
    #[default]
    Batched,
    /// One `PATCH ?id=eq.<id>` per record.
    PerRecord,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct StoreConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`. The REST root `/rest/v1` is appended.
    pub url: Box<str>,
    /// Sent both as `apikey` and as the bearer token.
    pub api_key: Secret,
    #[serde(default = "default_table")]
    pub table: Box<str>,
    #[serde(default)]
    pub mark_mode: MarkMode,
    #[serde(default = "default_mark_batch_size")]
    pub mark_batch_size: usize,
}

fn default_table() -> Box<str> {
    "condition".into()
}

fn default_mark_batch_size() -> usize {
    100
}

impl StoreConfig {
    pub fn new(url: impl Into<Box<str>>, api_key: impl Into<Box<str>>) -> Self {
        Self {
            url: url.into(),
            api_key: Secret::new(api_key),
            table: default_table(),
            mark_mode: MarkMode::default(),
            mark_batch_size: default_mark_batch_size(),
        }
    }

    pub fn with_table(mut self, table: impl Into<Box<str>>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_mark_mode(mut self, mark_mode: MarkMode) -> Self {
        self.mark_mode = mark_mode;
        self
    }

    pub fn with_mark_batch_size(mut self, mark_batch_size: usize) -> Self {
        self.mark_batch_size = mark_batch_size;
        self
    }

    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), self.table)
    }
}
