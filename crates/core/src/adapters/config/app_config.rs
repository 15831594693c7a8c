use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File, FileFormat};
use error_stack::{report, ResultExt};
use thiserror::Error;

use super::{
    admin_config::AdminConfig, export_config::ExportConfig, sheets_config::SheetsConfig,
    store_config::StoreConfig,
};

pub const DEFAULT_CONFIG_PATH: &str = "Config";
pub const ENV_PREFIX: &str = "CONDITION_EXPORT";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}'")]
    Read(String),
    #[error("Missing or invalid config field '{0}'")]
    InvalidField(String),
    #[error("Invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub export: ExportConfig,
    pub admin: AdminConfig,
}

impl AppConfig {
    /// Reads `config_path` (any format the `config` crate knows, extension optional) and
    /// overlays `CONDITION_EXPORT__SECTION__FIELD` environment variables. The file may be
    /// absent when the environment carries every required field.
    pub fn load(config_path: &str) -> error_stack::Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        Self::from_builder(builder, config_path)
    }

    pub fn from_toml(contents: &str) -> error_stack::Result<Self, ConfigError> {
        let builder = Config::builder().add_source(File::from_str(contents, FileFormat::Toml));

        Self::from_builder(builder, "<inline>")
    }

    fn from_builder(
        builder: ConfigBuilder<DefaultState>,
        origin: &str,
    ) -> error_stack::Result<Self, ConfigError> {
        let config = builder
            .build()
            .change_context_lazy(|| ConfigError::Read(origin.to_string()))?;

        let app_config: AppConfig = serde_path_to_error::deserialize(config).map_err(|e| {
            let path = e.path().to_string();
            report!(ConfigError::InvalidField(path))
                .attach_printable(e.into_inner().to_string())
                .attach_printable(format!(
                    "Make sure all required fields are present in '{}'",
                    origin
                ))
        })?;

        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> error_stack::Result<(), ConfigError> {
        if self.store.url.trim().is_empty() {
            return Err(report!(ConfigError::Invalid("store.url must not be empty")));
        }
        if self.store.mark_batch_size == 0 {
            return Err(report!(ConfigError::Invalid(
                "store.mark_batch_size must be at least 1"
            )));
        }
        if self.admin.password.is_empty() {
            return Err(report!(ConfigError::Invalid(
                "admin.password must not be empty"
            )));
        }
        if self.sheets.credential().is_none() {
            return Err(report!(ConfigError::Invalid(
                "set exactly one of sheets.service_account_key_path and sheets.service_account_key_json"
            )));
        }
        Ok(())
    }
}
