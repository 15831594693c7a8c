pub mod admin_config;
pub mod app_config;
pub mod export_config;
pub mod secret;
pub mod sheets_config;
pub mod store_config;
