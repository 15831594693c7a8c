pub mod application_service;
pub mod command_handler;
pub mod record_store;
pub mod worksheet;

pub use application_service::{ApplicationService, ApplicationServiceError};
pub use record_store::{RecordStore, RecordStoreError};
pub use worksheet::{Worksheet, WorksheetError};
