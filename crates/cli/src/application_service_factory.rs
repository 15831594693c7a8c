use condition_export_core::{
    adapters::{
        config::app_config::AppConfig,
        sheets::{sheets_worksheet::SheetsWorksheet, spreadsheet_manager::SpreadsheetManager},
        store::postgrest_record_store::PostgrestRecordStore,
    },
    application::service::ConditionExportService,
    ports::{
        application_service::ApplicationService, command_handler::CommandError,
        record_store::RecordStore, worksheet::Worksheet,
    },
};
use error_stack::ResultExt;

use std::sync::Arc;

pub struct ApplicationServiceFactory;

impl ApplicationServiceFactory {
    pub async fn create(
        config: &AppConfig,
    ) -> error_stack::Result<Arc<dyn ApplicationService>, CommandError> {
        let spreadsheet_manager = Arc::new(
            SpreadsheetManager::new(config.sheets.clone())
                .await
                .change_context(CommandError::ExecutionFailed {
                    details: "could not set up the spreadsheet client".to_string(),
                })?,
        );

        let store: Arc<dyn RecordStore> =
            Arc::new(PostgrestRecordStore::new(config.store.clone()));
        let worksheet: Arc<dyn Worksheet> = Arc::new(SheetsWorksheet::new(
            Arc::clone(&spreadsheet_manager),
            config.sheets.worksheet_name.to_string(),
        ));

        Ok(Arc::new(ConditionExportService::new(
            store,
            worksheet,
            config.export.excluded_columns.clone(),
        )))
    }
}
