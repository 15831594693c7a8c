use crate::application::export::export_routine::ExportRoutine;
use crate::domain::gate::AdminSession;
use crate::domain::outcome::{ExportOutcome, ExportPreview};
use crate::ports::application_service::{ApplicationService, ApplicationServiceError};
use crate::ports::{record_store::RecordStore, worksheet::Worksheet};
use error_stack::ResultExt;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct ConditionExportService {
    routine: ExportRoutine,
    store: Arc<dyn RecordStore>,
    worksheet: Arc<dyn Worksheet>,
}

impl ConditionExportService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        worksheet: Arc<dyn Worksheet>,
        excluded_columns: Vec<String>,
    ) -> Self {
        let routine = ExportRoutine::new(
            Arc::clone(&store),
            Arc::clone(&worksheet),
            excluded_columns,
        );
        Self {
            routine,
            store,
            worksheet,
        }
    }
}

#[async_trait::async_trait]
impl ApplicationService for ConditionExportService {
    #[instrument(skip_all)]
    async fn export_unexported(
        &self,
        session: &AdminSession,
    ) -> error_stack::Result<ExportOutcome, ApplicationServiceError> {
        let outcome = self
            .routine
            .run(session)
            .await
            .change_context(ApplicationServiceError::ExportFailed)?;

        info!("{}", outcome);
        Ok(outcome)
    }

    #[instrument(skip_all)]
    async fn preview(
        &self,
        session: &AdminSession,
    ) -> error_stack::Result<ExportPreview, ApplicationServiceError> {
        self.routine
            .preview(session)
            .await
            .change_context(ApplicationServiceError::PreviewFailed)
    }

    #[instrument(skip_all)]
    async fn health_check(
        &self,
        _session: &AdminSession,
    ) -> error_stack::Result<String, ApplicationServiceError> {
        self.store
            .check_access()
            .await
            .change_context(ApplicationServiceError::HealthCheckFailed)
            .attach_printable("Record store is not reachable")?;

        self.worksheet
            .check_access()
            .await
            .change_context(ApplicationServiceError::HealthCheckFailed)
            .attach_printable("Worksheet could not be resolved")?;

        Ok(format!(
            "🟢 Condition Export - Healthy\n\
             Record store: reachable\n\
             Worksheet: '{}' found",
            self.worksheet.title()
        ))
    }
}
