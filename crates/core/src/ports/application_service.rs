use thiserror::Error;

use crate::domain::gate::AdminSession;
use crate::domain::outcome::{ExportOutcome, ExportPreview};

#[derive(Error, Debug)]
pub enum ApplicationServiceError {
    #[error("Export run failed")]
    ExportFailed,
    #[error("Export preview failed")]
    PreviewFailed,
    #[error("Health check failed")]
    HealthCheckFailed,
}

#[async_trait::async_trait]
pub trait ApplicationService: Send + Sync {
    /// Fetch, append to the worksheet, then mark as exported.
    async fn export_unexported(
        &self,
        session: &AdminSession,
    ) -> error_stack::Result<ExportOutcome, ApplicationServiceError>;

    /// Fetch and build the grid without writing anywhere.
    async fn preview(
        &self,
        session: &AdminSession,
    ) -> error_stack::Result<ExportPreview, ApplicationServiceError>;

    async fn health_check(
        &self,
        session: &AdminSession,
    ) -> error_stack::Result<String, ApplicationServiceError>;
}
