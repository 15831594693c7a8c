pub mod gate;
pub mod grid;
pub mod outcome;
pub mod record;
pub mod sheets;

// Re-export commonly used types
pub use gate::{AccessGate, AdminSession, GateOutcome, GateState};
pub use grid::ExportGrid;
pub use outcome::{ExportOutcome, ExportPreview};
pub use record::{Record, RecordBatch, RecordError, RecordId};
