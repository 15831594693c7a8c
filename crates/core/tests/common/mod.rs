#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use condition_export_core::domain::gate::{AccessGate, AdminSession, GateOutcome};
use condition_export_core::domain::record::{Record, RecordBatch, RecordId};
use condition_export_core::ports::record_store::{RecordStore, RecordStoreError};
use condition_export_core::ports::worksheet::{Worksheet, WorksheetError};
use error_stack::report;
use serde_json::Value;

pub fn admin_session() -> AdminSession {
    let mut gate = AccessGate::new("letmein");
    match gate.evaluate("letmein") {
        GateOutcome::Unlocked(session) => session,
        other => panic!("gate did not unlock: {other:?}"),
    }
}

/// In-memory table. `exported` flags flip when records are marked.
#[derive(Default)]
pub struct FakeStore {
    pub rows: Mutex<Vec<Record>>,
    pub fetches: AtomicUsize,
    pub mark_calls: Mutex<Vec<Vec<RecordId>>>,
    pub fail_fetch: bool,
    pub fail_mark: bool,
}

impl FakeStore {
    pub fn with_rows(rows: Value) -> Self {
        let batch = RecordBatch::from_json(rows).expect("rows must be an array of objects");
        Self {
            rows: Mutex::new(batch.iter().cloned().collect()),
            ..Default::default()
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn marked_ids(&self) -> Vec<RecordId> {
        self.mark_calls.lock().unwrap().iter().flatten().cloned().collect()
    }

    pub fn unexported_count(&self) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| !r.is_exported())
            .count()
    }
}

#[async_trait::async_trait]
impl RecordStore for FakeStore {
    async fn fetch_unexported(&self) -> error_stack::Result<RecordBatch, RecordStoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch {
            return Err(report!(RecordStoreError::UnexpectedStatus(503)));
        }

        let rows = self.rows.lock().unwrap();
        Ok(RecordBatch::new(
            rows.iter().filter(|r| !r.is_exported()).cloned().collect(),
        ))
    }

    async fn mark_exported(&self, ids: &[RecordId]) -> error_stack::Result<(), RecordStoreError> {
        self.mark_calls.lock().unwrap().push(ids.to_vec());
        if self.fail_mark {
            return Err(report!(RecordStoreError::UnexpectedStatus(500)));
        }

        let mut rows = self.rows.lock().unwrap();
        for row in rows.iter_mut() {
            if row.id().is_some_and(|id| ids.contains(&id)) {
                row.insert("exported", Value::Bool(true));
            }
        }
        Ok(())
    }

    async fn check_access(&self) -> error_stack::Result<(), RecordStoreError> {
        Ok(())
    }
}

/// In-memory worksheet recording the calls it receives.
#[derive(Default)]
pub struct FakeWorksheet {
    pub rows: Mutex<Vec<Vec<Value>>>,
    pub calls: Mutex<Vec<&'static str>>,
    pub fail_append: bool,
    pub fail_resolve: bool,
}

impl FakeWorksheet {
    pub fn with_rows(rows: Vec<Vec<Value>>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    pub fn snapshot(&self) -> Vec<Vec<Value>> {
        self.rows.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) -> error_stack::Result<(), WorksheetError> {
        self.calls.lock().unwrap().push(call);
        if self.fail_resolve {
            return Err(report!(WorksheetError::ResolutionFailed));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Worksheet for FakeWorksheet {
    fn title(&self) -> &str {
        "condition2025"
    }

    async fn read_all_values(&self) -> error_stack::Result<Vec<Vec<Value>>, WorksheetError> {
        self.record("read_all_values")?;
        Ok(self.snapshot())
    }

    async fn write_header(&self, header: Vec<Value>) -> error_stack::Result<(), WorksheetError> {
        self.record("write_header")?;
        self.rows.lock().unwrap().insert(0, header);
        Ok(())
    }

    async fn append_rows(&self, rows: Vec<Vec<Value>>) -> error_stack::Result<(), WorksheetError> {
        self.record("append_rows")?;
        if self.fail_append {
            return Err(report!(WorksheetError::WriteFailed));
        }
        self.rows.lock().unwrap().extend(rows);
        Ok(())
    }

    async fn check_access(&self) -> error_stack::Result<(), WorksheetError> {
        self.record("check_access")
    }
}
