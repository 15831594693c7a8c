use error_stack::{report, ResultExt};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Value};
use tracing::instrument;

use crate::adapters::config::store_config::{MarkMode, StoreConfig};
use crate::domain::record::{RecordBatch, RecordId};
use crate::ports::record_store::{RecordStore, RecordStoreError};

/// Record store backed by a PostgREST endpoint (`{url}/rest/v1/{table}`).
pub struct PostgrestRecordStore {
    config: StoreConfig,
    client: Client,
}

impl std::fmt::Debug for PostgrestRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgrestRecordStore")
            .field("table_url", &self.config.table_url())
            .field("mark_mode", &self.config.mark_mode)
            .finish()
    }
}

impl PostgrestRecordStore {
    pub fn new(config: StoreConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: StoreConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let key = self.config.api_key.expose();
        request.header("apikey", key).bearer_auth(key)
    }

    async fn send(&self, request: RequestBuilder) -> error_stack::Result<Response, RecordStoreError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .change_context(RecordStoreError::RequestFailed)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(report!(RecordStoreError::UnexpectedStatus(status.as_u16())))
            .attach_printable(format!("{} answered {}", self.config.table_url(), status))
            .attach_printable(body)
    }

    /// `filter` is the PostgREST operator applied to `id`, e.g. `eq.3` or `in.(1,2)`.
    #[instrument(skip(self))]
    async fn patch_exported(&self, filter: String) -> error_stack::Result<(), RecordStoreError> {
        let request = self
            .client
            .patch(self.config.table_url())
            .query(&[("id", filter.as_str())])
            .header("Prefer", "return=minimal")
            .json(&json!({ "exported": true }));

        self.send(request).await.map(|_| ())
    }
}

#[async_trait::async_trait]
impl RecordStore for PostgrestRecordStore {
    #[instrument(name = "PostgrestRecordStore::fetch_unexported")]
    async fn fetch_unexported(&self) -> error_stack::Result<RecordBatch, RecordStoreError> {
        tracing::trace!("☁️  Fetching unexported records from {}", self.config.table);

        let request = self
            .client
            .get(self.config.table_url())
            .query(&[("exported", "eq.false"), ("select", "*")]);

        let body: Value = self
            .send(request)
            .await?
            .json()
            .await
            .change_context(RecordStoreError::InvalidResponse)?;

        let batch = RecordBatch::from_json(body).change_context(RecordStoreError::InvalidResponse)?;

        tracing::info!("📋 {} unexported record(s) found", batch.len());
        Ok(batch)
    }

    #[instrument(name = "PostgrestRecordStore::mark_exported", skip(ids), fields(ids = ids.len()))]
    async fn mark_exported(&self, ids: &[RecordId]) -> error_stack::Result<(), RecordStoreError> {
        if ids.is_empty() {
            return Ok(());
        }

        match self.config.mark_mode {
            MarkMode::PerRecord => {
                for id in ids {
                    self.patch_exported(format!("eq.{}", id))
                        .await
                        .attach_printable_lazy(|| format!("Failed to mark record {}", id))?;
                }
            }
            MarkMode::Batched => {
                for chunk in ids.chunks(self.config.mark_batch_size.max(1)) {
                    let list = chunk
                        .iter()
                        .map(RecordId::to_list_literal)
                        .collect::<Vec<_>>()
                        .join(",");
                    self.patch_exported(format!("in.({})", list))
                        .await
                        .attach_printable_lazy(|| {
                            format!("Failed to mark records {:?}", chunk)
                        })?;
                }
            }
        }

        tracing::info!("🏷️  Marked {} record(s) as exported", ids.len());
        Ok(())
    }

    #[instrument(name = "PostgrestRecordStore::check_access")]
    async fn check_access(&self) -> error_stack::Result<(), RecordStoreError> {
        let request = self
            .client
            .get(self.config.table_url())
            .query(&[("select", "id"), ("limit", "0")]);

        self.send(request).await.map(|_| ())
    }
}
