use condition_export_core::adapters::config::store_config::{MarkMode, StoreConfig};
use condition_export_core::adapters::store::postgrest_record_store::PostgrestRecordStore;
use condition_export_core::domain::record::RecordId;
use condition_export_core::ports::record_store::{RecordStore, RecordStoreError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TABLE_PATH: &str = "/rest/v1/condition";

fn store(server: &MockServer, mark_mode: MarkMode) -> PostgrestRecordStore {
    PostgrestRecordStore::new(StoreConfig::new(server.uri(), "anon-key").with_mark_mode(mark_mode))
}

fn ids(values: &[i64]) -> Vec<RecordId> {
    values.iter().copied().map(RecordId::from).collect()
}

#[tokio::test]
async fn fetch_sends_key_and_filter_and_keeps_field_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .and(query_param("exported", "eq.false"))
        .and(query_param("select", "*"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"id":1,"sleep":7,"mood":"good","exported":false},{"id":2,"mood":"tired","exported":false}]"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let batch = store(&server, MarkMode::Batched)
        .fetch_unexported()
        .await
        .unwrap();

    assert_eq!(batch.len(), 2);
    assert_eq!(batch.columns(), vec!["id", "sleep", "mood", "exported"]);
    assert_eq!(batch.ids().unwrap(), ids(&[1, 2]));
}

#[tokio::test]
async fn fetch_of_empty_table_is_an_empty_batch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let batch = store(&server, MarkMode::Batched)
        .fetch_unexported()
        .await
        .unwrap();

    assert!(batch.is_empty());
}

#[tokio::test]
async fn fetch_reports_server_errors_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = store(&server, MarkMode::Batched)
        .fetch_unexported()
        .await
        .unwrap_err();

    assert_eq!(err.current_context(), &RecordStoreError::UnexpectedStatus(500));
}

#[tokio::test]
async fn fetch_rejects_a_non_array_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "relation does not exist"})),
        )
        .mount(&server)
        .await;

    let err = store(&server, MarkMode::Batched)
        .fetch_unexported()
        .await
        .unwrap_err();

    assert_eq!(err.current_context(), &RecordStoreError::InvalidResponse);
}

#[tokio::test]
async fn fetch_reports_unreachable_store() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let err = PostgrestRecordStore::new(StoreConfig::new(uri, "anon-key"))
        .fetch_unexported()
        .await
        .unwrap_err();

    assert_eq!(err.current_context(), &RecordStoreError::RequestFailed);
}

#[tokio::test]
async fn per_record_mode_patches_each_id() {
    let server = MockServer::start().await;
    for id in ["eq.1", "eq.2"] {
        Mock::given(method("PATCH"))
            .and(path(TABLE_PATH))
            .and(query_param("id", id))
            .and(header("prefer", "return=minimal"))
            .and(body_json(json!({"exported": true})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
    }

    store(&server, MarkMode::PerRecord)
        .mark_exported(&ids(&[1, 2]))
        .await
        .unwrap();
}

#[tokio::test]
async fn batched_mode_sends_one_request_per_chunk() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(TABLE_PATH))
        .and(query_param("id", "in.(1,2)"))
        .and(body_json(json!({"exported": true})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(TABLE_PATH))
        .and(query_param("id", "in.(3)"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let config = StoreConfig::new(server.uri(), "anon-key").with_mark_batch_size(2);
    PostgrestRecordStore::new(config)
        .mark_exported(&ids(&[1, 2, 3]))
        .await
        .unwrap();
}

#[tokio::test]
async fn batched_mode_quotes_text_ids() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(TABLE_PATH))
        .and(query_param("id", r#"in.("a1","b2")"#))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    store(&server, MarkMode::Batched)
        .mark_exported(&[RecordId::from("a1"), RecordId::from("b2")])
        .await
        .unwrap();
}

#[tokio::test]
async fn marking_twice_is_harmless() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(TABLE_PATH))
        .and(query_param("id", "eq.1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&server)
        .await;

    let store = store(&server, MarkMode::PerRecord);
    store.mark_exported(&ids(&[1])).await.unwrap();
    store.mark_exported(&ids(&[1])).await.unwrap();
}

#[tokio::test]
async fn marking_stops_at_the_first_failure() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(query_param("id", "eq.1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(query_param("id", "eq.2"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(query_param("id", "eq.3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let err = store(&server, MarkMode::PerRecord)
        .mark_exported(&ids(&[1, 2, 3]))
        .await
        .unwrap_err();

    assert_eq!(err.current_context(), &RecordStoreError::UnexpectedStatus(401));
}

#[tokio::test]
async fn marking_nothing_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    store(&server, MarkMode::Batched)
        .mark_exported(&[])
        .await
        .unwrap();
}

#[tokio::test]
async fn check_access_reads_no_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .and(query_param("select", "id"))
        .and(query_param("limit", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    store(&server, MarkMode::Batched).check_access().await.unwrap();
}
