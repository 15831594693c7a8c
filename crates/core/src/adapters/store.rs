pub mod postgrest_record_store;
