use std::fmt::{self, Formatter};

use error_stack::report;
use serde_json::{Map, Value};
use thiserror::Error;

pub const ID_COLUMN: &str = "id";
pub const EXPORTED_COLUMN: &str = "exported";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Store response is not a JSON array")]
    NotAnArray,
    #[error("Record at position {index} is not a JSON object")]
    NotAnObject { index: usize },
    #[error("Record at position {index} has no `id` field")]
    MissingId { index: usize },
    #[error("Record at position {index} has an `id` that is neither a number nor a string")]
    InvalidId { index: usize },
}

/// Identifier of a record as returned by the store. Kept opaque: the store may use integer
/// or text (uuid) keys and both are rendered verbatim into filters.
#[derive(Clone, PartialEq)]
pub struct RecordId(Value);

impl RecordId {
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Number(_) | Value::String(_) => Some(RecordId(value)),
            _ => None,
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Literal usable inside a PostgREST `in.(...)` list. Text ids are always double quoted
    /// so reserved characters (`,`, `.`, `:`, `(`, `)`) survive.
    ///
    /// ```
    /// use condition_export_core::domain::record::RecordId;
    /// use serde_json::json;
    /// assert_eq!(RecordId::from_value(json!(7)).unwrap().to_list_literal(), "7");
    /// assert_eq!(RecordId::from_value(json!("a,b")).unwrap().to_list_literal(), "\"a,b\"");
    /// ```
    pub fn to_list_literal(&self) -> String {
        match &self.0 {
            Value::String(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
            other => other.to_string(),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId(Value::from(id))
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId(Value::from(id))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => write!(f, "{}", s),
            other => write!(f, "{}", other),
        }
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self)
    }
}

/// One row of the remote table. Field order is the order the store serialized them in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Record { fields }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(column.into(), value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn id(&self) -> Option<RecordId> {
        self.fields
            .get(ID_COLUMN)
            .cloned()
            .and_then(RecordId::from_value)
    }

    pub fn is_exported(&self) -> bool {
        matches!(self.fields.get(EXPORTED_COLUMN), Some(Value::Bool(true)))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordBatch {
    records: Vec<Record>,
}

impl RecordBatch {
    pub fn new(records: Vec<Record>) -> Self {
        RecordBatch { records }
    }

    /// Builds a batch from the JSON array returned by the store.
    pub fn from_json(value: Value) -> error_stack::Result<Self, RecordError> {
        let Value::Array(items) = value else {
            return Err(report!(RecordError::NotAnArray));
        };

        let records = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(fields) => Ok(Record::from_fields(fields)),
                _ => Err(report!(RecordError::NotAnObject { index })),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RecordBatch { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Union of the columns of every record, in order of first appearance.
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for record in &self.records {
            for column in record.columns() {
                if !columns.iter().any(|c| c == column) {
                    columns.push(column.to_owned());
                }
            }
        }
        columns
    }

    pub fn ids(&self) -> error_stack::Result<Vec<RecordId>, RecordError> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| match record.get(ID_COLUMN) {
                None | Some(Value::Null) => Err(report!(RecordError::MissingId { index })),
                Some(_) => record
                    .id()
                    .ok_or_else(|| report!(RecordError::InvalidId { index })),
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a RecordBatch {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_keeps_store_order() {
        let batch = RecordBatch::from_json(json!([
            {"id": 2, "exported": false, "mood": "tired"},
            {"id": 1, "exported": false, "mood": "good"},
        ]))
        .unwrap();

        let ids = batch.ids().unwrap();
        assert_eq!(ids, vec![RecordId::from(2), RecordId::from(1)]);
    }

    #[test]
    fn test_from_json_empty_array() {
        let batch = RecordBatch::from_json(json!([])).unwrap();
        assert!(batch.is_empty());
        assert!(batch.columns().is_empty());
    }

    #[test]
    fn test_from_json_rejects_non_array() {
        let err = RecordBatch::from_json(json!({"message": "nope"})).unwrap_err();
        assert_eq!(err.current_context(), &RecordError::NotAnArray);
    }

    #[test]
    fn test_from_json_rejects_non_object_item() {
        let err = RecordBatch::from_json(json!([{"id": 1}, 3])).unwrap_err();
        assert_eq!(err.current_context(), &RecordError::NotAnObject { index: 1 });
    }

    #[test]
    fn test_columns_union_in_first_appearance_order() {
        let batch = RecordBatch::from_json(json!([
            {"id": 1, "sleep": 7, "mood": "good"},
            {"id": 2, "mood": "tired", "weight": 61.5},
        ]))
        .unwrap();

        assert_eq!(batch.columns(), vec!["id", "sleep", "mood", "weight"]);
    }

    #[test]
    fn test_ids_missing() {
        let batch = RecordBatch::from_json(json!([{"id": 1}, {"mood": "good"}])).unwrap();
        let err = batch.ids().unwrap_err();
        assert_eq!(err.current_context(), &RecordError::MissingId { index: 1 });
    }

    #[test]
    fn test_ids_invalid() {
        let batch = RecordBatch::from_json(json!([{"id": [1, 2]}])).unwrap();
        let err = batch.ids().unwrap_err();
        assert_eq!(err.current_context(), &RecordError::InvalidId { index: 0 });
    }

    #[test]
    fn test_record_id_display() {
        assert_eq!(RecordId::from(42).to_string(), "42");
        assert_eq!(RecordId::from("6f1c").to_string(), "6f1c");
        assert_eq!(format!("{:?}", RecordId::from(3)), "RecordId(3)");
    }

    #[test]
    fn test_record_id_list_literal_escapes_quotes() {
        let id = RecordId::from(r#"a"b"#);
        assert_eq!(id.to_list_literal(), r#""a\"b""#);
    }

    #[test]
    fn test_is_exported() {
        let batch = RecordBatch::from_json(json!([
            {"id": 1, "exported": true},
            {"id": 2, "exported": false},
            {"id": 3},
        ]))
        .unwrap();
        let flags: Vec<bool> = batch.iter().map(Record::is_exported).collect();
        assert_eq!(flags, vec![true, false, false]);
    }
}
