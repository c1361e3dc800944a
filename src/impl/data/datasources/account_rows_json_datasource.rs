use async_trait::async_trait;
use fractic_server_error::ServerError;
use serde_json::Value;

use crate::{
    data::models::raw_account_row_model::{RawAccountRowModel, RawValue},
    entities::{AccountRecord, Metrics},
    errors::{InvalidJson, ReadError},
};

// Envelope keys under which report services commonly nest the row array.
const ENVELOPE_KEYS: &[&str] = &["data", "rows", "items", "result"];

#[async_trait]
pub(crate) trait AccountRowsJsonDatasource<M: Metrics>: Send + Sync {
    fn from_string(&self, s: &str) -> Result<Vec<AccountRecord<M>>, ServerError>;

    async fn from_file<P>(&self, path: P) -> Result<Vec<AccountRecord<M>>, ServerError>
    where
        P: AsRef<std::path::Path> + Send;
}

pub(crate) struct AccountRowsJsonDatasourceImpl<M: Metrics> {
    _phantom: std::marker::PhantomData<M>,
}

impl<M: Metrics> AccountRowsJsonDatasourceImpl<M> {
    pub(crate) fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }

    fn rows(value: Value) -> Result<Vec<Value>, ServerError> {
        match value {
            Value::Array(rows) => Ok(rows),
            Value::Object(mut map) => ENVELOPE_KEYS
                .iter()
                .find_map(|k| match map.remove(*k) {
                    Some(Value::Array(rows)) => Some(rows),
                    _ => None,
                })
                .ok_or_else(|| InvalidJson::new("expected an array of account rows")),
            _ => Err(InvalidJson::new("expected an array of account rows")),
        }
    }

    fn raw_value(value: Value) -> RawValue {
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(b),
            Value::Number(n) => n.as_f64().map_or(RawValue::Null, RawValue::Number),
            Value::String(s) => RawValue::Text(s),
            Value::Array(_) | Value::Object(_) => RawValue::Null,
        }
    }
}

#[async_trait]
impl<M: Metrics> AccountRowsJsonDatasource<M> for AccountRowsJsonDatasourceImpl<M> {
    fn from_string(&self, s: &str) -> Result<Vec<AccountRecord<M>>, ServerError> {
        let value: Value =
            serde_json::from_str(s).map_err(|e| InvalidJson::with_debug(&e.to_string(), &e))?;
        Self::rows(value)?
            .into_iter()
            .map(|row| match row {
                Value::Object(map) => {
                    let mut raw = RawAccountRowModel::new();
                    for (key, value) in map {
                        raw.insert(&key, Self::raw_value(value));
                    }
                    raw.into_record()
                }
                _ => Err(InvalidJson::new("account row is not an object")),
            })
            .collect()
    }

    async fn from_file<P>(&self, path: P) -> Result<Vec<AccountRecord<M>>, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ReadError::with_debug(&e))?;
        self.from_string(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{movement, AccountCode, MovementMetrics, ParentRef};

    #[test]
    fn test_reads_plain_array() {
        let json = r#"[
            {"id": 1, "headCode": 1000, "headName": "Cash", "parentHead": null,
             "opening": 10, "debit": "1,000", "credit": 0, "balance": 1010},
            {"Id": 2, "HeadCode": "1001", "HeadName": "Till", "ParentHead": 1, "IsActive": false}
        ]"#;
        let records = AccountRowsJsonDatasourceImpl::<MovementMetrics>::new()
            .from_string(json)
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].code, AccountCode("1000".into()));
        assert_eq!(records[0].parent, ParentRef::Root);
        assert_eq!(records[0].own_metrics, movement(10.0, 1000.0, 0.0, 1010.0));
        assert_eq!(records[1].parent, ParentRef::Ref("1".into()));
        assert!(!records[1].is_active);
    }

    #[test]
    fn test_reads_enveloped_rows() {
        let json = r#"{"status": "ok", "data": [{"id": 5, "code": "AR"}]}"#;
        let records = AccountRowsJsonDatasourceImpl::<MovementMetrics>::new()
            .from_string(json)
            .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_rejects_non_rows() {
        let ds = AccountRowsJsonDatasourceImpl::<MovementMetrics>::new();
        assert!(ds.from_string("{\"status\": \"ok\"}").is_err());
        assert!(ds.from_string("[1, 2]").is_err());
        assert!(ds.from_string("not json").is_err());
    }
}
