//! JSON bodies returned by the record service.
//!
//! Record rows are free-form CSV-derived objects, so they are carried as JSON maps and
//! described to OpenAPI as plain objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// One record: column name to value, in column order.
///
/// Deserialising rejects anything but a JSON object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct RecordRow(pub Map<String, Value>);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Body of every error response, e.g. `{"message":"Not found"}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

impl MessageRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Confirmation of a mutation, carrying the affected row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecordRes {
    pub message: String,
    pub record: RecordRow,
}

impl RecordRes {
    pub fn new(message: impl Into<String>, record: RecordRow) -> Self {
        Self {
            message: message.into(),
            record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_res_serialises_message_then_record() {
        let mut row = Map::new();
        row.insert("NAMC_ID".into(), json!("1"));
        let res = RecordRes::new("Record added", RecordRow(row));
        assert_eq!(
            serde_json::to_string(&res).expect("serialise"),
            r#"{"message":"Record added","record":{"NAMC_ID":"1"}}"#
        );
    }

    #[test]
    fn record_row_accepts_only_objects() {
        assert!(serde_json::from_str::<RecordRow>(r#"{"NAMC_ID":"1"}"#).is_ok());
        assert!(serde_json::from_str::<RecordRow>("[1,2]").is_err());
        assert!(serde_json::from_str::<RecordRow>("\"text\"").is_err());
    }
}
