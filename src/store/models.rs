//! Data and wire models for the Firestore recorder

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One submission as it is handed to the recorder
///
/// Created by the solve handler, written once, never updated. The timestamp
/// is not part of this record: it is assigned by Firestore at commit time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub input_prompt: String,
    pub response: String,
}

/// Result of a successful write
#[derive(Debug, Clone)]
pub struct RecordedSubmission {
    /// Full Firestore document name of the new record
    pub document_name: String,
    /// Server-assigned commit time
    pub commit_time: DateTime<Utc>,
}

// Wire types for `documents:commit`.

#[derive(Debug, Serialize)]
pub(crate) struct CommitRequest {
    pub writes: Vec<Write>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Write {
    pub update: DocumentUpdate,
    pub update_transforms: Vec<FieldTransform>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DocumentUpdate {
    pub name: String,
    pub fields: HashMap<String, FieldValue>,
}

/// Typed Firestore field value (only the variants this app writes)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum FieldValue {
    StringValue(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FieldTransform {
    pub field_path: String,
    pub set_to_server_value: String,
}

impl FieldTransform {
    /// Populate `field_path` with the commit-time server timestamp
    pub fn request_time(field_path: impl Into<String>) -> Self {
        Self {
            field_path: field_path.into(),
            set_to_server_value: "REQUEST_TIME".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommitResponse {
    pub commit_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_value_serialization() {
        let value = FieldValue::StringValue("What is 2x+3=7?".to_string());
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"stringValue": "What is 2x+3=7?"})
        );
    }

    #[test]
    fn test_field_transform_serialization() {
        let transform = FieldTransform::request_time("timestamp");
        assert_eq!(
            serde_json::to_value(&transform).unwrap(),
            json!({"fieldPath": "timestamp", "setToServerValue": "REQUEST_TIME"})
        );
    }

    #[test]
    fn test_commit_response_deserialization() {
        let body = json!({
            "writeResults": [{"updateTime": "2024-05-01T12:00:00Z"}],
            "commitTime": "2024-05-01T12:00:00.123456Z"
        });
        let response: CommitResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.commit_time, "2024-05-01T12:00:00.123456Z");
    }
}
