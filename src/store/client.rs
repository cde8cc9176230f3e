//! Firestore REST client

use super::auth::{ServiceAccountKey, TokenProvider};
use super::models::{
    CommitRequest, CommitResponse, DocumentUpdate, FieldTransform, FieldValue,
    RecordedSubmission, SubmissionRecord, Write,
};
use super::PersistenceError;
use crate::config::FirestoreConfig;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::collections::HashMap;
use tracing::{debug, info};

/// Firestore client for recording submissions
pub struct FirestoreClient {
    http: Client,
    auth: TokenProvider,
    project_id: String,
    base_url: String,
    collection: String,
}

impl FirestoreClient {
    /// Create a client from a service account key
    ///
    /// The project id comes from the key file, matching how the original
    /// Firebase Admin credential flow resolves it.
    pub fn new(config: &FirestoreConfig, key: ServiceAccountKey) -> Result<Self, PersistenceError> {
        let project_id = key.project_id.clone();
        let auth = TokenProvider::service_account(key)?;
        Self::with_auth(config, project_id, auth)
    }

    /// Create a client with an explicit token provider
    pub fn with_auth(
        config: &FirestoreConfig,
        project_id: String,
        auth: TokenProvider,
    ) -> Result<Self, PersistenceError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PersistenceError::RequestFailed(e.to_string()))?;

        Ok(Self {
            http,
            auth,
            project_id,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
        })
    }

    /// Append one submission document with a server-assigned timestamp
    ///
    /// At-least-once: there is no idempotency key, and the caller does not
    /// retry. The document id is a fresh UUID so concurrent submissions never
    /// collide.
    pub async fn record_submission(
        &self,
        record: SubmissionRecord,
    ) -> Result<RecordedSubmission, PersistenceError> {
        let document_name = format!(
            "projects/{}/databases/(default)/documents/{}/{}",
            self.project_id,
            self.collection,
            uuid::Uuid::new_v4()
        );

        debug!(
            "Recording submission: collection={}, input_len={}",
            self.collection,
            record.input_prompt.len()
        );

        let mut fields = HashMap::new();
        fields.insert(
            "input_prompt".to_string(),
            FieldValue::StringValue(record.input_prompt),
        );
        fields.insert(
            "response".to_string(),
            FieldValue::StringValue(record.response),
        );

        let body = CommitRequest {
            writes: vec![Write {
                update: DocumentUpdate {
                    name: document_name.clone(),
                    fields,
                },
                update_transforms: vec![FieldTransform::request_time("timestamp")],
            }],
        };

        let url = format!(
            "{}/v1/projects/{}/databases/(default)/documents:commit",
            self.base_url, self.project_id
        );

        let token = self.auth.token().await?;

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PersistenceError::Timeout(e.to_string())
                } else {
                    PersistenceError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PersistenceError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let commit: CommitResponse = response
            .json()
            .await
            .map_err(|e| PersistenceError::InvalidResponse(e.to_string()))?;

        let commit_time = DateTime::parse_from_rfc3339(&commit.commit_time)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| {
                PersistenceError::InvalidResponse(format!(
                    "Bad commit time {:?}: {}",
                    commit.commit_time, e
                ))
            })?;

        info!("Submission recorded: {}", document_name);

        Ok(RecordedSubmission {
            document_name,
            commit_time,
        })
    }

    /// Collection this client writes to
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn test_config(base_url: &str) -> FirestoreConfig {
        FirestoreConfig {
            credentials_path: PathBuf::from("unused.json"),
            base_url: base_url.to_string(),
            collection: "responses".to_string(),
            timeout_ms: 5_000,
        }
    }

    fn test_client(base_url: &str) -> FirestoreClient {
        FirestoreClient::with_auth(
            &test_config(base_url),
            "test-project".to_string(),
            TokenProvider::fixed("test-token"),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_record_submission() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock(
                "POST",
                "/v1/projects/test-project/databases/(default)/documents:commit",
            )
            .match_header("authorization", "Bearer test-token")
            .match_body(mockito::Matcher::PartialJson(json!({
                "writes": [{
                    "update": {
                        "fields": {
                            "input_prompt": {"stringValue": "What is 2x+3=7?"},
                            "response": {"stringValue": "x = 2"},
                        }
                    },
                    "updateTransforms": [
                        {"fieldPath": "timestamp", "setToServerValue": "REQUEST_TIME"}
                    ]
                }]
            })))
            .with_status(200)
            .with_body(
                json!({
                    "writeResults": [{"updateTime": "2024-05-01T12:00:00Z"}],
                    "commitTime": "2024-05-01T12:00:00.123456Z"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = test_client(&server.url());
        let recorded = client
            .record_submission(SubmissionRecord {
                input_prompt: "What is 2x+3=7?".to_string(),
                response: "x = 2".to_string(),
            })
            .await
            .unwrap();

        assert!(recorded
            .document_name
            .starts_with("projects/test-project/databases/(default)/documents/responses/"));
        assert_eq!(
            recorded.commit_time,
            DateTime::parse_from_rfc3339("2024-05-01T12:00:00.123456Z")
                .unwrap()
                .with_timezone(&Utc)
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_record_submission_upstream_error() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock(
                "POST",
                "/v1/projects/test-project/databases/(default)/documents:commit",
            )
            .with_status(403)
            .with_body("permission denied")
            .create_async()
            .await;

        let client = test_client(&server.url());
        let err = client
            .record_submission(SubmissionRecord {
                input_prompt: "q".to_string(),
                response: "a".to_string(),
            })
            .await
            .unwrap_err();

        match err {
            PersistenceError::Upstream { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "permission denied");
            }
            other => panic!("Expected Upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_record_submission_invalid_commit_time() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock(
                "POST",
                "/v1/projects/test-project/databases/(default)/documents:commit",
            )
            .with_status(200)
            .with_body(json!({"commitTime": "not-a-time"}).to_string())
            .create_async()
            .await;

        let client = test_client(&server.url());
        let err = client
            .record_submission(SubmissionRecord {
                input_prompt: "q".to_string(),
                response: "a".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PersistenceError::InvalidResponse(_)));
    }
}
