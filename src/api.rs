//! HTTP client for the analysis backend.
//!
//! Three endpoints, one round trip each: `/upload_csv` (multipart),
//! `/chat`, and `/dashboard` (both JSON). No retries, no timeouts beyond
//! the transport defaults, no caching.

use reqwest::multipart;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

const BASE_URL_VAR: &str = "CSV_ANALYZER_API_URL";
const DEFAULT_BASE_URL: &str = "http://localhost:5000";

const GENERIC_UPLOAD_ERROR: &str = "Failed to upload the file";

// ============================================
// Error Types
// ============================================

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status; the text is the
    /// server's own `message` when it sent one.
    #[error("{message}")]
    Rejected { message: String },

    /// The request never produced a response.
    #[error("Could not connect to the server. Check that the backend is running.")]
    Unreachable(#[source] reqwest::Error),

    /// A success status arrived with a body we could not make sense of.
    #[error("The server returned an unexpected response")]
    InvalidResponse(#[source] serde_json::Error),
}

// ============================================
// Response Shapes
// ============================================

/// Success body of `/upload_csv`. Every field is optional; the widget only
/// forwards `columns` and never invents one.
#[derive(Clone, Debug, Deserialize)]
pub struct UploadAccepted {
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub dashboard: Option<Dashboard>,
}

/// Analysis dashboard, as the backend shapes it. Parses both the
/// `available: true` form and the `available: false` no-data form.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Dashboard {
    pub available: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total_analyses: Option<usize>,
    #[serde(default)]
    pub analyses: Vec<Analysis>,
    #[serde(default)]
    pub data_info: Option<DataInfo>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Analysis {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub relevant: bool,
    #[serde(default)]
    pub columns: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DataInfo {
    pub rows: u64,
    pub columns: u64,
    #[serde(default)]
    pub numeric_columns: Option<u64>,
    #[serde(default)]
    pub categorical_columns: Option<u64>,
    #[serde(default)]
    pub has_dates: Option<bool>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

// ============================================
// Client
// ============================================

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Client pointed at `CSV_ANALYZER_API_URL`, or the local default when
    /// the variable is unset.
    pub fn from_env() -> Self {
        let base_url = env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Single multipart POST of the file under the `csv_file` field.
    ///
    /// A success status must carry a readable JSON body; anything else is an
    /// error and the caller never sees fabricated columns.
    pub async fn upload_csv(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadAccepted, ApiError> {
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("csv_file", part);

        let response = self
            .http
            .post(format!("{}/upload_csv", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::Unreachable)?;
        let status = response.status();
        let body = response.text().await.map_err(ApiError::Unreachable)?;

        if status.is_success() {
            serde_json::from_str::<UploadAccepted>(&body).map_err(ApiError::InvalidResponse)
        } else {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|parsed| parsed.message)
                .unwrap_or_else(|| GENERIC_UPLOAD_ERROR.to_string());
            Err(ApiError::Rejected { message })
        }
    }

    /// One question, one reply. The body is parsed regardless of HTTP
    /// status: the backend sends `reply` bodies with error statuses too.
    pub async fn send_chat(&self, message: &str) -> Result<ChatReply, ApiError> {
        let response = self
            .http
            .post(format!("{}/chat", self.base_url))
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(ApiError::Unreachable)?;
        let body = response.text().await.map_err(ApiError::Unreachable)?;

        serde_json::from_str::<ChatReply>(&body).map_err(ApiError::InvalidResponse)
    }

    /// Asks which analyses apply to `message` given the loaded data.
    pub async fn fetch_dashboard(&self, message: &str) -> Result<Dashboard, ApiError> {
        let response = self
            .http
            .post(format!("{}/dashboard", self.base_url))
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(ApiError::Unreachable)?;
        let body = response.text().await.map_err(ApiError::Unreachable)?;

        serde_json::from_str::<Dashboard>(&body).map_err(ApiError::InvalidResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_upload_acceptance() {
        let body = r#"{"message": "CSV loaded", "columns": ["name", "age"], "rows": 2}"#;
        let accepted: UploadAccepted = serde_json::from_str(body).expect("valid body");
        assert_eq!(
            accepted.columns,
            Some(vec!["name".to_string(), "age".to_string()])
        );
        assert_eq!(accepted.message.as_deref(), Some("CSV loaded"));
    }

    #[test]
    fn upload_acceptance_without_columns() {
        let accepted: UploadAccepted = serde_json::from_str("{}").expect("valid body");
        assert!(accepted.columns.is_none());
    }

    #[test]
    fn parses_chat_reply_without_dashboard() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"reply": "The average is 42."}"#).expect("valid body");
        assert_eq!(reply.reply.as_deref(), Some("The average is 42."));
        assert!(reply.dashboard.is_none());
    }

    #[test]
    fn parses_unavailable_dashboard() {
        let body = r#"{"available": false, "message": "No CSV loaded"}"#;
        let dashboard: Dashboard = serde_json::from_str(body).expect("valid body");
        assert!(!dashboard.available);
        assert_eq!(dashboard.message.as_deref(), Some("No CSV loaded"));
        assert!(dashboard.analyses.is_empty());
    }

    #[test]
    fn from_env_falls_back_to_the_local_default() {
        // Only exercises the fallback; the variable is not set under test.
        if env::var(BASE_URL_VAR).is_err() {
            assert_eq!(ApiClient::from_env().base_url(), DEFAULT_BASE_URL);
        }
    }
}
