//! Integration tests for the backend client
//!
//! Drives ApiClient and the upload pipeline against a local mock server

use csv_analyzer::api::{ApiClient, ApiError};
use csv_analyzer::types::UploadCandidate;
use csv_analyzer::upload::{self, UploadError};
use mockito::Matcher;

fn candidate(file_name: &str, content: &str) -> UploadCandidate {
    UploadCandidate {
        file_name: file_name.to_string(),
        size_bytes: content.len() as u64,
        raw_content: content.to_string(),
    }
}

mod upload_endpoint_tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_returns_server_columns() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/upload_csv")
            .match_header(
                "content-type",
                Matcher::Regex("multipart/form-data.*".to_string()),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "CSV loaded", "columns": ["name", "age"], "rows": 2}"#)
            .create_async()
            .await;

        let client = ApiClient::with_base_url(server.url());
        let complete = upload::run_upload(&client, candidate("people.csv", "name,age\nana,31\n"))
            .await
            .expect("upload should succeed");

        assert_eq!(
            complete.columns,
            Some(vec!["name".to_string(), "age".to_string()])
        );
        assert_eq!(complete.candidate.file_name, "people.csv");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upload_rejection_surfaces_the_server_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/upload_csv")
            .with_status(400)
            .with_body(r#"{"message": "No file part in the request"}"#)
            .create_async()
            .await;

        let client = ApiClient::with_base_url(server.url());
        let err = upload::run_upload(&client, candidate("empty.csv", ""))
            .await
            .expect_err("upload should fail");

        assert_eq!(err.to_string(), "No file part in the request");
    }

    #[tokio::test]
    async fn test_upload_rejection_without_message_uses_the_generic_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/upload_csv")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = ApiClient::with_base_url(server.url());
        let err = upload::run_upload(&client, candidate("data.csv", "a\n1\n"))
            .await
            .expect_err("upload should fail");

        assert_eq!(err.to_string(), "Failed to upload the file");
    }

    #[tokio::test]
    async fn test_ok_status_with_garbage_body_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/upload_csv")
            .with_status(200)
            .with_body("<html>login page</html>")
            .create_async()
            .await;

        let client = ApiClient::with_base_url(server.url());
        let err = upload::run_upload(&client, candidate("data.csv", "a\n1\n"))
            .await
            .expect_err("garbage body must not pass");

        assert!(matches!(err, UploadError::Api(ApiError::InvalidResponse(_))));
        assert_eq!(err.to_string(), "The server returned an unexpected response");
    }

    #[tokio::test]
    async fn test_invalid_files_never_reach_the_network() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/upload_csv")
            .expect(0)
            .create_async()
            .await;

        let client = ApiClient::with_base_url(server.url());
        let err = upload::run_upload(&client, candidate("data.txt", "a\n1\n"))
            .await
            .expect_err("validation should fail first");

        assert!(matches!(err, UploadError::InvalidFormat));
        mock.assert_async().await;
    }
}

mod chat_endpoint_tests {
    use super::*;

    #[tokio::test]
    async fn test_chat_round_trip() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat")
            .match_body(Matcher::Json(serde_json::json!({
                "message": "What is the average of column X?"
            })))
            .with_status(200)
            .with_body(r#"{"reply": "The average is 42."}"#)
            .create_async()
            .await;

        let client = ApiClient::with_base_url(server.url());
        let reply = client
            .send_chat("What is the average of column X?")
            .await
            .expect("chat should succeed");

        assert_eq!(reply.reply.as_deref(), Some("The average is 42."));
        assert!(reply.dashboard.is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_chat_parses_reply_bodies_on_error_statuses() {
        // The backend answers some failures with a readable reply body.
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat")
            .with_status(500)
            .with_body(r#"{"reply": "No CSV loaded. Upload a file first."}"#)
            .create_async()
            .await;

        let client = ApiClient::with_base_url(server.url());
        let reply = client.send_chat("hello").await.expect("body should parse");

        assert_eq!(
            reply.reply.as_deref(),
            Some("No CSV loaded. Upload a file first.")
        );
    }

    #[tokio::test]
    async fn test_chat_reply_with_dashboard_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat")
            .with_status(200)
            .with_body(
                r#"{
                    "reply": "Here is what I can run.",
                    "dashboard": {
                        "available": true,
                        "total_analyses": 1,
                        "analyses": [{
                            "id": "correlation",
                            "name": "Correlation",
                            "description": "Relationships between numeric columns",
                            "relevant": true,
                            "columns": ["age", "income"]
                        }],
                        "data_info": {"rows": 120, "columns": 8}
                    }
                }"#,
            )
            .create_async()
            .await;

        let client = ApiClient::with_base_url(server.url());
        let reply = client
            .send_chat("what can you analyze?")
            .await
            .expect("chat should succeed");

        let dashboard = reply.dashboard.expect("dashboard should be present");
        assert!(dashboard.available);
        assert_eq!(dashboard.analyses.len(), 1);
        assert_eq!(dashboard.analyses[0].id, "correlation");
        assert!(dashboard.analyses[0].relevant);
        assert_eq!(dashboard.data_info.as_ref().map(|info| info.rows), Some(120));
    }

    #[tokio::test]
    async fn test_unreachable_server_reports_connectivity() {
        // Bind a port, then drop the listener so the address refuses connections.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to read addr");
        drop(listener);

        let client = ApiClient::with_base_url(format!("http://{addr}"));
        let err = client
            .send_chat("anyone there?")
            .await
            .expect_err("must fail");

        assert!(matches!(err, ApiError::Unreachable(_)));
        assert_eq!(
            err.to_string(),
            "Could not connect to the server. Check that the backend is running."
        );
    }
}

mod dashboard_endpoint_tests {
    use super::*;

    #[tokio::test]
    async fn test_dashboard_round_trip() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/dashboard")
            .match_body(Matcher::Json(serde_json::json!({"message": "show trends"})))
            .with_status(200)
            .with_body(r#"{"available": false, "message": "No CSV loaded"}"#)
            .create_async()
            .await;

        let client = ApiClient::with_base_url(server.url());
        let dashboard = client
            .fetch_dashboard("show trends")
            .await
            .expect("should parse");

        assert!(!dashboard.available);
        assert_eq!(dashboard.message.as_deref(), Some("No CSV loaded"));
        mock.assert_async().await;
    }
}
