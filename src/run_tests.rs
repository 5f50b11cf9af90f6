//! Tests for the run module.

use super::*;

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use lakipay::api::{HttpError, HttpRequest, HttpResponse};
use lakipay::config::{ClientConfig, field};
use lakipay::time::InstantSleeper;
use tempfile::NamedTempFile;

/// Transport returning one canned body and counting calls.
struct CannedClient {
    status: http::StatusCode,
    body: &'static str,
    calls: AtomicUsize,
}

impl CannedClient {
    const fn new(status: http::StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            calls: AtomicUsize::new(0),
        }
    }
}

impl HttpClient for CannedClient {
    async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(HttpResponse::with_status(self.status, self.body))
    }
}

fn sdk(client: CannedClient) -> Lakipay<CannedClient, InstantSleeper> {
    Lakipay::with_client(ClientConfig::new("sk_test"), client)
        .unwrap()
        .with_sleeper(InstantSleeper)
}

mod run_error {
    use super::*;

    #[test]
    fn config_errors_display_transparently() {
        let error = RunError::from(ConfigError::missing(field::API_KEY, "Use --api-key"));

        assert!(matches!(error, RunError::Config(_)));
        assert!(error.to_string().starts_with("Missing required field: api_key"));
    }

    #[test]
    fn webhook_errors_are_runtime_errors() {
        let error = RunError::from(WebhookError::Authentication);

        assert_eq!(
            error.to_string(),
            "Webhook rejected: Invalid Lakipay webhook signature"
        );
    }
}

mod transaction {
    use super::*;

    #[tokio::test]
    async fn renders_data_as_pretty_json() {
        let sdk = sdk(CannedClient::new(
            http::StatusCode::OK,
            r#"{"status":"OK","data":{"id":"tx_1","amount":100}}"#,
        ));

        let rendered = fetch_transaction(&sdk, "tx_1").await.unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["id"], "tx_1");
        assert!(rendered.contains('\n'));
    }

    #[tokio::test]
    async fn logical_error_is_api_error() {
        let sdk = sdk(CannedClient::new(
            http::StatusCode::OK,
            r#"{"status":"ERROR","message":"Transaction not found","error_code":"NOT_FOUND"}"#,
        ));

        let error = fetch_transaction(&sdk, "missing").await.unwrap_err();

        assert!(matches!(error, RunError::Api(ApiError::Logical { .. })));
        assert_eq!(error.to_string(), "API call failed: Transaction not found");
        assert_eq!(sdk.payments().engine().client().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn server_errors_exhaust_retries() {
        let sdk = sdk(CannedClient::new(
            http::StatusCode::BAD_GATEWAY,
            "bad gateway",
        ));

        let error = fetch_transaction(&sdk, "tx_1").await.unwrap_err();

        assert!(matches!(
            error,
            RunError::Api(ApiError::RetriesExhausted { attempts: 3, .. })
        ));
        assert_eq!(sdk.payments().engine().client().calls.load(Ordering::SeqCst), 3);
    }
}

mod webhook {
    use super::*;

    #[test]
    fn invalid_key_is_rejected_before_parsing_body() {
        let error = check_webhook("not a pem", b"{}").unwrap_err();

        assert!(matches!(error, RunError::Webhook(WebhookError::InvalidKey(_))));
    }

    #[test]
    fn missing_key_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.pem");

        let error = read_public_key(&path).unwrap_err();

        assert!(matches!(error, ConfigError::FileRead { .. }));
    }
}

mod body_input {
    use super::*;

    #[tokio::test]
    async fn reads_body_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"status":"SUCCESS"}"#).unwrap();

        let body = read_body(Some(file.path())).await.unwrap();

        assert_eq!(body, br#"{"status":"SUCCESS"}"#);
    }

    #[tokio::test]
    async fn missing_body_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.json");

        let error = read_body(Some(&path)).await.unwrap_err();

        match error {
            RunError::Input { source_name, .. } => assert!(source_name.ends_with("body.json")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
