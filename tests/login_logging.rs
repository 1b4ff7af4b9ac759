//! Log output of the best-effort login.
//!
//! Kept apart from `api_tests.rs` so that the global test subscriber
//! installed there cannot swallow the events captured here.

use std::io;
use std::sync::{Arc, Mutex};

use serde_json::json;
use tracing_subscriber::fmt::MakeWriter;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use theoneapi_rs::{ClientConfig, LoginOutcome, TheOneApiClient};

/// Formatted log lines collected in memory.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_rejected_login_logs_warning() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized."})))
        .expect(1)
        .mount(&server)
        .await;

    let client = TheOneApiClient::connect(
        ClientConfig::default()
            .with_base_url(server.uri())
            .with_credentials("frodo@shire.me", "wrong"),
    )
    .await
    .expect("a rejected login must not be an error");

    assert!(!client.is_authenticated().await);
    assert!(matches!(
        client.login_outcome(),
        Some(LoginOutcome::Rejected { status: 401 })
    ));

    let output = logs.contents();
    let line = output
        .lines()
        .find(|l| l.contains("bearer token"))
        .unwrap_or_else(|| panic!("no login warning in {:?}", output));
    assert!(line.contains("WARN"), "{}", line);
    assert!(line.contains("status=401"), "{}", line);
}

#[tokio::test]
async fn test_missing_credentials_log_warning() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let client = TheOneApiClient::connect(ClientConfig::default().with_base_url("http://127.0.0.1:1"))
        .await
        .unwrap();

    assert!(!client.is_authenticated().await);
    let output = logs.contents();
    assert!(output.contains("WARN"), "{}", output);
    assert!(output.contains("set_bearer_auth"), "{}", output);
}
