//! HTTP client tests against a minimal local server.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use healthdash::{FetchError, HealthClient, HttpHealthClient};

/// Serve exactly one HTTP response on a random local port and return the base URL.
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let mut read = 0;
        // Read until the end of the request headers
        loop {
            let n = socket.read(&mut buf[read..]).await.unwrap();
            read += n;
            if n == 0 || buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn fetches_payload_on_success() {
    let base = serve_once(
        "200 OK",
        r#"{"status":"ok","cpu":"healthy","cpu_percent":12.5,"db":"ok","version":"v0.1.0-dev"}"#,
    )
    .await;

    let client = HttpHealthClient::new(&base, "/health", Duration::from_secs(5)).unwrap();
    assert_eq!(client.url(), format!("{}/health", base));

    let payload = client.fetch_health().await.unwrap();
    assert_eq!(payload.status(), Some("ok"));
    assert_eq!(payload.cpu_percent(), Some(12.5));
    assert_eq!(payload.version(), Some("v0.1.0-dev"));
}

#[tokio::test]
async fn non_success_status_is_failure() {
    let base = serve_once("503 Service Unavailable", r#"{"status":"down"}"#).await;

    let client = HttpHealthClient::new(&base, "/health", Duration::from_secs(5)).unwrap();
    let err = client.fetch_health().await.unwrap_err();
    assert_eq!(err, FetchError::Status(503));
}

#[tokio::test]
async fn invalid_body_is_decode_failure() {
    let base = serve_once("200 OK", "<html>not json</html>").await;

    let client = HttpHealthClient::new(&base, "/health", Duration::from_secs(5)).unwrap();
    let err = client.fetch_health().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn refused_connection_is_failure() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        HttpHealthClient::new(&format!("http://{}", addr), "/health", Duration::from_secs(5))
            .unwrap();
    let err = client.fetch_health().await.unwrap_err();
    assert!(matches!(err, FetchError::Connection(_)), "got {:?}", err);
}
