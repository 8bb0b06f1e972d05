//! Range client tests against a local stub of the range API.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use hibp_range::{CredentialDigest, Error, RangeClient};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const PASSWORD_SUFFIX: &str = "1E4C9B93F3F0682250B6CF8331B7EE68FD8";

async fn spawn_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{addr}")
}

fn client(base_url: &str) -> RangeClient {
    RangeClient::builder().base_url(base_url).build().expect("client")
}

fn fixed_body(body: &'static str) -> Router {
    Router::new().route("/range/:prefix", get(move || async move { body }))
}

fn fixed_status(status: StatusCode) -> Router {
    Router::new().route("/range/:prefix", get(move || async move { (status, "slow down") }))
}

#[tokio::test]
async fn test_password_found_only_prefix_sent() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_by_stub = Arc::clone(&seen);
    let router = Router::new().route(
        "/range/:prefix",
        get(move |Path(prefix): Path<String>| {
            let seen = Arc::clone(&seen_by_stub);
            async move {
                seen.lock().unwrap().push(prefix);
                format!("0018A45C4D1DEF81644B54AB7F969B88D65:3\r\n{PASSWORD_SUFFIX}:5\r\n")
            }
        }),
    );
    let base = spawn_stub(router).await;

    let lookup = client(&base).check_password("password").await.unwrap();

    assert_eq!(lookup.prefix, "5baa6");
    assert_eq!(lookup.count, 5);
    assert!(lookup.found());
    assert_eq!(*seen.lock().unwrap(), vec!["5baa6".to_string()]);
}

#[tokio::test]
async fn test_digest_not_found() {
    let base = spawn_stub(fixed_body(
        "0018A45C4D1DEF81644B54AB7F969B88D65:3\n00D4F6E8FA6EECAD2A3AA415EEC418D38EC:0\n",
    ))
    .await;

    let digest = CredentialDigest::hash("hAwT?}cuC:r#kW5");
    let lookup = client(&base).check_digest(&digest).await.unwrap();

    assert_eq!(lookup.prefix, digest.prefix());
    assert_eq!(lookup.count, 0);
    assert!(!lookup.found());
}

#[tokio::test]
async fn test_malformed_lines_do_not_abort() {
    let base = spawn_stub(fixed_body(
        "this line has no colon\n\
         0018A45C4D1DEF81644B54AB7F969B88D65:three\n\
         1E4C9B93F3F0682250B6CF8331B7EE68FD8:42\n",
    ))
    .await;

    let lookup = client(&base).check_password("password").await.unwrap();
    assert_eq!(lookup.count, 42);
}

#[tokio::test]
async fn test_query_returns_all_candidates() {
    let base = spawn_stub(fixed_body("AAAA:1\nBBBB:2\nCCCC:x\n")).await;

    let entries = client(&base).query(&CredentialDigest::hash("password")).await.unwrap();
    let counts: Vec<_> = entries.iter().map(|e| e.count).collect();
    assert_eq!(counts, vec![Some(1), Some(2), None]);
}

#[tokio::test]
async fn test_rate_limited_is_remote_error() {
    let base = spawn_stub(fixed_status(StatusCode::TOO_MANY_REQUESTS)).await;

    let err = client(&base).check_password("password").await.unwrap_err();
    match &err {
        Error::Remote { prefix, status, reason } => {
            assert_eq!(prefix, "5baa6");
            assert_eq!(*status, 429);
            assert_eq!(reason, "Too Many Requests");
        }
        other => panic!("expected Remote error, got {other:?}"),
    }
    assert!(!err.is_validation());
    assert!(err.to_string().contains("HTTP 429"));
}

#[tokio::test]
async fn test_server_error_is_remote_error() {
    let base = spawn_stub(fixed_status(StatusCode::INTERNAL_SERVER_ERROR)).await;

    let err = client(&base).check_password("password").await.unwrap_err();
    assert!(matches!(err, Error::Remote { status: 500, .. }));
}

#[tokio::test]
async fn test_truncated_body_is_read_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        // drain the request head so closing doesn't reset the connection
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&buf[..n]);
        }

        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 1000\r\n\r\nABCD:1\n")
            .await
            .unwrap();
        socket.flush().await.unwrap();
    });

    let err = client(&format!("http://{addr}")).check_password("password").await.unwrap_err();
    match &err {
        Error::Read { prefix, .. } => assert_eq!(prefix, "5baa6"),
        other => panic!("expected Read error, got {other:?}"),
    }
    assert!(err.to_string().starts_with("failed to read response for prefix 5baa6"));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}")).check_password("password").await.unwrap_err();
    assert!(matches!(err, Error::Network { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let router = Router::new().route(
        "/range/:prefix",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "unreachable"
        }),
    );
    let base = spawn_stub(router).await;

    let client = RangeClient::builder()
        .base_url(base)
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let err = client.check_password("password").await.unwrap_err();
    assert!(matches!(err, Error::Network { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_padding_header() {
    let router = Router::new().route(
        "/range/:prefix",
        get(|headers: HeaderMap| async move {
            match headers.get("add-padding").and_then(|v| v.to_str().ok()) {
                Some("true") => {
                    format!("{PASSWORD_SUFFIX}:7\nFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF:0\n")
                }
                _ => String::new(),
            }
        }),
    );
    let base = spawn_stub(router).await;

    let plain = client(&base).check_password("password").await.unwrap();
    assert_eq!(plain.count, 0);

    let padded = RangeClient::builder().base_url(&base).padding(true).build().unwrap();
    assert_eq!(padded.check_password("password").await.unwrap().count, 7);
}
