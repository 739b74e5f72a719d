//! Integration tests for the HTTP option source.
//!
//! Each test binds a one-shot hyper server on 127.0.0.1:0 that answers with a
//! canned status and body.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Duration;

use http_body_util::Full;
use hyper::Request;
use hyper::Response;
use hyper::StatusCode;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use option_source::{OptionEntry, OptionSource, OptionSourceClient, SourceError};

/// Serve exactly one request with the given response, after an optional delay.
async fn serve_once(status: StatusCode, body: &'static str, delay: Option<Duration>) -> SocketAddr {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let Ok((stream, _)) = listener.accept().await else {
            return;
        };
        let io = TokioIo::new(stream);
        let service = service_fn(move |_req: Request<Incoming>| async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            Ok::<_, Infallible>(
                Response::builder()
                    .status(status)
                    .header("Content-Type", "application/json")
                    .body(Full::new(Bytes::from(body)))
                    .unwrap(),
            )
        });
        let _ = http1::Builder::new().serve_connection(io, service).await;
    });

    addr
}

fn client_for(addr: SocketAddr) -> OptionSourceClient {
    OptionSourceClient::builder()
        .url(format!("http://{}/options", addr))
        .build()
        .expect("valid url")
}

#[tokio::test]
async fn test_fetch_parses_options_in_order() {
    let addr = serve_once(
        StatusCode::OK,
        r#"{"options":[{"label":"Red","value":"r"},{"label":"Green","value":"g"},{"label":"Blue","value":"b"}]}"#,
        None,
    )
    .await;

    let options = client_for(addr).fetch().await.unwrap();

    assert_eq!(
        options,
        vec![
            OptionEntry::new("Red", "r"),
            OptionEntry::new("Green", "g"),
            OptionEntry::new("Blue", "b"),
        ]
    );
}

#[tokio::test]
async fn test_fetch_through_trait() {
    let addr = serve_once(
        StatusCode::OK,
        r#"{"options":[{"label":"1.0","value":"1.0"}]}"#,
        None,
    )
    .await;

    let source: Box<dyn OptionSource> = Box::new(client_for(addr));
    let options = source.fetch_options().await.unwrap();
    assert_eq!(options, vec![OptionEntry::new("1.0", "1.0")]);
}

#[tokio::test]
async fn test_non_success_status_is_http_error() {
    let addr = serve_once(StatusCode::INTERNAL_SERVER_ERROR, "boom", None).await;

    let err = client_for(addr).fetch().await.unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert!(err.to_string().contains("boom"));
}

#[tokio::test]
async fn test_missing_options_field_is_parse_error() {
    let addr = serve_once(StatusCode::OK, r#"{"items":[]}"#, None).await;

    let err = client_for(addr).fetch().await.unwrap_err();

    match err {
        SourceError::Parse { body, .. } => assert_eq!(body.as_deref(), Some(r#"{"items":[]}"#)),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_source_times_out() {
    let addr = serve_once(
        StatusCode::OK,
        r#"{"options":[]}"#,
        Some(Duration::from_secs(5)),
    )
    .await;

    let client = OptionSourceClient::builder()
        .url(format!("http://{}/options", addr))
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, SourceError::Timeout(d) if d == Duration::from_millis(100)));
}

#[tokio::test]
async fn test_unreachable_source_is_network_error() {
    // Bind and immediately drop to get a port nothing listens on.
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(addr).fetch().await.unwrap_err();
    assert!(matches!(err, SourceError::Network(_)));
}
