//! End-to-end tests for EdgeGateway against a local TCP listener that
//! serves canned HTTP responses: a multi-piece SSE stream, the error
//! statuses the edge functions return, an empty body, and a mid-stream
//! disconnect.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::StreamExt;
use secrecy::SecretString;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use vitalia_core::gateway::AssistantGateway;
use vitalia_infra::gateway::EdgeGateway;
use vitalia_types::assistant::{AssistantError, AssistantRequest, StreamEvent};
use vitalia_types::config::GatewayConfig;

/// Serve one connection: read the full request, then write the response
/// pieces with a short pause between them, then close the socket.
async fn spawn_server(pieces: Vec<Vec<u8>>) -> (String, Arc<Mutex<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured = Arc::new(Mutex::new(String::new()));
    let capture = captured.clone();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        *capture.lock().unwrap() = request;

        for piece in pieces {
            socket.write_all(&piece).await.unwrap();
            socket.flush().await.unwrap();
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    });

    (format!("http://{addr}"), captured)
}

/// Read one HTTP/1.1 request (headers plus a content-length body).
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 1024];

    loop {
        let n = socket.read(&mut tmp).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&tmp[..n]);

        if let Some(headers_end) = find_subslice(&buf, b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..headers_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);

            let total = headers_end + 4 + content_length;
            while buf.len() < total {
                let n = socket.read(&mut tmp).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&tmp[..n]);
            }
            break;
        }
    }

    String::from_utf8_lossy(&buf).to_string()
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn gateway(base_url: &str) -> EdgeGateway {
    EdgeGateway::new(GatewayConfig {
        base_url: base_url.to_string(),
        publishable_key: SecretString::from("sb_publishable_test"),
    })
}

fn sse_head() -> Vec<u8> {
    b"HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\nconnection: close\r\n\r\n".to_vec()
}

fn error_response(status_line: &str, body: &str) -> Vec<u8> {
    format!(
        "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    )
    .into_bytes()
}

#[tokio::test]
async fn streamed_deltas_arrive_in_order() {
    // The second event's JSON is split across two writes.
    let mut piece1 = sse_head();
    piece1.extend_from_slice(
        b"data: {\"choices\":[{\"delta\":{\"content\":\"Turm\"}}]}\n\ndata: {\"choices\":[{\"delta\":",
    );
    let piece2 = b"{\"content\":\"eric helps.\"}}]}\n\n".to_vec();
    let piece3 = b": keep-alive\n\ndata: [DONE]\n\n".to_vec();

    let (base_url, captured) = spawn_server(vec![piece1, piece2, piece3]).await;

    let request = AssistantRequest::new("How does the digestive system work?")
        .with_type("body-systems");
    let events: Vec<_> = gateway(&base_url)
        .stream("health-assistant", request)
        .collect()
        .await;

    assert!(matches!(events[0], Ok(StreamEvent::Connected)));
    assert!(matches!(events.last(), Some(Ok(StreamEvent::Done))));

    let text: String = events
        .iter()
        .filter_map(|e| match e {
            Ok(StreamEvent::TextDelta { text }) => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(text, "Turmeric helps.");

    // The request carried the panel path, bearer key, and exact body.
    let request_text = captured.lock().unwrap().clone();
    let lower = request_text.to_lowercase();
    assert!(lower.starts_with("post /health-assistant http/1.1"));
    assert!(lower.contains("authorization: bearer sb_publishable_test"));
    assert!(lower.contains("content-type: application/json"));

    let body = &request_text[find_subslice(request_text.as_bytes(), b"\r\n\r\n").unwrap() + 4..];
    assert_eq!(
        body,
        r#"{"query":"How does the digestive system work?","type":"body-systems"}"#
    );
}

#[tokio::test]
async fn rate_limit_maps_to_rate_limited() {
    let (base_url, _) = spawn_server(vec![error_response(
        "429 Too Many Requests",
        r#"{"error":"Rate limit exceeded"}"#,
    )])
    .await;

    let events: Vec<_> = gateway(&base_url)
        .stream("health-assistant", AssistantRequest::new("q"))
        .collect()
        .await;

    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], Err(AssistantError::RateLimited)));
}

#[tokio::test]
async fn payment_required_maps_to_quota_exceeded() {
    let (base_url, _) = spawn_server(vec![error_response(
        "402 Payment Required",
        r#"{"error":"Quota exhausted"}"#,
    )])
    .await;

    let events: Vec<_> = gateway(&base_url)
        .stream("analyze-food", AssistantRequest::new("q"))
        .collect()
        .await;

    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], Err(AssistantError::QuotaExceeded)));
}

#[tokio::test]
async fn server_error_surfaces_error_field() {
    let (base_url, _) = spawn_server(vec![error_response(
        "500 Internal Server Error",
        r#"{"error":"AI gateway error"}"#,
    )])
    .await;

    let events: Vec<_> = gateway(&base_url)
        .stream("health-assistant", AssistantRequest::new("q"))
        .collect()
        .await;

    assert_eq!(events.len(), 1);
    match &events[0] {
        Err(AssistantError::RequestFailed { status, message }) => {
            assert_eq!(*status, 500);
            assert_eq!(message, "AI gateway error");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn declared_empty_body_maps_to_empty_body() {
    let (base_url, _) = spawn_server(vec![
        b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n".to_vec(),
    ])
    .await;

    let events: Vec<_> = gateway(&base_url)
        .stream("health-assistant", AssistantRequest::new("q"))
        .collect()
        .await;

    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], Err(AssistantError::EmptyBody)));
}

#[tokio::test]
async fn mid_stream_disconnect_maps_to_transport_interrupted() {
    // Chunked framing with a chunk that never completes: the socket
    // closes mid-chunk, which is a transport error, not a clean EOF.
    let head =
        b"HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\ntransfer-encoding: chunked\r\n\r\n"
            .to_vec();
    let partial_chunk = b"ff\r\ndata: {\"cho".to_vec();

    let (base_url, _) = spawn_server(vec![head, partial_chunk]).await;

    let events: Vec<_> = gateway(&base_url)
        .stream("health-assistant", AssistantRequest::new("q"))
        .collect()
        .await;

    assert!(matches!(events[0], Ok(StreamEvent::Connected)));
    assert!(matches!(
        events.last(),
        Some(Err(AssistantError::TransportInterrupted(_)))
    ));
}
