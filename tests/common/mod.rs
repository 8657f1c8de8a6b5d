//! Shared utilities for integration tests.

use std::net::SocketAddr;

use serde::Deserialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Body returned by every mock backend.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct MockResult {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub path: String,
}

/// Start a mock backend on an ephemeral port.
///
/// Every request gets `{"id": id, "type": kind, "path": <request path>}`.
pub async fn start_mock_backend(id: u32, kind: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut head = Vec::new();
                        let mut buf = [0u8; 1024];
                        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut buf).await {
                                Ok(0) | Err(_) => return,
                                Ok(n) => head.extend_from_slice(&buf[..n]),
                            }
                        }

                        let head = String::from_utf8_lossy(&head);
                        let path = head
                            .lines()
                            .next()
                            .and_then(|line| line.split_whitespace().nth(1))
                            .unwrap_or("")
                            .to_string();

                        let body = serde_json::json!({ "id": id, "type": kind, "path": path }).to_string();
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// `http://<addr>/`
pub fn base_url(addr: SocketAddr) -> String {
    format!("http://{}/", addr)
}

/// Read a mock backend response.
pub async fn read_result(response: axum::http::Response<axum::body::Body>) -> MockResult {
    assert!(response.status().is_success());
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
