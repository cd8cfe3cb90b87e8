//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use infinity_config::config::RawEnv;

/// Anvil's first account.
pub const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
/// Anvil's second account.
pub const OTHER_ADDRESS: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
/// One whole token in wei.
pub const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Environment pointing at `rpc_url`, optionally with a foreign recipient.
pub fn raw_env(rpc_url: &str, recipient: Option<&str>) -> RawEnv {
    RawEnv {
        master_pkey: Some(TEST_PRIVATE_KEY.to_string()),
        rewards_recipient_address: recipient.map(str::to_string),
        infinity_rpc: Some(rpc_url.to_string()),
        ..RawEnv::default()
    }
}

/// Start a mock JSON-RPC node answering every request with `balance_wei`.
///
/// Returns the node URL and a counter of requests served.
pub async fn start_mock_rpc(balance_wei: u128) -> (String, Arc<AtomicU32>) {
    start_programmable_rpc(move || async move { balance_wei }).await
}

/// Start a mock JSON-RPC node whose balance answer comes from `f`.
///
/// The response is written only once the future resolves, so `f` can hold
/// the caller inside its RPC call. Returns the node URL and a counter of
/// requests received.
pub async fn start_programmable_rpc<F, Fut>(f: F) -> (String, Arc<AtomicU32>)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = u128> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let served = Arc::new(AtomicU32::new(0));
    let counter = served.clone();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let counter = counter.clone();
                    let f = f.clone();
                    tokio::spawn(async move {
                        if let Some(body) = read_request_body(&mut socket).await {
                            counter.fetch_add(1, Ordering::SeqCst);
                            let balance_wei = f().await;
                            let response = rpc_response(&body, balance_wei);
                            let response_str = format!(
                                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                                response.len(),
                                response
                            );
                            let _ = socket.write_all(response_str.as_bytes()).await;
                            let _ = socket.shutdown().await;
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    (format!("http://{}", addr), served)
}

/// Start a node that accepts connections and never answers.
pub async fn start_silent_rpc() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    format!("http://{}", addr)
}

/// An address nothing listens on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

fn rpc_response(body: &str, balance_wei: u128) -> String {
    let request: serde_json::Value = serde_json::from_str(body).unwrap_or_default();
    let id = request.get("id").cloned().unwrap_or(serde_json::Value::from(0));
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": format!("0x{:x}", balance_wei),
    })
    .to_string()
}

async fn read_request_body(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Some(String::from_utf8_lossy(&buf[header_end..header_end + content_length]).into_owned())
}
