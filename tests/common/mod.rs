//! Shared utilities for integration tests.
//!
//! Every server binds `127.0.0.1:0` so tests can run in parallel.

#![allow(dead_code)]

use message_relay::{HttpServer, LogStore, MessagesService, RelayConfig, RpcServer, Shutdown};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

async fn bind() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// An address nothing is listening on.
pub fn unused_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Start a log store gRPC server.
pub async fn start_store(shutdown: &Shutdown) -> (SocketAddr, Arc<LogStore>) {
    let (listener, addr) = bind().await;
    let store = Arc::new(LogStore::new());
    start_store_on(listener, store.clone(), shutdown);
    (addr, store)
}

/// Serve `store` on an already-bound listener.
pub fn start_store_on(listener: TcpListener, store: Arc<LogStore>, shutdown: &Shutdown) {
    let server = RpcServer::new(store);
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
}

/// Start the stub messages service serving `body`.
pub async fn start_messages_service(body: &str, shutdown: &Shutdown) -> SocketAddr {
    let (listener, addr) = bind().await;
    let service = MessagesService::new(body);
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = service.run(listener, rx).await;
    });
    addr
}

/// Start a programmable raw-HTTP backend; `f` picks status and body per request.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let (listener, addr) = bind().await;
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = [0u8; 1024];
                        let _ = socket.read(&mut buf).await;

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
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

/// Facade configuration pointing at the given backends, with test-sized
/// timeouts and delays.
pub fn facade_config(store_addr: SocketAddr, secondary_addr: SocketAddr) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.facade.store_host = store_addr.ip().to_string();
    config.facade.store_port = store_addr.port();
    config.facade.secondary_url = format!("http://{}/messages", secondary_addr);
    config.facade.call_timeout_ms = 500;
    config.retries.delay_ms = 100;
    config
}

/// Start the facade HTTP server; returns its base URL.
pub async fn start_facade(config: &RelayConfig, shutdown: &Shutdown) -> String {
    let (listener, addr) = bind().await;
    let server = HttpServer::from_config(config).unwrap();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    format!("http://{}", addr)
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}
