/*!
 * Common test utilities for the tolk test suite
 */

use anyhow::Result;
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use tolk::app_config::Config;
use tolk::app_controller::Controller;
use tolk::database::KeyValueStore;
use tolk::providers::mock::MockProvider;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Route library logs to the test harness; safe to call repeatedly
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Default configuration without batch pacing
pub fn fast_config() -> Config {
    let mut config = Config::default();
    config.batch.delay_ms = 0;
    config
}

/// Controller over `mock` and a fresh in-memory store
pub fn controller_with(mock: &MockProvider, config: Config) -> Controller {
    init_test_logger();
    let store = KeyValueStore::in_memory().expect("in-memory store");
    Controller::with_provider(config, Arc::new(mock.clone()), store)
}

/// Local HTTP server answering every request with the same canned response
pub struct CannedServer {
    /// Endpoint URL pointing at the server
    pub url: String,
    /// Request lines received, in order
    requests: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    /// Start a server answering with `status` and `body`
    pub async fn start(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test server");
        let addr = listener.local_addr().expect("local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);
        let body = body.to_string();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0u8; 16 * 1024];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).to_string();
                if let Some(line) = request.lines().next() {
                    log.lock().push(line.to_string());
                }

                let reason = if status == 200 { "OK" } else { "Error" };
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self {
            url: format!("http://{}/translate_a/single", addr),
            requests,
        }
    }

    /// Request lines received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}
