#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use simple_webserver::config::Config;
use simple_webserver::http::connection::handle;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// A throwaway document root, removed on drop.
pub struct Site {
    pub root: PathBuf,
}

impl Site {
    pub fn new() -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
        let root = std::env::temp_dir().join(format!(
            "simple-webserver-test-{}-{}",
            std::process::id(),
            id
        ));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    pub fn write(&self, rel: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.root.join(rel);
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    pub fn config(&self) -> Config {
        Config {
            document_root: self.root.clone(),
            read_timeout_ms: 500,
            ..Config::default()
        }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }
}

impl Drop for Site {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

/// Sends `request` to a fresh worker over an in-memory stream and returns
/// everything the worker wrote before closing.
pub async fn exchange(config: Config, request: &[u8]) -> Vec<u8> {
    let (mut client, server) = tokio::io::duplex(64 * 1024);
    let worker = tokio::spawn(handle(server, Arc::new(config)));

    client.write_all(request).await.unwrap();

    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();
    worker.await.unwrap();
    out
}

/// Splits a raw response at the first blank line.
pub fn split_response(raw: &[u8]) -> (String, Vec<u8>) {
    let pos = raw
        .windows(2)
        .position(|w| w == b"\n\n")
        .expect("response has no blank line after the head");
    let head = String::from_utf8(raw[..pos].to_vec()).unwrap();
    (head, raw[pos + 2..].to_vec())
}
