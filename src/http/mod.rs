//! HTTP protocol implementation.
//!
//! Each connection carries exactly one request: the worker reads the request
//! head, resolves the target to a file under the document root, streams the
//! response and closes. There is no keep-alive.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection worker and its state machine
//! - **`parser`**: Reads request lines off the stream with a bounded wait
//! - **`request`**: Request line and request head values
//! - **`resolve`**: Maps request targets onto files inside the document root
//! - **`mime`**: Content type detection based on file extensions
//! - **`template`**: `<cs371date>` / `<cs371server>` marker substitution
//! - **`response`**: Status codes and the response head
//! - **`writer`**: Streams the response head and body to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Drain request lines until the blank line
//!        └──────┬──────┘
//!               │ RequestHead
//!               ▼
//!        ┌──────────────────┐
//!        │   Resolving      │ ← Locate the file under the document root
//!        └──────┬───────────┘
//!               │ Resource (found / not found)
//!               ▼
//!        ┌──────────────────┐
//!        │   Streaming      │ ← Head, then file body or the 404 page
//!        └──────┬───────────┘
//!               │
//!               ▼
//!            Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use simple_webserver::config::Config;
//! use simple_webserver::http::connection::handle;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(Config::default());
//!     let listener = TcpListener::bind(&config.listen_addr).await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         tokio::spawn(handle(socket, config.clone()));
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
pub mod resolve;
pub mod template;
