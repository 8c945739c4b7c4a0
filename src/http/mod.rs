//! HTTP protocol implementation.
//!
//! A stripped-down HTTP/1.1: one request per connection, only the request
//! path is read, and responses carry a status line and a body with no header
//! fields.
//!
//! # Architecture
//!
//! - **`connection`**: the per-connection state machine and the request handler
//! - **`parser`**: extracts the resource path from the raw request bytes
//! - **`request`**: the raw request plus its parsed path
//! - **`response`**: status codes and the two response templates
//! - **`writer`**: serializes and writes a response to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait until the path is delimited
//!        └──────┬──────┘
//!               │ Request received
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Resolve the file, pick 200 or 404
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send the whole response at once
//!        └──────┬───────────┘
//!               │
//!               └─ Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use feather::config::Config;
//! use feather::http::connection::{Connection, Handler};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let handler = Arc::new(Handler::new(&Config::default()));
//!     let listener = TcpListener::bind("127.0.0.1:8000").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let handler = handler.clone();
//!         tokio::spawn(async move {
//!             if let Err(e) = Connection::new(socket, handler).run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
