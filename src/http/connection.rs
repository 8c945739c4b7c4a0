use std::sync::Arc;
use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

use crate::config::Config;
use crate::error::ServerError;
use crate::files::FileResolver;
use crate::http::parser::{ParseError, parse_request_path};
use crate::http::request::Request;
use crate::http::response::{self, Response};
use crate::http::writer::ResponseWriter;

/// Turns requests into responses. Shared read-only by every worker.
#[derive(Debug, Clone)]
pub struct Handler {
    resolver: FileResolver,
    max_request_size: usize,
    quiet: bool,
}

impl Handler {
    pub fn new(cfg: &Config) -> Self {
        Self {
            resolver: FileResolver::new(cfg.static_files.clone()),
            max_request_size: cfg.server.max_request_size,
            quiet: cfg.server.quiet,
        }
    }

    /// Resolves the requested file, falling back to the error page.
    pub async fn respond(&self, request: &Request) -> Response {
        match self.resolver.resolve(&request.path).await {
            Some(content) => response::build(true, content),
            None => {
                if !self.quiet {
                    tracing::info!(path = %request.path, "file not found");
                }
                response::build(false, self.resolver.error_page().await)
            }
        }
    }
}

/// One accepted connection, served exactly once.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    handler: Arc<Handler>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, handler: Arc<Handler>) -> Self {
        let capacity = handler.max_request_size;
        Self {
            stream,
            buffer: BytesMut::with_capacity(capacity),
            handler,
            state: ConnectionState::Reading,
        }
    }

    /// Reads one request, answers it, and stops. The stream is dropped,
    /// and so closed, along with `self`.
    pub async fn run(mut self) -> Result<(), ServerError> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    let request = self.read_request().await?;
                    if !self.handler.quiet {
                        tracing::info!("request:\n{}", request.raw_lossy());
                    }
                    self.state = ConnectionState::Processing(request);
                }

                ConnectionState::Processing(request) => {
                    let response = self.handler.respond(&request).await;
                    tracing::debug!(
                        path = %request.path,
                        status = response.status.as_u16(),
                        "response ready"
                    );
                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(writer) => {
                    if !self.handler.quiet {
                        tracing::info!("response:\n{}", String::from_utf8_lossy(writer.as_bytes()));
                    }
                    writer.write_to_stream(&mut self.stream).await?;
                    let discarded = self.drain().await;
                    if discarded > 0 {
                        tracing::debug!(bytes = discarded, "discarded unread request bytes");
                    }
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }

    /// Reads until the path is delimited, the size bound is hit, or the peer
    /// stops sending.
    pub async fn read_request(&mut self) -> Result<Request, ServerError> {
        let limit = self.handler.max_request_size;

        loop {
            match parse_request_path(&self.buffer) {
                Ok(_) => break,
                Err(ParseError::Incomplete) => {}
                Err(e) => return Err(e.into()),
            }

            if self.buffer.len() >= limit {
                break;
            }

            let mut temp = [0u8; 1024];
            let want = (limit - self.buffer.len()).min(temp.len());
            let n = self.stream.read(&mut temp[..want]).await?;

            if n == 0 {
                if self.buffer.is_empty() {
                    return Err(ServerError::Io(std::io::Error::new(
                        std::io::ErrorKind::UnexpectedEof,
                        "connection closed before a request was read",
                    )));
                }
                break;
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }

        Ok(Request::parse(self.buffer.split().freeze())?)
    }

    /// Discards request bytes that are already waiting, without blocking, so
    /// closing the stream does not reset it and lose the response.
    ///
    /// Reads at most `max_request_size` bytes and returns how many were dropped.
    pub async fn drain(&mut self) -> usize {
        let limit = self.handler.max_request_size;
        let mut discarded = 0;
        let mut temp = [0u8; 1024];

        while discarded < limit {
            let want = (limit - discarded).min(temp.len());
            // A zero timeout polls the read once and gives up if it would block.
            match tokio::time::timeout(Duration::ZERO, self.stream.read(&mut temp[..want])).await {
                Ok(Ok(n)) if n > 0 => discarded += n,
                _ => break,
            }
        }

        discarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn handler(max_request_size: usize) -> Arc<Handler> {
        let mut cfg = Config::default();
        cfg.server.max_request_size = max_request_size;
        cfg.server.quiet = true;
        Arc::new(Handler::new(&cfg))
    }

    #[tokio::test]
    async fn request_split_across_reads_is_reassembled() {
        let (mut client, server) = tokio::io::duplex(64);
        let mut conn = Connection::new(server, handler(1024));

        let reader = tokio::spawn(async move { conn.read_request().await });
        client.write_all(b"GET /ab").await.unwrap();
        client.write_all(b"c.html HTTP/1.1\r\n\r\n").await.unwrap();

        let request = reader.await.unwrap().unwrap();
        assert_eq!(request.path, "/abc.html");
    }

    #[tokio::test]
    async fn oversized_request_line_is_malformed() {
        let (mut client, server) = tokio::io::duplex(256);
        let mut conn = Connection::new(server, handler(16));

        client.write_all(b"GET /aaaaaaaaaaaaaaaaaaaaaaaa").await.unwrap();
        let err = conn.read_request().await.unwrap_err();
        assert!(matches!(
            err,
            ServerError::MalformedRequest(ParseError::MissingPathTerminator)
        ));
    }

    #[tokio::test]
    async fn drain_discards_pending_headers_without_blocking() {
        let (mut client, server) = tokio::io::duplex(256);
        let mut conn = Connection::new(server, handler(1024));

        client.write_all(b"GET /a.html HTTP/1.1\r\n").await.unwrap();
        let request = conn.read_request().await.unwrap();
        assert_eq!(request.path, "/a.html");

        client.write_all(b"Host: localhost\r\n\r\n").await.unwrap();
        let discarded = tokio::time::timeout(Duration::from_secs(1), conn.drain())
            .await
            .expect("drain blocked");
        assert_eq!(discarded, 19);

        let discarded = tokio::time::timeout(Duration::from_secs(1), conn.drain())
            .await
            .expect("drain blocked on an idle stream");
        assert_eq!(discarded, 0);
    }

    #[tokio::test]
    async fn run_answers_request_carrying_headers() {
        let (mut client, server) = tokio::io::duplex(4096);
        let conn = Connection::new(server, handler(1024));

        client.write_all(b"GET /missing HTTP/1.1\r\n").await.unwrap();
        client.write_all(b"Host: localhost\r\n\r\n").await.unwrap();
        conn.run().await.unwrap();

        let mut response = Vec::new();
        client.read_to_end(&mut response).await.unwrap();
        assert!(response.starts_with(b"HTTP/1.1 404 Not Found\r\n\n"));
    }

    #[tokio::test]
    async fn eof_before_any_bytes_is_io_failure() {
        let (client, server) = tokio::io::duplex(64);
        drop(client);
        let mut conn = Connection::new(server, handler(1024));

        let err = conn.read_request().await.unwrap_err();
        assert!(matches!(err, ServerError::Io(_)));
    }
}
