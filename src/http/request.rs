use bytes::Bytes;

use crate::http::parser::{ParseError, parse_final};

/// A request as read off one connection.
///
/// Only the resource path is interpreted; everything after it on the request
/// line, and any headers or body, is kept as raw bytes for logging and
/// otherwise ignored.
#[derive(Debug, Clone)]
pub struct Request {
    /// Bytes exactly as received
    pub raw: Bytes,
    /// The requested resource (e.g., "/index.html")
    pub path: String,
}

impl Request {
    /// Parses a complete request buffer.
    pub fn parse(raw: Bytes) -> Result<Self, ParseError> {
        let path = parse_final(&raw)?.to_string();
        Ok(Self { raw, path })
    }

    /// The raw request with invalid UTF-8 replaced, for diagnostics.
    pub fn raw_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.raw)
    }
}
