use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Renders `resp` as `HTTP/1.1 <code> <reason>\r\n\n<body>`.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let status_line = format!(
        "{} {} {}\r\n\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );

    let mut buf = Vec::with_capacity(status_line.len() + resp.body.len());
    buf.extend_from_slice(status_line.as_bytes());
    buf.extend_from_slice(&resp.body);
    buf
}

/// A serialized response waiting to be sent.
pub struct ResponseWriter {
    buffer: Vec<u8>,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Sends the whole response; nothing is written twice.
    pub async fn write_to_stream<W>(self, stream: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        stream.write_all(&self.buffer).await?;
        stream.flush().await
    }
}
