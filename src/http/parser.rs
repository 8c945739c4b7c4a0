use thiserror::Error;

/// Length of the `"GET "` prefix skipped before the path.
pub const METHOD_PREFIX_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The buffer ends before the space after the path; more bytes may fix it.
    #[error("request line is incomplete")]
    Incomplete,
    #[error("request is shorter than the method prefix")]
    TooShort,
    #[error("request line ends before the path is terminated")]
    MissingPathTerminator,
    #[error("request path is empty")]
    EmptyPath,
    #[error("request path is not valid UTF-8")]
    InvalidUtf8,
}

/// Extracts the resource path from a raw request.
///
/// The first four bytes are taken to be the method and its trailing space and
/// are skipped without inspection. The path runs up to, not including, the
/// next space. The scan never leaves `buf`: running out of bytes yields
/// [`ParseError::Incomplete`], hitting the end of the request line yields
/// [`ParseError::MissingPathTerminator`].
///
/// # Example
///
/// ```
/// # use feather::http::parser::parse_request_path;
/// assert_eq!(parse_request_path(b"GET /a.html HTTP/1.1\r\n").unwrap(), "/a.html");
/// ```
pub fn parse_request_path(buf: &[u8]) -> Result<&str, ParseError> {
    if buf.len() < METHOD_PREFIX_LEN {
        return Err(ParseError::Incomplete);
    }
    let rest = &buf[METHOD_PREFIX_LEN..];

    let end = match rest.iter().position(|&b| matches!(b, b' ' | b'\r' | b'\n')) {
        Some(end) if rest[end] == b' ' => end,
        Some(_) => return Err(ParseError::MissingPathTerminator),
        None => return Err(ParseError::Incomplete),
    };

    if end == 0 {
        return Err(ParseError::EmptyPath);
    }

    std::str::from_utf8(&rest[..end]).map_err(|_| ParseError::InvalidUtf8)
}

/// Like [`parse_request_path`], for a buffer that will never grow.
///
/// Incomplete input becomes a hard error here since no more bytes are coming.
pub fn parse_final(buf: &[u8]) -> Result<&str, ParseError> {
    match parse_request_path(buf) {
        Err(ParseError::Incomplete) if buf.len() < METHOD_PREFIX_LEN => Err(ParseError::TooShort),
        Err(ParseError::Incomplete) => Err(ParseError::MissingPathTerminator),
        other => other,
    }
}
