/// Status codes the server can answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use feather::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// A complete response: a status line and a body, no header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl Response {
    /// A 200 OK carrying the resolved file.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: StatusCode::Ok,
            body: body.into(),
        }
    }

    /// A 404 Not Found carrying the error page.
    pub fn not_found(error_page: impl Into<Vec<u8>>) -> Self {
        Self {
            status: StatusCode::NotFound,
            body: error_page.into(),
        }
    }
}

/// Picks the template for a resolution outcome.
///
/// `content` is the resolved file when `found`, otherwise the error page.
pub fn build(found: bool, content: Vec<u8>) -> Response {
    if found {
        Response::ok(content)
    } else {
        Response::not_found(content)
    }
}
