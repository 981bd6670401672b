use bytes::{BufMut, BytesMut};

use crate::http::mime::ContentType;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Body of the page sent when no file matches the request.
pub const NOT_FOUND_BODY: &[u8] =
    b"<html><head></head><body><h1><center>404 Error Page Not Found</center></h1></body></html>";

/// HTTP status codes the server emits.
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
    /// # use simple_webserver::http::response::StatusCode;
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

/// Status line plus the single `Content-Type` header.
///
/// The wire form uses bare `\n` line endings and ends with one blank line.
/// No `Content-Length`: the body runs until the connection closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: StatusCode,
    pub content_type: ContentType,
}

impl ResponseHead {
    pub fn new(status: StatusCode, content_type: ContentType) -> Self {
        Self { status, content_type }
    }

    pub fn ok(content_type: ContentType) -> Self {
        Self::new(StatusCode::Ok, content_type)
    }

    /// Head for the not-found page. `legacy_status` keeps `200 OK`.
    pub fn not_found(legacy_status: bool) -> Self {
        let status = if legacy_status {
            StatusCode::Ok
        } else {
            StatusCode::NotFound
        };
        Self::new(status, ContentType::Html)
    }

    pub fn to_bytes(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(64);

        // Status line
        buf.put_slice(
            format!(
                "{} {} {}\n",
                HTTP_VERSION,
                self.status.as_u16(),
                self.status.reason_phrase()
            )
            .as_bytes(),
        );

        buf.put_slice(b"Content-Type: ");
        buf.put_slice(self.content_type.as_str().as_bytes());

        // Header line end plus the blank separator
        buf.put_slice(b"\n\n");

        buf
    }
}
