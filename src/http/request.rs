use crate::http::parser::ParseError;

/// The first line of a `GET` request, e.g. `GET /index.html HTTP/1.1`.
///
/// Lines with any other method never become a `RequestLine`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// Request target exactly as received (no decoding, no normalization)
    pub target: String,
    /// Protocol token, absent for HTTP/0.9-style lines
    pub version: Option<String>,
}

/// Everything the worker keeps from the request head.
///
/// Produced once by the read phase and handed by value to resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHead {
    /// The interpreted first line, if it was a `GET` request line
    pub request_line: Option<RequestLine>,
    /// Number of lines consumed, the blank terminator included
    pub lines_read: usize,
    /// Whether the blank line ending the head was seen
    pub complete: bool,
    /// What cut reading short, if anything did
    pub error: Option<ParseError>,
}

impl RequestHead {
    /// The target to serve, if the first line was a `GET` with a non-empty target.
    pub fn get_target(&self) -> Option<&str> {
        self.request_line
            .as_ref()
            .map(|line| line.target.as_str())
            .filter(|target| !target.is_empty())
    }
}
