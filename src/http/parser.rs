use std::fmt;
use std::io;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};
use tokio::time::{Instant, timeout_at};
use tracing::debug;

use crate::http::request::{RequestHead, RequestLine};

/// Upper bound on the bytes consumed while reading one request head.
pub const MAX_HEAD_BYTES: usize = 64 * 1024;

/// Why reading the request head stopped before its blank line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The head was not complete within the read timeout
    Timeout,
    /// The head grew past `MAX_HEAD_BYTES`
    HeadTooLarge,
    /// The stream failed while reading
    Io(io::ErrorKind),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Timeout => write!(f, "timed out waiting for request head"),
            ParseError::HeadTooLarge => {
                write!(f, "request head exceeds {} bytes", MAX_HEAD_BYTES)
            }
            ParseError::Io(kind) => write!(f, "read error: {}", kind),
        }
    }
}

impl std::error::Error for ParseError {}

/// Interprets the first line of a request.
///
/// Only lines starting with `GET ` count. The rest is split on spaces:
/// target, then an optional version. Returns `None` for any other line
/// or a missing target.
pub fn parse_request_line(line: &str) -> Option<RequestLine> {
    let rest = line.strip_prefix("GET ")?;
    let mut parts = rest.split(' ').filter(|part| !part.is_empty());

    let target = parts.next()?;
    let version = parts.next().map(str::to_string);

    Some(RequestLine {
        target: target.to_string(),
        version,
    })
}

/// Reads request lines until the blank line that ends the head.
///
/// Only the first line is interpreted; the rest are drained. End of
/// stream, a read error, the timeout or the size cap all stop reading,
/// and whatever was captured up to that point is kept. `read_timeout`
/// bounds the whole head, not each line.
pub async fn read_request_head<R>(reader: &mut R, read_timeout: Duration) -> RequestHead
where
    R: AsyncBufRead + Unpin,
{
    let mut head = RequestHead::default();
    let mut consumed = 0usize;
    let mut buf = Vec::with_capacity(256);
    let deadline = Instant::now() + read_timeout;

    loop {
        let remaining = MAX_HEAD_BYTES.saturating_sub(consumed);
        if remaining == 0 {
            head.error = Some(ParseError::HeadTooLarge);
            break;
        }

        buf.clear();
        let mut limited = (&mut *reader).take(remaining as u64);
        let n = match timeout_at(deadline, limited.read_until(b'\n', &mut buf)).await {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => {
                head.error = Some(ParseError::Io(e.kind()));
                break;
            }
            Err(_) => {
                head.error = Some(ParseError::Timeout);
                break;
            }
        };

        // Client closed its side
        if n == 0 {
            break;
        }

        consumed += n;
        head.lines_read += 1;

        let line = decode_line(&buf);
        debug!(line = %line, "Request line");

        if line.is_empty() {
            head.complete = true;
            break;
        }

        if head.lines_read == 1 {
            head.request_line = parse_request_line(&line);
        }
    }

    head
}

fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}
