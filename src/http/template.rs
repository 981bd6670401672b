use bytes::BytesMut;
use chrono::{DateTime, Utc};
use memchr::memmem;

/// Replaced with the time the response was generated.
pub const DATE_MARKER: &[u8] = b"<cs371date>";
/// Replaced with the configured server name.
pub const SERVER_MARKER: &[u8] = b"<cs371server>";

/// Renders a timestamp the way served pages show it, e.g.
/// `October 15, 2026 3:04:05 PM UTC`.
pub fn render_date(now: DateTime<Utc>) -> String {
    now.format("%B %-d, %Y %-I:%M:%S %p UTC").to_string()
}

/// The replacement values for one response.
#[derive(Debug, Clone)]
pub struct Substitutions {
    date: String,
    server: String,
}

impl Substitutions {
    /// Captures the current time; every line of the response shares it.
    pub fn new(server: impl Into<String>) -> Self {
        Self::with_date(render_date(Utc::now()), server)
    }

    pub fn with_date(date: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            server: server.into(),
        }
    }

    /// Appends `line` to `out` with both markers replaced.
    ///
    /// The date goes in first, so a server name is never scanned for the
    /// date marker.
    pub fn apply(&self, line: &[u8], out: &mut BytesMut) {
        let mut dated = BytesMut::with_capacity(line.len());
        replace_all(line, DATE_MARKER, self.date.as_bytes(), &mut dated);
        replace_all(&dated, SERVER_MARKER, self.server.as_bytes(), out);
    }
}

fn replace_all(haystack: &[u8], marker: &[u8], replacement: &[u8], out: &mut BytesMut) {
    let mut last = 0;
    for pos in memmem::find_iter(haystack, marker) {
        out.extend_from_slice(&haystack[last..pos]);
        out.extend_from_slice(replacement);
        last = pos + marker.len();
    }
    out.extend_from_slice(&haystack[last..]);
}
