//! HTTP status line as seen in the curl header callback.

use std::fmt;
use std::str;

/// Status code plus reason phrase (empty for HTTP/2, which sends none).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub code: u32,
    pub reason: String,
}

impl StatusLine {
    pub const OK: u32 = 200;

    pub fn new(code: u32, reason: &str) -> Self {
        Self {
            code,
            reason: reason.to_string(),
        }
    }

    /// Parse a raw header line such as `HTTP/1.1 404 Not Found\r\n`.
    /// Returns `None` for ordinary header fields.
    pub fn parse(line: &[u8]) -> Option<Self> {
        let text = str::from_utf8(line).ok()?.trim_end();
        let rest = text.strip_prefix("HTTP/")?;
        let mut parts = rest.splitn(3, ' ');
        let _version = parts.next()?;
        let code = parts.next()?.trim().parse::<u32>().ok()?;
        let reason = parts.next().unwrap_or("").trim();
        Some(Self::new(code, reason))
    }

    pub fn is_ok(&self) -> bool {
        self.code == Self::OK
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reason.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{} {}", self.code, self.reason)
        }
    }
}
