//! Log line formatting.
//!
//! Owns the fixed access/error line shapes, the timestamp format, and the
//! noise-marker check used to keep auto-reload probes out of the log.

use chrono::{DateTime, Local};

/// Timestamp format used on every log line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Literal substring identifying the front-end auto-reload probe. Vite polls
/// this path continuously and would otherwise flood the log.
pub const NOISE_MARKER: &str = "@vite/client";

/// Placeholder written when a request path is not available.
pub const UNKNOWN_PATH: &str = "未知路径";

/// Whether a request path belongs to the auto-reload probe.
#[must_use]
pub fn is_noise(path: &str) -> bool {
    path.contains(NOISE_MARKER)
}

/// One access-log line: timestamp, status, request path.
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub time: DateTime<Local>,
    /// Response status; `None` renders as `-`.
    pub status: Option<u16>,
    pub path: String,
}

impl AccessLogEntry {
    #[must_use]
    pub fn new(status: Option<u16>, path: &str) -> Self {
        Self {
            time: Local::now(),
            status,
            path: path.to_string(),
        }
    }

    #[must_use]
    pub fn format(&self) -> String {
        let status = self
            .status
            .map_or_else(|| "-".to_string(), |code| code.to_string());
        format!(
            "{} [{}] {}",
            self.time.format(TIMESTAMP_FORMAT),
            status,
            self.path
        )
    }
}

/// One error-log line: timestamp, message, request path (or the unknown-path
/// placeholder).
#[derive(Debug, Clone)]
pub struct ErrorLogEntry {
    pub time: DateTime<Local>,
    pub message: String,
    pub path: Option<String>,
}

impl ErrorLogEntry {
    #[must_use]
    pub fn new(message: &str, path: Option<&str>) -> Self {
        Self {
            time: Local::now(),
            message: message.to_string(),
            path: path.map(ToString::to_string),
        }
    }

    #[must_use]
    pub fn format(&self) -> String {
        format!(
            "{} [错误] {} - 路径: {}",
            self.time.format(TIMESTAMP_FORMAT),
            self.message,
            self.path.as_deref().unwrap_or(UNKNOWN_PATH),
        )
    }
}
