//! Logger module
//!
//! Everything the server reports goes through here: the startup banner, one
//! access or error line per handled request, warnings, and the shutdown
//! message. All output goes to stdout. Every line is flushed as soon as it
//! is written; the log must never lag the requests it describes.

mod format;

pub use format::{AccessLogEntry, ErrorLogEntry, UNKNOWN_PATH};

use std::io::{self, Write};
use std::path::Path;

/// Write one line to stdout and flush it.
///
/// The stdout handle stays locked for the whole write, so lines from
/// concurrent connection tasks never interleave.
fn write_line(message: &str) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let _ = writeln!(out, "{message}");
    let _ = out.flush();
}

/// Log the outcome of a handled request.
///
/// Auto-reload probe requests are suppressed entirely.
pub fn log_request(status: u16, path: &str) {
    if format::is_noise(path) {
        return;
    }
    write_line(&AccessLogEntry::new(Some(status), path).format());
}

/// Log an internally observed error, with the request path when known.
///
/// Suppression applies here too: probe requests stay out of the error log.
/// An unknown path is rendered as the placeholder, never omitted.
pub fn log_request_error(message: &str, path: Option<&str>) {
    if path.is_some_and(format::is_noise) {
        return;
    }
    write_line(&ErrorLogEntry::new(message, path).format());
}

pub fn log_warning(message: &str) {
    write_line(message);
}

/// Print the startup banner once the listener is bound.
pub fn log_server_start(root: &Path, port: u16) {
    write_line(&"-".repeat(50));
    write_line("devserve development server started");
    write_line(&format!("Serving directory: {}", root.display()));
    write_line(&format!("Local address: http://localhost:{port}"));
    write_line("Press Ctrl+C to stop the server");
    write_line(&"-".repeat(50));
    write_line("Request log:");
    write_line(&"-".repeat(30));
}

pub fn log_server_stopped() {
    write_line("Server stopped");
}

pub fn log_startup_failure(err: &dyn std::fmt::Display) {
    write_line(&format!("Failed to start server: {err}"));
}
