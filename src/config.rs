//! Configuration module
//!
//! The whole configuration surface is one optional positional port argument.
//! Everything is resolved once at startup into a [`Config`] that is handed to
//! the server by ownership; nothing is read from the environment or from
//! config files.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::logger;

/// Port used when none is given or the given one cannot be parsed.
pub const DEFAULT_PORT: u16 = 8000;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "devserve",
    version,
    about = "Minimal static-file HTTP server for local development"
)]
pub struct Cli {
    /// TCP port to listen on
    pub port: Option<String>,
}

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Directory whose contents are served; absolute, fixed for the process
    /// lifetime.
    pub root: PathBuf,
}

impl Config {
    /// Build the configuration from parsed arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        let port = cli.port.as_deref().map_or(DEFAULT_PORT, parse_port);
        Self {
            port,
            root: served_root(),
        }
    }

    /// The listen address: all interfaces, configured port.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// Parse a port argument, falling back to the default with a warning.
fn parse_port(arg: &str) -> u16 {
    match arg.parse::<u16>() {
        Ok(port) => port,
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid port number '{arg}', using default port {DEFAULT_PORT}"
            ));
            DEFAULT_PORT
        }
    }
}

/// The directory containing the executable, made absolute.
///
/// Falls back to the current directory when the executable path is
/// unavailable.
fn served_root() -> PathBuf {
    let root = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    root.canonicalize().unwrap_or(root)
}
