//! Server module
//!
//! Owns the bound listener and the accept loop. Binding and serving are
//! separate stages so a bind failure surfaces as an error value before the
//! banner is printed.

pub mod connection;
pub mod listener;
pub mod signal;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::Notify;

use crate::config::Config;
use crate::logger;

/// A bound dev server, ready to serve.
pub struct Server {
    listener: tokio::net::TcpListener,
    config: Arc<Config>,
}

impl Server {
    /// Bind the configured address. Must be called inside a tokio runtime.
    pub fn bind(config: Config) -> std::io::Result<Self> {
        let listener = listener::bind(config.socket_addr())?;
        Ok(Self {
            listener,
            config: Arc::new(config),
        })
    }

    /// The address actually bound. Differs from the configured address when
    /// the configured port is 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Print the banner and accept connections until `shutdown` is notified.
    ///
    /// Accept errors are logged and the loop continues; only the shutdown
    /// notification ends it.
    pub async fn serve(self, shutdown: Arc<Notify>) {
        let port = self
            .local_addr()
            .map_or(self.config.port, |addr| addr.port());
        logger::log_server_start(&self.config.root, port);

        loop {
            tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, _peer)) => connection::spawn(stream, Arc::clone(&self.config)),
                    Err(e) => {
                        logger::log_request_error(&format!("Failed to accept connection: {e}"), None);
                    }
                },
                _ = shutdown.notified() => {
                    logger::log_server_stopped();
                    break;
                }
            }
        }
    }
}
