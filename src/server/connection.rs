//! Connection handling module
//!
//! Serves one accepted TCP connection on its own task.

use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::config::Config;
use crate::handler;
use crate::logger;

/// Spawn a task serving `stream`.
///
/// Each connection is independent; a slow client only occupies its own task.
/// Connection-level failures (e.g. a client disconnecting mid-transfer) have
/// no request path to report, so they log with the unknown-path placeholder.
pub fn spawn(stream: TcpStream, config: Arc<Config>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let service = service_fn(move |req| {
            let config = Arc::clone(&config);
            async move { handler::handle_request(req, config).await }
        });

        if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
            logger::log_request_error(&format!("Failed to serve connection: {err}"), None);
        }
    });
}
