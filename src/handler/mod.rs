//! Request handler module
//!
//! Entry point for HTTP request processing: method validation, static-file
//! dispatch, and the access-log call once the outcome is known.

pub mod static_files;

use std::convert::Infallible;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};

use crate::config::Config;
use crate::http::response;
use crate::logger;

/// Handle one request and log its outcome.
///
/// The response is fully determined before the log line is written, so the
/// line always carries the status actually sent.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    config: Arc<Config>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let path = req.uri().path().to_string();
    // The log carries the full request target; resolution ignores the query.
    let log_target = req
        .uri()
        .path_and_query()
        .map_or_else(|| path.clone(), ToString::to_string);
    let method = req.method().clone();
    let is_head = method == Method::HEAD;

    let response = if method == Method::GET || is_head {
        static_files::serve(&config.root, &path, is_head).await
    } else {
        response::build_405_response()
    };

    logger::log_request(response.status().as_u16(), &log_target);
    Ok(response)
}
