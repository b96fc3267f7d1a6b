//! HTTP protocol layer module
//!
//! Protocol helpers shared by the static-file handler: MIME lookup and
//! response builders, decoupled from the serving logic.

pub mod mime;
pub mod response;

pub use response::{build_404_response, build_405_response, build_redirect_response};
