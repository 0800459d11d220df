//! Transport-agnostic REST contract.
//!
//! Requests arrive as already-parsed method, path and JSON body triples and
//! leave as a status code plus a `{status, message?, data?}` envelope:
//!
//! - [`routes`] resolves the canonical route table
//! - [`OrderingApi`] dispatches into the role services
//! - [`ApiError`] maps service errors onto the error taxonomy
//!
//! No socket server is bundled; a transport adapter only needs to build an
//! [`ApiRequest`] and write back the [`ApiReply`].

pub mod bodies;
mod envelope;
mod error;
mod handler;
pub mod routes;
pub mod views;

pub use envelope::{ApiReply, ApiResponse, ApiStatus};
pub use error::{ApiError, ErrorCategory};
pub use handler::{ApiRequest, OrderingApi};
pub use routes::{Method, Route};

#[cfg(test)]
mod tests;
