//! hibp-server: JSON breach check API
//!
//! Exposes the k-anonymity range lookup over HTTP and serves a static web
//! front end.
//!
//! - `POST /api/check/password` with `{"password": "..."}`
//! - `POST /api/check/hash` with `{"hash": "<40 hex chars>"}`
//! - anything else is looked up in the static directory
//!
//! Both endpoints answer `{"prefix", "found", "count"}`, or
//! `{"prefix", "found": false, "error"}` when the range API could not be
//! reached.

pub mod error;
pub mod routes;
pub mod server;

pub use error::ServerError;
pub use routes::{CheckResponse, create_router};
pub use server::{CheckServer, DEFAULT_PORT, ServerBuilder};
