//! HTTP interface module.
//!
//! - `GET /version`: service version
//! - `POST /revisor`: review a text

pub mod handlers;
pub mod routes;
