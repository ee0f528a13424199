//! HTTP layer for manmaru.
//!
//! Axum router exposing `POST /chat` and `GET /health`, with cookie-backed
//! sessions and static serving of the front-end page.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
