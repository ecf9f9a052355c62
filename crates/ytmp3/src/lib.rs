//! ytmp3 - HTTP front of the MP3 extraction service
//!
//! - `server`: Router, shared state and the standalone server loop
//! - `handlers`: `/api/download`, `/health`, `/metrics`
//! - `error`: The endpoint's error taxonomy and its JSON rendering
//! - `cli`: Command-line interface of the `ytmp3` binary

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use server::{router, serve, AppState};
