//! HTTP handlers

pub mod download;
pub mod health;

pub use download::download_audio;
pub use health::{health, metrics};
