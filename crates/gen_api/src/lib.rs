//! Transport-only client primitives for the generation service.
//!
//! This crate owns request building, endpoint normalization, and the
//! line-oriented `data: <json>` frame protocol for the streaming
//! `/generate/stream` endpoint. It intentionally contains no transcript,
//! history, or UI coupling; callers drive it through
//! [`GenApiClient::stream_with_handler`] and observe decoded [`Frame`]s.
//!
//! Cancellation is cooperative: a shared [`client::CancellationSignal`] is
//! polled between awaits, so latency is bounded by the in-flight chunk read.

pub mod client;
pub mod config;
pub mod error;
pub mod frames;
pub mod payload;
pub mod sse;
pub mod url;

pub use client::{CancellationSignal, GenApiClient};
pub use config::GenApiConfig;
pub use error::GenApiError;
pub use frames::Frame;
pub use payload::GenerateRequest;
pub use reqwest::StatusCode;
pub use sse::FrameStreamParser;
pub use url::normalize_generate_url;
