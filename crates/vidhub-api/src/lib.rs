//! # vidhub-api
//!
//! HTTP API layer for VidHub built on Axum.
//!
//! Provides all REST endpoints under `/api/v1`, middleware (CORS, request
//! logging, tracing), extractors, DTOs, session cookies, and error mapping.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use error::ApiError;
pub use state::AppState;
