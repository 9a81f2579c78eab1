//! # API Shared
//!
//! Shared definitions for the mapping workspace's HTTP surface.
//!
//! Contains:
//! - Response bodies shared by handlers and the OpenAPI document (`responses` module)
//! - `HealthService`, the single place the health status is produced
//!
//! Used by `api-rest` and the `namaste-run` binary.

pub mod health;
pub mod responses;

pub use health::HealthService;
pub use responses::{HealthRes, MessageRes, RecordRes, RecordRow};
