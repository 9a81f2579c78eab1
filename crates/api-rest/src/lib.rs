//! # API REST
//!
//! CSV-backed record service.
//!
//! Handles:
//! - Loading the NAMASTE morbidity code CSV into memory at startup (`dataset`)
//! - HTTP endpoints over `/records` with axum (`routes`)
//! - OpenAPI/Swagger documentation and CORS
//!
//! Uses `api-shared` for response bodies and the health check. Nothing is written back to
//! the CSV; changes live until the process exits.

#![warn(rust_2018_idioms)]

pub mod config;
pub mod dataset;
pub mod routes;

pub use config::{RecordServiceConfig, DEFAULT_RECORDS_CSV, DEFAULT_REST_ADDR};
pub use dataset::{load_csv, parse_csv, Dataset, DatasetError, Row, RECORD_ID_FIELD};
pub use routes::{router, ApiDoc};
