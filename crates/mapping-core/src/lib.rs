//! # Mapping Core
//!
//! Core business logic for recording NAMASTE → ICD-11 mappings against patients.
//!
//! This crate contains pure data operations and local persistence:
//! - Static NAMASTE and ICD-11 code catalogs, plus the suggestion table linking them
//! - Case-insensitive catalog search
//! - The [`MappingStore`]: patients, mapping records and their derived FHIR conditions,
//!   written through to a [`DurableStorage`] backend on every change
//! - FHIR Bundle export to a file and validation of uploaded bundles
//! - Read-only views over the store (problem lists, filtered listings, analytics)
//!
//! **No API concerns**: HTTP servers and command-line parsing belong in `api-rest` and
//! `namaste-cli`. The store is constructed by the caller and passed by reference; there is
//! no process-wide instance.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod import;
pub mod mapping;
pub mod patient;
pub mod search;
pub mod source;
pub mod storage;
pub mod store;
pub mod suggestions;
mod timestamp;
pub mod views;

pub use auth::{login, login_with_abha, AuthError, Role, User};
pub use catalog::{Catalog, IcdCode, NamasteCode, TraditionalSystem};
pub use config::CoreConfig;
pub use constants::DEFAULT_DATA_DIR;
pub use error::{ParseEnumError, StoreError, StoreResult};
pub use import::{import_bundle, import_bundle_file, ImportError, UploadReceipt};
pub use mapping::{MappingRecord, MappingType, NewMappingRecord};
pub use patient::{Gender, NewPatient, Patient};
pub use source::{CatalogError, CatalogSource, RefreshSummary, StaticCatalogSource};
pub use storage::{DurableStorage, FileStorage};
pub use store::MappingStore;
pub use suggestions::{suggested_mapping_type, suggestions_for, MappingSuggestion};
pub use views::{MappingAnalytics, RecordFilter, TypeFilter};

// Re-export validated text primitives from the coding-types crate
pub use coding_types::{NonEmptyText, TextError};
