//! Catalog sources used to refresh the store's code catalogs.
//!
//! A refresh asks one [`CatalogSource`] for both catalogs concurrently. The outcome is
//! returned to the caller as a `Result`: on failure the store keeps the catalogs it already
//! had, and the caller decides whether to report the failure.
//!
//! [`StaticCatalogSource`] serves the bundled [`Catalog::standard`] data. A networked source
//! can implement the same trait without duplicating the catalog.

use crate::catalog::{Catalog, IcdCode, NamasteCode};
use async_trait::async_trait;

/// Why a catalog fetch failed.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog source unavailable: {0}")]
    Unavailable(String),
}

/// Provider of fresh NAMASTE and ICD-11 catalogs.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_namaste_codes(&self) -> Result<Vec<NamasteCode>, CatalogError>;

    async fn fetch_icd_codes(&self) -> Result<Vec<IcdCode>, CatalogError>;
}

/// Serves a fixed catalog, by default the bundled one.
#[derive(Clone, Debug)]
pub struct StaticCatalogSource {
    catalog: Catalog,
}

impl StaticCatalogSource {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

impl Default for StaticCatalogSource {
    fn default() -> Self {
        Self::new(Catalog::standard())
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch_namaste_codes(&self) -> Result<Vec<NamasteCode>, CatalogError> {
        Ok(self.catalog.namaste.clone())
    }

    async fn fetch_icd_codes(&self) -> Result<Vec<IcdCode>, CatalogError> {
        Ok(self.catalog.icd.clone())
    }
}

/// Sizes of the catalogs installed by a successful refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshSummary {
    pub namaste_codes: usize,
    pub icd_codes: usize,
}
