//! Record service configuration, resolved once at startup.

use crate::dataset::DatasetError;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_RECORDS_CSV: &str = "NATIONAL AYURVEDA MORBIDITY CODES.csv";

#[derive(Clone, Debug)]
pub struct RecordServiceConfig {
    addr: SocketAddr,
    csv_path: PathBuf,
}

impl RecordServiceConfig {
    /// Create a new `RecordServiceConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::InvalidConfig`] if `addr` is not a socket address or
    /// `csv_path` is empty.
    pub fn new(addr: &str, csv_path: PathBuf) -> Result<Self, DatasetError> {
        let addr = addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| DatasetError::InvalidConfig(format!("invalid address '{addr}': {e}")))?;
        if csv_path.as_os_str().is_empty() {
            return Err(DatasetError::InvalidConfig(
                "records CSV path cannot be empty".into(),
            ));
        }

        Ok(Self { addr, csv_path })
    }

    /// Build from optional environment values, falling back to the defaults when a value
    /// is missing or blank.
    ///
    /// # Errors
    ///
    /// See [`RecordServiceConfig::new`].
    pub fn from_env_values(
        addr: Option<String>,
        csv_path: Option<String>,
    ) -> Result<Self, DatasetError> {
        let addr = non_blank(addr).unwrap_or_else(|| DEFAULT_REST_ADDR.to_string());
        let csv_path = non_blank(csv_path).unwrap_or_else(|| DEFAULT_RECORDS_CSV.to_string());
        Self::new(&addr, PathBuf::from(csv_path))
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
