use chrono::{DateTime, Utc};
use rand::Rng;
use std::fmt;

/// Number of random base-36 characters appended to a record identifier.
pub const SUFFIX_LEN: usize = 9;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Kind of entity a [`RecordId`] names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdPrefix {
    /// Registered patient (`PAT`).
    Patient,
    /// NAMASTE → ICD-11 mapping record (`MAP`).
    MappingRecord,
}

impl IdPrefix {
    pub fn as_str(self) -> &'static str {
        match self {
            IdPrefix::Patient => "PAT",
            IdPrefix::MappingRecord => "MAP",
        }
    }
}

/// A generated `<PREFIX>-<epoch-millis>-<suffix>` identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordId {
    prefix: IdPrefix,
    millis: i64,
    suffix: String,
}

impl RecordId {
    /// Generates an identifier for `at` with a suffix from the thread-local RNG.
    ///
    /// Callers that also store `at` should pass the same instant they store, so the
    /// identifier and the record agree on the millisecond.
    pub fn generate(prefix: IdPrefix, at: DateTime<Utc>) -> Self {
        Self::generate_at(prefix, at, &mut rand::thread_rng())
    }

    /// Generates an identifier for an explicit instant using the supplied RNG.
    pub fn generate_at<R: Rng + ?Sized>(prefix: IdPrefix, at: DateTime<Utc>, rng: &mut R) -> Self {
        let suffix = (0..SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();

        Self {
            prefix,
            millis: at.timestamp_millis(),
            suffix,
        }
    }

    pub fn prefix(&self) -> IdPrefix {
        self.prefix
    }

    /// Milliseconds since the Unix epoch at which the identifier was generated.
    pub fn millis(&self) -> i64 {
        self.millis
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.prefix.as_str(), self.millis, self.suffix)
    }
}

/// Builds a `<tag><epoch-millis>` identifier, e.g. `timestamp_id("cond-", now)`.
pub fn timestamp_id(tag: &str, at: DateTime<Utc>) -> String {
    format!("{tag}{}", at.timestamp_millis())
}
