//! Time-prefixed identifiers for patients, mapping records and FHIR resources.
//!
//! Two identifier shapes are produced:
//!
//! - **Record identifiers** ([`RecordId`]): `<PREFIX>-<epoch-millis>-<suffix>` where the
//!   suffix is nine random lowercase base-36 characters, for example
//!   `PAT-1760876400000-k3j9x0q2a`. Collisions are improbable but not ruled out.
//! - **Timestamp identifiers** ([`timestamp_id`]): `<tag><epoch-millis>`, used for derived
//!   FHIR resources (`cond-…`, `export-…`) and upload receipts (`bundle_…`). These carry
//!   no random part, so two generated in the same millisecond are equal.

mod record_id;

pub use record_id::{timestamp_id, IdPrefix, RecordId, SUFFIX_LEN};
