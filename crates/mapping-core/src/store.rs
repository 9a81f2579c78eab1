//! The mapping record store.
//!
//! [`MappingStore`] is the single owner of registered patients and mapping records. It is
//! constructed by the application entry point around a [`DurableStorage`] backend and
//! handed by reference to whatever needs it.
//!
//! ## Persistence
//!
//! Both collections are read once in [`MappingStore::open`]. Every mutation serialises the
//! affected collection in full and writes it back before returning. If that write fails
//! the in-memory change is undone and the error is returned. The one exception is a
//! [`MappingStore::clear`] whose rollback write also fails, which is logged.
//!
//! ## Catalogs
//!
//! The store starts with [`Catalog::standard`]. [`MappingStore::refresh_data`] replaces
//! both catalogs together or neither.

use crate::catalog::{Catalog, IcdCode, NamasteCode};
use crate::constants::{MAPPING_RECORDS_STORAGE_KEY, PATIENTS_STORAGE_KEY};
use crate::error::{StoreError, StoreResult};
use crate::export;
use crate::mapping::{MappingRecord, NewMappingRecord};
use crate::patient::{NewPatient, Patient};
use crate::search::{search_icd_codes, search_namaste_codes};
use crate::source::{CatalogError, CatalogSource, RefreshSummary};
use crate::storage::DurableStorage;
use crate::suggestions::{suggestions_for, MappingSuggestion};
use crate::views::{self, MappingAnalytics, RecordFilter};
use chrono::{DateTime, SubsecRound, Utc};
use fhir::{Bundle, CodePair, Condition};
use namaste_ids::{timestamp_id, IdPrefix, RecordId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Owner of patients, mapping records and the code catalogs.
#[derive(Debug)]
pub struct MappingStore<S> {
    storage: S,
    patients: Vec<Patient>,
    mapping_records: Vec<MappingRecord>,
    catalog: Catalog,
}

impl<S: DurableStorage> MappingStore<S> {
    /// Opens the store, loading any previously persisted patients and mapping records.
    ///
    /// A key that has never been written is treated as an empty collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if:
    /// - a blob cannot be read from storage ([`StoreError::FileRead`]),
    /// - a blob is not a JSON array of the expected records ([`StoreError::CorruptStorage`]).
    ///   Opening fails rather than starting empty so that the next write cannot overwrite
    ///   data that merely failed to parse.
    pub fn open(storage: S) -> StoreResult<Self> {
        let patients: Vec<Patient> = load(&storage, PATIENTS_STORAGE_KEY)?;
        let mapping_records: Vec<MappingRecord> = load(&storage, MAPPING_RECORDS_STORAGE_KEY)?;

        tracing::info!(
            "opened mapping store: {} patients, {} mapping records",
            patients.len(),
            mapping_records.len()
        );

        Ok(Self {
            storage,
            patients,
            mapping_records,
            catalog: Catalog::standard(),
        })
    }

    /// Registers a patient under a freshly generated `PAT-…` identifier.
    ///
    /// Inputs are stored as supplied.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the patient collection cannot be persisted. The patient is
    /// not retained in that case.
    pub fn add_patient(&mut self, new: NewPatient) -> StoreResult<Patient> {
        let created_at = stored_now();
        let patient = Patient {
            id: RecordId::generate(IdPrefix::Patient, created_at).to_string(),
            name: new.name,
            age: new.age,
            gender: new.gender,
            contact: new.contact,
            created_at,
        };

        self.patients.push(patient.clone());
        if let Err(e) = persist(&mut self.storage, PATIENTS_STORAGE_KEY, &self.patients) {
            self.patients.pop();
            return Err(e);
        }

        tracing::info!("registered patient {}", patient.id);
        Ok(patient)
    }

    /// Records a NAMASTE → ICD-11 mapping and derives its FHIR `Condition`.
    ///
    /// The patient id and both codes are taken on trust: no lookup against the patient list
    /// or the catalogs is made, and the supplied names are stored as snapshots.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the mapping record collection cannot be persisted. The
    /// record is not retained in that case.
    pub fn add_mapping_record(&mut self, new: NewMappingRecord) -> StoreResult<MappingRecord> {
        let created_at = stored_now();

        let fhir_data = Condition::for_mapping(
            timestamp_id("cond-", created_at),
            &new.patient_id,
            &CodePair::new(&new.namaste_code, &new.namaste_name),
            &CodePair::new(&new.icd_code, &new.icd_name),
        );

        let record = MappingRecord {
            id: RecordId::generate(IdPrefix::MappingRecord, created_at).to_string(),
            patient_id: new.patient_id,
            namaste_code: new.namaste_code,
            namaste_name: new.namaste_name,
            icd_code: new.icd_code,
            icd_name: new.icd_name,
            mapping_type: new.mapping_type,
            created_at,
            fhir_data,
        };

        self.mapping_records.push(record.clone());
        if let Err(e) = persist(
            &mut self.storage,
            MAPPING_RECORDS_STORAGE_KEY,
            &self.mapping_records,
        ) {
            self.mapping_records.pop();
            return Err(e);
        }

        tracing::info!(
            "recorded mapping {} ({} -> {}, {}) for patient {}",
            record.id,
            record.namaste_code,
            record.icd_code,
            record.mapping_type,
            record.patient_id
        );
        Ok(record)
    }

    /// Removes every patient and mapping record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if either collection cannot be persisted. In-memory data is
    /// restored in that case and the patient blob is written back. If that write-back also
    /// fails it is logged at error level, and storage may hold no patients until the next
    /// successful write.
    pub fn clear(&mut self) -> StoreResult<()> {
        let patients = std::mem::take(&mut self.patients);
        let records = std::mem::take(&mut self.mapping_records);

        let result = persist(&mut self.storage, PATIENTS_STORAGE_KEY, &self.patients).and_then(
            |()| {
                persist(
                    &mut self.storage,
                    MAPPING_RECORDS_STORAGE_KEY,
                    &self.mapping_records,
                )
            },
        );

        if let Err(e) = result {
            // The patient blob may already be empty if only the second write failed.
            if let Err(restore) = persist(&mut self.storage, PATIENTS_STORAGE_KEY, &patients) {
                tracing::error!(
                    "failed to restore {} after clear failed, stored patients may be lost: {}",
                    PATIENTS_STORAGE_KEY,
                    restore
                );
            }
            self.patients = patients;
            self.mapping_records = records;
            return Err(e);
        }

        tracing::info!("cleared mapping store");
        Ok(())
    }

    /// Builds the export bundle from every mapping record, in store order.
    pub fn export_bundle(&self, at: DateTime<Utc>) -> Bundle {
        Bundle::export(
            self.mapping_records.iter().map(|r| r.fhir_data.clone()),
            at,
        )
    }

    /// Writes the export bundle to `fhir-export-<date>.json` in `dir`.
    ///
    /// An empty store exports a bundle with no entries.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the directory or file cannot be written.
    pub fn export_fhir_data(&self, dir: &Path) -> StoreResult<PathBuf> {
        let now = Utc::now();
        export::write_export(dir, &self.export_bundle(now), now)
    }

    /// Replaces both catalogs with ones fetched from `source`.
    ///
    /// The two fetches run concurrently and the refresh waits for both. If either fails,
    /// neither catalog is changed and the failure is returned.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] reported by `source`.
    pub async fn refresh_data(
        &mut self,
        source: &dyn CatalogSource,
    ) -> Result<RefreshSummary, CatalogError> {
        let fetched = tokio::try_join!(source.fetch_namaste_codes(), source.fetch_icd_codes());

        let (namaste, icd) = match fetched {
            Ok(both) => both,
            Err(e) => {
                tracing::warn!("catalog refresh failed, keeping existing catalogs: {}", e);
                return Err(e);
            }
        };

        let summary = RefreshSummary {
            namaste_codes: namaste.len(),
            icd_codes: icd.len(),
        };
        self.catalog = Catalog { namaste, icd };

        tracing::info!(
            "refreshed catalogs: {} NAMASTE codes, {} ICD-11 codes",
            summary.namaste_codes,
            summary.icd_codes
        );
        Ok(summary)
    }
}

impl<S> MappingStore<S> {
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn mapping_records(&self) -> &[MappingRecord] {
        &self.mapping_records
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Case-insensitive search over NAMASTE code, name and description.
    pub fn search_namaste_codes(&self, query: &str) -> Vec<NamasteCode> {
        search_namaste_codes(&self.catalog.namaste, query)
    }

    /// Case-insensitive search over ICD-11 code, name and category.
    pub fn search_icd_codes(&self, query: &str) -> Vec<IcdCode> {
        search_icd_codes(&self.catalog.icd, query)
    }

    pub fn suggestions_for(&self, namaste_code: &str) -> Vec<MappingSuggestion> {
        suggestions_for(namaste_code)
    }

    /// Problem list for one patient, in store order.
    pub fn records_for_patient(&self, patient_id: &str) -> Vec<&MappingRecord> {
        views::records_for_patient(&self.mapping_records, patient_id)
    }

    pub fn filter_records(&self, filter: &RecordFilter<'_>) -> Vec<&MappingRecord> {
        views::filter_records(&self.mapping_records, &self.patients, filter)
    }

    pub fn analytics(&self) -> MappingAnalytics {
        MappingAnalytics::from_records(&self.mapping_records)
    }
}

/// Current time cut to the millisecond precision that is persisted.
fn stored_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

fn load<S, T>(storage: &S, key: &str) -> StoreResult<Vec<T>>
where
    S: DurableStorage,
    T: DeserializeOwned,
{
    let Some(raw) = storage.read(key)? else {
        return Ok(Vec::new());
    };

    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    let items = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        let path = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        StoreError::CorruptStorage {
            key: key.to_string(),
            path,
            source: err.into_inner(),
        }
    })?;

    deserializer
        .end()
        .map_err(|source| StoreError::CorruptStorage {
            key: key.to_string(),
            path: "<root>".to_string(),
            source,
        })?;

    Ok(items)
}

fn persist<S, T>(storage: &mut S, key: &str, items: &[T]) -> StoreResult<()>
where
    S: DurableStorage,
    T: Serialize,
{
    let json = serde_json::to_string(items).map_err(|source| StoreError::Serialization {
        key: key.to_string(),
        source,
    })?;
    storage.write(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MappingType;
    use crate::patient::Gender;
    use crate::source::StaticCatalogSource;
    use crate::storage::FileStorage;
    use async_trait::async_trait;
    use fhir::Coding;
    use std::collections::{HashMap, HashSet};
    use tempfile::TempDir;

    /// In-memory storage that can be told to refuse writes, to every key or to one.
    #[derive(Debug, Default)]
    struct MemoryStorage {
        blobs: HashMap<String, String>,
        fail_writes: bool,
        fail_key: Option<&'static str>,
    }

    impl DurableStorage for MemoryStorage {
        fn read(&self, key: &str) -> StoreResult<Option<String>> {
            Ok(self.blobs.get(key).cloned())
        }

        fn write(&mut self, key: &str, contents: &str) -> StoreResult<()> {
            if self.fail_writes || self.fail_key.is_some_and(|k| k == key) {
                return Err(StoreError::FileWrite(std::io::Error::other("quota exceeded")));
            }
            self.blobs.insert(key.to_string(), contents.to_string());
            Ok(())
        }
    }

    fn new_patient(name: &str) -> NewPatient {
        NewPatient {
            name: name.to_string(),
            age: 35,
            gender: Gender::Other,
            contact: "asha@example.org".to_string(),
        }
    }

    fn jvara_mapping(patient_id: &str) -> NewMappingRecord {
        NewMappingRecord {
            patient_id: patient_id.to_string(),
            namaste_code: "NAM-AYU-103".to_string(),
            namaste_name: "Jvara".to_string(),
            icd_code: "1D44".to_string(),
            icd_name: "Fever of unknown origin".to_string(),
            mapping_type: MappingType::Exact,
        }
    }

    #[test]
    fn opens_empty_when_nothing_was_persisted() {
        let store = MappingStore::open(MemoryStorage::default()).expect("open");

        assert!(store.patients().is_empty());
        assert!(store.mapping_records().is_empty());
        assert_eq!(store.catalog(), &Catalog::standard());
    }

    #[test]
    fn patient_ids_are_unique_and_each_patient_appears_once() {
        let mut store = MappingStore::open(MemoryStorage::default()).expect("open");

        let added: Vec<Patient> = (0..50)
            .map(|i| {
                store
                    .add_patient(new_patient(&format!("Patient {i}")))
                    .expect("add patient")
            })
            .collect();

        let ids: HashSet<&str> = store.patients().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 50);
        for patient in &added {
            assert!(patient.id.starts_with("PAT-"));
            let occurrences = store
                .patients()
                .iter()
                .filter(|p| p.id == patient.id)
                .count();
            assert_eq!(occurrences, 1);
        }
    }

    #[test]
    fn add_patient_accepts_inputs_verbatim() {
        let mut store = MappingStore::open(MemoryStorage::default()).expect("open");

        let patient = store
            .add_patient(NewPatient {
                name: String::new(),
                age: 250,
                gender: Gender::Male,
                contact: "not a phone number".to_string(),
            })
            .expect("no validation");

        assert_eq!(patient.name, "");
        assert_eq!(patient.age, 250);
        assert_eq!(store.patient(&patient.id), Some(&patient));
    }

    #[test]
    fn mapping_record_derives_condition_with_two_codings() {
        let mut store = MappingStore::open(MemoryStorage::default()).expect("open");

        let record = store
            .add_mapping_record(jvara_mapping("PAT-1"))
            .expect("add mapping");

        assert!(record.id.starts_with("MAP-"));
        assert_eq!(record.fhir_data.resource_type, "Condition");
        assert!(record.fhir_data.id.starts_with("cond-"));
        assert_eq!(record.fhir_data.subject.reference, "Patient/PAT-1");
        assert_eq!(
            record.fhir_data.code.coding,
            vec![
                Coding {
                    system: "NAMASTE".into(),
                    code: "NAM-AYU-103".into(),
                    display: "Jvara".into(),
                },
                Coding {
                    system: "ICD-11".into(),
                    code: "1D44".into(),
                    display: "Fever of unknown origin".into(),
                },
            ]
        );
    }

    #[test]
    fn mapping_record_stores_unknown_references_verbatim() {
        let mut store = MappingStore::open(MemoryStorage::default()).expect("open");

        let record = store
            .add_mapping_record(NewMappingRecord {
                patient_id: "no-such-patient".into(),
                namaste_code: "NOT-A-CODE".into(),
                namaste_name: "???".into(),
                icd_code: "ZZZZ".into(),
                icd_name: "".into(),
                mapping_type: MappingType::Partial,
            })
            .expect("garbage in is stored");

        assert_eq!(store.mapping_records(), std::slice::from_ref(&record));
        assert_eq!(record.fhir_data.subject.reference, "Patient/no-such-patient");
    }

    #[test]
    fn data_survives_reopen() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let (patient, record) = {
            let mut store =
                MappingStore::open(FileStorage::new(temp_dir.path())).expect("open");
            let patient = store.add_patient(new_patient("Asha")).expect("add patient");
            let record = store
                .add_mapping_record(jvara_mapping(&patient.id))
                .expect("add mapping");
            (patient, record)
        };

        let reopened = MappingStore::open(FileStorage::new(temp_dir.path())).expect("reopen");
        assert_eq!(reopened.patients(), std::slice::from_ref(&patient));
        assert_eq!(reopened.mapping_records(), std::slice::from_ref(&record));
        assert_eq!(reopened.patients()[0].created_at, patient.created_at);
        assert_eq!(reopened.mapping_records()[0].created_at, record.created_at);
    }

    #[test]
    fn created_at_is_whole_millis_and_matches_ids() {
        let mut store = MappingStore::open(MemoryStorage::default()).expect("open");
        let patient = store.add_patient(new_patient("Asha")).expect("add patient");
        let record = store
            .add_mapping_record(jvara_mapping(&patient.id))
            .expect("add mapping");

        assert_eq!(patient.created_at.timestamp_subsec_nanos() % 1_000_000, 0);
        assert_eq!(record.created_at.timestamp_subsec_nanos() % 1_000_000, 0);

        let millis = patient.created_at.timestamp_millis().to_string();
        assert_eq!(patient.id.split('-').nth(1), Some(millis.as_str()));

        let millis = record.created_at.timestamp_millis().to_string();
        assert_eq!(record.id.split('-').nth(1), Some(millis.as_str()));
        assert_eq!(record.fhir_data.id, format!("cond-{millis}"));
    }

    #[test]
    fn persisted_blobs_are_json_arrays_with_camel_case_fields() {
        let mut store = MappingStore::open(MemoryStorage::default()).expect("open");
        store.add_patient(new_patient("Asha")).expect("add patient");
        store
            .add_mapping_record(jvara_mapping("PAT-1"))
            .expect("add mapping");

        let patients: serde_json::Value =
            serde_json::from_str(&store.storage.blobs[PATIENTS_STORAGE_KEY]).expect("json");
        let records: serde_json::Value =
            serde_json::from_str(&store.storage.blobs[MAPPING_RECORDS_STORAGE_KEY]).expect("json");

        assert_eq!(patients.as_array().map(Vec::len), Some(1));
        assert!(patients[0].get("createdAt").is_some());
        assert_eq!(records[0]["patientId"], "PAT-1");
        assert_eq!(records[0]["mappingType"], "exact");
        assert_eq!(records[0]["fhirData"]["resourceType"], "Condition");
    }

    #[test]
    fn failed_write_leaves_collections_unchanged() {
        let mut store = MappingStore::open(MemoryStorage::default()).expect("open");
        store.add_patient(new_patient("Kept")).expect("add patient");

        store.storage.fail_writes = true;

        let err = store
            .add_patient(new_patient("Dropped"))
            .expect_err("write refused");
        assert!(matches!(err, StoreError::FileWrite(_)));
        assert_eq!(store.patients().len(), 1);
        assert_eq!(store.patients()[0].name, "Kept");

        store
            .add_mapping_record(jvara_mapping("PAT-1"))
            .expect_err("write refused");
        assert!(store.mapping_records().is_empty());
    }

    #[test]
    fn clear_removes_everything_and_persists() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut store = MappingStore::open(FileStorage::new(temp_dir.path())).expect("open");
        let patient = store.add_patient(new_patient("Asha")).expect("add patient");
        store
            .add_mapping_record(jvara_mapping(&patient.id))
            .expect("add mapping");

        store.clear().expect("clear");
        assert!(store.patients().is_empty());
        assert!(store.mapping_records().is_empty());

        let reopened = MappingStore::open(FileStorage::new(temp_dir.path())).expect("reopen");
        assert!(reopened.patients().is_empty());
        assert!(reopened.mapping_records().is_empty());
    }

    #[test]
    fn clear_failure_restores_collections() {
        let mut store = MappingStore::open(MemoryStorage::default()).expect("open");
        store.add_patient(new_patient("Asha")).expect("add patient");
        store.storage.fail_writes = true;

        store.clear().expect_err("write refused");
        assert_eq!(store.patients().len(), 1);
    }

    #[test]
    fn clear_failing_on_records_restores_patient_blob() {
        let mut store = MappingStore::open(MemoryStorage::default()).expect("open");
        let patient = store.add_patient(new_patient("Asha")).expect("add patient");
        let record = store
            .add_mapping_record(jvara_mapping(&patient.id))
            .expect("add mapping");
        store.storage.fail_key = Some(MAPPING_RECORDS_STORAGE_KEY);

        let err = store.clear().expect_err("records write refused");
        assert!(matches!(err, StoreError::FileWrite(_)));
        assert_eq!(store.patients(), std::slice::from_ref(&patient));
        assert_eq!(store.mapping_records(), std::slice::from_ref(&record));

        store.storage.fail_key = None;
        let reopened = MappingStore::open(store.storage).expect("reopen");
        assert_eq!(reopened.patients(), std::slice::from_ref(&patient));
        assert_eq!(reopened.mapping_records(), std::slice::from_ref(&record));
    }

    #[test]
    fn corrupt_blob_fails_open_with_path() {
        let mut storage = MemoryStorage::default();
        storage.blobs.insert(
            PATIENTS_STORAGE_KEY.to_string(),
            r#"[{"id":"PAT-1","name":"A","age":"forty","gender":"male","contact":"","createdAt":"2026-10-19T12:00:00.000Z"}]"#
                .to_string(),
        );

        let err = MappingStore::open(storage).expect_err("age is not a number");
        match err {
            StoreError::CorruptStorage { key, path, .. } => {
                assert_eq!(key, PATIENTS_STORAGE_KEY);
                assert!(path.contains("age"), "path was {path}");
            }
            other => panic!("expected CorruptStorage, got {other:?}"),
        }
    }

    #[test]
    fn trailing_garbage_after_blob_fails_open() {
        let mut storage = MemoryStorage::default();
        storage.blobs.insert(
            MAPPING_RECORDS_STORAGE_KEY.to_string(),
            "[] trailing garbage".to_string(),
        );

        let err = MappingStore::open(storage).expect_err("blob has trailing characters");
        match err {
            StoreError::CorruptStorage { key, path, .. } => {
                assert_eq!(key, MAPPING_RECORDS_STORAGE_KEY);
                assert_eq!(path, "<root>");
            }
            other => panic!("expected CorruptStorage, got {other:?}"),
        }
    }

    #[test]
    fn trailing_whitespace_after_blob_is_accepted() {
        let mut storage = MemoryStorage::default();
        storage
            .blobs
            .insert(PATIENTS_STORAGE_KEY.to_string(), "[]\n".to_string());

        let store = MappingStore::open(storage).expect("whitespace is not corruption");
        assert!(store.patients().is_empty());
    }

    #[test]
    fn export_bundle_wraps_records_in_store_order() {
        let mut store = MappingStore::open(MemoryStorage::default()).expect("open");
        let first = store
            .add_mapping_record(jvara_mapping("PAT-1"))
            .expect("add mapping");
        let second = store
            .add_mapping_record(NewMappingRecord {
                namaste_code: "NAM-AYU-201".into(),
                namaste_name: "Prameha".into(),
                icd_code: "5A11".into(),
                icd_name: "Type 2 Diabetes Mellitus".into(),
                mapping_type: MappingType::Approximate,
                ..jvara_mapping("PAT-2")
            })
            .expect("add mapping");

        let bundle = store.export_bundle(Utc::now());
        let exported: Vec<&Condition> = bundle.conditions().collect();
        assert_eq!(exported, vec![&first.fhir_data, &second.fhir_data]);
        assert_eq!(bundle.bundle_type, "collection");
    }

    #[test]
    fn export_of_empty_store_writes_empty_bundle() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = MappingStore::open(MemoryStorage::default()).expect("open");

        let path = store
            .export_fhir_data(temp_dir.path())
            .expect("export empty store");

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
        assert_eq!(written["entry"], serde_json::json!([]));
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        assert!(file_name.starts_with("fhir-export-") && file_name.ends_with(".json"));
    }

    #[test]
    fn search_delegates_to_current_catalog() {
        let store = MappingStore::open(MemoryStorage::default()).expect("open");

        assert_eq!(store.search_namaste_codes(""), store.catalog().namaste);
        assert_eq!(
            store.search_namaste_codes("jvara"),
            store.search_namaste_codes("JVARA")
        );
        assert_eq!(store.search_icd_codes("cough").len(), 1);
        assert_eq!(store.suggestions_for("NAM-AYU-103")[0].icd_code, "1D44");
    }

    struct FailingIcdSource;

    #[async_trait]
    impl CatalogSource for FailingIcdSource {
        async fn fetch_namaste_codes(&self) -> Result<Vec<NamasteCode>, CatalogError> {
            Ok(Vec::new())
        }

        async fn fetch_icd_codes(&self) -> Result<Vec<IcdCode>, CatalogError> {
            Err(CatalogError::Unavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn refresh_replaces_both_catalogs() {
        let mut store = MappingStore::open(MemoryStorage::default()).expect("open");
        let replacement = Catalog {
            namaste: vec![NamasteCode {
                code: "NAM-UNN-401".into(),
                name: "Humma".into(),
                description: "Fever in Unani medicine".into(),
                system: crate::catalog::TraditionalSystem::Unani,
            }],
            icd: vec![],
        };

        let summary = store
            .refresh_data(&StaticCatalogSource::new(replacement.clone()))
            .await
            .expect("refresh");

        assert_eq!(
            summary,
            RefreshSummary {
                namaste_codes: 1,
                icd_codes: 0
            }
        );
        assert_eq!(store.catalog(), &replacement);
        assert_eq!(store.search_namaste_codes("humma").len(), 1);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_existing_catalogs() {
        let mut store = MappingStore::open(MemoryStorage::default()).expect("open");

        let err = store
            .refresh_data(&FailingIcdSource)
            .await
            .expect_err("icd fetch fails");

        assert!(matches!(err, CatalogError::Unavailable(_)));
        assert_eq!(store.catalog(), &Catalog::standard());
    }
}
