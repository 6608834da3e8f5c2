//! Patient repository.
//!
//! Holds the process-wide patient collection. The repository trusts its inputs: callers pass
//! [`NewPatient`] and [`NewEntry`] values that have already been through the structural
//! validator, and no structural checking happens here.
//!
//! ## Concurrency
//!
//! The collection is owned by the repository behind an [`RwLock`]. Every operation holds the
//! lock for its full duration, so concurrent `add_patient`/`add_entry` calls are applied one at a
//! time and readers never see a half-applied mutation. Values handed out are clones of the
//! stored records; mutating them has no effect on the repository.
//!
//! ## Identifiers
//!
//! Identifiers come from an injected [`IdGenerator`], called once per new patient and once per
//! new entry. Entry identifiers share the generator with patient identifiers, so they are unique
//! across all patients.

use crate::config::CoreConfig;
use crate::entry::{Entry, NewEntry};
use crate::error::PatientResult;
use crate::patient::{NewPatient, NonSensitivePatient, Patient};
use crate::seed;
use patientor_uuid::IdGenerator;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub struct PatientRepository {
    patients: RwLock<Vec<Patient>>,
    ids: Arc<dyn IdGenerator>,
}

impl std::fmt::Debug for PatientRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatientRepository")
            .field("patients", &self.read().len())
            .finish_non_exhaustive()
    }
}

impl PatientRepository {
    /// Creates a repository holding `patients`, allocating new identifiers from `ids`.
    pub fn new(patients: Vec<Patient>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            patients: RwLock::new(patients),
            ids,
        }
    }

    /// Creates a repository seeded from the source named in `cfg`.
    ///
    /// # Errors
    ///
    /// Returns `PatientError` if the seed data cannot be loaded.
    pub fn from_config(cfg: &CoreConfig, ids: Arc<dyn IdGenerator>) -> PatientResult<Self> {
        let patients = seed::load_patients(cfg.seed_source())?;
        tracing::info!("loaded {} seed patients", patients.len());
        Ok(Self::new(patients, ids))
    }

    /// Returns every patient, including identity codes, in insertion order.
    pub fn list_all(&self) -> Vec<Patient> {
        self.read().clone()
    }

    /// Returns every patient with the identity code removed.
    ///
    /// The projection is built from the current records on every call.
    pub fn list_non_sensitive(&self) -> Vec<NonSensitivePatient> {
        self.read().iter().map(NonSensitivePatient::from).collect()
    }

    /// Looks a patient up by identifier. `None` means no such patient.
    pub fn get_by_id(&self, id: &str) -> Option<Patient> {
        self.read().iter().find(|p| p.id == *id).cloned()
    }

    /// Stores a new patient under a freshly generated identifier and returns the stored record.
    pub fn add_patient(&self, new_patient: NewPatient) -> Patient {
        let mut patients = self.write();
        let patient = Patient::from_new(self.ids.generate(), new_patient);
        tracing::debug!("adding patient {}", patient.id);
        patients.push(patient.clone());
        patient
    }

    /// Appends an entry to a patient's history and returns the updated patient.
    ///
    /// Returns `None`, leaving the collection untouched, if no patient has `patient_id`.
    pub fn add_entry(&self, patient_id: &str, new_entry: NewEntry) -> Option<Patient> {
        let mut patients = self.write();
        let patient = patients.iter_mut().find(|p| p.id == *patient_id)?;

        let entry = Entry::from_new(self.ids.generate(), new_entry);
        tracing::debug!(
            "adding {} entry {} to patient {}",
            entry.kind.tag(),
            entry.id,
            patient.id
        );
        patient.entries.push(entry);
        Some(patient.clone())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panic while holding the lock cannot leave a half-pushed element behind, so a poisoned
    // lock still guards a consistent collection.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Patient>> {
        self.patients.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Patient>> {
        self.patients
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedSource;
    use crate::validation::{validate_new_entry, validate_new_patient};
    use patientor_uuid::{SequentialIdGenerator, UuidGenerator};
    use serde_json::json;
    use std::collections::HashSet;

    fn seeded_repository() -> PatientRepository {
        let cfg = CoreConfig::new(SeedSource::Bundled).expect("CoreConfig::new should succeed");
        let ids = Arc::new(SequentialIdGenerator::new("test"));
        PatientRepository::from_config(&cfg, ids).expect("seed should load")
    }

    fn empty_repository() -> PatientRepository {
        PatientRepository::new(vec![], Arc::new(SequentialIdGenerator::new("test")))
    }

    fn new_patient(name: &str, ssn: &str) -> NewPatient {
        validate_new_patient(&json!({
            "name": name,
            "dateOfBirth": "1990-01-15",
            "ssn": ssn,
            "gender": "other",
            "occupation": "Tester"
        }))
        .expect("fixture should validate")
    }

    fn health_check(rating: u8) -> NewEntry {
        validate_new_entry(&json!({
            "type": "HealthCheck",
            "date": "2024-03-01",
            "specialist": "Dr Test",
            "description": "Routine check",
            "healthCheckRating": rating
        }))
        .expect("fixture should validate")
    }

    #[test]
    fn test_seeded_repository_lists_all_patients() {
        let repo = seeded_repository();
        let all = repo.list_all();

        assert_eq!(all.len(), 5);
        assert_eq!(repo.len(), 5);
        assert!(!repo.is_empty());
        assert!(all.iter().any(|p| p.ssn == "090786-122X"));
    }

    #[test]
    fn test_get_by_id_found_and_absent() {
        let repo = seeded_repository();

        let found = repo
            .get_by_id("d2773822-f723-11e9-8f0b-362b9e155667")
            .expect("should find seeded patient");
        assert_eq!(found.name.as_str(), "Dana Scully");

        assert!(repo.get_by_id("no-such-patient").is_none());
    }

    #[test]
    fn test_add_patient_assigns_fresh_id_and_empty_entries() {
        let repo = empty_repository();

        let added = repo.add_patient(new_patient("Alice Smith", "111"));
        assert_eq!(added.id.as_str(), "test-0001");
        assert!(added.entries.is_empty());
        assert_eq!(repo.get_by_id("test-0001"), Some(added));
    }

    #[test]
    fn test_sequential_add_patient_ids_never_collide() {
        let repo = seeded_repository();
        let before: HashSet<String> = repo
            .list_all()
            .into_iter()
            .map(|p| p.id.to_string())
            .collect();

        let first = repo.add_patient(new_patient("Alice", "1"));
        let second = repo.add_patient(new_patient("Bob", "2"));

        assert_ne!(first.id, second.id);
        assert!(!before.contains(first.id.as_str()));
        assert!(!before.contains(second.id.as_str()));
        assert_eq!(repo.len(), 7);
    }

    #[test]
    fn test_add_patient_with_real_uuids() {
        let repo = PatientRepository::new(vec![], Arc::new(UuidGenerator::new()));

        let mut ids = HashSet::new();
        for i in 0..50 {
            let added = repo.add_patient(new_patient("Many", &i.to_string()));
            ids.insert(added.id);
        }
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_add_entry_unknown_patient_is_absent_and_no_op() {
        let repo = seeded_repository();
        let before = repo.list_all();

        assert!(repo.add_entry("no-such-patient", health_check(0)).is_none());
        assert_eq!(repo.list_all(), before);
    }

    #[test]
    fn test_add_entry_appends_one_and_preserves_order() {
        let repo = seeded_repository();
        let scully_id = "d2773822-f723-11e9-8f0b-362b9e155667";
        let prior: Vec<_> = repo.get_by_id(scully_id).unwrap().entries;

        let updated = repo
            .add_entry(scully_id, health_check(3))
            .expect("patient exists");

        assert_eq!(updated.entries.len(), prior.len() + 1);
        assert_eq!(&updated.entries[..prior.len()], &prior[..]);

        let appended = updated.entries.last().unwrap();
        assert_eq!(appended.id.as_str(), "test-0001");
        assert_eq!(appended.kind.tag(), "HealthCheck");
        assert_eq!(repo.get_by_id(scully_id), Some(updated));
    }

    #[test]
    fn test_entry_ids_unique_across_all_patients() {
        let repo = seeded_repository();
        let mut seen: HashSet<String> = repo
            .list_all()
            .iter()
            .flat_map(|p| p.entries.iter().map(|e| e.id.to_string()))
            .collect();

        let riggs = "d2773598-f723-11e9-8f0b-362b9e155667";
        let gruber = "d27736ec-f723-11e9-8f0b-362b9e155667";
        for target in [riggs, gruber, riggs] {
            let updated = repo.add_entry(target, health_check(1)).unwrap();
            let new_id = updated.entries.last().unwrap().id.to_string();
            assert!(seen.insert(new_id), "entry id reused");
        }
    }

    #[test]
    fn test_returned_patient_is_isolated_from_store() {
        let repo = empty_repository();
        let mut added = repo.add_patient(new_patient("Alice", "1"));
        added.occupation = "Changed outside".into();

        let stored = repo.get_by_id(added.id.as_str()).unwrap();
        assert_eq!(stored.occupation, "Tester");
    }

    #[test]
    fn test_non_sensitive_never_contains_ssn() {
        let repo = seeded_repository();
        let added = repo.add_patient(new_patient("Secret Keeper", "SECRET-SSN-123"));
        repo.add_entry(added.id.as_str(), health_check(2));
        repo.add_entry("d2773336-f723-11e9-8f0b-362b9e155667", health_check(0));

        let ssns: Vec<String> = repo.list_all().into_iter().map(|p| p.ssn).collect();
        let projected = serde_json::to_string(&repo.list_non_sensitive()).unwrap();

        assert_eq!(repo.list_non_sensitive().len(), ssns.len());
        for ssn in ssns {
            assert!(!projected.contains(&ssn), "ssn {ssn} leaked");
        }
    }

    #[test]
    fn test_non_sensitive_reflects_live_state() {
        let repo = seeded_repository();
        let gruber = "d27736ec-f723-11e9-8f0b-362b9e155667";

        repo.add_entry(gruber, health_check(1));
        let added = repo.add_patient(new_patient("Late Arrival", "9"));

        let projected = repo.list_non_sensitive();
        let gruber_view = projected.iter().find(|p| p.id == *gruber).unwrap();
        assert_eq!(gruber_view.entries.len(), 1);
        assert!(projected.iter().any(|p| p.id == added.id));
    }

    #[test]
    fn test_concurrent_adds_are_all_applied() {
        let repo = Arc::new(empty_repository());
        let target = repo.add_patient(new_patient("Shared", "0")).id.to_string();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = Arc::clone(&repo);
                let target = target.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        repo.add_patient(new_patient("Worker", &i.to_string()));
                        repo.add_entry(&target, health_check(0));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(repo.len(), 1 + 8 * 25);
        let entries = repo.get_by_id(&target).unwrap().entries;
        assert_eq!(entries.len(), 8 * 25);
        let ids: HashSet<_> = entries.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids.len(), entries.len());
    }
}
