use std::collections::HashMap;

use tracing::{debug, warn};

use shared_database::{RecordStore, StoreError};
use shared_models::DoctorRecord;

use crate::models::{DoctorLookup, DoctorRole};

/// Read model over the doctor roster.
///
/// Booking forms reference a doctor either by its external id (`DOC001`) or
/// by its storage id; both keys are indexed and [`DoctorRoster::resolve`]
/// accepts either. External ids win when a key appears in both indexes.
/// The roster is a snapshot: call [`DoctorRoster::refresh`] or build a new
/// one to pick up changes.
#[derive(Debug, Clone, Default)]
pub struct DoctorRoster {
    doctors: Vec<DoctorRecord>,
    by_external_id: HashMap<String, usize>,
    by_storage_id: HashMap<String, usize>,
}

impl DoctorRoster {
    pub fn new(doctors: Vec<DoctorRecord>) -> Self {
        let mut roster = Self::default();
        roster.refresh(doctors);
        roster
    }

    pub async fn load(store: &dyn RecordStore) -> Result<Self, StoreError> {
        let doctors = store.list_doctors().await?;
        debug!("Loaded roster with {} doctors", doctors.len());
        Ok(Self::new(doctors))
    }

    /// Replaces the snapshot and rebuilds both indexes.
    pub fn refresh(&mut self, doctors: Vec<DoctorRecord>) {
        self.by_external_id.clear();
        self.by_storage_id.clear();

        for (index, doctor) in doctors.iter().enumerate() {
            if let Some(external) = doctor.external_id() {
                if self.by_external_id.contains_key(external) {
                    warn!("Duplicate external doctor id {}, keeping first", external);
                } else {
                    self.by_external_id.insert(external.to_string(), index);
                }
            }

            let storage = doctor.id.trim();
            if !storage.is_empty() {
                self.by_storage_id.entry(storage.to_string()).or_insert(index);
            }
        }

        self.doctors = doctors;
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        self.by_external_id
            .get(key)
            .or_else(|| self.by_storage_id.get(key))
            .copied()
    }

    pub fn resolve(&self, key: &str) -> DoctorLookup<'_> {
        match self.index_of(key) {
            Some(index) => DoctorLookup::Found(&self.doctors[index]),
            None => DoctorLookup::Unresolved,
        }
    }

    pub fn get(&self, key: &str) -> Option<&DoctorRecord> {
        self.resolve(key).found()
    }

    /// Whether two references point at the same doctor.
    ///
    /// Equal non-blank keys always match; otherwise both must resolve to the
    /// same roster entry.
    pub fn same_doctor(&self, a: &str, b: &str) -> bool {
        let (a, b) = (a.trim(), b.trim());
        if a.is_empty() || b.is_empty() {
            return false;
        }
        if a == b {
            return true;
        }
        matches!((self.index_of(a), self.index_of(b)), (Some(x), Some(y)) if x == y)
    }

    pub fn name_of(&self, key: &str) -> Option<&str> {
        self.get(key).map(|doctor| doctor.name.as_str())
    }

    pub fn doctors(&self) -> &[DoctorRecord] {
        &self.doctors
    }

    pub fn with_role(&self, role: DoctorRole) -> impl Iterator<Item = &DoctorRecord> {
        self.doctors.iter().filter(move |doctor| role.matches(doctor))
    }

    pub fn surgeons(&self) -> impl Iterator<Item = &DoctorRecord> {
        self.with_role(DoctorRole::Surgeon)
    }

    pub fn anesthesiologists(&self) -> impl Iterator<Item = &DoctorRecord> {
        self.with_role(DoctorRole::Anesthesiologist)
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }
}
