use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::patient::Patient;

/// Identity of the currently authenticated patient.
///
/// Persisted as the single `session` entry; at most one exists per store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub patient_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl Session {
    pub fn for_patient(patient: &Patient) -> Self {
        Self {
            patient_id: patient.id,
            email: patient.email.clone(),
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
