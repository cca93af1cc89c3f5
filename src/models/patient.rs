use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered patient account.
///
/// The password is stored in plaintext. The source system never hashed
/// credentials and this crate preserves that behavior; treat the record
/// store as untrusted for anything beyond demo data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Partial profile update. `None` fields are left unchanged.
///
/// Identity fields (id, email, password) and the creation timestamp are
/// not updatable through this path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
}

impl PatientUpdate {
    pub fn apply(&self, patient: &mut Patient) {
        if let Some(first_name) = &self.first_name {
            patient.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            patient.last_name = last_name.clone();
        }
        if let Some(phone) = &self.phone {
            patient.phone = Some(phone.clone());
        }
        if let Some(address) = &self.address {
            patient.address = Some(address.clone());
        }
        if let Some(emergency_contact) = &self.emergency_contact {
            patient.emergency_contact = Some(emergency_contact.clone());
        }
    }
}
