//! Typed accessors over the three persisted collections.
//!
//! Every mutation is a whole-collection read-modify-write; the store
//! has no indexes and no partial updates. Lookups are linear scans,
//! which is fine at this data scale.

use uuid::Uuid;

use super::{LocalStore, StoreError};
use crate::models::{Appointment, AppointmentStatus, Patient, PatientUpdate, Session};

pub const PATIENTS_KEY: &str = "patients";
pub const APPOINTMENTS_KEY: &str = "appointments";
pub const SESSION_KEY: &str = "session";

// ─── Patients ─────────────────────────────────────────────────────────────────

pub fn list_patients(store: &LocalStore) -> Vec<Patient> {
    store.read_collection(PATIENTS_KEY)
}

pub fn append_patient(store: &LocalStore, patient: &Patient) -> Result<(), StoreError> {
    let mut patients = list_patients(store);
    patients.push(patient.clone());
    store.write_entry(PATIENTS_KEY, &patients)
}

/// Find a patient by email, case-insensitively.
pub fn find_patient_by_email(store: &LocalStore, email: &str) -> Option<Patient> {
    list_patients(store)
        .into_iter()
        .find(|p| p.email.eq_ignore_ascii_case(email))
}

pub fn find_patient_by_id(store: &LocalStore, id: &Uuid) -> Option<Patient> {
    list_patients(store).into_iter().find(|p| p.id == *id)
}

/// Apply a partial profile update and return the updated record.
pub fn update_patient(
    store: &LocalStore,
    id: &Uuid,
    update: &PatientUpdate,
) -> Result<Patient, StoreError> {
    let mut patients = list_patients(store);
    let patient = patients
        .iter_mut()
        .find(|p| p.id == *id)
        .ok_or_else(|| StoreError::NotFound {
            entity_type: "Patient".into(),
            id: id.to_string(),
        })?;
    update.apply(patient);
    let updated = patient.clone();
    store.write_entry(PATIENTS_KEY, &patients)?;
    Ok(updated)
}

// ─── Appointments ─────────────────────────────────────────────────────────────

pub fn list_appointments(store: &LocalStore) -> Vec<Appointment> {
    store.read_collection(APPOINTMENTS_KEY)
}

pub fn append_appointment(store: &LocalStore, appointment: &Appointment) -> Result<(), StoreError> {
    let mut appointments = list_appointments(store);
    appointments.push(appointment.clone());
    store.write_entry(APPOINTMENTS_KEY, &appointments)
}

/// A patient's appointments, ordered by date descending. Ties in date
/// keep the store's natural order (`sort_by` is stable).
pub fn patient_appointments(store: &LocalStore, patient_id: &Uuid) -> Vec<Appointment> {
    let mut appointments: Vec<Appointment> = list_appointments(store)
        .into_iter()
        .filter(|a| a.patient_id == *patient_id)
        .collect();
    appointments.sort_by(|a, b| b.date.cmp(&a.date));
    appointments
}

pub fn set_appointment_status(
    store: &LocalStore,
    id: &Uuid,
    status: AppointmentStatus,
) -> Result<(), StoreError> {
    let mut appointments = list_appointments(store);
    let appointment = appointments
        .iter_mut()
        .find(|a| a.id == *id)
        .ok_or_else(|| StoreError::NotFound {
            entity_type: "Appointment".into(),
            id: id.to_string(),
        })?;
    appointment.status = status;
    store.write_entry(APPOINTMENTS_KEY, &appointments)
}

// ─── Session ──────────────────────────────────────────────────────────────────

pub fn load_session(store: &LocalStore) -> Option<Session> {
    store.read_entry(SESSION_KEY)
}

pub fn save_session(store: &LocalStore, session: &Session) -> Result<(), StoreError> {
    store.write_entry(SESSION_KEY, session)
}

/// Clear the session unconditionally. Idempotent.
pub fn clear_session(store: &LocalStore) -> Result<(), StoreError> {
    store.remove_entry(SESSION_KEY)
}

// ─── Reset ────────────────────────────────────────────────────────────────────

/// Remove all persisted state. The explicit reset operation.
pub fn reset_all(store: &LocalStore) -> Result<(), StoreError> {
    store.remove_entry(PATIENTS_KEY)?;
    store.remove_entry(APPOINTMENTS_KEY)?;
    store.remove_entry(SESSION_KEY)?;
    Ok(())
}
