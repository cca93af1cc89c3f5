//! Patient registration, login, and session restoration.
//!
//! Passwords are compared in plaintext against the stored record; the
//! source system never hashed credentials and this layer preserves its
//! behavior. Registration does not auto-login: callers route the
//! patient through `login` afterwards.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Patient, PatientUpdate, Session};
use crate::store::{records, LocalStore, StoreError};

// ─── Field limits (from the registration form contract) ──────────────────────

const NAME_MAX: usize = 50;
const EMAIL_MAX: usize = 100;
const PASSWORD_MIN: usize = 6;
const PASSWORD_MAX: usize = 100;
const PHONE_MAX: usize = 20;
const ADDRESS_MAX: usize = 200;
const EMERGENCY_CONTACT_MAX: usize = 100;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    #[error("An account with this email already exists")]
    DuplicateEmail,

    #[error("No account found with this email address")]
    NotFound,

    #[error("Incorrect password")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Registration payload. Everything a patient record needs except the
/// id and creation timestamp, which are assigned here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
}

// ─── Operations ───────────────────────────────────────────────────────────────

/// Register a new patient. Fails with `DuplicateEmail` when another
/// account already uses the email, compared case-insensitively.
pub fn register(store: &LocalStore, request: &RegisterRequest) -> Result<Patient, AuthError> {
    validate(request)?;

    let email = request.email.trim();
    if records::find_patient_by_email(store, email).is_some() {
        return Err(AuthError::DuplicateEmail);
    }

    let patient = Patient {
        id: Uuid::new_v4(),
        email: email.to_string(),
        password: request.password.clone(),
        first_name: request.first_name.trim().to_string(),
        last_name: request.last_name.trim().to_string(),
        date_of_birth: request.date_of_birth,
        phone: normalize_optional(&request.phone),
        address: normalize_optional(&request.address),
        emergency_contact: normalize_optional(&request.emergency_contact),
        created_at: chrono::Local::now().naive_local(),
    };
    records::append_patient(store, &patient)?;

    tracing::info!(patient_id = %patient.id, "Patient registered");
    Ok(patient)
}

/// Authenticate and persist a new session.
///
/// Email matches case-insensitively; the password must match exactly.
pub fn login(store: &LocalStore, email: &str, password: &str) -> Result<Session, AuthError> {
    let patient =
        records::find_patient_by_email(store, email.trim()).ok_or(AuthError::NotFound)?;

    if patient.password != password {
        return Err(AuthError::InvalidCredentials);
    }

    let session = Session::for_patient(&patient);
    records::save_session(store, &session)?;

    tracing::info!(patient_id = %session.patient_id, "Patient logged in");
    Ok(session)
}

/// Clear the session unconditionally. Idempotent.
pub fn logout(store: &LocalStore) -> Result<(), AuthError> {
    records::clear_session(store)?;
    tracing::info!("Session cleared");
    Ok(())
}

/// Resolve the persisted session to its patient record on startup.
///
/// A session whose patient no longer exists is stale: it is cleared and
/// `None` is returned, so callers never observe a half-authenticated
/// state.
pub fn restore_session(store: &LocalStore) -> Option<(Session, Patient)> {
    let session = records::load_session(store)?;
    match records::find_patient_by_id(store, &session.patient_id) {
        Some(patient) => Some((session, patient)),
        None => {
            tracing::warn!(patient_id = %session.patient_id, "Session references a missing patient; clearing");
            if let Err(e) = records::clear_session(store) {
                tracing::warn!(error = %e, "Failed to clear stale session");
            }
            None
        }
    }
}

/// Partial profile update for an existing patient.
pub fn update_profile(
    store: &LocalStore,
    patient_id: &Uuid,
    update: &PatientUpdate,
) -> Result<Patient, AuthError> {
    let patient = records::update_patient(store, patient_id, update)?;
    tracing::info!(patient_id = %patient.id, "Profile updated");
    Ok(patient)
}

// ─── Validation ───────────────────────────────────────────────────────────────

fn validate(request: &RegisterRequest) -> Result<(), AuthError> {
    let fail = |field: &'static str, reason: &'static str| {
        Err(AuthError::Validation { field, reason })
    };

    let first_name = request.first_name.trim();
    if first_name.is_empty() {
        return fail("first name", "required");
    }
    if first_name.chars().count() > NAME_MAX {
        return fail("first name", "must be at most 50 characters");
    }

    let last_name = request.last_name.trim();
    if last_name.is_empty() {
        return fail("last name", "required");
    }
    if last_name.chars().count() > NAME_MAX {
        return fail("last name", "must be at most 50 characters");
    }

    let email = request.email.trim();
    if email.chars().count() > EMAIL_MAX {
        return fail("email", "must be at most 100 characters");
    }
    let email_pattern = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    if !email_pattern.is_match(email) {
        return fail("email", "not a valid email address");
    }

    let password_len = request.password.chars().count();
    if password_len < PASSWORD_MIN {
        return fail("password", "must be at least 6 characters");
    }
    if password_len > PASSWORD_MAX {
        return fail("password", "must be at most 100 characters");
    }

    if let Some(phone) = &request.phone {
        if phone.chars().count() > PHONE_MAX {
            return fail("phone", "must be at most 20 characters");
        }
    }
    if let Some(address) = &request.address {
        if address.chars().count() > ADDRESS_MAX {
            return fail("address", "must be at most 200 characters");
        }
    }
    if let Some(emergency_contact) = &request.emergency_contact {
        if emergency_contact.chars().count() > EMERGENCY_CONTACT_MAX {
            return fail("emergency contact", "must be at most 100 characters");
        }
    }

    Ok(())
}

/// Trim an optional field; empty strings become `None`.
fn normalize_optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
