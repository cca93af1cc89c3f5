//! Appointment list, status filtering, and cancellation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Appointment, AppointmentStatus};
use crate::store::{records, LocalStore, StoreError};

/// Status filter for the appointment list: everything, or one status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Status(AppointmentStatus),
}

impl FromStr for StatusFilter {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            other => AppointmentStatus::from_str(other).map(Self::Status),
        }
    }
}

/// Per-status totals for filter chips and dashboard stat cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub scheduled: u32,
    pub completed: u32,
    pub cancelled: u32,
}

impl StatusCounts {
    pub fn total(&self) -> u32 {
        self.scheduled + self.completed + self.cancelled
    }
}

/// All appointments owned by the patient, most recent date first.
pub fn list_for_patient(store: &LocalStore, patient_id: &Uuid) -> Vec<Appointment> {
    records::patient_appointments(store, patient_id)
}

/// Transition an appointment to `cancelled`, regardless of its current
/// status or date. Idempotent; `NotFound` for an unknown id.
pub fn cancel(store: &LocalStore, appointment_id: &Uuid) -> Result<(), StoreError> {
    records::set_appointment_status(store, appointment_id, AppointmentStatus::Cancelled)?;
    tracing::info!(appointment_id = %appointment_id, "Appointment cancelled");
    Ok(())
}

/// Pure filter; the input is not mutated.
pub fn filter_by_status(appointments: &[Appointment], filter: &StatusFilter) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|a| match filter {
            StatusFilter::All => true,
            StatusFilter::Status(status) => a.status == *status,
        })
        .cloned()
        .collect()
}

pub fn status_counts(appointments: &[Appointment]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for appointment in appointments {
        match appointment.status {
            AppointmentStatus::Scheduled => counts.scheduled += 1,
            AppointmentStatus::Completed => counts.completed += 1,
            AppointmentStatus::Cancelled => counts.cancelled += 1,
        }
    }
    counts
}
