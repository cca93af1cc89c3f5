//! Dashboard summary — single fetch for the dashboard screen.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::appointments::{self, StatusCounts};
use crate::models::{Appointment, AppointmentStatus, Session};
use crate::store::LocalStore;

/// How many upcoming appointments the dashboard shows.
pub const UPCOMING_LIMIT: usize = 3;

/// Dashboard data for one patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub counts: StatusCounts,
    /// Scheduled appointments dated today or later, soonest first,
    /// capped at [`UPCOMING_LIMIT`].
    pub upcoming: Vec<Appointment>,
}

pub fn dashboard_data(store: &LocalStore, session: &Session, today: NaiveDate) -> DashboardData {
    let appointments = appointments::list_for_patient(store, &session.patient_id);
    let counts = appointments::status_counts(&appointments);

    let mut upcoming: Vec<Appointment> = appointments
        .into_iter()
        .filter(|a| a.status == AppointmentStatus::Scheduled && a.date >= today)
        .collect();
    upcoming.sort_by(|a, b| (a.date, a.time).cmp(&(b.date, b.time)));
    upcoming.truncate(UPCOMING_LIMIT);

    DashboardData { counts, upcoming }
}
