//! Booking workflow — slot grid, conflict checking, appointment creation.
//!
//! Slot exclusivity is global: a (date, time) pair may carry at most one
//! non-cancelled appointment across the whole system, independent of
//! department or doctor. The conflict check is re-run at submission
//! time to guard against a stale slot list on the caller's side; with a
//! single writer that closes the window, with concurrent writers a
//! TOCTOU race remains (last writer wins).

use chrono::{Months, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{find_department, Appointment, AppointmentStatus, Session};
use crate::store::{records, LocalStore, StoreError};

// ─── Grid parameters ──────────────────────────────────────────────────────────

pub const DAY_START_HOUR: u32 = 9;
pub const DAY_END_HOUR: u32 = 17;
pub const SLOT_MINUTES: u32 = 30;
/// Bookings are accepted up to three months out.
pub const BOOKING_WINDOW_MONTHS: u32 = 3;
pub const NOTES_MAX: usize = 500;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("No active session; log in to book an appointment")]
    Unauthenticated,

    #[error("Validation failed: {0}")]
    Validation(&'static str),

    #[error("This time slot is already booked")]
    SlotConflict,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A proposed appointment, as collected by the booking form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub department: String,
    pub date: NaiveDate,
    #[serde(with = "crate::models::appointment::hhmm")]
    pub time: NaiveTime,
    pub notes: Option<String>,
}

/// One grid slot annotated with availability for a given date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(with = "crate::models::appointment::hhmm")]
    pub time: NaiveTime,
    pub available: bool,
}

// ─── Slot grid ────────────────────────────────────────────────────────────────

/// Fixed half-hour grid from 09:00 to 17:00 inclusive (17 slots/day),
/// independent of department or doctor.
pub fn time_slots() -> Vec<NaiveTime> {
    let mut slots = Vec::new();
    for hour in DAY_START_HOUR..=DAY_END_HOUR {
        for minute in (0..60).step_by(SLOT_MINUTES as usize) {
            if hour == DAY_END_HOUR && minute > 0 {
                break;
            }
            slots.push(NaiveTime::from_hms_opt(hour, minute, 0).unwrap());
        }
    }
    slots
}

/// True iff a non-cancelled appointment already occupies the slot.
pub fn is_slot_taken(store: &LocalStore, date: NaiveDate, time: NaiveTime) -> bool {
    records::list_appointments(store)
        .iter()
        .any(|a| a.date == date && a.time == time && a.status != AppointmentStatus::Cancelled)
}

/// The day's grid annotated with availability, for rendering a slot picker.
pub fn slot_availability(store: &LocalStore, date: NaiveDate) -> Vec<TimeSlot> {
    let taken: Vec<NaiveTime> = records::list_appointments(store)
        .iter()
        .filter(|a| a.date == date && a.status != AppointmentStatus::Cancelled)
        .map(|a| a.time)
        .collect();

    time_slots()
        .into_iter()
        .map(|time| TimeSlot {
            available: !taken.contains(&time),
            time,
        })
        .collect()
}

/// Accepted booking dates: [today, today + 3 months].
pub fn booking_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let max = today
        .checked_add_months(Months::new(BOOKING_WINDOW_MONTHS))
        .unwrap_or(today);
    (today, max)
}

// ─── Booking ──────────────────────────────────────────────────────────────────

/// Validate and persist a new appointment for the session's patient.
///
/// The appointment is created in `scheduled` state with a fresh id and
/// timestamp. The department must come from the static catalog, the
/// date must fall inside the booking window, and the time must lie on
/// the half-hour grid.
pub fn book_appointment(
    store: &LocalStore,
    session: Option<&Session>,
    request: &BookingRequest,
) -> Result<Appointment, BookingError> {
    let session = session.ok_or(BookingError::Unauthenticated)?;
    validate(request, chrono::Local::now().date_naive())?;

    if is_slot_taken(store, request.date, request.time) {
        return Err(BookingError::SlotConflict);
    }

    let appointment = Appointment {
        id: Uuid::new_v4(),
        patient_id: session.patient_id,
        department: request.department.clone(),
        date: request.date,
        time: request.time,
        status: AppointmentStatus::Scheduled,
        doctor: None,
        notes: request
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from),
        created_at: chrono::Local::now().naive_local(),
    };
    records::append_appointment(store, &appointment)?;

    tracing::info!(
        appointment_id = %appointment.id,
        date = %appointment.date,
        department = %appointment.department,
        "Appointment booked"
    );
    Ok(appointment)
}

fn validate(request: &BookingRequest, today: NaiveDate) -> Result<(), BookingError> {
    if request.department.trim().is_empty() {
        return Err(BookingError::Validation("department is required"));
    }
    if find_department(&request.department).is_none() {
        return Err(BookingError::Validation("unknown department"));
    }

    let (min, max) = booking_window(today);
    if request.date < min || request.date > max {
        return Err(BookingError::Validation("date outside the booking window"));
    }

    if !time_slots().contains(&request.time) {
        return Err(BookingError::Validation("time is not a bookable slot"));
    }

    if let Some(notes) = &request.notes {
        if notes.chars().count() > NOTES_MAX {
            return Err(BookingError::Validation("notes must be at most 500 characters"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Days;

    use super::*;
    use crate::appointments;
    use crate::auth::{self, RegisterRequest};

    fn test_store() -> (tempfile::TempDir, LocalStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::open(tmp.path()).unwrap();
        (tmp, store)
    }

    fn register_and_login(store: &LocalStore, email: &str) -> Session {
        auth::register(
            store,
            &RegisterRequest {
                email: email.into(),
                password: "secret1".into(),
                first_name: "Ana".into(),
                last_name: "Moreau".into(),
                date_of_birth: chrono::NaiveDate::from_ymd_opt(1987, 4, 12).unwrap(),
                phone: None,
                address: None,
                emergency_contact: None,
            },
        )
        .unwrap();
        auth::login(store, email, "secret1").unwrap()
    }

    fn next_week() -> NaiveDate {
        chrono::Local::now().date_naive() + Days::new(7)
    }

    fn slot(time: &str) -> NaiveTime {
        NaiveTime::parse_from_str(time, "%H:%M").unwrap()
    }

    fn make_request(date: NaiveDate, time: &str) -> BookingRequest {
        BookingRequest {
            department: "cardiology".into(),
            date,
            time: slot(time),
            notes: None,
        }
    }

    #[test]
    fn grid_has_seventeen_half_hour_slots() {
        let slots = time_slots();
        assert_eq!(slots.len(), 17);
        assert_eq!(slots[0], slot("09:00"));
        assert_eq!(slots[1], slot("09:30"));
        assert_eq!(*slots.last().unwrap(), slot("17:00"));
    }

    #[test]
    fn booking_window_spans_three_months() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let (min, max) = booking_window(today);
        assert_eq!(min, today);
        assert_eq!(max, NaiveDate::from_ymd_opt(2026, 4, 15).unwrap());
    }

    #[test]
    fn booking_requires_session() {
        let (_tmp, store) = test_store();
        let err = book_appointment(&store, None, &make_request(next_week(), "09:00")).unwrap_err();
        assert!(matches!(err, BookingError::Unauthenticated));
    }

    #[test]
    fn booking_rejects_unknown_department() {
        let (_tmp, store) = test_store();
        let session = register_and_login(&store, "ana@example.com");

        let mut request = make_request(next_week(), "09:00");
        request.department = "radiology".into();
        let err = book_appointment(&store, Some(&session), &request).unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));

        request.department = "  ".into();
        let err = book_appointment(&store, Some(&session), &request).unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[test]
    fn booking_rejects_out_of_window_dates() {
        let (_tmp, store) = test_store();
        let session = register_and_login(&store, "ana@example.com");
        let today = chrono::Local::now().date_naive();

        let yesterday = today - Days::new(1);
        let err =
            book_appointment(&store, Some(&session), &make_request(yesterday, "09:00"))
                .unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));

        let past_window = booking_window(today).1 + Days::new(1);
        let err =
            book_appointment(&store, Some(&session), &make_request(past_window, "09:00"))
                .unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[test]
    fn booking_rejects_off_grid_times() {
        let (_tmp, store) = test_store();
        let session = register_and_login(&store, "ana@example.com");

        for time in ["09:15", "08:30", "17:30"] {
            let err = book_appointment(&store, Some(&session), &make_request(next_week(), time))
                .unwrap_err();
            assert!(matches!(err, BookingError::Validation(_)), "time {time}");
        }
    }

    #[test]
    fn booking_rejects_oversized_notes() {
        let (_tmp, store) = test_store();
        let session = register_and_login(&store, "ana@example.com");

        let mut request = make_request(next_week(), "09:00");
        request.notes = Some("x".repeat(NOTES_MAX + 1));
        let err = book_appointment(&store, Some(&session), &request).unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[test]
    fn booking_trims_notes_and_drops_empty_ones() {
        let (_tmp, store) = test_store();
        let session = register_and_login(&store, "ana@example.com");

        let mut request = make_request(next_week(), "09:00");
        request.notes = Some("  chest pain after exercise  ".into());
        let appointment = book_appointment(&store, Some(&session), &request).unwrap();
        assert_eq!(appointment.notes.as_deref(), Some("chest pain after exercise"));

        request.time = slot("09:30");
        request.notes = Some("   ".into());
        let appointment = book_appointment(&store, Some(&session), &request).unwrap();
        assert!(appointment.notes.is_none());
    }

    #[test]
    fn slot_taken_until_cancelled() {
        let (_tmp, store) = test_store();
        let session = register_and_login(&store, "ana@example.com");
        let date = next_week();

        assert!(!is_slot_taken(&store, date, slot("10:00")));
        let appointment =
            book_appointment(&store, Some(&session), &make_request(date, "10:00")).unwrap();
        assert!(is_slot_taken(&store, date, slot("10:00")));

        appointments::cancel(&store, &appointment.id).unwrap();
        assert!(!is_slot_taken(&store, date, slot("10:00")));
    }

    #[test]
    fn slot_conflict_is_global_across_patients() {
        let (_tmp, store) = test_store();
        let ana = register_and_login(&store, "ana@example.com");
        book_appointment(&store, Some(&ana), &make_request(next_week(), "11:00")).unwrap();

        let luc = register_and_login(&store, "luc@example.com");
        let mut request = make_request(next_week(), "11:00");
        request.department = "general".into();
        let err = book_appointment(&store, Some(&luc), &request).unwrap_err();
        assert!(matches!(err, BookingError::SlotConflict));
    }

    #[test]
    fn slot_availability_marks_taken_slots() {
        let (_tmp, store) = test_store();
        let session = register_and_login(&store, "ana@example.com");
        let date = next_week();

        book_appointment(&store, Some(&session), &make_request(date, "09:30")).unwrap();

        let grid = slot_availability(&store, date);
        assert_eq!(grid.len(), 17);
        for entry in &grid {
            if entry.time == slot("09:30") {
                assert!(!entry.available);
            } else {
                assert!(entry.available, "slot {} should be free", entry.time);
            }
        }

        // A different date is unaffected.
        let other = slot_availability(&store, date + Days::new(1));
        assert!(other.iter().all(|s| s.available));
    }

    #[test]
    fn booking_lifecycle_end_to_end() {
        let (_tmp, store) = test_store();

        // Register, then fail login with the wrong password.
        auth::register(
            &store,
            &RegisterRequest {
                email: "a@x.com".into(),
                password: "secret1".into(),
                first_name: "Ana".into(),
                last_name: "Moreau".into(),
                date_of_birth: chrono::NaiveDate::from_ymd_opt(1987, 4, 12).unwrap(),
                phone: None,
                address: None,
                emergency_contact: None,
            },
        )
        .unwrap();
        assert!(matches!(
            auth::login(&store, "a@x.com", "wrong").unwrap_err(),
            auth::AuthError::InvalidCredentials
        ));
        let session = auth::login(&store, "a@x.com", "secret1").unwrap();

        // Book cardiology at 09:00.
        let date = next_week();
        let appointment =
            book_appointment(&store, Some(&session), &make_request(date, "09:00")).unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);

        // Any patient rebooking the same slot conflicts.
        let other = register_and_login(&store, "b@x.com");
        assert!(matches!(
            book_appointment(&store, Some(&other), &make_request(date, "09:00")).unwrap_err(),
            BookingError::SlotConflict
        ));

        // Cancelling frees the slot.
        appointments::cancel(&store, &appointment.id).unwrap();
        let rebooked =
            book_appointment(&store, Some(&other), &make_request(date, "09:00")).unwrap();
        assert_eq!(rebooked.status, AppointmentStatus::Scheduled);
        assert_eq!(rebooked.patient_id, other.patient_id);
    }
}
