//! MediCare — patient-facing appointment booking core.
//!
//! Local-first behavioral layer for an appointment booking app:
//! patient registration and login, a persisted single session, a
//! booking workflow with global slot exclusivity, and appointment
//! listing/filtering/cancellation. State lives in three JSON entries
//! (`patients`, `appointments`, `session`) under the user's data
//! directory; there is no server and no network protocol.

pub mod appointments;
pub mod auth;
pub mod booking;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod store;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for an embedding application.
///
/// `RUST_LOG` overrides the crate default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
