use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "MediCare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the application data directory
/// ~/MediCare/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("MediCare")
}

/// Get the records directory (persisted JSON collections)
pub fn records_dir() -> PathBuf {
    app_data_dir().join("records")
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "info,medicare=debug"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("MediCare"));
    }

    #[test]
    fn records_dir_under_app_data() {
        let records = records_dir();
        let app = app_data_dir();
        assert!(records.starts_with(app));
        assert!(records.ends_with("records"));
    }

    #[test]
    fn app_name_is_medicare() {
        assert_eq!(APP_NAME, "MediCare");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
