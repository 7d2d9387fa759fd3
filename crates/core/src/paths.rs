//! Centralized path functions for all app storage locations.

use std::path::PathBuf;

const APP_DIR: &str = "jobtrack";

/// App config root: `~/.config/jobtrack/` (Linux) or `~/Library/Application Support/jobtrack/` (macOS).
pub fn app_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR))
}

/// Settings file: `<app_config_dir>/settings.json`.
pub fn settings_path() -> Option<PathBuf> {
    app_config_dir().map(|d| d.join("settings.json"))
}

/// App data root: `~/.local/share/jobtrack/` (Linux).
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(APP_DIR))
}

/// Record file: `<app_data_dir>/vacancies.json`.
pub fn records_path() -> Option<PathBuf> {
    app_data_dir().map(|d| d.join("vacancies.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_path() {
        let path = settings_path().unwrap();
        assert!(path.to_string_lossy().contains("jobtrack"));
        assert!(path.to_string_lossy().ends_with("settings.json"));
    }

    #[test]
    fn test_records_path() {
        let path = records_path().unwrap();
        assert!(path.to_string_lossy().ends_with("vacancies.json"));
    }
}
