// In crates/app-config/src/types.rs

use std::path::PathBuf;

use analytics::AnalyticsSettings;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Where the journal snapshot lives.
    pub journal: JournalSection,
    #[serde(default)]
    pub analytics: AnalyticsSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct JournalSection {
    /// Path to the exported journal JSON.
    pub path: PathBuf,
}
