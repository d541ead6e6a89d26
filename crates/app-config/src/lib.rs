// In crates/app-config/src/lib.rs

use std::path::Path;

use config::{Config, Environment, File};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, JournalSection, Settings};

/// Loads the application settings from the `config/` directory.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(Path::new("config"))
}

/// Layered loading rooted at `dir`:
/// 1. `base.toml`
/// 2. the environment file named by `APP_ENVIRONMENT` (e.g. `development.toml`), if present
/// 3. environment variables such as `APP_JOURNAL__PATH=...`
pub fn load_settings_from(dir: &Path) -> Result<Settings> {
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = Config::builder()
        .add_source(File::from(dir.join("base")))
        .add_source(File::from(dir.join(&environment)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Parses a single TOML document, bypassing the layered sources.
pub fn load_settings_from_str(content: &str) -> Result<Settings> {
    Ok(toml::from_str(content)?)
}

/// Reads and parses one settings file.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)?;
    load_settings_from_str(&content)
}
