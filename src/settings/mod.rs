mod models;

use std::{fs, path::Path, sync::OnceLock};

pub use models::{PropertiesKeys, Settings};

/// Environment variable that may carry the whole settings JSON.
pub const SETTINGS_ENV: &str = "WEBHOST_BROWSER_SETTINGS";

/// Single, module-private cache (set exactly once).
static CACHE: OnceLock<Settings> = OnceLock::new();

// ---- Loading (does not touch the cache) ----

/// Parse settings from a JSON file path.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<Settings, SettingsError> {
    let data = fs::read_to_string(path).map_err(SettingsError::Io)?;
    load_from_json_str(&data)
}

/// Parse settings from a JSON string.
pub fn load_from_json_str(json: &str) -> Result<Settings, SettingsError> {
    let parsed: Settings = serde_json::from_str(json).map_err(SettingsError::Json)?;
    let root = parsed.root_url().to_string();
    Ok(parsed.with_root_url(&root))
}

/// Parse settings from an env var containing JSON.
pub fn load_from_env(var: &str) -> Result<Settings, SettingsError> {
    let s = std::env::var(var).map_err(|_| SettingsError::MissingEnv(var.to_string()))?;
    load_from_json_str(&s)
}

// ---- Cache ----

/// Seal the process-wide settings.
pub fn install(settings: Settings) -> Result<&'static Settings, SettingsError> {
    CACHE.set(settings).map_err(|_| SettingsError::AlreadyInitialized)?;
    get()
}

/// Borrow the installed settings.
pub fn get() -> Result<&'static Settings, SettingsError> {
    CACHE.get().ok_or(SettingsError::NotInitialized)
}

/// ---- Errors ----
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("settings are not initialized")]
    NotInitialized,
    #[error("settings already initialized")]
    AlreadyInitialized,
    #[error("missing env var: {0}")]
    MissingEnv(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
