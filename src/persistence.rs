//! Settings persistence: save and load [`Settings`] as JSON files.

use std::path::Path;

use tracing::{debug, info};

use crate::config::Settings;
use crate::error::Result;

/// Serialize settings as pretty JSON.
pub fn settings_to_json(settings: &Settings) -> Result<String> {
    Ok(serde_json::to_string_pretty(settings)?)
}

/// Deserialize settings from JSON.
pub fn settings_from_json(json: &str) -> Result<Settings> {
    Ok(serde_json::from_str(json)?)
}

/// Save settings to a JSON file at the given path.
pub fn save_settings_to_path(settings: &Settings, path: &Path) -> Result<()> {
    let txt = settings_to_json(settings)?;
    std::fs::write(path, txt)?;
    debug!(path = %path.display(), "saved settings");
    Ok(())
}

/// Load settings from a JSON file at the given path.
pub fn load_settings_from_path(path: &Path) -> Result<Settings> {
    let txt = std::fs::read_to_string(path)?;
    settings_from_json(&txt)
}

/// Load settings, or write the defaults to `path` and return them if the file does not exist.
pub fn load_or_create(path: &Path) -> Result<Settings> {
    if path.exists() {
        return load_settings_from_path(path);
    }
    let settings = Settings::default();
    save_settings_to_path(&settings, path)?;
    info!(path = %path.display(), "created default settings");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_json_is_reported() {
        assert!(settings_from_json("{ not json").is_err());
    }
}
