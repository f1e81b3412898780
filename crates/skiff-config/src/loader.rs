//! TOML config file loading.

use std::path::{Path, PathBuf};

use skiff_common::ConfigError;
use tracing::info;

use crate::settings::Settings;

/// Load settings from a specific TOML file path.
///
/// Missing fields take their defaults via serde.
pub fn load_from_path(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let settings: Settings = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    info!("loaded config from {}", path.display());
    Ok(settings)
}

/// Load settings from the platform default path, or defaults when no
/// config file exists.
pub fn load_default() -> Result<Settings, ConfigError> {
    let path = default_config_path()?;
    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => Ok(Settings::default()),
        other => other,
    }
}

/// Platform-specific default config file path
/// (`~/.config/skiff/config.toml` on Linux).
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("skiff").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(matches!(
            load_from_path(&path),
            Err(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "load_images = false\nzoom_level = 1.5\n").unwrap();

        let settings = load_from_path(&path).unwrap();
        assert!(!settings.load_images);
        assert_eq!(settings.zoom_level, 1.5);
        // untouched fields keep defaults
        assert!(settings.enable_javascript);
        assert_eq!(settings.cookie_policies, "@aA");
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "load_images = {{").unwrap();

        assert!(matches!(
            load_from_path(&path),
            Err(ConfigError::ParseError(_))
        ));
    }
}
