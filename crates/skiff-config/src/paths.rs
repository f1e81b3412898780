//! Session file path handling.
//!
//! Cookie, script, and style paths are user-configured strings like
//! `~/.skiff/cookies.txt`; they get expanded and created on demand with
//! owner-only permissions.

use std::path::{Path, PathBuf};

use skiff_common::ConfigError;

/// Expand a leading `~` to the user's home directory. Relative paths
/// are resolved against the current directory.
pub fn expand(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Expand a path, create its parent directory (0700) and the file
/// itself (0600) if absent, and return the absolute path.
pub fn prepare(path: &str) -> Result<PathBuf, ConfigError> {
    let expanded = expand(path);

    if let Some(parent) = expanded.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ValidationError(format!(
                "cannot create directory {}: {e}",
                parent.display()
            ))
        })?;
        set_mode(parent, 0o700);
    }

    if !expanded.exists() {
        std::fs::File::create(&expanded).map_err(|e| {
            ConfigError::ValidationError(format!("cannot create {}: {e}", expanded.display()))
        })?;
    }
    set_mode(&expanded, 0o600);

    Ok(expanded)
}

/// Root directory for per-client control directories.
pub fn runtime_dir() -> PathBuf {
    dirs::runtime_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("skiff")
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode));
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_path_passes_through() {
        assert_eq!(expand("/tmp/x"), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand("~/x"), home.join("x"));
            assert_eq!(expand("~"), home);
        }
    }

    #[test]
    fn prepare_creates_parent_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("cookies.txt");
        let prepared = prepare(target.to_str().unwrap()).unwrap();

        assert!(prepared.is_file());
        assert_eq!(prepared, target);
    }

    #[cfg(unix)]
    #[test]
    fn prepare_sets_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("cookies.txt");
        let prepared = prepare(target.to_str().unwrap()).unwrap();

        let mode = std::fs::metadata(&prepared).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn prepare_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("cookies.txt");
        std::fs::write(&target, "existing").unwrap();

        let prepared = prepare(target.to_str().unwrap()).unwrap();
        assert_eq!(std::fs::read_to_string(prepared).unwrap(), "existing");
    }
}
