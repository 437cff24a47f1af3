//! Record document path resolution.

use std::path::{Path, PathBuf};

/// Environment variable for overriding the record document location.
pub const DATA_ENV_VAR: &str = "COMPASS_DATA";

/// Record document looked up in the working directory when nothing else is set.
pub const DEFAULT_DATA_FILE: &str = "app-data.json";

/// Get the record document path.
///
/// Resolution order:
/// 1. explicit path (the `--data` flag)
/// 2. `COMPASS_DATA` environment variable
/// 3. `app-data.json` relative to the working directory
pub fn resolve_data_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match std::env::var(DATA_ENV_VAR) {
        Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_DATA_FILE),
    }
}
