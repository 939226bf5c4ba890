use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

const APP_NAME: &str = "jdig";

/// Get the application data directory for storing snapshots
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

/// Get the root directory under which version-scoped snapshots live.
/// Version subdirectories are created lazily on first save.
pub fn get_snapshot_root() -> Result<PathBuf> {
    Ok(get_app_data_dir()?.join("snapshots"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_root_under_app_dir() {
        let root = get_snapshot_root().unwrap();
        assert!(root.ends_with("snapshots"));
        assert!(root.to_string_lossy().contains(APP_NAME));
    }
}
