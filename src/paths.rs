//! Leaf filenames and path-building functions for everything the studio
//! writes to disk. No other module should hard-code these strings.
//!
//! Functions accept `&Path` so they work for any config directory the caller
//! picks.

use std::path::{Path, PathBuf};

// ── Application identity ─────────────────────────────────────────

pub const APP_ID: &str = "texture-studio";

// ── Leaf filenames ───────────────────────────────────────────────

pub const SETTINGS_FILE: &str = "settings.json";

// ── Config-dir functions ─────────────────────────────────────────

pub fn settings_path(config_dir: &Path) -> PathBuf {
    config_dir.join(SETTINGS_FILE)
}

/// Per-user config directory: `<platform config dir>/texture-studio`.
pub fn default_config_dir() -> PathBuf {
    let base = if cfg!(target_os = "windows") {
        std::env::var("APPDATA")
            .map_or_else(|_| PathBuf::from("C:\\Users\\Default\\AppData\\Roaming"), PathBuf::from)
    } else if cfg!(target_os = "macos") {
        home_dir().join("Library/Application Support")
    } else {
        std::env::var("XDG_CONFIG_HOME").map_or_else(|_| home_dir().join(".config"), PathBuf::from)
    };
    base.join(APP_ID)
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_or_else(|_| PathBuf::from("."), PathBuf::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn settings_live_in_config_dir() {
        let dir = Path::new("/tmp/studio");
        assert_eq!(settings_path(dir), PathBuf::from("/tmp/studio/settings.json"));
    }

    #[test]
    fn default_dir_ends_with_app_id() {
        assert!(default_config_dir().ends_with(APP_ID));
    }
}
