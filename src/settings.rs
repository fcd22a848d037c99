use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::error::StudioError;
use crate::model::canvas::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::model::{Dimensions, TextureParams};
use crate::storage::{read_json, write_json};

const SETTINGS_VERSION: u32 = 1;

/// Studio state that survives restarts: the canvas size and the last
/// parameters used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
pub struct StudioSettings {
    pub version: u32,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub params: TextureParams,
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

impl Default for StudioSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            params: TextureParams::default(),
        }
    }
}

impl StudioSettings {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// Read settings from the config directory. `Ok(None)` if no settings file
/// exists; an error if it is unreadable or written by a newer version.
pub fn read_settings(config_dir: &Path) -> Result<Option<StudioSettings>, StudioError> {
    let path = crate::paths::settings_path(config_dir);
    if !path.exists() {
        return Ok(None);
    }
    let settings: StudioSettings = read_json(&path)?;
    if settings.version > SETTINGS_VERSION {
        return Err(StudioError::InvalidSettings {
            message: format!(
                "Settings version {} is newer than supported version {}",
                settings.version, SETTINGS_VERSION
            ),
        });
    }
    Ok(Some(settings))
}

/// Load settings from the config directory. Returns None if no settings file
/// exists or it cannot be used.
pub fn load_settings(config_dir: &Path) -> Option<StudioSettings> {
    match read_settings(config_dir) {
        Ok(settings) => settings,
        Err(e) => {
            warn!(error = %e, dir = %config_dir.display(), "ignoring settings file");
            None
        }
    }
}

/// Save settings to the config directory.
pub fn save_settings(config_dir: &Path, settings: &StudioSettings) -> Result<(), StudioError> {
    std::fs::create_dir_all(config_dir)?;
    write_json(&crate::paths::settings_path(config_dir), settings)
}
