//! Settings persistence for msgfaker CLI
//!
//! Stores the faker settings in ~/.config/msgfaker/settings.toml

use anyhow::{Context, Result};
use msgfaker::FakerSettings;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "msgfaker";
const SETTINGS_FILE: &str = "settings.toml";

/// Settings file location
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Get the default settings file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir.join(SETTINGS_FILE))
    }

    /// Use `path`, or the default location when `None`
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(p) => p,
            None => Self::default_path()?,
        };
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings from file, or defaults when the file does not exist
    pub fn load(&self) -> Result<FakerSettings> {
        if !self.path.exists() {
            return Ok(FakerSettings::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {:?}", self.path))?;

        toml::from_str(&content).with_context(|| "Failed to parse settings file")
    }

    /// Save settings to file
    pub fn save(&self, settings: &FakerSettings) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {:?}", dir))?;
        }

        let content = toml::to_string_pretty(settings).context("Failed to serialize settings")?;

        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write settings to {:?}", self.path))?;

        Ok(())
    }
}
