//! Host session backed by a snapshot file
//!
//! Hydrates an in-memory Discord client from JSON, loads the plugin into
//! it, and writes the stores back on request.

use anyhow::{Context, Result};
use msgfaker::{ConsoleApi, ConsoleRegistry, CONSOLE_NAME};
use msgfaker_integration_discord::{DiscordStore, HostSnapshot, MessageFakerPlugin};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Read a host snapshot
pub fn load_snapshot(path: &Path) -> Result<HostSnapshot> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read host snapshot from {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse host snapshot {:?}", path))
}

/// Write a host snapshot
pub fn save_snapshot(path: &Path, snapshot: &HostSnapshot) -> Result<()> {
    let content =
        serde_json::to_string_pretty(snapshot).context("Failed to serialize host snapshot")?;
    fs::write(path, content).with_context(|| format!("Failed to write host snapshot to {:?}", path))
}

/// Plugin loaded into a snapshot-backed client
pub struct HostSession {
    path: PathBuf,
    plugin: MessageFakerPlugin,
    registry: ConsoleRegistry,
}

impl HostSession {
    pub fn open(path: &Path) -> Result<Self> {
        let snapshot = load_snapshot(path)?;
        let store = Arc::new(DiscordStore::from_snapshot(snapshot));
        let plugin = MessageFakerPlugin::new(store);
        let registry = ConsoleRegistry::new();
        plugin.on_load(&registry)?;

        Ok(Self {
            path: path.to_path_buf(),
            plugin,
            registry,
        })
    }

    pub fn plugin(&self) -> &MessageFakerPlugin {
        &self.plugin
    }

    pub fn console(&self) -> Result<Arc<dyn ConsoleApi>> {
        self.registry
            .get(CONSOLE_NAME)
            .context("Console surface is not installed")
    }

    /// Write the store contents back to the snapshot file
    pub fn persist(&self) -> Result<()> {
        let snapshot = self.plugin.store().snapshot()?;
        save_snapshot(&self.path, &snapshot)
    }

    pub fn close(self) {
        self.plugin.on_unload(&self.registry);
    }
}
