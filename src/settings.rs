//! Game settings with persistence
//!
//! Settings are saved to `~/.config/dungeon-legends/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context};

use legends_ecs::RegistryConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All game settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub registry: RegistryConfig,
    pub demo: DemoSettings,
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dungeon-legends"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Parse settings from TOML text. Missing tables and keys take defaults,
    /// present values must pass [`DemoSettings::validate`].
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.demo.validate()?;
        Ok(settings)
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Load settings from disk, or return defaults if missing or invalid
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        Self::read(&path)
            .inspect(|_| info!("Loaded settings from {:?}", path))
            .unwrap_or_else(|e| {
                warn!("{:#}, using defaults", e);
                Self::default()
            })
    }

    /// Whether a settings file exists on disk
    pub fn file_exists() -> bool {
        Self::settings_path().is_some_and(|p| p.exists())
    }

    /// Save settings to disk, creating the config directory if needed
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::settings_path().context("Could not determine config directory")?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Headless demo settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Frames to run before stopping
    pub frames: u32,
    /// Number of moveable entities spawned at startup
    pub crowd_size: u32,
    /// Riders attached to each moveable entity
    pub riders_per_mount: u32,
    /// Entities leaving the square [-extent, extent] are despawned
    pub world_half_extent: f32,
    /// Maximum speed per axis, in units per second
    pub max_speed: f32,
    /// Fixed frame time in seconds
    pub time_step: f32,
    /// RNG seed for spawn positions and velocities
    pub seed: u64,
}

impl DemoSettings {
    /// Reject values the scene cannot sample from or step with.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.world_half_extent.is_finite() && self.world_half_extent > 0.0,
            "demo.world_half_extent must be a positive number, got {}",
            self.world_half_extent
        );
        ensure!(
            self.max_speed.is_finite() && self.max_speed >= 0.0,
            "demo.max_speed must be a non-negative number, got {}",
            self.max_speed
        );
        ensure!(
            self.time_step.is_finite() && self.time_step > 0.0,
            "demo.time_step must be a positive number, got {}",
            self.time_step
        );
        Ok(())
    }
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            frames: 600,
            crowd_size: 64,
            riders_per_mount: 1,
            world_half_extent: 100.0,
            max_speed: 20.0,
            time_step: 1.0 / 60.0,
            seed: 7,
        }
    }
}
