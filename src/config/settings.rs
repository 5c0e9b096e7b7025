use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Where and how the boxer store is opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub max_connections: u32,
    /// Create the database file (and its directory) when absent.
    pub create_if_missing: bool,
    /// Apply the embedded schema migrations on open.
    pub run_migrations: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: Settings::data_dir().join("boxing.db"),
            max_connections: 5,
            create_if_missing: true,
            run_migrations: true,
        }
    }
}

impl StoreConfig {
    /// Defaults, pointed at a specific database file.
    pub fn at(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }
}

/// Application settings, loaded from settings.ron.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreConfig,
    /// Port for the hello-world HTTP service.
    pub http_port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            http_port: 5000,
        }
    }
}

impl Settings {
    /// Get the data directory for settings and the default database.
    pub fn data_dir() -> PathBuf {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("boxing_ring")
    }

    /// Path to the settings file.
    pub fn file_path() -> PathBuf {
        Self::data_dir().join("settings.ron")
    }

    /// Load from the default location, writing defaults there if nothing exists yet.
    pub fn load_or_default() -> Self {
        let path = Self::file_path();
        if path.exists() {
            return Self::load_from(&path);
        }
        let settings = Self::default();
        settings.save_to(&path);
        settings
    }

    /// Load from `path`, falling back to defaults if it can't be read or parsed.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse {:?}: {e}, using defaults", path);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {:?}: {e}, using defaults", path);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("Failed to create {:?}: {e}", parent);
            }
        }
        let pretty = ron::ser::PrettyConfig::default();
        match ron::ser::to_string_pretty(self, pretty) {
            Ok(s) => {
                if let Err(e) = std::fs::write(path, s) {
                    warn!("Failed to write {:?}: {e}", path);
                }
            }
            Err(e) => {
                warn!("Failed to serialize settings: {e}");
            }
        }
    }
}
