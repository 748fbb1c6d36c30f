use crate::error::ConfigError;
use crate::fleet::DEFAULT_FLEET_SIZE;
use crate::map::MapWidget;
use crate::notifications::DEFAULT_NOTIFICATION_COUNT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "config/dashboard.json";
const MAX_NOTIFICATIONS: usize = 50;
const MAX_FLEET_SIZE: usize = 1_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub version: u32,
    pub title: String,
    pub fleet: FleetConfig,
    pub notifications: NotificationConfig,
    pub map: MapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// UAVs sampled per render.
    pub size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub count: usize,
    /// Name only UAVs from the displayed fleet instead of the fixed pool.
    pub follow_fleet: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub widget: MapWidget,
    pub zoom: u8,
    /// Offline tiles laid out as `{z}/{x}/{y}.png`.
    pub tiles_dir: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            version: 1,
            title: "Ground Control Station".to_string(),
            fleet: FleetConfig::default(),
            notifications: NotificationConfig::default(),
            map: MapConfig::default(),
        }
    }
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_FLEET_SIZE,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_NOTIFICATION_COUNT,
            follow_fleet: false,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            widget: MapWidget::default(),
            zoom: 15,
            tiles_dir: None,
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fleet.size == 0 || self.fleet.size > MAX_FLEET_SIZE {
            return Err(ConfigError::Invalid(format!(
                "fleet.size must be in 1..={MAX_FLEET_SIZE}, got {}",
                self.fleet.size
            )));
        }
        if self.notifications.count > MAX_NOTIFICATIONS {
            return Err(ConfigError::Invalid(format!(
                "notifications.count must be at most {MAX_NOTIFICATIONS}, got {}",
                self.notifications.count
            )));
        }
        if !(1..=19).contains(&self.map.zoom) {
            return Err(ConfigError::Invalid(format!(
                "map.zoom must be in 1..=19, got {}",
                self.map.zoom
            )));
        }
        Ok(())
    }
}

/// Resolves the config path: explicit argument, then `GCS_CONFIG_PATH`,
/// then the file shipped with the crate.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var("GCS_CONFIG_PATH") {
        return PathBuf::from(path);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_PATH)
}

pub fn load_config_from(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&raw).map_err(|e| match e {
        ConfigError::Parse { source, .. } => ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

pub fn parse_config(raw: &str) -> Result<DashboardConfig, ConfigError> {
    let cfg: DashboardConfig = serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
        path: PathBuf::new(),
        source,
    })?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_config(explicit: Option<&Path>) -> Result<DashboardConfig, ConfigError> {
    let path = config_path(explicit);
    tracing::debug!(path = %path.display(), "loading dashboard config");
    load_config_from(&path)
}
