use crate::config::DashboardConfig;
use std::path::PathBuf;

/// Read-only server state. Every render samples its own fleet, so nothing
/// here changes after startup.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: DashboardConfig,

    /// Offline tile directory, set only if it exists and holds tiles.
    pub tiles_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(config: DashboardConfig, tiles_dir: Option<PathBuf>) -> Self {
        Self { config, tiles_dir }
    }

    pub fn tiles_local(&self) -> bool {
        self.tiles_dir.is_some()
    }
}
