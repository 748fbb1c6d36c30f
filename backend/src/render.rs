use crate::commands::acknowledge;
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::fleet::{ALTITUDE_RANGE_M, Fleet, SPEED_RANGE_MPS, sample_fleet};
use crate::map::{LOCAL_TILE_URL, MapView, OSM_TILE_URL};
use crate::notifications::{NOTIFICATION_UAV_POOL, sample_notifications};
use rand::RngExt;
use uav_gcs_shared::{CommandAck, GcsCommand, UavRecord};

/// Altitude shown as a proportion of a fixed ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltitudeBar {
    pub altitude_m: f64,
    pub max_m: f64,
}

impl AltitudeBar {
    pub fn new(altitude_m: f64) -> Self {
        Self {
            altitude_m,
            max_m: ALTITUDE_RANGE_M.end,
        }
    }

    /// Proportion of the ceiling, clamped to `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        let raw = self.altitude_m / self.max_m;
        if !(0.0..=1.0).contains(&raw) {
            tracing::warn!(
                altitude_m = self.altitude_m,
                max_m = self.max_m,
                "altitude outside fill-bar range, clamping"
            );
        }
        if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) }
    }

    /// Bar width in whole percent (truncated).
    pub fn fill_percent(&self) -> u8 {
        (self.fraction() * 100.0) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedBand {
    Low,
    Medium,
    High,
}

impl SpeedBand {
    pub const ALL: [SpeedBand; 3] = [SpeedBand::Low, SpeedBand::Medium, SpeedBand::High];

    pub fn color(&self) -> &'static str {
        match self {
            SpeedBand::Low => "green",
            SpeedBand::Medium => "yellow",
            SpeedBand::High => "red",
        }
    }

    /// Span of the band on the gauge scale.
    pub fn range(&self) -> (f64, f64) {
        match self {
            SpeedBand::Low => (0.0, 5.0),
            SpeedBand::Medium => (5.0, 10.0),
            SpeedBand::High => (10.0, 15.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedBand::Low => "low",
            SpeedBand::Medium => "medium",
            SpeedBand::High => "high",
        }
    }
}

/// Speed against a fixed `[0, 15]` m/s scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedGauge {
    pub speed_mps: f64,
    pub max_mps: f64,
}

impl SpeedGauge {
    pub fn new(speed_mps: f64) -> Self {
        Self {
            speed_mps,
            max_mps: SPEED_RANGE_MPS.end,
        }
    }

    pub fn band(&self) -> SpeedBand {
        if self.speed_mps < 5.0 {
            SpeedBand::Low
        } else if self.speed_mps < 10.0 {
            SpeedBand::Medium
        } else {
            SpeedBand::High
        }
    }

    /// Needle position on the scale, pinned to `[0, max]`.
    pub fn needle(&self) -> f64 {
        if self.speed_mps.is_nan() {
            return 0.0;
        }
        self.speed_mps.clamp(0.0, self.max_mps)
    }
}

/// Everything the page needs for one render.
#[derive(Debug, Clone)]
pub struct PageView {
    pub title: String,
    pub timestamp: String,
    pub fleet_ids: Vec<String>,
    pub selected: UavRecord,
    pub altitude: AltitudeBar,
    pub speed: SpeedGauge,
    pub map: MapView,
    pub notifications: Vec<String>,
    pub commands: Vec<GcsCommand>,
    pub selected_command: GcsCommand,
    pub ack: Option<CommandAck>,
}

/// Operator input for one render.
#[derive(Debug, Clone, Default)]
pub struct Selection<'a> {
    pub uav: Option<&'a str>,
    pub command: Option<GcsCommand>,
    pub execute: bool,
}

/// Picks the record to display. No selection means the first record.
pub fn select<'f>(fleet: &'f Fleet, uav: Option<&str>) -> Result<&'f UavRecord, DashboardError> {
    match uav {
        Some(id) => fleet.find(id),
        None => fleet.first().ok_or(DashboardError::EmptyFleet),
    }
}

/// Samples a fresh fleet and notifications and assembles the page.
pub fn build_page<R: RngExt>(
    rng: &mut R,
    cfg: &DashboardConfig,
    tiles_local: bool,
    selection: &Selection<'_>,
    timestamp: String,
) -> Result<PageView, DashboardError> {
    let fleet = sample_fleet(rng, cfg.fleet.size);
    let selected = select(&fleet, selection.uav)?.clone();

    let pool = if cfg.notifications.follow_fleet {
        fleet.len()
    } else {
        NOTIFICATION_UAV_POOL
    };
    let notifications = sample_notifications(rng, cfg.notifications.count, pool);

    let selected_command = selection.command.unwrap_or(GcsCommand::ALL[0]);
    let ack = selection
        .execute
        .then(|| acknowledge(selected_command, &selected.id));

    let map = MapView {
        widget: cfg.map.widget,
        latitude: selected.latitude,
        longitude: selected.longitude,
        zoom: cfg.map.zoom,
        marker_label: format!("{} Location", selected.id),
        tile_url: if tiles_local { LOCAL_TILE_URL } else { OSM_TILE_URL },
    };

    Ok(PageView {
        title: cfg.title.clone(),
        timestamp,
        fleet_ids: fleet.ids().map(str::to_string).collect(),
        altitude: AltitudeBar::new(selected.altitude_m),
        speed: SpeedGauge::new(selected.speed_mps),
        map,
        notifications,
        commands: GcsCommand::ALL.to_vec(),
        selected_command,
        ack,
        selected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::sample_fleet_default;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn page(cfg: &DashboardConfig, selection: &Selection<'_>) -> Result<PageView, DashboardError> {
        let mut rng = StdRng::seed_from_u64(17);
        build_page(&mut rng, cfg, false, selection, "2026-01-01 00:00:00".into())
    }

    #[test]
    fn half_ceiling_fills_half_the_bar() {
        let bar = AltitudeBar::new(362.5);
        assert_eq!(bar.fraction(), 0.5);
        assert_eq!(bar.fill_percent(), 50);
    }

    #[test]
    fn fill_percent_truncates() {
        assert_eq!(AltitudeBar::new(724.9).fill_percent(), 99);
        assert_eq!(AltitudeBar::new(0.0).fill_percent(), 0);
    }

    #[test]
    fn out_of_range_altitude_is_clamped() {
        assert_eq!(AltitudeBar::new(1_000.0).fraction(), 1.0);
        assert_eq!(AltitudeBar::new(-20.0).fraction(), 0.0);
        assert_eq!(AltitudeBar::new(f64::NAN).fill_percent(), 0);
    }

    #[test]
    fn speed_bands() {
        assert_eq!(SpeedGauge::new(12.0).band(), SpeedBand::High);
        assert_eq!(SpeedGauge::new(12.0).band().color(), "red");
        assert_eq!(SpeedGauge::new(0.0).band(), SpeedBand::Low);
        assert_eq!(SpeedGauge::new(4.999).band(), SpeedBand::Low);
        assert_eq!(SpeedGauge::new(5.0).band(), SpeedBand::Medium);
        assert_eq!(SpeedGauge::new(10.0).band(), SpeedBand::High);
        assert_eq!(SpeedGauge::new(15.0).band(), SpeedBand::High);
    }

    #[test]
    fn off_scale_speeds_keep_edge_bands() {
        assert_eq!(SpeedGauge::new(-1.0).band(), SpeedBand::Low);
        assert_eq!(SpeedGauge::new(-0.001).band(), SpeedBand::Low);
        assert_eq!(SpeedGauge::new(15.001).band(), SpeedBand::High);
        assert_eq!(SpeedGauge::new(20.0).band(), SpeedBand::High);
        assert_eq!(SpeedGauge::new(20.0).band().color(), "red");
    }

    #[test]
    fn needle_is_pinned_to_scale() {
        assert_eq!(SpeedGauge::new(20.0).needle(), 15.0);
        assert_eq!(SpeedGauge::new(-1.0).needle(), 0.0);
        assert_eq!(SpeedGauge::new(7.5).needle(), 7.5);
    }

    #[test]
    fn select_matches_exactly_one_record() {
        let fleet = sample_fleet_default(5);
        let r = select(&fleet, Some("UAV-3")).unwrap();
        assert_eq!(r.id, "UAV-3");
        assert_eq!(fleet.records().iter().filter(|x| x.id == r.id).count(), 1);
        assert_eq!(select(&fleet, None).unwrap().id, "UAV-1");
        assert!(matches!(
            select(&fleet, Some("UAV-6")),
            Err(DashboardError::UnknownUav(_))
        ));
    }

    #[test]
    fn select_on_empty_fleet() {
        let fleet = sample_fleet_default(0);
        assert!(matches!(select(&fleet, None), Err(DashboardError::EmptyFleet)));
    }

    #[test]
    fn page_reflects_selected_record() {
        let cfg = DashboardConfig::default();
        let view = page(
            &cfg,
            &Selection {
                uav: Some("UAV-4"),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(view.selected.id, "UAV-4");
        assert_eq!(view.fleet_ids, ["UAV-1", "UAV-2", "UAV-3", "UAV-4", "UAV-5"]);
        assert_eq!(view.altitude.altitude_m, view.selected.altitude_m);
        assert_eq!(view.speed.speed_mps, view.selected.speed_mps);
        assert_eq!(view.map.latitude, view.selected.latitude);
        assert_eq!(view.map.longitude, view.selected.longitude);
        assert_eq!(view.map.marker_label, "UAV-4 Location");
        assert_eq!(view.map.tile_url, OSM_TILE_URL);
        assert_eq!(view.notifications.len(), 3);
        assert_eq!(view.commands.len(), 6);
        assert_eq!(view.selected_command, GcsCommand::ResumeMission);
        assert!(view.ack.is_none());
    }

    #[test]
    fn execute_produces_ack() {
        let cfg = DashboardConfig::default();
        let view = page(
            &cfg,
            &Selection {
                uav: Some("UAV-2"),
                command: Some(GcsCommand::Land),
                execute: true,
            },
        )
        .unwrap();
        let ack = view.ack.unwrap();
        assert_eq!(ack.message, "Command 'Land' executed for UAV-2!");
    }

    #[test]
    fn follow_fleet_limits_notification_pool() {
        let mut cfg = DashboardConfig::default();
        cfg.fleet.size = 1;
        cfg.notifications.follow_fleet = true;
        cfg.notifications.count = 20;
        let view = page(&cfg, &Selection::default()).unwrap();
        assert!(
            view.notifications
                .iter()
                .all(|n| n.contains(": UAV-1 has changed status."))
        );
    }

    #[test]
    fn unknown_selection_fails() {
        let cfg = DashboardConfig::default();
        let err = page(
            &cfg,
            &Selection {
                uav: Some("UAV-99"),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, DashboardError::UnknownUav(id) if id == "UAV-99"));
    }
}
