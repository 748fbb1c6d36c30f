use crate::error::DashboardError;
use rand::RngExt;
use std::ops::Range;
use uav_gcs_shared::{FlightMode, UavRecord, UavStatus, uav_id};

pub const DEFAULT_FLEET_SIZE: usize = 5;

pub const ALTITUDE_RANGE_M: Range<f64> = 0.0..725.0;
pub const SPEED_RANGE_MPS: Range<f64> = 0.0..15.0;
pub const BATTERY_RANGE_PCT: Range<f64> = 20.0..100.0;
pub const VOLTAGE_RANGE_V: Range<f64> = 11.0..14.8;
pub const LATITUDE_RANGE: Range<f64> = 28.4..28.5;
pub const LONGITUDE_RANGE: Range<f64> = 77.5..77.6;

/// Decimal places kept on sampled coordinates.
const COORD_DECIMALS: i32 = 5;

/// One sampled batch of UAV records, ordered by generation index.
///
/// A batch lives for a single render and is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Fleet {
    records: Vec<UavRecord>,
}

impl Fleet {
    pub fn records(&self) -> &[UavRecord] {
        &self.records
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&UavRecord> {
        self.records.first()
    }

    /// Looks up the record whose id equals `id`.
    pub fn find(&self, id: &str) -> Result<&UavRecord, DashboardError> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| DashboardError::UnknownUav(id.to_string()))
    }

    pub fn into_records(self) -> Vec<UavRecord> {
        self.records
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

fn sample_record<R: RngExt>(rng: &mut R, index: usize) -> UavRecord {
    UavRecord {
        id: uav_id(index),
        status: UavStatus::ALL[rng.random_range(0..UavStatus::ALL.len())],
        altitude_m: rng.random_range(ALTITUDE_RANGE_M),
        speed_mps: rng.random_range(SPEED_RANGE_MPS),
        battery_pct: rng.random_range(BATTERY_RANGE_PCT),
        voltage_v: rng.random_range(VOLTAGE_RANGE_V),
        mode: FlightMode::ALL[rng.random_range(0..FlightMode::ALL.len())],
        latitude: round_to(rng.random_range(LATITUDE_RANGE), COORD_DECIMALS),
        longitude: round_to(rng.random_range(LONGITUDE_RANGE), COORD_DECIMALS),
    }
}

/// Draws `n` independent records with ids `UAV-1..UAV-n`.
pub fn sample_fleet<R: RngExt>(rng: &mut R, n: usize) -> Fleet {
    let records = (1..=n).map(|i| sample_record(rng, i)).collect();
    Fleet { records }
}

/// Same as [`sample_fleet`] using the thread-local RNG.
pub fn sample_fleet_default(n: usize) -> Fleet {
    sample_fleet(&mut rand::rng(), n)
}
