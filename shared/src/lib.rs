use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Link status reported for a UAV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UavStatus {
    Online,
    Offline,
}

impl UavStatus {
    pub const ALL: [UavStatus; 2] = [UavStatus::Online, UavStatus::Offline];

    pub fn as_str(&self) -> &'static str {
        match self {
            UavStatus::Online => "ONLINE",
            UavStatus::Offline => "OFFLINE",
        }
    }
}

impl fmt::Display for UavStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Autopilot mode reported for a UAV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightMode {
    Guided,
    Auto,
    Manual,
}

impl FlightMode {
    pub const ALL: [FlightMode; 3] = [FlightMode::Guided, FlightMode::Auto, FlightMode::Manual];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlightMode::Guided => "GUIDED",
            FlightMode::Auto => "AUTO",
            FlightMode::Manual => "MANUAL",
        }
    }
}

impl fmt::Display for FlightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One telemetry snapshot for a single UAV.
///
/// Units: altitude in metres, speed in m/s, battery in percent, voltage in volts,
/// latitude/longitude in decimal degrees (WGS84).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UavRecord {
    pub id: String,
    pub status: UavStatus,
    pub altitude_m: f64,
    pub speed_mps: f64,
    pub battery_pct: f64,
    pub voltage_v: f64,
    pub mode: FlightMode,
    pub latitude: f64,
    pub longitude: f64,
}

/// Builds the identifier for the 1-based fleet slot `index` ("UAV-3").
pub fn uav_id(index: usize) -> String {
    format!("UAV-{index}")
}

/// Parses a "UAV-{n}" identifier back into its 1-based slot.
///
/// Only the exact form produced by [`uav_id`] is accepted: no sign, no
/// leading zeros.
pub fn parse_uav_index(id: &str) -> Option<usize> {
    let digits = id.strip_prefix("UAV-")?;
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Commands offered by the operator panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GcsCommand {
    ResumeMission,
    GoHome,
    Land,
    Dim,
    SpotOn,
    VideoOn,
}

impl GcsCommand {
    pub const ALL: [GcsCommand; 6] = [
        GcsCommand::ResumeMission,
        GcsCommand::GoHome,
        GcsCommand::Land,
        GcsCommand::Dim,
        GcsCommand::SpotOn,
        GcsCommand::VideoOn,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GcsCommand::ResumeMission => "Resume Mission",
            GcsCommand::GoHome => "Go Home",
            GcsCommand::Land => "Land",
            GcsCommand::Dim => "Dim",
            GcsCommand::SpotOn => "Spot On",
            GcsCommand::VideoOn => "Video On",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            GcsCommand::ResumeMission => "resume_mission",
            GcsCommand::GoHome => "go_home",
            GcsCommand::Land => "land",
            GcsCommand::Dim => "dim",
            GcsCommand::SpotOn => "spot_on",
            GcsCommand::VideoOn => "video_on",
        }
    }
}

impl fmt::Display for GcsCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command {:?}", self.0)
    }
}

impl std::error::Error for UnknownCommand {}

/// Accepts either the display label ("Go Home") or the key ("go_home").
impl FromStr for GcsCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GcsCommand::ALL
            .into_iter()
            .find(|c| c.label() == s || c.key() == s)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

/// Body of `POST /api/command`:
///   { "uav": "UAV-3", "command": "land" }
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub uav: String,
    pub command: GcsCommand,
}

/// Acknowledgement shown to the operator after a command is "executed".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandAck {
    pub uav: String,
    pub command: GcsCommand,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_parses_from_label_and_key() {
        assert_eq!("Go Home".parse::<GcsCommand>(), Ok(GcsCommand::GoHome));
        assert_eq!("video_on".parse::<GcsCommand>(), Ok(GcsCommand::VideoOn));
        assert!("Self Destruct".parse::<GcsCommand>().is_err());
    }

    #[test]
    fn command_request_json_shape() {
        let req: CommandRequest =
            serde_json::from_str(r#"{ "uav": "UAV-2", "command": "spot_on" }"#).unwrap();
        assert_eq!(req.uav, "UAV-2");
        assert_eq!(req.command, GcsCommand::SpotOn);
    }

    #[test]
    fn status_and_mode_serialize_upper_case() {
        assert_eq!(serde_json::to_string(&UavStatus::Offline).unwrap(), "\"OFFLINE\"");
        assert_eq!(serde_json::to_string(&FlightMode::Guided).unwrap(), "\"GUIDED\"");
    }

    #[test]
    fn uav_ids_round_trip_through_index() {
        assert_eq!(uav_id(4), "UAV-4");
        assert_eq!(parse_uav_index("UAV-4"), Some(4));
        assert_eq!(parse_uav_index("UAV-0"), None);
        assert_eq!(parse_uav_index("uav-1"), None);
    }

    #[test]
    fn non_canonical_ids_are_rejected() {
        for id in ["UAV-03", "UAV-+3", "UAV-0003", "UAV-", "UAV- 3", "UAV-3x"] {
            assert_eq!(parse_uav_index(id), None, "{id}");
        }
        assert_eq!(parse_uav_index("UAV-10"), Some(10));
    }
}
