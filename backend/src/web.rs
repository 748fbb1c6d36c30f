use crate::commands::{acknowledge, command_labels};
use crate::error::DashboardError;
use crate::fleet::sample_fleet_default;
use crate::html::render_page;
use crate::map::tile_service;
use crate::notifications::sample_notifications_default;
use crate::render::{Selection, build_page};
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Query, State},
    response::Html,
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use uav_gcs_shared::{
    CommandAck, CommandRequest, GcsCommand, UavRecord, parse_uav_index, uav_id,
};

/// Upper bound on `count` for the JSON sampling endpoints.
const MAX_API_COUNT: usize = 1_000;

/// Public router constructor
pub fn router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/", get(dashboard))
        .route("/api/fleet", get(get_fleet))
        .route("/api/notifications", get(get_notifications))
        .route("/api/commands", get(get_commands))
        .route("/api/command", post(send_command));

    if let Some(dir) = &state.tiles_dir {
        app = app.nest_service("/tiles", tile_service(dir));
    }

    app.layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Query string of the dashboard page:
///   /?uav=UAV-3&command=land&execute=1
#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    pub uav: Option<String>,
    pub command: Option<String>,
    pub execute: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CountParams {
    pub count: Option<usize>,
}

fn now_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn render_dashboard(state: &AppState, params: &DashboardParams) -> Result<String, DashboardError> {
    let command = params
        .command
        .as_deref()
        .map(str::parse::<GcsCommand>)
        .transpose()?;
    let selection = Selection {
        uav: params.uav.as_deref(),
        command,
        execute: params.execute.is_some(),
    };
    let view = build_page(
        &mut rand::rng(),
        &state.config,
        state.tiles_local(),
        &selection,
        now_stamp(),
    )?;
    tracing::debug!(uav = %view.selected.id, "rendered dashboard");
    Ok(render_page(&view))
}

async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardParams>,
) -> Result<Html<String>, DashboardError> {
    render_dashboard(&state, &params).map(Html)
}

async fn get_fleet(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountParams>,
) -> Json<Vec<UavRecord>> {
    let n = params.count.unwrap_or(state.config.fleet.size).min(MAX_API_COUNT);
    Json(sample_fleet_default(n).into_records())
}

async fn get_notifications(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountParams>,
) -> Json<Vec<String>> {
    let n = params
        .count
        .unwrap_or(state.config.notifications.count)
        .min(MAX_API_COUNT);
    Json(sample_notifications_default(n))
}

async fn get_commands() -> Json<Vec<&'static str>> {
    Json(command_labels())
}

/// Acknowledges a command for any id the configured fleet can produce.
async fn send_command(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CommandRequest>,
) -> Result<Json<CommandAck>, DashboardError> {
    match parse_uav_index(&req.uav) {
        Some(n) if n <= state.config.fleet.size && uav_id(n) == req.uav => {
            Ok(Json(acknowledge(req.command, &req.uav)))
        }
        _ => Err(DashboardError::UnknownUav(req.uav)),
    }
}
