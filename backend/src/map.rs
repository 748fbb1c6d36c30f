use serde::{Deserialize, Serialize};
use std::path::Path;
use tower_http::services::ServeDir;

pub const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const LOCAL_TILE_URL: &str = "/tiles/{z}/{x}/{y}.png";

/// Which library draws the location map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapWidget {
    /// Embedded interactive slippy map.
    #[default]
    Leaflet,
    /// Plotting-library map trace.
    Plotly,
}

/// Single-marker map centred on one UAV.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub widget: MapWidget,
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    pub marker_label: String,
    pub tile_url: &'static str,
}

/// Returns true if `tiles_dir` holds at least one entry.
pub async fn tiles_available(tiles_dir: &Path) -> bool {
    if !tokio::fs::try_exists(tiles_dir).await.unwrap_or(false) {
        return false;
    }
    match tokio::fs::read_dir(tiles_dir).await {
        Ok(mut entries) => matches!(entries.next_entry().await, Ok(Some(_))),
        Err(_) => false,
    }
}

/// Service that serves `/tiles/{z}/{x}/{y}.png` from `tiles_dir`.
pub fn tile_service(tiles_dir: &Path) -> ServeDir {
    ServeDir::new(tiles_dir)
}

/// Widget markup for `view`. The host page supplies the container styling.
pub fn render_map(view: &MapView) -> String {
    match view.widget {
        MapWidget::Leaflet => leaflet_html(view),
        MapWidget::Plotly => plotly_html(view),
    }
}

fn leaflet_html(view: &MapView) -> String {
    let label = crate::html::escape_js(&view.marker_label);
    format!(
        r#"<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"/>
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<div id="uav-map" style="height:420px; border-radius:10px;"></div>
<script>
  const map = L.map('uav-map').setView([{lat}, {lon}], {zoom});
  L.tileLayer('{tiles}', {{ maxZoom: 19, attribution: '&copy; OpenStreetMap contributors' }}).addTo(map);
  L.marker([{lat}, {lon}]).addTo(map).bindPopup('{label}');
</script>"#,
        lat = view.latitude,
        lon = view.longitude,
        zoom = view.zoom,
        tiles = view.tile_url,
    )
}

fn plotly_html(view: &MapView) -> String {
    let label = crate::html::escape_js(&view.marker_label);
    format!(
        r#"<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
<div id="uav-map" style="height:420px;"></div>
<script>
  Plotly.newPlot('uav-map', [{{
    type: 'scattermapbox',
    lat: [{lat}], lon: [{lon}],
    mode: 'markers',
    marker: {{ size: 14, color: 'blue' }},
    text: ['{label}'],
    hoverinfo: 'text'
  }}], {{
    mapbox: {{ style: 'open-street-map', center: {{ lat: {lat}, lon: {lon} }}, zoom: {zoom} }},
    margin: {{ r: 0, t: 0, l: 0, b: 0 }},
    paper_bgcolor: '#121212'
  }});
</script>"#,
        lat = view.latitude,
        lon = view.longitude,
        zoom = view.zoom,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(widget: MapWidget) -> MapView {
        MapView {
            widget,
            latitude: 28.45123,
            longitude: 77.55432,
            zoom: 15,
            marker_label: "UAV-2 Location".to_string(),
            tile_url: OSM_TILE_URL,
        }
    }

    #[test]
    fn leaflet_centres_on_marker() {
        let html = render_map(&view(MapWidget::Leaflet));
        assert!(html.contains("setView([28.45123, 77.55432], 15)"));
        assert!(html.contains("L.marker([28.45123, 77.55432])"));
        assert!(html.contains("bindPopup('UAV-2 Location')"));
        assert!(html.contains(OSM_TILE_URL));
    }

    #[test]
    fn plotly_uses_single_trace() {
        let html = render_map(&view(MapWidget::Plotly));
        assert!(html.contains("scattermapbox"));
        assert!(html.contains("lat: [28.45123], lon: [77.55432]"));
        assert!(html.contains("zoom: 15"));
        assert!(html.contains("'UAV-2 Location'"));
    }

    #[test]
    fn widget_names_in_config() {
        let w: MapWidget = serde_json::from_str("\"plotly\"").unwrap();
        assert_eq!(w, MapWidget::Plotly);
        assert_eq!(MapWidget::default(), MapWidget::Leaflet);
    }

    #[tokio::test]
    async fn missing_tiles_dir_is_unavailable() {
        assert!(!tiles_available(Path::new("/nonexistent/tiles")).await);
    }
}
