use crate::map::render_map;
use crate::render::{AltitudeBar, PageView, SpeedBand, SpeedGauge};
use std::f64::consts::PI;
use std::fmt::Write;

const PAGE_CSS: &str = r#"
body { background-color:#121212; color:#ffffff; font-family:'Arial', sans-serif; margin:0; }
.header { text-align:center; color:#00ff00; font-size:2em; margin:0.5em 0 0.2em 0; }
.clock { text-align:center; color:#ffffff; margin:0 0 1em 0; }
.container { display:flex; gap:24px; padding:0 24px 24px 24px; }
.sidebar { width:25%; min-width:240px; padding:20px; background-color:#1e1e1e; border-radius:10px; animation:slideInLeft 0.5s; }
.main { flex:1; display:flex; flex-direction:column; gap:16px; }
.notification { background-color:#2c2c2c; border-radius:10px; padding:10px; margin-bottom:10px; animation:fadeIn 0.5s ease-in-out; }
.success { background-color:#14532d; border:1px solid #22c55e; color:#bbf7d0; border-radius:10px; padding:10px; margin-top:12px; }
.trackbar { width:100%; height:25px; background-color:#333333; border-radius:5px; position:relative; }
.track { height:100%; background-color:cyan; border-radius:5px; transition:width 0.3s ease-in-out; }
select, button { width:100%; padding:0.5rem; margin:0.3rem 0 0.8rem 0; border-radius:6px; background:#2c2c2c; color:#fff; border:1px solid #444; }
button:hover { background-color:#00ff00; color:#000; transition:background-color 0.3s ease; }
@keyframes fadeIn { from { opacity:0; } to { opacity:1; } }
@keyframes slideInLeft { from { transform:translateX(-100%); opacity:0; } to { transform:translateX(0); opacity:1; } }
"#;

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes `s` for a single-quoted JS string inside a `<script>` block.
pub fn escape_js(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            '<' => out.push_str("\\x3c"),
            '>' => out.push_str("\\x3e"),
            _ => out.push(c),
        }
    }
    out
}

// Gauge geometry (SVG user units)
const GAUGE_CX: f64 = 150.0;
const GAUGE_CY: f64 = 150.0;
const GAUGE_R: f64 = 110.0;

fn gauge_point(value: f64, max: f64, radius: f64) -> (f64, f64) {
    let theta = PI * (1.0 - value / max);
    (GAUGE_CX + radius * theta.cos(), GAUGE_CY - radius * theta.sin())
}

/// Semicircular speed gauge with three colored bands.
pub fn speed_gauge_svg(gauge: &SpeedGauge) -> String {
    let mut svg = String::new();
    svg.push_str(
        r#"<svg class="gauge" viewBox="0 0 300 190" width="360" role="img" aria-label="Speed (m/s)">"#,
    );
    svg.push_str(r#"<rect x="0" y="0" width="300" height="190" fill="black" rx="10"/>"#);
    for band in SpeedBand::ALL {
        let (lo, hi) = band.range();
        let (x0, y0) = gauge_point(lo, gauge.max_mps, GAUGE_R);
        let (x1, y1) = gauge_point(hi, gauge.max_mps, GAUGE_R);
        let _ = write!(
            svg,
            r#"<path class="band-{name}" d="M {x0:.2} {y0:.2} A {r} {r} 0 0 1 {x1:.2} {y1:.2}" stroke="{color}" stroke-width="24" fill="none"/>"#,
            name = band.as_str(),
            r = GAUGE_R,
            color = band.color(),
        );
    }
    let (nx, ny) = gauge_point(gauge.needle(), gauge.max_mps, GAUGE_R - 18.0);
    let _ = write!(
        svg,
        r#"<line x1="{GAUGE_CX}" y1="{GAUGE_CY}" x2="{nx:.2}" y2="{ny:.2}" stroke="cyan" stroke-width="6" stroke-linecap="round"/>"#
    );
    for tick in [0.0, 5.0, 10.0, 15.0] {
        let (tx, ty) = gauge_point(tick, gauge.max_mps, GAUGE_R + 22.0);
        let _ = write!(
            svg,
            r#"<text x="{tx:.2}" y="{ty:.2}" fill="white" font-size="12" text-anchor="middle">{tick}</text>"#
        );
    }
    let _ = write!(
        svg,
        r#"<text x="150" y="140" fill="white" font-size="48" text-anchor="middle" data-band="{band}">{value:.2}</text>"#,
        band = gauge.band().as_str(),
        value = gauge.speed_mps,
    );
    svg.push_str(r#"<text x="150" y="180" fill="white" font-size="14" text-anchor="middle">Speed (m/s)</text></svg>"#);
    svg
}

pub fn altitude_bar_html(bar: &AltitudeBar) -> String {
    format!(
        r#"<h5>Altitude (m)</h5>
<div class="trackbar"><div class="track" style="width:{pct}%;"></div></div>
<p style="text-align:center; color:white;">{alt:.2} m</p>"#,
        pct = bar.fill_percent(),
        alt = bar.altitude_m,
    )
}

fn sidebar_html(view: &PageView) -> String {
    let mut html = String::new();
    html.push_str(r#"<aside class="sidebar"><h2>UAV List</h2><form method="get" action="/">"#);

    html.push_str(r#"<label for="uav">Select UAV:</label><select id="uav" name="uav" onchange="this.form.submit()">"#);
    for id in &view.fleet_ids {
        let selected = if *id == view.selected.id { " selected" } else { "" };
        let id = escape(id);
        let _ = write!(html, r#"<option value="{id}"{selected}>{id}</option>"#);
    }
    html.push_str("</select>");

    let r = &view.selected;
    let _ = write!(
        html,
        r#"<h3>Details for {id}</h3>
<p>Status: {status}</p>
<p>Mode: {mode}</p>
<p>Battery Level: {battery:.2}%</p>
<p>Voltage: {voltage:.2} V</p>"#,
        id = escape(&r.id),
        status = r.status,
        mode = r.mode,
        battery = r.battery_pct,
        voltage = r.voltage_v,
    );

    html.push_str(r#"<label for="command">Available Commands:</label><select id="command" name="command">"#);
    for cmd in &view.commands {
        let selected = if *cmd == view.selected_command { " selected" } else { "" };
        let _ = write!(
            html,
            r#"<option value="{key}"{selected}>{label}</option>"#,
            key = cmd.key(),
            label = cmd.label()
        );
    }
    html.push_str(r#"</select><button type="submit" name="execute" value="1">Execute Command</button></form>"#);

    if let Some(ack) = &view.ack {
        let _ = write!(html, r#"<div class="success">{}</div>"#, escape(&ack.message));
    }
    html.push_str("</aside>");
    html
}

/// Full dashboard document for one render.
pub fn render_page(view: &PageView) -> String {
    let mut notifications = String::new();
    for n in &view.notifications {
        let _ = write!(notifications, r#"<div class="notification">{}</div>"#, escape(n));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1"/>
<title>{title}</title>
<style>{css}</style>
</head>
<body>
<h1 class="header">{title}</h1>
<h4 class="clock">{timestamp}</h4>
<div class="container">
{sidebar}
<main class="main">
<section>
<h3>Telemetry Data</h3>
{gauge}
{altitude}
</section>
<section>
<h3>Real-time OpenStreetMap</h3>
{map}
</section>
<section>
<h3>Notifications</h3>
{notifications}
</section>
</main>
</div>
</body>
</html>"#,
        title = escape(&view.title),
        css = PAGE_CSS,
        timestamp = escape(&view.timestamp),
        sidebar = sidebar_html(view),
        gauge = speed_gauge_svg(&view.speed),
        altitude = altitude_bar_html(&view.altitude),
        map = render_map(&view.map),
    )
}
