use crate::aggregate::{AggregatedStats, HeatMap};
use crate::dashboard::AlertLog;
use chrono::{DateTime, Local};
use owo_colors::OwoColorize;
use std::io::Write;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn render_stats(
    snapshot: &AggregatedStats,
    alerts: &AlertLog,
    top_n: usize,
    now: DateTime<Local>,
) -> String {
    let mut out = String::new();

    let uptime = (now - snapshot.start_time).num_seconds().max(0);
    let warming = if snapshot.warmed_up { "" } else { " (warming up)" };

    out.push_str(&format!(
        "Traffic Monitor\n\
         ===============\n\
         {} | uptime: {}s | frames: {} | hits: {}\n\n",
        now.format(TIME_FORMAT),
        uptime,
        snapshot.frames_closed,
        snapshot.lifetime_hits
    ));

    out.push_str(&format!(
        "LPS frame: {:.3} | scene: {:.3}{} | lifetime: {:.3}\n",
        snapshot.lps_frame, snapshot.lps_scene, warming, snapshot.lps_lifetime
    ));

    if snapshot.alert.on {
        out.push_str(&format!("Alert: {}\n\n", "ON".red().bold()));
    } else {
        out.push_str(&format!("Alert: {}\n\n", "off".green()));
    }

    render_top(&mut out, "Sections (frame)", &snapshot.frame_sections, top_n, "");
    render_top(&mut out, "Sections (total)", &snapshot.total_sections, top_n, "");
    render_top(&mut out, "Hosts by bytes (frame)", &snapshot.frame_host_bytes, top_n, "B");

    if alerts.is_empty() {
        out.push_str("Alerts: <none>\n");
    } else {
        out.push_str("Alerts:\n");
        for message in alerts.iter() {
            out.push_str(&format!("  {message}\n"));
        }
    }

    out
}

fn render_top(out: &mut String, title: &str, map: &HeatMap, top_n: usize, unit: &str) {
    let top = map.top(top_n);
    if top.is_empty() {
        out.push_str(&format!("{title}: <no data>\n\n"));
        return;
    }

    out.push_str(&format!("{title}:\n"));
    let total = map.total().max(1);
    for (key, count) in top {
        let pct = (count as f64 / total as f64) * 100.0;
        let bars = ((pct / 5.0).floor() as usize).max(1);
        let key = if key.is_empty() { "<none>" } else { key };
        out.push_str(&format!(
            "  {:<20} {:<20} {:>10}{}\n",
            key,
            "█".repeat(bars),
            count,
            unit
        ));
    }
    out.push('\n');
}

/// Clear the terminal and draw `output` from the top-left corner.
pub fn redraw(out: &mut impl Write, output: &str) {
    let _ = write!(out, "\x1b[2J\x1b[H");
    let _ = writeln!(out, "{output}");
    let _ = out.flush();
}
