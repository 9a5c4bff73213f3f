use serde::Serialize;
use tracing::warn;

use scrollstory_core::sim::SimScene;
use scrollstory_core::{Direction, SceneEvent};

/// One printed scene event
#[derive(Debug, Serialize)]
struct EventLine<'a> {
    event: &'static str,
    scene: usize,
    label: &'a str,
    progress: Option<f64>,
    direction: Direction,
}

/// Callback printing `event` lines to stdout, as text or JSON
pub fn printer(
    event: &'static str,
    json: bool,
) -> impl FnMut(&SceneEvent<'_, SimScene>) + Send + 'static {
    move |e| {
        let line = EventLine {
            event,
            scene: e.scene,
            label: e.element.label(),
            progress: e.progress,
            direction: e.direction,
        };
        if json {
            match serde_json::to_string(&line) {
                Ok(s) => println!("{}", s),
                Err(err) => warn!("Failed to encode event: {}", err),
            }
        } else {
            println!("{}", format_line(&line));
        }
    }
}

fn format_line(line: &EventLine<'_>) -> String {
    let progress = line
        .progress
        .map(|p| format!("{:.3}", p))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:<8} #{} {:<16} progress={} {}",
        line.event, line.scene, line.label, progress, line.direction
    )
}
