pub mod run;
pub mod step;

use anyhow::Result;

use scrollstory_core::sim::{SimContainer, SimScene};
use scrollstory_core::{SceneTracker, TrackerOptions};

use crate::output::printer;
use crate::scenario::DemoConfig;

/// Build a tracker over the scenario's simulated story, printing every event
pub fn build_tracker(
    config: &DemoConfig,
    json: bool,
) -> Result<SceneTracker<SimContainer, SimScene>> {
    let (container, scenes) = config.build_story();
    let tracker = SceneTracker::new(
        TrackerOptions::new()
            .container(container)
            .scenes(scenes)
            .config(config.tracker.clone())
            .on_enter(printer("enter", json))
            .on_exit(printer("exit", json))
            .on_progress(printer("progress", json)),
    )?;
    Ok(tracker)
}

/// Final state line shared by both commands
pub fn summary(tracker: &SceneTracker<SimContainer, SimScene>) -> String {
    let active = tracker
        .active_scene_index()
        .and_then(|i| tracker.scenes().get(i))
        .map(|scene| scene.label().to_string())
        .unwrap_or_else(|| "none".to_string());
    format!(
        "Done. {} frames with changes, active scene: {}",
        tracker.frame_count(),
        active
    )
}
