use anyhow::Result;
use tracing::debug;

use scrollstory_core::FrameOutcome;

use crate::scenario::{DemoConfig, ScrollDriver};

/// Tick the tracker once per scripted scroll step, without a frame loop
pub fn run(config: &DemoConfig, json: bool) -> Result<()> {
    let mut tracker = super::build_tracker(config, json)?;
    let viewport = tracker.container().viewport().clone();
    let mut driver = ScrollDriver::new(&config.scroll);

    tracker.tick();
    for step in 0..config.scroll.steps {
        driver.advance(&viewport);
        if let FrameOutcome::Skipped = tracker.tick() {
            debug!(step, "Scroll offset unchanged, frame skipped");
        }
    }

    if !json {
        println!("\n{}", super::summary(&tracker));
    }
    Ok(())
}
