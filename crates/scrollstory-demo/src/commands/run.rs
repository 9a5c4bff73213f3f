use std::time::Duration;

use anyhow::Result;
use tracing::info;

use scrollstory_core::FrameLoop;

use crate::scenario::{DemoConfig, ScrollDriver};

/// Run the tracker on its frame loop while the script scrolls on a timer
pub async fn run(config: &DemoConfig, json: bool, refresh_at: Option<u32>) -> Result<()> {
    let tracker = super::build_tracker(config, json)?;
    let viewport = tracker.container().viewport().clone();
    let frame_interval = tracker.config().frame_interval();
    let handle = FrameLoop::new(tracker).spawn();

    let mut driver = ScrollDriver::new(&config.scroll);
    let mut steps =
        tokio::time::interval(Duration::from_millis(config.scroll.step_interval_ms.max(1)));
    // Skip the first tick (fires immediately)
    steps.tick().await;

    for step in 0..config.scroll.steps {
        steps.tick().await;
        driver.advance(&viewport);
        if refresh_at == Some(step) {
            info!(step, "Refreshing tracker");
            handle.refresh()?;
        }
    }

    // Let the loop observe the final offset before stopping it
    tokio::time::sleep(frame_interval * 2).await;
    let tracker = handle.stop().await?;

    if !json {
        println!("\n{}", super::summary(&tracker));
    }
    Ok(())
}
