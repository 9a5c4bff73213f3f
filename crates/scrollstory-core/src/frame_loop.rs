//! Frame loop driving a [`SceneTracker`] once per frame until stopped
//!
//! The loop owns the tracker. While it runs, callers talk to it through a
//! [`FrameLoopHandle`]: `refresh()` is queued and applied before the next
//! frame, and the latest [`TrackerSnapshot`] is published after every
//! processed frame.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::error::{Error, Result};
use crate::host::{SceneElement, ScrollContainer};
use crate::tracker::{ActiveScene, FrameOutcome, SceneTracker};

/// Tracker state as of the last processed frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerSnapshot {
    pub active: ActiveScene,
    pub progress: Option<f64>,
    pub frame_count: u64,
}

impl TrackerSnapshot {
    fn of<C, E>(tracker: &SceneTracker<C, E>) -> Self {
        Self {
            active: tracker.active_scene(),
            progress: tracker.progress_value(),
            frame_count: tracker.frame_count(),
        }
    }
}

#[derive(Debug)]
enum LoopCommand {
    Refresh,
}

/// Runs a tracker at the configured frame rate
pub struct FrameLoop<C, E> {
    tracker: SceneTracker<C, E>,
    commands: Option<mpsc::UnboundedReceiver<LoopCommand>>,
    snapshots: Option<watch::Sender<TrackerSnapshot>>,
}

impl<C, E> FrameLoop<C, E>
where
    C: ScrollContainer,
    E: SceneElement,
{
    pub fn new(tracker: SceneTracker<C, E>) -> Self {
        Self {
            tracker,
            commands: None,
            snapshots: None,
        }
    }

    /// Tick the tracker every frame until shutdown is signalled or the
    /// shutdown sender is dropped, then hand the tracker back
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> SceneTracker<C, E> {
        let period = self.tracker.config().frame_interval();
        info!(
            frame_interval_ms = period.as_millis() as u64,
            "Frame loop started"
        );

        let mut frames = tokio::time::interval(period);
        frames.set_missed_tick_behavior(MissedTickBehavior::Delay);

        if !*shutdown.borrow() {
            loop {
                tokio::select! {
                    biased;

                    result = shutdown.changed() => {
                        if result.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }

                    _ = frames.tick() => {
                        self.frame();
                    }
                }
            }
        }

        info!(
            frame_count = self.tracker.frame_count(),
            "Frame loop stopped"
        );
        self.tracker
    }

    fn frame(&mut self) {
        if let Some(ref mut commands) = self.commands {
            while let Ok(command) = commands.try_recv() {
                match command {
                    LoopCommand::Refresh => self.tracker.refresh(),
                }
            }
        }

        if let FrameOutcome::Processed(_) = self.tracker.tick() {
            if let Some(ref snapshots) = self.snapshots {
                snapshots.send_replace(TrackerSnapshot::of(&self.tracker));
            }
        }
    }
}

impl<C, E> FrameLoop<C, E>
where
    C: ScrollContainer + Send + 'static,
    E: SceneElement + Send + 'static,
{
    /// Start the loop on a tokio task
    pub fn spawn(mut self) -> FrameLoopHandle<C, E> {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(TrackerSnapshot::of(&self.tracker));

        self.commands = Some(command_rx);
        self.snapshots = Some(snapshot_tx);

        FrameLoopHandle {
            shutdown: shutdown_tx,
            commands: command_tx,
            snapshots: snapshot_rx,
            task: tokio::spawn(self.run(shutdown_rx)),
        }
    }
}

/// Control handle for a spawned [`FrameLoop`]. Dropping it stops the loop.
pub struct FrameLoopHandle<C, E> {
    shutdown: watch::Sender<bool>,
    commands: mpsc::UnboundedSender<LoopCommand>,
    snapshots: watch::Receiver<TrackerSnapshot>,
    task: JoinHandle<SceneTracker<C, E>>,
}

impl<C, E> FrameLoopHandle<C, E> {
    /// Queue a tracker refresh for the next frame
    pub fn refresh(&self) -> Result<()> {
        self.commands
            .send(LoopCommand::Refresh)
            .map_err(|_| Error::FrameLoop("frame loop is not running".to_string()))
    }

    /// Latest published tracker state
    pub fn snapshot(&self) -> TrackerSnapshot {
        *self.snapshots.borrow()
    }

    /// Wait for the next processed frame and return its state
    pub async fn changed(&mut self) -> Result<TrackerSnapshot> {
        self.snapshots
            .changed()
            .await
            .map_err(|_| Error::FrameLoop("frame loop is not running".to_string()))?;
        Ok(*self.snapshots.borrow_and_update())
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the loop and take the tracker back
    pub async fn stop(self) -> Result<SceneTracker<C, E>> {
        // The loop may already be gone; the join below reports what happened
        let _ = self.shutdown.send(true);
        self.task
            .await
            .map_err(|e| Error::FrameLoop(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;
    use crate::sim::{SceneStack, SimContainer, SimScene, Viewport};
    use crate::tracker::TrackerOptions;

    fn story(enters: &Arc<Mutex<Vec<usize>>>) -> (Viewport, SceneTracker<SimContainer, SimScene>) {
        let viewport = Viewport::new(0.0, 200.0);
        let scenes = SceneStack::new(&viewport)
            .gap(40.0)
            .scene("one", 200.0)
            .scene("two", 200.0)
            .gap(300.0)
            .build();
        let enters = enters.clone();
        let tracker = SceneTracker::new(
            TrackerOptions::new()
                .container(SimContainer::new(viewport.clone()))
                .scenes(scenes)
                .on_enter(move |e| enters.lock().unwrap().push(e.scene)),
        )
        .unwrap();
        (viewport, tracker)
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_tracks_scrolling() {
        let enters = Arc::new(Mutex::new(Vec::new()));
        let (viewport, tracker) = story(&enters);
        let handle = FrameLoop::new(tracker).spawn();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(handle.snapshot().active, ActiveScene::Active(0));

        viewport.scroll_to(150.0);
        tokio::time::sleep(Duration::from_millis(50)).await;
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.active, ActiveScene::Active(1));
        assert_eq!(snapshot.frame_count, 2);

        let tracker = handle.stop().await.unwrap();
        assert_eq!(tracker.frame_count(), 2);
        assert_eq!(*enters.lock().unwrap(), vec![0, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_through_handle() {
        let enters = Arc::new(Mutex::new(Vec::new()));
        let (_viewport, tracker) = story(&enters);
        let mut handle = FrameLoop::new(tracker).spawn();

        let first = handle.changed().await.unwrap();
        assert_eq!(first.frame_count, 1);

        handle.refresh().unwrap();
        let refreshed = handle.changed().await.unwrap();
        assert_eq!(refreshed.active, ActiveScene::Active(0));
        assert_eq!(refreshed.frame_count, 2);
        assert_eq!(*enters.lock().unwrap(), vec![0, 0]);

        handle.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_loop_runs_no_more_frames() {
        let enters = Arc::new(Mutex::new(Vec::new()));
        let (viewport, tracker) = story(&enters);
        let handle = FrameLoop::new(tracker).spawn();

        tokio::time::sleep(Duration::from_millis(20)).await;
        let tracker = handle.stop().await.unwrap();
        let count = tracker.frame_count();

        viewport.scroll_to(150.0);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(tracker.frame_count(), count);
        assert_eq!(*enters.lock().unwrap(), vec![0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_shutdown_sender_stops_run() {
        let enters = Arc::new(Mutex::new(Vec::new()));
        let (_viewport, tracker) = story(&enters);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(FrameLoop::new(tracker).run(shutdown_rx));

        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(shutdown_tx);
        let tracker = task.await.unwrap();
        assert_eq!(tracker.active_scene_index(), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_after_stop_fails() {
        let enters = Arc::new(Mutex::new(Vec::new()));
        let (_viewport, tracker) = story(&enters);
        let (shutdown_tx, shutdown_rx) = watch::channel(true);
        let tracker = FrameLoop::new(tracker).run(shutdown_rx).await;
        drop(shutdown_tx);
        assert_eq!(tracker.frame_count(), 0);

        let handle = FrameLoop::new(tracker).spawn();
        handle.shutdown.send(true).unwrap();
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(!handle.is_running());
        assert!(matches!(handle.refresh(), Err(Error::FrameLoop(_))));
    }
}
