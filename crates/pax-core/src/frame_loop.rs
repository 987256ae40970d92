use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::engine::Engine;
use crate::host::StyleSink;

/// Default frame interval (~60fps)
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Events emitted by the frame loop
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    /// A frame was computed and applied
    Rendered { index: u64, updated: usize },
    /// The loop exited
    Stopped { frames: u64 },
}

/// Drives an [`Engine`] from a periodic clock.
///
/// The host is shared so that other tasks (input handling, drawing) can
/// scroll it and read its styles between frames.
pub struct FrameLoop<H: StyleSink> {
    engine: Engine<H::Node>,
    host: Arc<Mutex<H>>,
    frame_interval: Duration,
    event_tx: Option<mpsc::UnboundedSender<FrameEvent>>,
}

impl<H: StyleSink> FrameLoop<H> {
    pub fn new(engine: Engine<H::Node>, host: Arc<Mutex<H>>) -> Self {
        Self {
            engine,
            host,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            event_tx: None,
        }
    }

    /// Set the interval between frames; zero falls back to the default
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = if interval.is_zero() {
            DEFAULT_FRAME_INTERVAL
        } else {
            interval
        };
        self
    }

    /// Set the event sender for frame notifications
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<FrameEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    fn send_event(&self, event: FrameEvent) {
        if let Some(ref tx) = self.event_tx {
            if tx.send(event).is_err() {
                debug!("Frame event dropped: receiver closed");
            }
        }
    }

    /// Tick until the shutdown signal fires, then hand the engine back
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> Engine<H::Node> {
        info!(
            "Frame loop started: interval={}ms, elements={}",
            self.frame_interval.as_millis(),
            self.engine.profiles().len()
        );

        let mut interval = tokio::time::interval(self.frame_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() {
                        warn!("Frame loop shutdown sender dropped, stopping");
                        break;
                    }
                    if *shutdown.borrow() {
                        info!("Frame loop received shutdown signal");
                        break;
                    }
                }

                _ = interval.tick() => {
                    let frame = {
                        let mut host = self.host.lock().await;
                        self.engine.tick(&mut *host)
                    };
                    self.send_event(FrameEvent::Rendered {
                        index: frame.index,
                        updated: frame.updates.len(),
                    });
                }
            }
        }

        let frames = self.engine.frames();
        info!("Frame loop stopped after {} frames", frames);
        self.send_event(FrameEvent::Stopped { frames });
        self.engine
    }

    /// Start ticking on a background task
    pub fn spawn(self) -> FrameLoopHandle<H::Node>
    where
        H: Send + 'static,
        H::Node: Send + 'static,
    {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let join = tokio::spawn(self.run(shutdown_rx));
        FrameLoopHandle {
            shutdown: shutdown_tx,
            join,
        }
    }
}

/// Handle to a spawned [`FrameLoop`]
pub struct FrameLoopHandle<N> {
    shutdown: watch::Sender<bool>,
    join: JoinHandle<Engine<N>>,
}

impl<N> FrameLoopHandle<N> {
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Stop ticking and take the engine back for teardown or re-initialization
    pub async fn stop(self) -> crate::Result<Engine<N>> {
        // The loop may already have exited; the join below reports that
        let _ = self.shutdown.send(true);
        self.join
            .await
            .map_err(|e| crate::Error::FrameLoop(e.to_string()))
    }
}
