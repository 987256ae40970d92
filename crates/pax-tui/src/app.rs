use std::sync::Arc;

use pax_core::config::PreviewConfig;
use pax_core::{FrameEvent, Scene};
use tokio::sync::Mutex;
use tracing::debug;

use crate::input::Action;

/// Preview state shared between input handling and drawing
pub struct App {
    /// Scene also ticked by the frame loop
    pub scene: Arc<Mutex<Scene>>,
    /// Pixels scrolled per j/k
    pub scroll_step: f64,
    /// Scene pixels per terminal column
    pub px_per_column: f64,
    /// Index of the last frame the loop reported
    pub frames: u64,
    pub should_quit: bool,
}

impl App {
    pub fn new(scene: Arc<Mutex<Scene>>, config: &PreviewConfig) -> Self {
        Self {
            scene,
            scroll_step: config.scroll_step_px,
            px_per_column: config.px_per_column,
            frames: 0,
            should_quit: false,
        }
    }

    pub async fn handle_action(&mut self, action: Action) {
        let mut scene = self.scene.lock().await;
        let half_page = (scene.viewport_height() / 2.0).max(1.0);

        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => scene.scroll_by(self.scroll_step),
            Action::ScrollUp => scene.scroll_by(-self.scroll_step),
            Action::ScrollHalfPageDown => scene.scroll_by(half_page),
            Action::ScrollHalfPageUp => scene.scroll_by(-half_page),
            Action::JumpToTop => scene.scroll_to(0.0),
            Action::JumpToBottom => {
                let bottom = scene.max_scroll();
                scene.scroll_to(bottom);
            }
            Action::None => {}
        }
    }

    pub fn handle_frame_event(&mut self, event: FrameEvent) {
        match event {
            FrameEvent::Rendered { index, .. } => self.frames = index,
            FrameEvent::Stopped { frames } => {
                debug!("Frame loop stopped after {} frames, closing preview", frames);
                self.frames = frames;
                self.should_quit = true;
            }
        }
    }
}
