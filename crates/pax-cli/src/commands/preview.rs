use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::{mpsc, Mutex};

use pax_core::{AppConfig, FrameEvent, FrameLoop, FrameLoopHandle};
use pax_tui::{
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    widgets::{SceneWidget, StatusBarWidget},
    App,
};

pub async fn run(config: AppConfig, path: &Path) -> Result<()> {
    let (scene, engine) = super::load(&config, path)?;
    let scene = Arc::new(Mutex::new(scene));

    // Frame loop ticks the shared scene in the background
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<FrameEvent>();
    let handle = FrameLoop::new(engine, scene.clone())
        .with_frame_interval(config.preview.frame_interval())
        .with_event_sender(event_tx)
        .spawn();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("pax"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(scene, &config.preview);
    let event_handler = EventHandler::new(config.preview.frame_interval());

    let result = event_loop(&mut terminal, &mut app, &event_handler, &mut event_rx).await;
    let restored = restore_terminal(&mut terminal);

    finish(handle, restored).await?;
    result
}

fn restore_terminal<B>(terminal: &mut Terminal<B>) -> Result<()>
where
    B: Backend + io::Write,
{
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Stop the frame loop whether or not the terminal came back cleanly,
/// then report the restore outcome
async fn finish<N: Clone + PartialEq + std::fmt::Debug>(handle: FrameLoopHandle<N>, restored: Result<()>) -> Result<()> {
    let engine = handle.stop().await?;
    tracing::info!("Preview closed after {} frames", engine.frames());
    restored
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
    event_rx: &mut mpsc::UnboundedReceiver<FrameEvent>,
) -> Result<()> {
    loop {
        // Process frame notifications (non-blocking)
        while let Ok(event) = event_rx.try_recv() {
            app.handle_frame_event(event);
        }

        {
            let scene = app.scene.lock().await;
            let px_per_column = app.px_per_column;
            let frames = app.frames;
            terminal.draw(|frame| {
                let layout = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(1), Constraint::Length(1)])
                    .split(frame.area());

                SceneWidget::render(frame, layout[0], &scene, px_per_column);
                StatusBarWidget::render(frame, layout[1], &scene, frames);
            })?;
        }

        if let Some(event) = event_handler.next()? {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key);
                    app.handle_action(action).await;
                }
                // Redrawn on the next iteration
                AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use pax_core::{Engine, EngineConfig, Scene};

    #[tokio::test]
    async fn test_finish_stops_loop_when_restore_fails() {
        let scene = Scene::from_toml_str(
            r##"
            [[nodes]]
            id = "box"
            classes = ["pax", "end--1", "endx--1"]
            width = 100
            height = 100
            "##,
        )
        .unwrap();
        let engine = Engine::init(&EngineConfig::default(), &scene).unwrap();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let handle = FrameLoop::new(engine, Arc::new(Mutex::new(scene)))
            .with_event_sender(event_tx)
            .spawn();

        let err = finish(handle, Err(anyhow!("terminal gone")))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "terminal gone");

        let mut stopped = false;
        while let Ok(event) = event_rx.try_recv() {
            stopped |= matches!(event, FrameEvent::Stopped { .. });
        }
        assert!(stopped);
    }
}
