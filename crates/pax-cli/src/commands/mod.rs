pub mod init_config;
pub mod preview;
pub mod profiles;
pub mod query;
pub mod simulate;

use std::path::Path;

use anyhow::{Context, Result};

use pax_core::{AppConfig, Engine, NodeId, Scene};

/// Load a scene and discover its moving elements
pub fn load(config: &AppConfig, path: &Path) -> Result<(Scene, Engine<NodeId>)> {
    let scene = Scene::load(path)
        .with_context(|| format!("Failed to load scene {}", path.display()))?;
    let engine = Engine::init(&config.engine, &scene)?;
    Ok((scene, engine))
}
