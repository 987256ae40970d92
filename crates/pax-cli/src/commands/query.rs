use std::path::Path;

use anyhow::Result;

use pax_core::AppConfig;

pub fn run(config: &AppConfig, path: &Path, selector: Option<&str>, scroll: Option<f64>) -> Result<()> {
    let (mut scene, engine) = super::load(config, path)?;
    if let Some(offset) = scroll {
        scene.scroll_to(offset);
    }

    match engine.scroll_percent(&scene, selector) {
        Some(progress) => println!("{}", progress),
        None => println!("false"),
    }

    Ok(())
}
