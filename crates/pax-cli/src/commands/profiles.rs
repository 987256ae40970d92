use std::path::Path;

use anyhow::Result;

use pax_core::AppConfig;

pub fn run(config: &AppConfig, path: &Path) -> Result<()> {
    let (scene, engine) = super::load(config, path)?;
    let profiles = engine.profiles();

    if profiles.is_empty() {
        println!("No moving elements.");
        println!("\nMark an element with the `pax` class, e.g.:");
        println!("  classes = [\"pax\", \"start--0.2\", \"end--0.8\", \"endy---0.5\"]");
        return Ok(());
    }

    let state = engine.state();
    println!(
        "Moving elements ({}), basis {}, precision {}:\n",
        profiles.len(),
        state.basis,
        state.precision
    );

    for profile in profiles {
        println!(
            "  {} (container {})",
            scene.label(profile.element),
            scene.label(profile.container)
        );
        println!(
            "    start: {} -> ({}, {})",
            profile.start.progress, profile.start.offset.x, profile.start.offset.y
        );
        println!(
            "    end:   {} -> ({}, {})",
            profile.end.progress, profile.end.offset.x, profile.end.offset.y
        );
        println!("    size:  {}", profile.sizing_basis.as_str());
        if let Some(factor) = profile.background_factor {
            println!("    bg:    {}", factor);
        }
        println!();
    }

    Ok(())
}
