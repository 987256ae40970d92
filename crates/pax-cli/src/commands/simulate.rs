use std::path::Path;

use anyhow::{bail, Result};
use serde::Serialize;

use pax_core::{AppConfig, BackgroundStyle, Offset2D};

/// Upper bound on samples in one sweep
const MAX_SAMPLES: f64 = 100_000.0;

/// Scroll offsets to visit and how to report them
pub struct Sweep {
    pub from: f64,
    pub to: Option<f64>,
    pub step: f64,
    pub frames: u32,
    pub json: bool,
}

#[derive(Serialize)]
struct Sample {
    scroll: f64,
    frame: u64,
    progress: f64,
    elements: Vec<ElementSample>,
}

#[derive(Serialize)]
struct ElementSample {
    element: String,
    progress: f64,
    target: Offset2D,
    current: Offset2D,
    #[serde(skip_serializing_if = "Option::is_none")]
    background: Option<BackgroundStyle>,
}

pub fn run(config: &AppConfig, path: &Path, sweep: Sweep) -> Result<()> {
    let (mut scene, mut engine) = super::load(config, path)?;
    let to = sweep.to.unwrap_or_else(|| scene.max_scroll());
    let from = sweep.from;
    let direction = if to >= from { 1.0 } else { -1.0 };
    let samples = sample_count(from, to, sweep.step)?;
    let frames = sweep.frames.max(1);

    for i in 0..=samples {
        let offset = from + direction * sweep.step * i as f64;
        let offset = if direction > 0.0 { offset.min(to) } else { offset.max(to) };
        scene.scroll_to(offset);

        let mut frame = engine.tick(&mut scene);
        for _ in 1..frames {
            frame = engine.tick(&mut scene);
        }

        let sample = Sample {
            scroll: scene.scroll_offset(),
            frame: frame.index,
            progress: engine.state().progress,
            elements: frame
                .updates
                .iter()
                .map(|update| ElementSample {
                    element: scene.label(update.element),
                    progress: update.progress,
                    target: update.target,
                    current: update.current,
                    background: update.background,
                })
                .collect(),
        };

        if sweep.json {
            println!("{}", serde_json::to_string(&sample)?);
        } else {
            print_sample(&sample);
        }
    }

    Ok(())
}

/// Number of steps between `from` and `to`, rejecting sweeps too long to finish
fn sample_count(from: f64, to: f64, step: f64) -> Result<u64> {
    if !(step.is_finite() && step > 0.0) {
        bail!("--step must be a positive number of pixels");
    }
    if !(from.is_finite() && to.is_finite()) {
        bail!("--from and --to must be finite");
    }

    let samples = ((to - from).abs() / step).ceil();
    if samples > MAX_SAMPLES {
        bail!(
            "sweep from {} to {} by {} needs {} samples, at most {} allowed",
            from,
            to,
            step,
            samples,
            MAX_SAMPLES
        );
    }
    Ok(samples as u64)
}

fn print_sample(sample: &Sample) {
    println!(
        "scroll {}px  frame {}  progress {:.4}",
        sample.scroll, sample.frame, sample.progress
    );
    for element in &sample.elements {
        let background = match element.background {
            Some(bg) => format!("  bg {} / {}", bg.position_css(), bg.size_css()),
            None => String::new(),
        };
        println!(
            "  {:<16} p={:.4}  target ({}, {})  current ({}, {}){}",
            element.element,
            element.progress,
            element.target.x,
            element.target.y,
            element.current.x,
            element.current.y,
            background
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_count() {
        assert_eq!(sample_count(0.0, 1000.0, 100.0).unwrap(), 10);
        assert_eq!(sample_count(1000.0, 0.0, 300.0).unwrap(), 4);
        assert_eq!(sample_count(50.0, 50.0, 10.0).unwrap(), 0);
    }

    #[test]
    fn test_sample_count_rejects_unbounded_sweeps() {
        assert!(sample_count(0.0, 1000.0, 1e-300).is_err());
        assert!(sample_count(0.0, f64::INFINITY, 100.0).is_err());
        assert!(sample_count(0.0, 1000.0, 0.0).is_err());
        assert!(sample_count(0.0, 1000.0, -5.0).is_err());
    }
}
