use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pax_core::{AppConfig, PrecisionSetting};

mod commands;

#[derive(Parser)]
#[command(name = "pax")]
#[command(author, version, about = "Scroll-driven parallax engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ~/.config/pax/config.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Override engine.base_percentage_on ("containerVisibility" or "pageScroll")
    #[arg(long, global = true)]
    basis: Option<String>,

    /// Override engine.decimal_precision
    #[arg(long, global = true)]
    precision: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep the scroll offset and print every frame
    Simulate {
        /// Scene file (.toml or .json)
        scene: PathBuf,
        /// First scroll offset in pixels
        #[arg(long, default_value_t = 0.0)]
        from: f64,
        /// Last scroll offset in pixels (defaults to the bottom of the page)
        #[arg(long)]
        to: Option<f64>,
        /// Pixels between samples
        #[arg(long, default_value_t = 100.0)]
        step: f64,
        /// Frames ticked at each sample
        #[arg(short = 'n', long, default_value_t = 1)]
        frames: u32,
        /// Print one JSON object per sample
        #[arg(long)]
        json: bool,
    },
    /// Print scroll progress of the page or of one element
    Query {
        /// Scene file (.toml or .json)
        scene: PathBuf,
        /// `#id` or `.class` of a tracked element
        selector: Option<String>,
        /// Scroll to this offset first
        #[arg(long)]
        scroll: Option<f64>,
    },
    /// List the elements the engine tracks
    Profiles {
        /// Scene file (.toml or .json)
        scene: PathBuf,
    },
    /// Scroll through a scene in the terminal
    Preview {
        /// Scene file (.toml or .json)
        scene: PathBuf,
    },
    /// Write the default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(basis) = cli.basis {
        config.engine.base_percentage_on = basis;
    }
    if let Some(precision) = cli.precision {
        config.engine.decimal_precision = PrecisionSetting::Text(precision);
    }

    // Initialize logging; stderr keeps stdout clean for simulate/query output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Simulate {
            scene,
            from,
            to,
            step,
            frames,
            json,
        } => commands::simulate::run(
            &config,
            &scene,
            commands::simulate::Sweep {
                from,
                to,
                step,
                frames,
                json,
            },
        ),
        Commands::Query {
            scene,
            selector,
            scroll,
        } => commands::query::run(&config, &scene, selector.as_deref(), scroll),
        Commands::Profiles { scene } => commands::profiles::run(&config, &scene),
        Commands::Preview { scene } => commands::preview::run(config, &scene).await,
        Commands::InitConfig { force } => commands::init_config::run(&config, force),
    }
}
