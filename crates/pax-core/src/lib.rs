//! Scroll-driven parallax engine.
//!
//! Per frame, for every tracked element:
//! 1. `metric` measures scroll progress (page or container visibility)
//! 2. `resolver` maps progress to a target offset between two breakpoints
//! 3. `smoother` eases the rendered position toward that target
//! 4. `engine` emits the result through a `host::StyleSink`
//!
//! `frame_loop` runs the engine on a tokio interval; `scene` is an in-memory
//! host used by the CLI, the terminal preview and the tests.

pub mod config;
pub mod engine;
pub mod error;
pub mod frame_loop;
pub mod geometry;
pub mod host;
pub mod metric;
pub mod profile;
pub mod resolver;
pub mod scene;
pub mod smoother;

pub use config::{AppConfig, EngineConfig, EngineSettings, PrecisionSetting, ScrollBasis};
pub use engine::{ElementUpdate, Engine, Frame, ScrollState};
pub use error::{Error, Result};
pub use frame_loop::{FrameEvent, FrameLoop, FrameLoopHandle};
pub use geometry::{Breakpoint, Offset2D, Size};
pub use host::{BackgroundStyle, Document, Layout, StyleSink};
pub use profile::{ElementProfile, MotionSpec, SizingBasis};
pub use scene::{NodeId, Scene};
