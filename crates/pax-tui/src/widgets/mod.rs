mod scene_view;
mod status_bar;

pub use scene_view::{Projection, SceneWidget};
pub use status_bar::StatusBarWidget;
