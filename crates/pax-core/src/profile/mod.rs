mod decode;
mod models;
mod registry;

pub use decode::{leading_float, ACTIVATION_MARKER};
pub use models::*;
pub use registry::ProfileRegistry;
