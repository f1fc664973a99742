//! Scene description for the solar-system viewer: celestial-body descriptors
//! and the per-frame model-transform composition they drive.

pub mod bodies;
pub mod compose;

pub use bodies::*;
pub use compose::*;
