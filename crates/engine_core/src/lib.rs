//! Core types shared across the viewer: frame timing and math re-exports.

pub mod time;

pub use time::*;

// Re-export commonly used math types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
