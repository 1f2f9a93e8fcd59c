//! Morph Data - Pure DOP
//!
//! NO METHODS. Just data.

use glam::Vec3;

/// Current ambient positions, rewritten in full every tick
///
/// Owned by the morph pass. Nothing else writes here and nothing reads a
/// slot before the pass of that tick has run.
#[derive(Debug, Clone, Default)]
pub struct MorphBuffers {
    pub foliage: Vec<Vec3>,
    pub lights: Vec<Vec3>,
}

/// Interpolated photo placement in formation space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoTransform {
    pub position: Vec3,
    pub rotation_y: f32,
}
