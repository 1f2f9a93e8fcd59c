//! Pan Data - Pure DOP
//!
//! NO METHODS. Just data.

use glam::Vec2;

/// Smoothed offset of the formation's parent frame
#[derive(Debug, Clone, Copy, Default)]
pub struct PanData {
    /// Set by the host
    pub target: Vec2,
    /// Owned by the pan smoother
    pub current: Vec2,
    pub smoothing: f32,
}
