//! Pan Operations
//!
//! A fixed per-tick lerp. It is frame-rate dependent, which is fine for the
//! small offsets a pan gesture produces.

use super::pan_data::PanData;
use glam::{Vec2, Vec3};

pub fn create_pan(smoothing: f32) -> PanData {
    PanData {
        target: Vec2::ZERO,
        current: Vec2::ZERO,
        smoothing: smoothing.clamp(0.0, 1.0),
    }
}

pub fn set_pan_target(pan: &mut PanData, target: Vec2) {
    if target.is_finite() {
        pan.target = target;
    }
}

/// `current = lerp(current, target, smoothing)`
pub fn update_pan(pan: &mut PanData) {
    pan.current = pan.current.lerp(pan.target, pan.smoothing);
}

/// Parent-frame translation for the whole formation
pub fn pan_translation(pan: &PanData) -> Vec3 {
    pan.current.extend(0.0)
}
