//! Host-facing render seams
//!
//! The engine never builds meshes or materials. It pushes transforms and
//! decoded images through [`RenderSink`] and asks a [`ScreenProjector`] where
//! things land on screen.

use super::render_data::DrawableId;
use crate::field::ParticleKind;
use glam::Vec3;
use image::DynamicImage;

/// Receives per-frame output from the engine
pub trait RenderSink {
    /// Place a photo drawable. `position` already includes the pan offset.
    fn set_world_transform(&mut self, drawable: DrawableId, position: Vec3, rotation_y: f32);

    /// Current positions for a whole ambient category, in formation space
    fn set_particle_positions(&mut self, kind: ParticleKind, positions: &[Vec3], offset: Vec3);

    fn bind_image(&mut self, drawable: DrawableId, image: &DynamicImage);

    /// Neutral surface for a drawable whose image could not be acquired
    fn bind_placeholder(&mut self, drawable: DrawableId, color: [f32; 4]);
}

/// World position -> (ndc x, ndc y, depth)
///
/// Depth is >= 1 for points behind the camera or past the far plane.
pub trait ScreenProjector {
    fn project_to_screen(&self, world_position: Vec3) -> Vec3;
}

/// Sink that drops everything, for headless stepping
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn set_world_transform(&mut self, _drawable: DrawableId, _position: Vec3, _rotation_y: f32) {}

    fn set_particle_positions(&mut self, _kind: ParticleKind, _positions: &[Vec3], _offset: Vec3) {}

    fn bind_image(&mut self, _drawable: DrawableId, _image: &DynamicImage) {}

    fn bind_placeholder(&mut self, _drawable: DrawableId, _color: [f32; 4]) {}
}
