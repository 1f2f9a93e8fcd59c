//! Morph Operations - Pure DOP Functions
//!
//! Ambient particles lerp straight between layouts. Photos are re-derived in
//! polar form every tick: their angle carries an extra `(1 - ease) * 10`
//! radians that winds down to zero as the tree assembles, so they spiral
//! into place instead of sliding. Both paths are pure functions of the
//! layouts, the ease value and the rotation accumulator, so no error builds
//! up across frames.

use super::morph_data::{MorphBuffers, PhotoTransform};
use crate::constants::motion::SPIN_DOWN_ANGLE;
use crate::field::{FieldData, ParticleKind};
use crate::render::{drawable_for, DrawableRegistry, RenderSink};
use glam::Vec3;
use std::f64::consts::FRAC_PI_2;

/// Buffers sized to the field and seeded with the chaos layout
pub fn create_morph_buffers(field: &FieldData) -> MorphBuffers {
    MorphBuffers {
        foliage: field.foliage.chaos_positions.clone(),
        lights: field.lights.chaos_positions.clone(),
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// `out[i] = lerp(chaos[i], tree[i], ease)` for every particle
pub fn morph_ambient(chaos: &[Vec3], tree: &[Vec3], ease: f32, out: &mut [Vec3]) {
    debug_assert_eq!(chaos.len(), tree.len());
    debug_assert_eq!(chaos.len(), out.len());

    for ((current, from), to) in out.iter_mut().zip(chaos).zip(tree) {
        *current = from.lerp(*to, ease);
    }
}

/// Formed-state angle including the spin-down term
///
/// Evaluated in f64: the accumulator grows for the whole session.
#[inline]
pub fn spin_down_angle(target_angle: f32, ease: f32, rotation_accumulator: f64) -> f64 {
    f64::from(target_angle) + f64::from((1.0 - ease) * SPIN_DOWN_ANGLE) + rotation_accumulator
}

/// Photo placement for the given ease and accumulated rotation
pub fn photo_transform(
    chaos_position: Vec3,
    chaos_rotation_y: f32,
    tree_position: Vec3,
    ease: f32,
    rotation_accumulator: f64,
) -> PhotoTransform {
    let target_angle = tree_position.z.atan2(tree_position.x);
    let angle = spin_down_angle(target_angle, ease, rotation_accumulator);
    let (sin, cos) = angle.sin_cos();

    let chaos_radius = chaos_position.x.hypot(chaos_position.z);
    let tree_radius = tree_position.x.hypot(tree_position.z);
    let radius = lerp(chaos_radius, tree_radius, ease);

    let position = Vec3::new(
        lerp(chaos_position.x, radius * cos as f32, ease),
        lerp(chaos_position.y, tree_position.y, ease),
        lerp(chaos_position.z, radius * sin as f32, ease),
    );

    let from = f64::from(chaos_rotation_y);
    let to = FRAC_PI_2 - angle;
    PhotoTransform {
        position,
        rotation_y: (from + (to - from) * f64::from(ease)) as f32,
    }
}

/// Recompute every current position and photo transform
pub fn run_morph_pass(
    field: &mut FieldData,
    buffers: &mut MorphBuffers,
    ease: f32,
    rotation_accumulator: f64,
) {
    morph_ambient(
        &field.foliage.chaos_positions,
        &field.foliage.tree_positions,
        ease,
        &mut buffers.foliage,
    );
    morph_ambient(
        &field.lights.chaos_positions,
        &field.lights.tree_positions,
        ease,
        &mut buffers.lights,
    );

    for photo in &mut field.photos {
        let transform = photo_transform(
            photo.chaos_position,
            photo.chaos_rotation.y,
            photo.tree_position,
            ease,
            rotation_accumulator,
        );
        photo.world_position = transform.position;
        photo.world_rotation_y = transform.rotation_y;
    }
}

/// Push the last morph pass to the renderer
///
/// `offset` is the formation's parent translation (pan). Photos without an
/// attached drawable are skipped; returns how many were pushed.
pub fn publish_frame(
    field: &FieldData,
    buffers: &MorphBuffers,
    registry: &DrawableRegistry,
    sink: &mut dyn RenderSink,
    offset: Vec3,
) -> usize {
    sink.set_particle_positions(ParticleKind::Foliage, &buffers.foliage, offset);
    sink.set_particle_positions(ParticleKind::Lights, &buffers.lights, offset);

    let mut published = 0;
    for photo in &field.photos {
        let Some(drawable) = drawable_for(registry, photo.index) else {
            continue;
        };
        sink.set_world_transform(drawable, photo.world_position + offset, photo.world_rotation_y);
        published += 1;
    }
    published
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{generate_field, FieldConfig};
    use crate::render::{attach_drawable, create_registry, DrawableId};
    use image::DynamicImage;

    fn field() -> FieldData {
        generate_field(&FieldConfig {
            seed: 17,
            foliage_count: 200,
            light_count: 20,
            photo_count: 31,
            ..Default::default()
        })
    }

    #[derive(Default)]
    struct RecordingSink {
        transforms: Vec<(DrawableId, Vec3, f32)>,
        particle_batches: usize,
    }

    impl RenderSink for RecordingSink {
        fn set_world_transform(&mut self, drawable: DrawableId, position: Vec3, rotation_y: f32) {
            self.transforms.push((drawable, position, rotation_y));
        }

        fn set_particle_positions(&mut self, _kind: ParticleKind, _positions: &[Vec3], _offset: Vec3) {
            self.particle_batches += 1;
        }

        fn bind_image(&mut self, _drawable: DrawableId, _image: &DynamicImage) {}

        fn bind_placeholder(&mut self, _drawable: DrawableId, _color: [f32; 4]) {}
    }

    #[test]
    fn test_ambient_endpoints() {
        let field = field();
        let mut buffers = create_morph_buffers(&field);

        morph_ambient(
            &field.foliage.chaos_positions,
            &field.foliage.tree_positions,
            0.0,
            &mut buffers.foliage,
        );
        assert_eq!(buffers.foliage, field.foliage.chaos_positions);

        morph_ambient(
            &field.foliage.chaos_positions,
            &field.foliage.tree_positions,
            1.0,
            &mut buffers.foliage,
        );
        for (current, tree) in buffers.foliage.iter().zip(&field.foliage.tree_positions) {
            assert!(current.distance(*tree) < 1e-4);
        }
    }

    #[test]
    fn test_photo_at_zero_ease_sits_in_chaos() {
        let field = field();
        for photo in &field.photos {
            let t = photo_transform(
                photo.chaos_position,
                photo.chaos_rotation.y,
                photo.tree_position,
                0.0,
                3.7,
            );
            assert!(t.position.distance(photo.chaos_position) < 1e-5);
            assert!((t.rotation_y - photo.chaos_rotation.y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_photo_at_full_ease_reaches_tree() {
        let field = field();
        for photo in &field.photos {
            let t = photo_transform(
                photo.chaos_position,
                photo.chaos_rotation.y,
                photo.tree_position,
                1.0,
                0.0,
            );
            assert!(t.position.distance(photo.tree_position) < 1e-4);

            let expected =
                -photo.tree_position.z.atan2(photo.tree_position.x) + std::f32::consts::FRAC_PI_2;
            assert!((t.rotation_y - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_full_ease_rotates_with_accumulator() {
        let tree = Vec3::new(3.0, 1.0, 0.0);
        let t = photo_transform(Vec3::new(10.0, 0.0, 2.0), 0.4, tree, 1.0, FRAC_PI_2);

        // a quarter turn moves +x onto +z, height untouched
        assert!(t.position.distance(Vec3::new(0.0, 1.0, 3.0)) < 1e-5);
    }

    #[test]
    fn test_spin_down_term_decays() {
        let full = f64::from(SPIN_DOWN_ANGLE);
        assert!((spin_down_angle(0.0, 0.0, 0.0) - full).abs() < 1e-6);
        assert!((spin_down_angle(0.0, 0.5, 0.0) - full / 2.0).abs() < 1e-6);
        assert_eq!(spin_down_angle(1.25, 1.0, 0.5), 1.75);
    }

    #[test]
    fn test_long_session_rotation_stays_smooth() {
        let tree = Vec3::new(4.0, 0.0, 0.0);
        let step = 0.3 / 60.0;
        let mut accumulator = 20_000.0_f64;
        let mut previous = photo_transform(Vec3::ZERO, 0.0, tree, 1.0, accumulator).position;

        // each frame advances the photo along its circle by radius * step
        for _ in 0..120 {
            accumulator += step;
            let current = photo_transform(Vec3::ZERO, 0.0, tree, 1.0, accumulator).position;
            let travelled = current.distance(previous);
            assert!((travelled - 4.0 * step as f32).abs() < 4.0 * step as f32 * 0.01);
            previous = current;
        }
    }

    #[test]
    fn test_morph_pass_writes_photos() {
        let mut field = field();
        let mut buffers = create_morph_buffers(&field);
        run_morph_pass(&mut field, &mut buffers, 1.0, 0.0);

        for photo in &field.photos {
            assert!((photo.world_position.y - photo.tree_position.y).abs() < 1e-5);
        }
    }

    #[test]
    fn test_publish_skips_detached_photos() {
        let field = field();
        let buffers = create_morph_buffers(&field);
        let mut registry = create_registry(&field.photos);
        attach_drawable(&mut registry, &field.photos[3].id, DrawableId(30)).expect("attach");

        let mut sink = RecordingSink::default();
        let offset = Vec3::new(1.0, -2.0, 0.0);
        let published = publish_frame(&field, &buffers, &registry, &mut sink, offset);

        assert_eq!(published, 1);
        assert_eq!(sink.particle_batches, 2);
        let (drawable, position, _) = sink.transforms[0];
        assert_eq!(drawable, DrawableId(30));
        assert!(position.distance(field.photos[3].world_position + offset) < 1e-6);
    }
}
