//! Field Operations - Pure DOP Functions
//!
//! Builds the chaos and tree layouts once at startup. Everything here is a
//! function of the config and a seeded `StdRng`, so the same seed always
//! produces the same field.

use super::field_data::{
    FieldConfig, FieldData, ParticleCategoryData, ParticleKind, PhotoElementData, PhotoId,
};
use crate::constants::layout;
use crate::imagery::TextureState;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

// ============================================================================
// FIELD
// ============================================================================

/// Generate every category from the configured seed
pub fn generate_field(config: &FieldConfig) -> FieldData {
    let mut rng = StdRng::seed_from_u64(config.seed);

    let foliage = generate_foliage(&mut rng, config);
    let lights = generate_lights(&mut rng, config);
    let photos = generate_photos(&mut rng, config);

    log::info!(
        "[Field] Generated seed={} foliage={} lights={} photos={}",
        config.seed,
        foliage.chaos_positions.len(),
        lights.chaos_positions.len(),
        photos.len()
    );

    FieldData {
        seed: config.seed,
        foliage,
        lights,
        photos,
    }
}

/// Foliage fills the cone volume
pub fn generate_foliage(rng: &mut StdRng, config: &FieldConfig) -> ParticleCategoryData {
    let count = config.foliage_count;
    let mut chaos_positions = Vec::with_capacity(count);
    let mut tree_positions = Vec::with_capacity(count);
    let mut sizes = Vec::with_capacity(count);

    for _ in 0..count {
        chaos_positions.push(random_point_in_sphere(rng, config.chaos_radius));
        tree_positions.push(cone_helix_point(rng, config, false));
        sizes.push(rng.gen_range(0.05..0.2));
    }

    ParticleCategoryData {
        kind: ParticleKind::Foliage,
        chaos_positions,
        tree_positions,
        sizes,
        palette_indices: Vec::new(),
    }
}

/// Lights hang on the cone surface
pub fn generate_lights(rng: &mut StdRng, config: &FieldConfig) -> ParticleCategoryData {
    let count = config.light_count;
    let mut chaos_positions = Vec::with_capacity(count);
    let mut tree_positions = Vec::with_capacity(count);
    let mut sizes = Vec::with_capacity(count);
    let mut palette_indices = Vec::with_capacity(count);

    for _ in 0..count {
        chaos_positions.push(random_point_in_sphere(rng, config.chaos_radius));
        tree_positions.push(cone_helix_point(rng, config, true));
        sizes.push(rng.gen_range(0.15..0.35));
        palette_indices.push(rng.gen_range(0..layout::LIGHT_PALETTE_SIZE));
    }

    ParticleCategoryData {
        kind: ParticleKind::Lights,
        chaos_positions,
        tree_positions,
        sizes,
        palette_indices,
    }
}

/// Photos: spiral ribbon when formed, flattened Fibonacci shell when scattered
pub fn generate_photos(rng: &mut StdRng, config: &FieldConfig) -> Vec<PhotoElementData> {
    let count = config.photo_count;

    (0..count)
        .map(|index| {
            let (tree_position, tree_rotation) = photo_tree_placement(index, count);

            let shell_radius =
                rng.gen_range(layout::PHOTO_CHAOS_RADIUS_MIN..layout::PHOTO_CHAOS_RADIUS_MAX);
            let mut chaos_position = photo_chaos_direction(index, count) * shell_radius;
            chaos_position.y *= layout::PHOTO_CHAOS_Y_SQUASH;

            let chaos_rotation = Vec3::new(
                rng.gen_range(0.0..TAU),
                rng.gen_range(0.0..TAU),
                rng.gen_range(0.0..TAU),
            );

            PhotoElementData {
                id: photo_id(index),
                index,
                chaos_position,
                chaos_rotation,
                tree_position,
                tree_rotation,
                image_ref: primary_locator(&config.primary_url_template, index),
                texture_state: TextureState::Pending,
                reveal_eligible: false,
                world_position: chaos_position,
                world_rotation_y: chaos_rotation.y,
            }
        })
        .collect()
}

// ============================================================================
// LAYOUTS
// ============================================================================

/// Tree slot of the i-th of `count` photos: position and facing
///
/// Does not touch the random source, so it is identical for every seed.
pub fn photo_tree_placement(index: usize, count: usize) -> (Vec3, Vec3) {
    let t = if count > 1 {
        index as f32 / (count - 1) as f32
    } else {
        0.0
    };

    let half = layout::PHOTO_TREE_HEIGHT / 2.0;
    let height = t * layout::PHOTO_TREE_HEIGHT - half;
    let radius = (half - (height + half)) * layout::PHOTO_RADIUS_SLOPE + layout::PHOTO_RADIUS_MIN;
    let angle = t * layout::PHOTO_SPIRAL_ANGLE;

    let position = Vec3::new(radius * angle.cos(), height, radius * angle.sin());
    let rotation = Vec3::new(0.0, -angle + FRAC_PI_2, 0.0);
    (position, rotation)
}

/// Unit direction of the i-th golden-angle point on a sphere
pub fn photo_chaos_direction(index: usize, count: usize) -> Vec3 {
    let k = index as f32 + 0.5;
    let phi = (1.0 - 2.0 * k / count as f32).clamp(-1.0, 1.0).acos();
    let theta = PI * (1.0 + 5.0_f32.sqrt()) * k;

    Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin())
}

/// Uniform sample inside a ball
pub fn random_point_in_sphere(rng: &mut StdRng, radius: f32) -> Vec3 {
    let cos_theta: f32 = rng.gen_range(-1.0..=1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
    let phi = rng.gen_range(0.0..TAU);
    let r = radius * rng.gen::<f32>().cbrt();

    Vec3::new(r * sin_theta * phi.cos(), r * cos_theta, r * sin_theta * phi.sin())
}

/// Point on (or inside) the tapering helix cone
pub fn cone_helix_point(rng: &mut StdRng, config: &FieldConfig, on_surface: bool) -> Vec3 {
    let half = config.tree_half_height;
    let height = rng.gen_range(-half..=half);
    let t = (height + half) / (2.0 * half);

    let max_radius = cone_radius_at(config, t);
    let radius = if on_surface {
        max_radius
    } else {
        max_radius * rng.gen::<f32>().sqrt()
    };

    let jitter = config.helix_angle_jitter;
    let angle = height * config.helix_turns_per_unit + rng.gen_range(-jitter..=jitter);

    Vec3::new(radius * angle.cos(), height, radius * angle.sin())
}

/// Cone radius at normalized height `t` (0 = base, 1 = tip)
pub fn cone_radius_at(config: &FieldConfig, t: f32) -> f32 {
    config.tree_base_radius * (1.0 - t.clamp(0.0, 1.0))
}

// ============================================================================
// IDENTITY
// ============================================================================

pub fn photo_id(index: usize) -> PhotoId {
    PhotoId(format!("photo-{}", index))
}

/// Expand the primary locator template for a photo index
pub fn primary_locator(template: &str, index: usize) -> String {
    template.replace("{index}", &index.to_string())
}
