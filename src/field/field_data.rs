//! Field Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in field_operations.rs

use crate::constants::{counts, imagery, layout};
use crate::imagery::TextureState;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a photo element, e.g. `photo-7`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PhotoId(pub String);

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ambient particle categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Foliage,
    Lights,
}

/// Chaos and tree layouts for one ambient category (SoA)
#[derive(Debug, Clone)]
pub struct ParticleCategoryData {
    pub kind: ParticleKind,
    pub chaos_positions: Vec<Vec3>,
    pub tree_positions: Vec<Vec3>,
    pub sizes: Vec<f32>,
    /// Palette slot per particle (lights only, empty for foliage)
    pub palette_indices: Vec<u8>,
}

/// A photograph embedded in the field
#[derive(Debug, Clone)]
pub struct PhotoElementData {
    pub id: PhotoId,
    pub index: usize,

    // Fixed at generation
    pub chaos_position: Vec3,
    pub chaos_rotation: Vec3,
    pub tree_position: Vec3,
    pub tree_rotation: Vec3,
    pub image_ref: String,

    // Written by the imagery controller only
    pub texture_state: TextureState,
    pub reveal_eligible: bool,

    // Written by the morph pass every tick
    pub world_position: Vec3,
    pub world_rotation_y: f32,
}

/// Everything the generator produces
#[derive(Debug, Clone)]
pub struct FieldData {
    pub seed: u64,
    pub foliage: ParticleCategoryData,
    pub lights: ParticleCategoryData,
    pub photos: Vec<PhotoElementData>,
}

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub seed: u64,
    pub foliage_count: usize,
    pub light_count: usize,
    pub photo_count: usize,
    pub chaos_radius: f32,
    pub tree_half_height: f32,
    pub tree_base_radius: f32,
    pub helix_turns_per_unit: f32,
    pub helix_angle_jitter: f32,
    /// `{index}` is replaced by the photo index
    pub primary_url_template: String,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            seed: counts::DEFAULT_SEED,
            foliage_count: counts::FOLIAGE_COUNT,
            light_count: counts::LIGHT_COUNT,
            photo_count: counts::PHOTO_COUNT,
            chaos_radius: layout::CHAOS_SPHERE_RADIUS,
            tree_half_height: layout::TREE_HALF_HEIGHT,
            tree_base_radius: layout::TREE_BASE_RADIUS,
            helix_turns_per_unit: layout::HELIX_TURNS_PER_UNIT,
            helix_angle_jitter: layout::HELIX_ANGLE_JITTER,
            primary_url_template: imagery::PRIMARY_URL_TEMPLATE.to_string(),
        }
    }
}
