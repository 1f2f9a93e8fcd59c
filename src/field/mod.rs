/// Field Module - Data-Oriented Programming (DOP) style
///
/// - field_data.rs: layouts and photo records, NO methods
/// - field_operations.rs: seeded generators
pub mod field_data;
pub mod field_operations;

pub use field_data::{
    FieldConfig, FieldData, ParticleCategoryData, ParticleKind, PhotoElementData, PhotoId,
};

pub use field_operations::{
    cone_helix_point, generate_field, generate_foliage, generate_lights, generate_photos,
    photo_chaos_direction, photo_id, photo_tree_placement, primary_locator,
    random_point_in_sphere,
};
