/// Morph Module - per-tick interpolation between chaos and tree layouts
pub mod morph_data;
pub mod morph_operations;

pub use morph_data::{MorphBuffers, PhotoTransform};

pub use morph_operations::{
    create_morph_buffers, lerp, morph_ambient, photo_transform, publish_frame, run_morph_pass,
    spin_down_angle,
};
