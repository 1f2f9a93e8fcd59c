/// Pan Module - smoothing of the host's pan target
pub mod pan_data;
pub mod pan_operations;

pub use pan_data::PanData;
pub use pan_operations::{create_pan, pan_translation, set_pan_target, update_pan};
