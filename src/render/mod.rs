/// Render Module - the seam between the engine and the host renderer
pub mod render_data;
pub mod render_interface;
pub mod render_operations;

pub use render_data::{DrawableId, DrawableRegistry};
pub use render_interface::{NullSink, RenderSink, ScreenProjector};

pub use render_operations::{
    attach_drawable, attached_count, create_registry, detach_drawable, drawable_for,
    photo_index,
};
