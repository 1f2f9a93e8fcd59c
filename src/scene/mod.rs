/// Scene Module - explicit engine state and the per-frame tick
pub mod scene_data;
pub mod scene_operations;

pub use scene_data::{FrameContext, FrameReport, SceneInputs, SceneState, SceneStats};

pub use scene_operations::{
    attach_photo_drawable, close_selection, create_scene, detach_photo_drawable,
    log_scene_context, photo, resize_viewport, reveal_timer_task, scene_stats, selected_photo,
    tick,
};
