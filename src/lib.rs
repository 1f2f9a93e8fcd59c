// Arbor Engine - Data-Oriented Programming (DOP) Architecture
//
// A particle and photo field that morphs between a scattered sphere and a
// cone-shaped tree. State lives in plain data structs; behavior lives in
// *_operations modules as free functions over that data.
//
// For new code, prefer:
// - scene::tick for driving a frame
// - field_operations for layout generation
// - morph_operations for per-frame positions
// - Pure functions over methods

// Constants module
pub mod constants;

// Core engine modules
pub mod config;
pub mod error;

// Layout and motion
pub mod field;
pub mod morph;
pub mod pan;
pub mod transition;

// Interaction and imagery
pub mod imagery;
pub mod selection;

// Host seams
pub mod camera;
pub mod render;

// Frame orchestration
pub mod scene;

pub use camera::{CameraConfig, CameraData};
pub use config::{load_config, parse_config, SceneConfig};
pub use error::{ArborError, ArborResult, OptionExt};
pub use field::{FieldConfig, FieldData, ParticleKind, PhotoElementData, PhotoId};
pub use imagery::{
    FetchError, FileFetcher, ImageFetcher, ImageryConfig, RevealDriver, TextureState,
};
pub use render::{DrawableId, NullSink, RenderSink, ScreenProjector};
pub use scene::{
    attach_photo_drawable, close_selection, create_scene, detach_photo_drawable,
    log_scene_context, photo, resize_viewport, reveal_timer_task, scene_stats, selected_photo,
    tick, FrameContext, FrameReport, SceneInputs, SceneState, SceneStats,
};
pub use selection::{SelectionConfig, SelectionOutcome};
pub use transition::{MotionConfig, TargetMode};
