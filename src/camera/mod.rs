/// Camera Module - Data-Oriented Programming (DOP) style
///
/// - camera_data.rs: Pure data structures with NO methods
/// - camera_operations.rs: Pure functions that operate on data
///
/// `CameraData` also implements `ScreenProjector`, for hosts that let the
/// engine own the view.
pub mod camera_data;
pub mod camera_operations;

pub use camera_data::{CameraConfig, CameraData};

pub use camera_operations::{
    build_projection_matrix, build_view_matrix, build_view_projection, calculate_forward_vector,
    dolly, init_camera, init_camera_from_config, log_camera_context, orbit, project_point,
    update_aspect_ratio, update_fov,
};
