//! Camera operations - Pure DOP functions
//!
//! All functions are pure: they take data, return new data, no side effects.

use super::camera_data::{CameraConfig, CameraData};
use crate::render::ScreenProjector;
use cgmath::{InnerSpace, Matrix4, Point3, Rad, Vector3, Vector4};

// ============================================================================
// INITIALIZATION
// ============================================================================

pub fn init_camera(position: Point3<f32>, target: Point3<f32>) -> CameraData {
    CameraData {
        position,
        target,
        ..Default::default()
    }
}

pub fn init_camera_from_config(config: &CameraConfig) -> CameraData {
    CameraData {
        position: Point3::from(config.position),
        target: Point3::from(config.target),
        fov_radians: config.fov_degrees.to_radians(),
        aspect_ratio: config.aspect_ratio,
        near_plane: config.near_plane,
        far_plane: config.far_plane,
    }
}

// ============================================================================
// VIEW/PROJECTION MATRICES
// ============================================================================

pub fn build_view_matrix(camera: &CameraData) -> Matrix4<f32> {
    Matrix4::look_at_rh(camera.position, camera.target, Vector3::unit_y())
}

pub fn build_projection_matrix(camera: &CameraData) -> Matrix4<f32> {
    cgmath::perspective(
        Rad(camera.fov_radians),
        camera.aspect_ratio,
        camera.near_plane,
        camera.far_plane,
    )
}

pub fn build_view_projection(camera: &CameraData) -> Matrix4<f32> {
    build_projection_matrix(camera) * build_view_matrix(camera)
}

/// Project a world point to (ndc x, ndc y, ndc depth)
///
/// Points behind the eye come out with depth > 1, the same as points past
/// the far plane. A degenerate w yields infinite depth.
pub fn project_point(view_projection: &Matrix4<f32>, world: glam::Vec3) -> glam::Vec3 {
    let clip = *view_projection * Vector4::new(world.x, world.y, world.z, 1.0);
    if clip.w.abs() <= f32::EPSILON {
        return glam::Vec3::new(0.0, 0.0, f32::INFINITY);
    }
    glam::Vec3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w)
}

// ============================================================================
// UPDATES
// ============================================================================

/// Update aspect ratio (e.g., on window resize)
pub fn update_aspect_ratio(camera: &CameraData, width: u32, height: u32) -> CameraData {
    let mut new_camera = *camera;
    if height > 0 {
        new_camera.aspect_ratio = width as f32 / height as f32;
    }
    new_camera
}

pub fn update_fov(camera: &CameraData, fov_degrees: f32) -> CameraData {
    let mut new_camera = *camera;
    new_camera.fov_radians = fov_degrees.clamp(1.0, 170.0).to_radians();
    new_camera
}

/// Swing the eye around the target's vertical axis
pub fn orbit(camera: &CameraData, yaw_delta: f32) -> CameraData {
    let offset = camera.position - camera.target;
    let (sin, cos) = yaw_delta.sin_cos();
    let rotated = Vector3::new(
        offset.x * cos - offset.z * sin,
        offset.y,
        offset.x * sin + offset.z * cos,
    );

    let mut new_camera = *camera;
    new_camera.position = camera.target + rotated;
    new_camera
}

/// Move the eye toward (positive) or away from the target, never past it
pub fn dolly(camera: &CameraData, distance: f32) -> CameraData {
    let offset = camera.position - camera.target;
    let current = offset.magnitude();
    if current <= f32::EPSILON {
        return *camera;
    }

    let new_distance = (current - distance).max(camera.near_plane * 2.0);
    let mut new_camera = *camera;
    new_camera.position = camera.target + offset.normalize() * new_distance;
    new_camera
}

// ============================================================================
// UTILITIES
// ============================================================================

pub fn calculate_forward_vector(camera: &CameraData) -> Vector3<f32> {
    (camera.target - camera.position).normalize()
}

pub fn log_camera_context(camera: &CameraData) {
    log::debug!(
        "[Camera] Position: ({:.1}, {:.1}, {:.1}) | Target: ({:.1}, {:.1}, {:.1}) | FOV: {:.1}° | Aspect: {:.3}",
        camera.position.x,
        camera.position.y,
        camera.position.z,
        camera.target.x,
        camera.target.y,
        camera.target.z,
        camera.fov_radians.to_degrees(),
        camera.aspect_ratio
    );
}

impl ScreenProjector for CameraData {
    fn project_to_screen(&self, world_position: glam::Vec3) -> glam::Vec3 {
        project_point(&build_view_projection(self), world_position)
    }
}
