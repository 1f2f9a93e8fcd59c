//! Camera data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in camera_operations.rs

use crate::constants::camera;
use cgmath::Point3;
use serde::{Deserialize, Serialize};

/// Look-at camera framing the formation
#[derive(Debug, Clone, Copy)]
pub struct CameraData {
    /// Eye position in world space
    pub position: Point3<f32>,

    /// Point the camera looks at
    pub target: Point3<f32>,

    /// Field of view (vertical, radians)
    pub fov_radians: f32,

    /// Aspect ratio (width / height)
    pub aspect_ratio: f32,

    pub near_plane: f32,
    pub far_plane: f32,
}

impl Default for CameraData {
    fn default() -> Self {
        Self {
            position: Point3::from(camera::POSITION),
            target: Point3::from(camera::TARGET),
            fov_radians: camera::FOV_DEGREES.to_radians(),
            aspect_ratio: 16.0 / 9.0,
            near_plane: camera::NEAR_PLANE,
            far_plane: camera::FAR_PLANE,
        }
    }
}

/// Camera configuration for initialization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub fov_degrees: f32,
    pub aspect_ratio: f32,
    pub near_plane: f32,
    pub far_plane: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: camera::POSITION,
            target: camera::TARGET,
            fov_degrees: camera::FOV_DEGREES,
            aspect_ratio: 16.0 / 9.0,
            near_plane: camera::NEAR_PLANE,
            far_plane: camera::FAR_PLANE,
        }
    }
}
