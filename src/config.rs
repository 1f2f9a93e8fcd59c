//! Scene configuration
//!
//! Every section falls back to its defaults, so a TOML file only needs the
//! values it changes:
//!
//! ```toml
//! [field]
//! seed = 7
//! photo_count = 48
//!
//! [imagery]
//! reveal_interval_ms = 150
//! ```

use crate::camera::CameraConfig;
use crate::error::{ArborError, ArborResult};
use crate::field::FieldConfig;
use crate::imagery::ImageryConfig;
use crate::selection::SelectionConfig;
use crate::transition::MotionConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub field: FieldConfig,
    pub motion: MotionConfig,
    pub selection: SelectionConfig,
    pub imagery: ImageryConfig,
    pub camera: CameraConfig,
}

impl SceneConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> ArborResult<()> {
        let field = &self.field;
        if field.photo_count == 0 {
            return Err(invalid("field.photo_count", 0, "at least one photo is required"));
        }
        if !(field.chaos_radius > 0.0) {
            return Err(invalid("field.chaos_radius", field.chaos_radius, "must be positive"));
        }
        if !(field.tree_half_height > 0.0) {
            return Err(invalid(
                "field.tree_half_height",
                field.tree_half_height,
                "must be positive",
            ));
        }
        if !(field.tree_base_radius >= 0.0) {
            return Err(invalid(
                "field.tree_base_radius",
                field.tree_base_radius,
                "must not be negative",
            ));
        }
        if !(field.helix_angle_jitter >= 0.0) {
            return Err(invalid(
                "field.helix_angle_jitter",
                field.helix_angle_jitter,
                "must not be negative",
            ));
        }
        if !field.primary_url_template.contains("{index}") {
            return Err(invalid(
                "field.primary_url_template",
                &field.primary_url_template,
                "missing {index} placeholder",
            ));
        }

        let motion = &self.motion;
        if !(motion.transition_time_constant > 0.0) {
            return Err(invalid(
                "motion.transition_time_constant",
                motion.transition_time_constant,
                "must be positive",
            ));
        }
        if !(motion.idle_drift_rate >= 0.0) {
            return Err(invalid(
                "motion.idle_drift_rate",
                motion.idle_drift_rate,
                "must not be negative",
            ));
        }
        if !(motion.pan_smoothing > 0.0 && motion.pan_smoothing <= 1.0) {
            return Err(invalid(
                "motion.pan_smoothing",
                motion.pan_smoothing,
                "must be in (0, 1]",
            ));
        }

        let selection = &self.selection;
        if !(selection.radius_ndc > 0.0 && selection.radius_ndc <= 2.0) {
            return Err(invalid(
                "selection.radius_ndc",
                selection.radius_ndc,
                "must be in (0, 2]",
            ));
        }
        if !(selection.hold_seconds >= 0.0) {
            return Err(invalid(
                "selection.hold_seconds",
                selection.hold_seconds,
                "must not be negative",
            ));
        }

        let imagery = &self.imagery;
        if imagery.reveal_interval_ms == 0 {
            return Err(invalid("imagery.reveal_interval_ms", 0, "must be positive"));
        }
        if !imagery.fallback_url_template.contains("{seed}") {
            return Err(invalid(
                "imagery.fallback_url_template",
                &imagery.fallback_url_template,
                "missing {seed} placeholder",
            ));
        }

        let camera = &self.camera;
        if !(camera.near_plane > 0.0 && camera.far_plane > camera.near_plane) {
            return Err(invalid(
                "camera.far_plane",
                camera.far_plane,
                "planes must satisfy 0 < near < far",
            ));
        }
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(invalid(
                "camera.fov_degrees",
                camera.fov_degrees,
                "must be in (0, 180)",
            ));
        }

        log::debug!(
            "[SceneConfig] Validated: photos={} foliage={} lights={} reveal={}ms",
            field.photo_count,
            field.foliage_count,
            field.light_count,
            imagery.reveal_interval_ms
        );
        Ok(())
    }
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ArborError {
    ArborError::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse and validate a TOML document
pub fn parse_config(text: &str) -> ArborResult<SceneConfig> {
    let config: SceneConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ArborResult<SceneConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|error| ArborError::IoError {
        path: path.display().to_string(),
        error: error.to_string(),
    })?;

    let config = parse_config(&text)?;
    log::info!("[SceneConfig] Loaded {}", path.display());
    Ok(config)
}
