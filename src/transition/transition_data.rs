//! Transition Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in transition_operations.rs

use crate::constants::motion;
use serde::{Deserialize, Serialize};

/// Which layout the field is heading toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetMode {
    #[default]
    Chaos,
    Formed,
}

/// Chaos/formed state machine
#[derive(Debug, Clone)]
pub struct TransitionData {
    /// Host input
    pub target_mode: TargetMode,
    /// Damped completion in [0, 1]
    pub progress: f32,
    /// Never reset, never decreases; f64 so long sessions keep per-frame resolution
    pub rotation_accumulator: f64,
    pub time_constant: f32,
    pub idle_drift_rate: f32,
}

/// Motion tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub transition_time_constant: f32,
    pub idle_drift_rate: f32,
    pub default_rotation_speed: f32,
    pub pan_smoothing: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            transition_time_constant: motion::TRANSITION_TIME_CONSTANT,
            idle_drift_rate: motion::IDLE_DRIFT_RATE,
            default_rotation_speed: motion::DEFAULT_ROTATION_SPEED,
            pan_smoothing: motion::PAN_SMOOTHING,
        }
    }
}
