//! Transition Operations - Pure DOP Functions
//!
//! Progress follows an exponential approach toward the target value, so the
//! result depends on elapsed time rather than frame count and never
//! overshoots.

use super::transition_data::{MotionConfig, TargetMode, TransitionData};

/// Create a transition resting in the chaos layout
pub fn create_transition(config: &MotionConfig) -> TransitionData {
    TransitionData {
        target_mode: TargetMode::Chaos,
        progress: 0.0,
        rotation_accumulator: 0.0,
        time_constant: config.transition_time_constant,
        idle_drift_rate: config.idle_drift_rate,
    }
}

pub fn set_target_mode(data: &mut TransitionData, mode: TargetMode) {
    if data.target_mode != mode {
        log::debug!(
            "[Transition] {:?} -> {:?} at progress {:.3}",
            data.target_mode,
            mode,
            data.progress
        );
        data.target_mode = mode;
    }
}

/// Progress value the current mode is heading toward
pub fn target_value(mode: TargetMode) -> f32 {
    match mode {
        TargetMode::Chaos => 0.0,
        TargetMode::Formed => 1.0,
    }
}

/// Fraction of the remaining distance covered in `delta_time`
pub fn damping_factor(delta_time: f32, time_constant: f32) -> f32 {
    if time_constant <= 0.0 {
        return 1.0;
    }
    1.0 - (-delta_time / time_constant).exp()
}

/// Advance progress and the rotation accumulator by one tick
pub fn update_transition(
    data: &mut TransitionData,
    delta_time: f32,
    rotation_speed: f32,
    rotation_boost: f32,
) {
    let dt = sanitize_delta(delta_time);

    let target = target_value(data.target_mode);
    data.progress += (target - data.progress) * damping_factor(dt, data.time_constant);
    data.progress = data.progress.clamp(0.0, 1.0);

    let rate = match data.target_mode {
        TargetMode::Formed => (rotation_speed + rotation_boost).max(0.0),
        TargetMode::Chaos => data.idle_drift_rate.max(0.0),
    };
    data.rotation_accumulator += f64::from(rate) * f64::from(dt);
}

/// Smoothstep applied to progress
pub fn ease(progress: f32) -> f32 {
    let t = progress.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub fn current_ease(data: &TransitionData) -> f32 {
    ease(data.progress)
}

/// True once progress sits within `epsilon` of its target
pub fn is_settled(data: &TransitionData, epsilon: f32) -> bool {
    (data.progress - target_value(data.target_mode)).abs() < epsilon
}

fn sanitize_delta(delta_time: f32) -> f32 {
    if delta_time.is_finite() && delta_time > 0.0 {
        delta_time
    } else {
        0.0
    }
}
