/// Transition Module - chaos/formed state machine
pub mod transition_data;
pub mod transition_operations;

pub use transition_data::{MotionConfig, TargetMode, TransitionData};

pub use transition_operations::{
    create_transition, current_ease, damping_factor, ease, is_settled, set_target_mode,
    target_value, update_transition,
};
