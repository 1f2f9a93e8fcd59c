//! Engine constants
//!
//! Defaults for every tunable in [`crate::config::SceneConfig`] live here so
//! that layouts, motion and selection all agree on the same numbers.

/// Field sizes
pub mod counts {
    pub const FOLIAGE_COUNT: usize = 12_000;
    pub const LIGHT_COUNT: usize = 300;
    pub const PHOTO_COUNT: usize = 31;
    pub const DEFAULT_SEED: u64 = 0x7265_6573;
}

/// Chaos cloud and tree cone geometry
pub mod layout {
    use std::f32::consts::PI;

    /// Radius of the sphere ambient particles scatter into
    pub const CHAOS_SPHERE_RADIUS: f32 = 25.0;

    /// Tree spans y in [-TREE_HALF_HEIGHT, TREE_HALF_HEIGHT]
    pub const TREE_HALF_HEIGHT: f32 = 7.0;
    pub const TREE_BASE_RADIUS: f32 = 5.5;
    pub const HELIX_TURNS_PER_UNIT: f32 = 2.2;
    pub const HELIX_ANGLE_JITTER: f32 = 0.6;

    // Photo spiral ribbon
    pub const PHOTO_TREE_HEIGHT: f32 = 14.0;
    pub const PHOTO_RADIUS_SLOPE: f32 = 0.4;
    pub const PHOTO_RADIUS_MIN: f32 = 1.5;
    pub const PHOTO_SPIRAL_ANGLE: f32 = 10.0 * PI;

    // Photo chaos shell
    pub const PHOTO_CHAOS_RADIUS_MIN: f32 = 12.0;
    pub const PHOTO_CHAOS_RADIUS_MAX: f32 = 16.0;
    pub const PHOTO_CHAOS_Y_SQUASH: f32 = 0.6;

    pub const LIGHT_PALETTE_SIZE: u8 = 4;
}

/// Transition and rotation timing
pub mod motion {
    /// Exponential smoothing time constant (seconds)
    pub const TRANSITION_TIME_CONSTANT: f32 = 0.5;
    /// Extra angle injected while the tree is still assembling (radians)
    pub const SPIN_DOWN_ANGLE: f32 = 10.0;
    /// Rotation rate while scattered (radians / second)
    pub const IDLE_DRIFT_RATE: f32 = 0.05;
    pub const DEFAULT_ROTATION_SPEED: f32 = 0.3;
    /// Per-tick pan lerp factor
    pub const PAN_SMOOTHING: f32 = 0.2;
}

/// Pointer picking
pub mod selection {
    pub const SELECTION_RADIUS_NDC: f32 = 0.15;
    pub const DESELECT_HOLD_SECONDS: f64 = 1.0;
}

/// Image acquisition
pub mod imagery {
    pub const REVEAL_INTERVAL_MS: u64 = 100;
    pub const FALLBACK_SEED_OFFSET: u64 = 100;
    /// Seed used when a photo id carries no numeric token
    pub const DEFAULT_FALLBACK_SEED: u64 = 0;
    pub const PRIMARY_URL_TEMPLATE: &str = "photos/{index}.jpg";
    pub const FALLBACK_URL_TEMPLATE: &str = "https://picsum.photos/seed/{seed}/400/500";
    /// Neutral grey shown when no image could be bound
    pub const PLACEHOLDER_COLOR: [f32; 4] = [0.55, 0.55, 0.55, 1.0];
    /// Worker threads behind `FileFetcher`
    pub const FILE_FETCH_THREADS: usize = 2;
}

/// Default scene camera
pub mod camera {
    pub const POSITION: [f32; 3] = [0.0, 2.0, 24.0];
    pub const TARGET: [f32; 3] = [0.0, 0.0, 0.0];
    pub const FOV_DEGREES: f32 = 45.0;
    pub const NEAR_PLANE: f32 = 0.1;
    pub const FAR_PLANE: f32 = 200.0;
}
