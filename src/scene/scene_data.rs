//! Scene Data - Pure DOP
//!
//! NO METHODS. Just data.
//! The host owns `SceneInputs`; the engine owns everything in `SceneState`,
//! and within it each component owns its own fields.

use crate::camera::CameraData;
use crate::config::SceneConfig;
use crate::constants::motion;
use crate::field::{FieldData, PhotoId};
use crate::imagery::{ImageFetcher, ImageryData};
use crate::morph::MorphBuffers;
use crate::pan::PanData;
use crate::render::{DrawableRegistry, RenderSink, ScreenProjector};
use crate::selection::{SelectionData, SelectionOutcome};
use crate::transition::{TargetMode, TransitionData};
use futures::task::Spawn;
use glam::Vec2;
use std::sync::Arc;

/// Everything the host feeds in each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneInputs {
    pub target_mode: TargetMode,
    pub rotation_speed: f32,
    pub rotation_boost: f32,
    /// Pointer in [0,1]², y down
    pub pointer: Vec2,
    pub pan_target: Vec2,
    /// Incremented by the host on every click
    pub click_counter: u64,
}

impl Default for SceneInputs {
    fn default() -> Self {
        Self {
            target_mode: TargetMode::Chaos,
            rotation_speed: motion::DEFAULT_ROTATION_SPEED,
            rotation_boost: 0.0,
            pointer: Vec2::splat(0.5),
            pan_target: Vec2::ZERO,
            click_counter: 0,
        }
    }
}

/// Complete engine state
pub struct SceneState {
    pub config: SceneConfig,
    pub field: FieldData,
    pub transition: TransitionData,
    pub buffers: MorphBuffers,
    pub selection: SelectionData,
    pub pan: PanData,
    pub imagery: ImageryData,
    pub registry: DrawableRegistry,
    pub camera: CameraData,

    /// Scene time in seconds
    pub clock: f64,
    pub frame_number: u64,
}

/// Host collaborators for one tick
pub struct FrameContext<'a> {
    pub sink: &'a mut dyn RenderSink,
    /// `None` projects through the scene's own camera
    pub projector: Option<&'a dyn ScreenProjector>,
    pub fetcher: &'a Arc<dyn ImageFetcher>,
    pub spawner: &'a dyn Spawn,
}

/// What one tick did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub completions: usize,
    pub fetches_started: usize,
    pub transforms_published: usize,
    pub bindings_flushed: usize,
    pub selection: Option<SelectionOutcome>,
}

/// Read-only snapshot for UI and diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStats {
    pub frame_number: u64,
    pub clock: f64,
    pub target_mode: TargetMode,
    pub progress: f32,
    pub ease: f32,
    pub rotation_accumulator: f64,
    pub revealed: usize,
    pub loading: usize,
    pub local: usize,
    pub fallback: usize,
    pub failed: usize,
    pub attached: usize,
    pub selected: Option<PhotoId>,
}
