//! Imagery Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in imagery_operations.rs

use crate::constants::imagery;
use crate::render::DrawableId;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;

/// Texture lifecycle of a photo. Only ever moves forward:
/// Pending -> Loading -> Local, or Pending -> Loading -> Fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureState {
    #[default]
    Pending,
    Loading,
    Local,
    /// Primary failed; the fallback was requested (and may itself fail)
    Fallback,
}

/// Why a single fetch did not produce an image
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Image not found: {locator}")]
    NotFound { locator: String },

    #[error("Fetch failed for {locator}: {reason}")]
    Transport { locator: String, reason: String },

    #[error("Decode failed for {locator}: {reason}")]
    Decode { locator: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Primary,
    Fallback,
}

/// Completion message from a fetch task
#[derive(Debug)]
pub enum FetchEvent {
    Loaded {
        index: usize,
        source: ImageSource,
        image: DynamicImage,
    },
    PrimaryFailed {
        index: usize,
    },
    FallbackFailed {
        index: usize,
    },
}

/// Final surface of a photo once acquisition has finished
#[derive(Debug)]
pub enum Surface {
    Image(DynamicImage),
    Placeholder,
}

/// Who advances the reveal counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RevealDriver {
    /// Scene tick time
    #[default]
    Tick,
    /// A separately spawned `run_reveal_timer` task
    Timer,
}

/// Staggered reveal counter
#[derive(Debug, Clone)]
pub struct RevealGateData {
    /// Shared with the reveal timer task when one runs
    pub counter: Arc<AtomicUsize>,
    pub limit: usize,
    pub interval: Duration,
    /// Simulated time fed through the tick
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageryStats {
    pub requested: usize,
    pub primary_failures: usize,
    pub local: usize,
    pub fallback: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageryConfig {
    pub reveal_interval_ms: u64,
    pub reveal_driver: RevealDriver,
    /// `{seed}` is replaced by the derived fallback seed
    pub fallback_url_template: String,
    pub fallback_seed_offset: u64,
    pub default_fallback_seed: u64,
    pub placeholder_color: [f32; 4],
}

impl Default for ImageryConfig {
    fn default() -> Self {
        Self {
            reveal_interval_ms: imagery::REVEAL_INTERVAL_MS,
            reveal_driver: RevealDriver::Tick,
            fallback_url_template: imagery::FALLBACK_URL_TEMPLATE.to_string(),
            fallback_seed_offset: imagery::FALLBACK_SEED_OFFSET,
            default_fallback_seed: imagery::DEFAULT_FALLBACK_SEED,
            placeholder_color: imagery::PLACEHOLDER_COLOR,
        }
    }
}

/// Image acquisition controller state
pub struct ImageryData {
    pub config: ImageryConfig,
    pub gate: RevealGateData,
    pub sender: flume::Sender<FetchEvent>,
    pub receiver: flume::Receiver<FetchEvent>,
    /// Resolved surfaces, keyed by photo index. Kept after binding so a
    /// replacement drawable can be bound again.
    pub surfaces: HashMap<usize, Surface>,
    /// Drawable each surface was last bound to
    pub bound: HashMap<usize, DrawableId>,
    pub stats: ImageryStats,
}
