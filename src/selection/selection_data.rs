//! Selection Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in selection_operations.rs

use crate::constants::selection;
use crate::field::PhotoId;
use serde::{Deserialize, Serialize};

/// Currently selected photo
///
/// A non-empty selection always names a reveal-eligible photo.
#[derive(Debug, Clone, Default)]
pub struct SelectionData {
    pub selected_id: Option<PhotoId>,
    /// Scene time (seconds) when the current selection was made
    pub selected_at: f64,
    /// Last host click counter value that was handled
    pub last_click_counter: u64,
}

/// Best match found by a pick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionCandidate {
    pub index: usize,
    /// Planar NDC distance to the pointer
    pub distance: f32,
}

/// What a click did to the selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Selected(PhotoId),
    /// Missed, but the current selection is too young to drop
    Held,
    Cleared,
    /// Missed with nothing selected
    Missed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub radius_ndc: f32,
    pub hold_seconds: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            radius_ndc: selection::SELECTION_RADIUS_NDC,
            hold_seconds: selection::DESELECT_HOLD_SECONDS,
        }
    }
}
