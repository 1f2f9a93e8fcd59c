//! Selection Operations - Pure DOP Functions
//!
//! Picking is a linear scan over revealed photos in NDC space. At the photo
//! counts this engine targets that beats any acceleration structure; a
//! screen-space grid would be the next step for much larger fields.

use super::selection_data::{SelectionCandidate, SelectionConfig, SelectionData, SelectionOutcome};
use crate::field::{PhotoElementData, PhotoId};
use crate::render::{drawable_for, DrawableRegistry, ScreenProjector};
use glam::{Vec2, Vec3};

pub fn create_selection() -> SelectionData {
    SelectionData::default()
}

/// Normalized pointer ([0,1]², y down) to NDC (y up)
pub fn pointer_to_ndc(pointer: Vec2) -> Vec2 {
    Vec2::new(2.0 * pointer.x - 1.0, -(2.0 * pointer.y - 1.0))
}

/// Record the host click counter; true when a new click arrived
pub fn consume_click(selection: &mut SelectionData, click_counter: u64) -> bool {
    if click_counter == selection.last_click_counter {
        return false;
    }
    selection.last_click_counter = click_counter;
    true
}

/// Closest revealed, attached, in-front photo strictly within `radius`
pub fn find_nearest_photo(
    photos: &[PhotoElementData],
    registry: &DrawableRegistry,
    projector: &dyn ScreenProjector,
    pointer_ndc: Vec2,
    radius: f32,
    offset: Vec3,
) -> Option<SelectionCandidate> {
    let mut best: Option<SelectionCandidate> = None;
    let mut min_distance = radius;

    for photo in photos {
        if !photo.reveal_eligible || drawable_for(registry, photo.index).is_none() {
            continue;
        }

        let projected = projector.project_to_screen(photo.world_position + offset);
        if !projected.is_finite() || projected.z >= 1.0 {
            continue;
        }

        let distance = projected.truncate().distance(pointer_ndc);
        if distance < min_distance {
            min_distance = distance;
            best = Some(SelectionCandidate {
                index: photo.index,
                distance,
            });
        }
    }

    best
}

/// Apply the outcome of a pick to the selection state
pub fn resolve_click(
    selection: &mut SelectionData,
    config: &SelectionConfig,
    hit: Option<PhotoId>,
    now: f64,
) -> SelectionOutcome {
    if let Some(id) = hit {
        selection.selected_id = Some(id.clone());
        selection.selected_at = now;
        return SelectionOutcome::Selected(id);
    }

    if selection.selected_id.is_none() {
        return SelectionOutcome::Missed;
    }

    if now - selection.selected_at >= config.hold_seconds {
        selection.selected_id = None;
        SelectionOutcome::Cleared
    } else {
        SelectionOutcome::Held
    }
}

/// Full click handling: pointer to NDC, pick, then selection update
#[allow(clippy::too_many_arguments)]
pub fn handle_click(
    selection: &mut SelectionData,
    config: &SelectionConfig,
    photos: &[PhotoElementData],
    registry: &DrawableRegistry,
    projector: &dyn ScreenProjector,
    pointer: Vec2,
    offset: Vec3,
    now: f64,
) -> SelectionOutcome {
    let pointer_ndc = pointer_to_ndc(pointer);
    let candidate = find_nearest_photo(
        photos,
        registry,
        projector,
        pointer_ndc,
        config.radius_ndc,
        offset,
    );
    let hit = candidate.and_then(|c| photos.get(c.index)).map(|p| p.id.clone());

    let outcome = resolve_click(selection, config, hit, now);
    log::debug!(
        "[Selection] click at ndc ({:.3}, {:.3}) -> {:?}",
        pointer_ndc.x,
        pointer_ndc.y,
        outcome
    );
    outcome
}

pub fn clear_selection(selection: &mut SelectionData) {
    selection.selected_id = None;
}

pub fn selected_id(selection: &SelectionData) -> Option<&PhotoId> {
    selection.selected_id.as_ref()
}
