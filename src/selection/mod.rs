/// Selection Module - pointer picking with deselection hysteresis
pub mod selection_data;
pub mod selection_operations;

pub use selection_data::{SelectionCandidate, SelectionConfig, SelectionData, SelectionOutcome};

pub use selection_operations::{
    clear_selection, consume_click, create_selection, find_nearest_photo, handle_click,
    pointer_to_ndc, resolve_click, selected_id,
};
