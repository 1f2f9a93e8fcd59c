//! Render Data - Pure DOP
//!
//! NO METHODS. Just data.
//! The renderer owns drawables; the engine only remembers which drawable
//! belongs to which photo, and that relation may be absent.

use crate::field::PhotoId;
use std::collections::HashMap;

/// Renderer-assigned handle for a drawable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawableId(pub u64);

/// Photo index -> drawable lookup
#[derive(Debug, Clone, Default)]
pub struct DrawableRegistry {
    /// One slot per photo, `None` until the renderer attaches one
    pub slots: Vec<Option<DrawableId>>,
    pub index_by_id: HashMap<PhotoId, usize>,
}
