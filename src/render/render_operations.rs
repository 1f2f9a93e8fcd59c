//! Render Operations - drawable registry lookups

use super::render_data::{DrawableId, DrawableRegistry};
use crate::error::{ArborError, ArborResult, OptionExt};
use crate::field::{PhotoElementData, PhotoId};

/// One empty slot per photo
pub fn create_registry(photos: &[PhotoElementData]) -> DrawableRegistry {
    DrawableRegistry {
        slots: vec![None; photos.len()],
        index_by_id: photos
            .iter()
            .map(|photo| (photo.id.clone(), photo.index))
            .collect(),
    }
}

pub fn photo_index(registry: &DrawableRegistry, id: &PhotoId) -> ArborResult<usize> {
    registry
        .index_by_id
        .get(id)
        .copied()
        .ok_or_arbor(|| ArborError::PhotoNotFound { id: id.to_string() })
}

/// Record the renderer's drawable for a photo, returning the index it landed on
pub fn attach_drawable(
    registry: &mut DrawableRegistry,
    id: &PhotoId,
    drawable: DrawableId,
) -> ArborResult<usize> {
    let index = photo_index(registry, id)?;
    if let Some(previous) = registry.slots[index].replace(drawable) {
        log::debug!(
            "[Render] {} drawable replaced {:?} -> {:?}",
            id,
            previous,
            drawable
        );
    }
    Ok(index)
}

pub fn detach_drawable(
    registry: &mut DrawableRegistry,
    id: &PhotoId,
) -> ArborResult<Option<DrawableId>> {
    let index = photo_index(registry, id)?;
    Ok(registry.slots[index].take())
}

pub fn drawable_for(registry: &DrawableRegistry, index: usize) -> Option<DrawableId> {
    registry.slots.get(index).copied().flatten()
}

pub fn attached_count(registry: &DrawableRegistry) -> usize {
    registry.slots.iter().filter(|slot| slot.is_some()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{generate_field, FieldConfig};

    fn registry() -> DrawableRegistry {
        let field = generate_field(&FieldConfig {
            foliage_count: 0,
            light_count: 0,
            photo_count: 4,
            ..Default::default()
        });
        create_registry(&field.photos)
    }

    #[test]
    fn test_slots_start_detached() {
        let registry = registry();
        assert_eq!(attached_count(&registry), 0);
        assert_eq!(drawable_for(&registry, 2), None);
        assert_eq!(drawable_for(&registry, 99), None);
    }

    #[test]
    fn test_attach_and_detach() {
        let mut registry = registry();
        let id = PhotoId("photo-2".to_string());

        let index = attach_drawable(&mut registry, &id, DrawableId(11)).expect("attach");
        assert_eq!(index, 2);
        assert_eq!(drawable_for(&registry, 2), Some(DrawableId(11)));

        let removed = detach_drawable(&mut registry, &id).expect("detach");
        assert_eq!(removed, Some(DrawableId(11)));
        assert_eq!(drawable_for(&registry, 2), None);
    }

    #[test]
    fn test_unknown_photo_is_an_error() {
        let mut registry = registry();
        let result = attach_drawable(&mut registry, &PhotoId("photo-40".into()), DrawableId(1));
        assert!(matches!(result, Err(ArborError::PhotoNotFound { .. })));
    }
}
