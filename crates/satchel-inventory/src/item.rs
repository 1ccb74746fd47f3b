//! Inventory item values.

use satchel_common::{EntityClassId, MaterialId, MeshId, TextureId, Transform};
use serde::{Deserialize, Serialize};

/// Data captured from a world actor at pickup time.
///
/// This is what the world bridge hands over when an actor enters the
/// inventory, and everything needed to put it back later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedItem {
    /// What to spawn if the item is ejected
    pub source_kind: EntityClassId,
    /// Pose at pickup time
    pub transform: Transform,
    /// Visual mesh, if the actor had one
    pub mesh: Option<MeshId>,
    /// Materials in mesh slot order
    pub materials: Vec<MaterialId>,
    /// Optional icon override
    pub icon: Option<TextureId>,
}

impl CapturedItem {
    /// Creates captured data with only a source kind and transform.
    #[must_use]
    pub fn new(source_kind: EntityClassId, transform: Transform) -> Self {
        Self {
            source_kind,
            transform,
            mesh: None,
            materials: Vec::new(),
            icon: None,
        }
    }

    /// Sets the mesh.
    #[must_use]
    pub fn with_mesh(mut self, mesh: MeshId) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Appends a material.
    #[must_use]
    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.materials.push(material);
        self
    }

    /// Sets the icon override.
    #[must_use]
    pub fn with_icon(mut self, icon: TextureId) -> Self {
        self.icon = Some(icon);
        self
    }
}

/// One inventory slot's content.
///
/// A slot is empty exactly when `source_kind` is `None`; no other field is
/// an occupancy signal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Item {
    /// Dense display index among occupied slots; reassigned on removal
    pub display_index: Option<usize>,
    /// What to spawn if ejected; `None` means the slot is empty
    pub source_kind: Option<EntityClassId>,
    /// Pose captured at pickup, reused at spawn
    pub world_transform: Transform,
    /// Captured mesh
    pub mesh: Option<MeshId>,
    /// Captured materials
    pub materials: Vec<MaterialId>,
    /// Optional icon override
    pub icon: Option<TextureId>,
}

impl Item {
    /// An empty slot value.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds an occupied item from captured data.
    #[must_use]
    pub fn from_captured(captured: CapturedItem, display_index: usize) -> Self {
        Self {
            display_index: Some(display_index),
            source_kind: Some(captured.source_kind),
            world_transform: captured.transform,
            mesh: captured.mesh,
            materials: captured.materials,
            icon: captured.icon,
        }
    }

    /// Checks if this slot holds an item.
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.source_kind.is_some()
    }

    /// Checks if this slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.is_occupied()
    }

    /// Checks whether two items hold the same captured thing.
    ///
    /// Display indices are ignored: they change whenever another slot is
    /// emptied.
    #[must_use]
    pub fn same_contents(&self, other: &Self) -> bool {
        self.source_kind == other.source_kind
            && self.world_transform == other.world_transform
            && self.mesh == other.mesh
            && self.materials == other.materials
    }

    /// Text shown on the slot: the display index.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        self.display_index.map(|i| i.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_empty_item_is_unoccupied() {
        let item = Item::empty();
        assert!(item.is_empty());
        assert!(item.label().is_none());
    }

    #[test]
    fn test_occupancy_ignores_other_fields() {
        let item = Item {
            display_index: Some(3),
            mesh: Some(MeshId::new(1)),
            ..Item::default()
        };
        assert!(item.is_empty());
    }

    #[test]
    fn test_same_contents_ignores_display_index() {
        let captured = CapturedItem::new(EntityClassId::new(2), Transform::IDENTITY)
            .with_material(MaterialId::new(5));
        let a = Item::from_captured(captured.clone(), 0);
        let b = Item::from_captured(captured, 3);
        let other = Item::from_captured(
            CapturedItem::new(EntityClassId::new(2), Transform::from_translation(Vec3::X)),
            0,
        );

        assert!(a.same_contents(&b));
        assert!(!a.same_contents(&other));
        assert!(!a.same_contents(&Item::empty()));
    }

    #[test]
    fn test_from_captured_copies_visuals() {
        let captured = CapturedItem::new(
            EntityClassId::new(4),
            Transform::from_translation(Vec3::new(1.0, 2.0, 3.0)),
        )
        .with_mesh(MeshId::new(9))
        .with_material(MaterialId::new(1))
        .with_material(MaterialId::new(2));

        let item = Item::from_captured(captured, 0);

        assert!(item.is_occupied());
        assert_eq!(item.label().as_deref(), Some("0"));
        assert_eq!(item.mesh, Some(MeshId::new(9)));
        assert_eq!(item.materials.len(), 2);
        assert_eq!(item.world_transform.translation, Vec3::new(1.0, 2.0, 3.0));
    }
}
