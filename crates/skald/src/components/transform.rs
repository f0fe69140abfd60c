//! Spatial state attached to every entity.
//!
//! A [`Transform`] is created together with its entity and can never be
//! missing. Other components read and mutate it through the contexts the
//! frame loop hands them.

use crate::ecs::entity::Entity;
use crate::math::Vec2;

/// Position, orientation, scale, and visibility flags of an entity.
#[derive(Debug, Clone)]
pub struct Transform {
    /// World position of a root entity. Ignored for world-position lookups
    /// while `parent` resolves, but kept as the fallback when the parent
    /// link dangles.
    pub position: Vec2,
    /// Offset from the parent, applied when `parent` is set.
    pub local_position: Vec2,
    /// Rotation in degrees.
    pub rotation: f32,
    pub scale: Vec2,
    /// Non-owning link to another entity's transform. `None` = root. The
    /// chain must be acyclic; that is the caller's responsibility and is not
    /// checked.
    pub parent: Option<Entity>,
    /// Disabled transforms exclude the entity from rendering.
    pub enabled: bool,
    /// Invisible transforms exclude the entity from rendering.
    pub visible: bool,
}

impl Transform {
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec2::splat(scale);
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            local_position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            parent: None,
            enabled: true,
            visible: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2;

    #[test]
    fn defaults_are_enabled_and_visible() {
        let t = Transform::default();
        assert!(t.enabled);
        assert!(t.visible);
        assert_eq!(t.scale, Vec2::ONE);
        assert!(t.parent.is_none());
    }

    #[test]
    fn builders() {
        let t = Transform::from_position(vec2(1.0, 2.0))
            .with_scale(0.25)
            .with_rotation(90.0);
        assert_eq!(t.position, vec2(1.0, 2.0));
        assert_eq!(t.scale, Vec2::splat(0.25));
        assert_eq!(t.rotation, 90.0);
    }
}
