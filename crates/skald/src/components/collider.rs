//! # Broad-Phase Collider Registration
//!
//! This module registers shapes; it never resolves collisions. The
//! [`ColliderRegistry`] is a lookup table an external collision-query
//! collaborator reads — entity in, [`ColliderShape`] out.
//!
//! Collider components rebuild their bounds from the owner's transform every
//! update, but register with the table exactly once, on their first update
//! after attachment (guarded by an internal flag). Re-registering an already
//! registered entity is silently ignored, so interleaved registration from
//! many entities in one frame needs no coordination.
//!
//! Rows live as long as the owning entity: the scene's destruction sweep
//! purges the row when the entity is destroyed.

use std::collections::HashMap;

use crate::backend::Color;
use crate::ecs::component::{Component, ComponentContext, RenderContext, Renderable};
use crate::ecs::entity::Entity;
use crate::math::{Aabb, Vec2, vec2};

/// Layer collider outlines draw on. Deep behind the world so debug shapes
/// never cover sprites.
pub const COLLIDER_RENDER_LAYER: i32 = -500;

/// A broad-phase shape registered for an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Box(Aabb),
    Circle { center: Vec2, radius: f32 },
}

/// Entity → broad-phase shape table.
#[derive(Default)]
pub struct ColliderRegistry {
    entries: HashMap<Entity, ColliderShape>,
}

impl ColliderRegistry {
    /// Record a shape for `entity`. First registration wins; duplicates are
    /// silently ignored.
    pub fn register(&mut self, entity: Entity, shape: ColliderShape) {
        self.entries.entry(entity).or_insert(shape);
    }

    pub fn get(&self, entity: Entity) -> Option<ColliderShape> {
        self.entries.get(&entity).copied()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entries.contains_key(&entity)
    }

    /// Purge an entity's row. Called by the destruction sweep.
    pub fn remove(&mut self, entity: Entity) -> Option<ColliderShape> {
        self.entries.remove(&entity)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All registered rows, for the external collision-query collaborator.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, ColliderShape)> + '_ {
        self.entries.iter().map(|(&e, &s)| (e, s))
    }
}

// ── BoxCollider ──────────────────────────────────────────────────────────

/// Rectangular broad-phase collider.
pub struct BoxCollider {
    pub size: Vec2,
    /// Offset of the box's top-left corner from the owner's position.
    pub offset: Vec2,
    /// Bounds as of the latest update.
    pub bounds: Aabb,
    registered: bool,
}

impl BoxCollider {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            offset: Vec2::ZERO,
            bounds: Aabb::default(),
            registered: false,
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }
}

impl Component for BoxCollider {
    fn update(&mut self, ctx: &mut ComponentContext<'_>) {
        let origin = ctx.position + self.offset;
        self.bounds = Aabb::new(origin, origin + self.size);

        if !self.registered {
            ctx.colliders
                .register(ctx.entity, ColliderShape::Box(self.bounds));
            self.registered = true;
        }
    }

    fn renderable(&self) -> Option<&dyn Renderable> {
        Some(self)
    }
}

impl Renderable for BoxCollider {
    fn render_layer(&self) -> i32 {
        COLLIDER_RENDER_LAYER
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        if ctx.debug {
            ctx.backend.draw_rect_lines(self.bounds, Color::RED);
        }
    }
}

// ── CircleCollider ───────────────────────────────────────────────────────

/// Circular broad-phase collider.
pub struct CircleCollider {
    pub radius: f32,
    /// Scales the drawn radius for effects like explosions. Normally 1.
    pub radius_multiplier: f32,
    /// Circle center as of the latest update.
    pub center: Vec2,
    /// Bounds fitted around the circle's cardinal points.
    pub bounds: Aabb,
    registered: bool,
}

impl CircleCollider {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            radius_multiplier: 1.0,
            center: Vec2::ZERO,
            bounds: Aabb::default(),
            registered: false,
        }
    }
}

impl Component for CircleCollider {
    fn update(&mut self, ctx: &mut ComponentContext<'_>) {
        self.center = ctx.position;
        let cardinals = [
            vec2(self.center.x, self.center.y - self.radius),
            vec2(self.center.x - self.radius, self.center.y),
            vec2(self.center.x + self.radius, self.center.y),
            vec2(self.center.x, self.center.y + self.radius),
        ];
        self.bounds = Aabb::from_points(&cardinals);

        if !self.registered {
            ctx.colliders.register(
                ctx.entity,
                ColliderShape::Circle {
                    center: self.center,
                    radius: self.radius,
                },
            );
            self.registered = true;
        }
    }

    fn renderable(&self) -> Option<&dyn Renderable> {
        Some(self)
    }
}

impl Renderable for CircleCollider {
    fn render_layer(&self) -> i32 {
        COLLIDER_RENDER_LAYER
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        if ctx.debug {
            ctx.backend
                .draw_circle(self.center, self.radius * self.radius_multiplier, Color::RED);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::components::transform::Transform;
    use crate::ecs::entity::EntityAllocator;
    use crate::ecs::store::{DestructionQueue, EntityKind};

    fn update_at(
        component: &mut dyn Component,
        entity: Entity,
        position: Vec2,
        registry: &mut ColliderRegistry,
    ) {
        let mut transform = Transform::from_position(position);
        let mut destroy = DestructionQueue::default();
        let mut backend = HeadlessBackend::new();
        let mut ctx = ComponentContext {
            entity,
            kind: EntityKind::Game,
            position,
            delta: 1.0 / 60.0,
            transform: &mut transform,
            colliders: registry,
            destroy: &mut destroy,
            backend: &mut backend,
        };
        component.update(&mut ctx);
    }

    #[test]
    fn box_collider_registers_exactly_once() {
        let entity = EntityAllocator::new().allocate();
        let mut registry = ColliderRegistry::default();
        let mut collider = BoxCollider::new(vec2(8.0, 8.0));

        for frame in 0..5 {
            let x = frame as f32 * 10.0;
            update_at(&mut collider, entity, vec2(x, 0.0), &mut registry);
        }

        assert_eq!(registry.len(), 1);
        // First registration wins: the registered shape is the frame-0 box.
        let ColliderShape::Box(bounds) = registry.get(entity).unwrap() else {
            panic!("expected box shape");
        };
        assert_eq!(bounds.min, vec2(0.0, 0.0));
        // The component's own bounds keep tracking the transform.
        assert_eq!(collider.bounds.min, vec2(40.0, 0.0));
    }

    #[test]
    fn circle_collider_fits_bounds_around_cardinals() {
        let entity = EntityAllocator::new().allocate();
        let mut registry = ColliderRegistry::default();
        let mut collider = CircleCollider::new(5.0);

        update_at(&mut collider, entity, vec2(10.0, 20.0), &mut registry);

        assert_eq!(collider.bounds.min, vec2(5.0, 15.0));
        assert_eq!(collider.bounds.max, vec2(15.0, 25.0));
        assert_eq!(
            registry.get(entity),
            Some(ColliderShape::Circle {
                center: vec2(10.0, 20.0),
                radius: 5.0
            })
        );
    }

    #[test]
    fn duplicate_registration_is_ignored() {
        let entity = EntityAllocator::new().allocate();
        let mut registry = ColliderRegistry::default();
        let first = ColliderShape::Circle {
            center: Vec2::ZERO,
            radius: 1.0,
        };
        registry.register(entity, first);
        registry.register(
            entity,
            ColliderShape::Circle {
                center: Vec2::ZERO,
                radius: 99.0,
            },
        );
        assert_eq!(registry.get(entity), Some(first));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_purges_row() {
        let entity = EntityAllocator::new().allocate();
        let mut registry = ColliderRegistry::default();
        registry.register(entity, ColliderShape::Box(Aabb::default()));
        assert!(registry.contains(entity));
        assert!(registry.remove(entity).is_some());
        assert!(registry.is_empty());
        assert!(registry.remove(entity).is_none());
    }
}
