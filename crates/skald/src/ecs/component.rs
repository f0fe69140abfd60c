//! # Component Contracts
//!
//! A component is any `'static` type implementing [`Component`]: a unit of
//! data and per-frame behavior attached to exactly one entity. The store
//! keeps components type-erased (`Box<dyn Component>`) and hands them back by
//! exact type via `Any` downcasting.
//!
//! A component that also draws implements [`Renderable`] and surfaces it
//! through [`Component::renderable`]. The render pass collects those
//! capability views, sorts them by [`render_layer`](Renderable::render_layer),
//! and calls [`render`](Renderable::render) — components never decide *when*
//! they draw.
//!
//! ## Owner injection
//!
//! A component does not hold a reference to its entity. The frame loop
//! injects the owner each call through [`ComponentContext`] /
//! [`RenderContext`]: the entity handle, its kind, its resolved world
//! position, and (for updates) a mutable borrow of its transform. This is
//! what lets components stay plain owned data while still reading and
//! mutating their entity's spatial state.

use std::any::Any;

use crate::backend::Backend;
use crate::components::collider::ColliderRegistry;
use crate::components::transform::Transform;
use crate::ecs::entity::Entity;
use crate::ecs::store::{DestructionQueue, EntityKind};
use crate::math::Vec2;

/// An attachable unit of data and per-frame behavior.
///
/// At most one component of a given type can be attached to an entity.
pub trait Component: Any {
    /// Per-frame update, called once for every component of every enabled
    /// entity, before any system runs. Default: nothing.
    fn update(&mut self, _ctx: &mut ComponentContext<'_>) {}

    /// View this component as a renderable, if it draws. Components that
    /// implement [`Renderable`] return `Some(self)` here.
    fn renderable(&self) -> Option<&dyn Renderable> {
        None
    }
}

/// The drawing capability of a component.
pub trait Renderable {
    /// Render-order key: ascending, lower layers draw first (behind).
    fn render_layer(&self) -> i32 {
        0
    }

    /// Draw this component. Must not mutate entity state.
    fn render(&self, ctx: &mut RenderContext<'_>);
}

/// Frame-loop services injected into every component update.
pub struct ComponentContext<'a> {
    /// The entity this component is attached to.
    pub entity: Entity,
    /// The owning entity's kind.
    pub kind: EntityKind,
    /// The owner's world position, with the parent chain applied.
    pub position: Vec2,
    /// Seconds since the previous frame.
    pub delta: f32,
    /// The owner's transform.
    pub transform: &'a mut Transform,
    /// Broad-phase collider table, for idempotent shape registration.
    pub colliders: &'a mut ColliderRegistry,
    /// Deferred-destruction sets.
    pub destroy: &'a mut DestructionQueue,
    pub backend: &'a mut dyn Backend,
}

impl ComponentContext<'_> {
    /// Request deferred destruction of the owning entity.
    ///
    /// A request, not a removal: the entity stays fully alive until the
    /// scene's cleanup phase runs. Marking twice is the same as once.
    pub fn destroy_self(&mut self) {
        self.destroy.mark(self.kind, self.entity);
    }
}

/// Frame-loop services injected into every component render.
pub struct RenderContext<'a> {
    pub entity: Entity,
    /// The owner's world position, with the parent chain applied.
    pub position: Vec2,
    pub transform: &'a Transform,
    pub backend: &'a mut dyn Backend,
    /// Whether debug-render overlays are enabled this frame.
    pub debug: bool,
}
