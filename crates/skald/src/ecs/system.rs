//! # Systems — Ordered Game Logic
//!
//! A system is cross-entity logic that runs once per frame, after every
//! component has updated. Where components own the data glued to one entity,
//! systems read and steer *many* entities — movement rules, collision
//! reactions, spawn waves.
//!
//! [`SystemSet`] keeps systems in registration order and drives the
//! four-phase lifecycle: `initialize` once before a system's first execute,
//! `execute` every frame, `cleanup` during the scene's destruction sweep,
//! `teardown` when the scene ends. Systems registered mid-scene are
//! initialized on the next execute pass, so registration order is always
//! execution order.

use crate::backend::Backend;
use crate::components::collider::ColliderRegistry;
use crate::ecs::entity::Entity;
use crate::ecs::store::{DestructionQueue, EntityStore};

/// A unit of per-frame game logic.
pub trait System {
    /// One-time setup, called before this system's first [`execute`](System::execute).
    fn initialize(&mut self, _ctx: &mut SystemContext<'_>) {}

    /// Per-frame logic. Runs after all component updates for the frame, so
    /// it always observes fully-updated component state.
    fn execute(&mut self, ctx: &mut SystemContext<'_>);

    /// Called once per frame during the destruction sweep, after entities
    /// marked this frame have been destroyed.
    fn cleanup(&mut self, _ctx: &mut SystemContext<'_>) {}

    /// Called when the scene ends.
    fn teardown(&mut self, _ctx: &mut SystemContext<'_>) {}
}

/// What a system gets to work with each phase.
pub struct SystemContext<'a> {
    pub store: &'a mut EntityStore,
    pub colliders: &'a mut ColliderRegistry,
    pub destroy: &'a mut DestructionQueue,
    pub backend: &'a mut dyn Backend,
    /// Seconds since the previous frame.
    pub delta: f32,
}

impl SystemContext<'_> {
    /// Request deferred destruction of `entity`. No-op for dead handles;
    /// marking twice is the same as once.
    pub fn destroy_entity(&mut self, entity: Entity) {
        if let Some(kind) = self.store.kind(entity) {
            self.destroy.mark(kind, entity);
        }
    }
}

/// An ordered collection of systems.
pub struct SystemSet {
    systems: Vec<Box<dyn System>>,
    /// How many systems at the front have been initialized.
    initialized: usize,
}

impl SystemSet {
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
            initialized: 0,
        }
    }

    /// Register a system at the end of the execution order.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        self.systems.push(Box::new(system));
    }

    /// Initialize any newly added systems, then execute all in order.
    pub fn execute(&mut self, ctx: &mut SystemContext<'_>) {
        for system in &mut self.systems[self.initialized..] {
            system.initialize(ctx);
        }
        self.initialized = self.systems.len();

        for system in &mut self.systems {
            system.execute(ctx);
        }
    }

    /// Run every system's cleanup phase.
    pub fn cleanup(&mut self, ctx: &mut SystemContext<'_>) {
        for system in &mut self.systems {
            system.cleanup(ctx);
        }
    }

    /// Run every system's teardown phase. The set itself stays registered;
    /// call [`clear`](SystemSet::clear) to drop the systems.
    pub fn teardown(&mut self, ctx: &mut SystemContext<'_>) {
        for system in &mut self.systems {
            system.teardown(ctx);
        }
    }

    pub fn clear(&mut self) {
        self.systems.clear();
        self.initialized = 0;
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

impl Default for SystemSet {
    fn default() -> Self {
        Self::new()
    }
}
