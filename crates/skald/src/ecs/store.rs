//! # EntityStore — The Entity Container
//!
//! The store owns every live entity and everything attached to it. Each
//! record holds the entity's debug name, its [`EntityKind`], an enabled flag,
//! an inline [`Transform`] (every entity has one, attached at creation — a
//! transform can never be missing), and a small attach-ordered map of
//! components keyed by `TypeId`.
//!
//! ## Storage shape
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ EntityStore                                          │
//! │                                                      │
//! │  allocator: generational slot allocator              │
//! │                                                      │
//! │  records: HashMap<u32, EntityRecord>                 │
//! │    name, kind, enabled, transform,                   │
//! │    components: Vec<(TypeId, Box<dyn Component>)>     │
//! │                                                      │
//! │  order: Vec<Entity>   ← insertion order              │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Component lookup is by exact type, at most one instance per type — the
//! per-entity `Vec` is a tiny association list, cheaper and
//! iteration-deterministic at the handful-of-components scale entities
//! actually have. `order` keeps every query deterministic: render passes walk
//! entities in creation order, which is what makes layer ties and UI draw
//! order stable frame to frame.
//!
//! Destruction is two-phase: [`DestructionQueue::mark`] only records intent;
//! the scene's cleanup phase is the single place records actually die. Code
//! iterating the live set mid-frame never observes a half-destroyed entity.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};

use crate::components::transform::Transform;
use crate::ecs::component::Component;
use crate::ecs::entity::{Entity, EntityAllocator};
use crate::math::Vec2;

/// Which render partition an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Camera-relative world object.
    Game,
    /// Screen-space object (UI), always drawn on top of the game world.
    Scene,
}

struct EntityRecord {
    name: String,
    kind: EntityKind,
    enabled: bool,
    transform: Transform,
    components: Vec<(TypeId, Box<dyn Component>)>,
}

/// Container of all live entities and their components.
pub struct EntityStore {
    allocator: EntityAllocator,
    records: HashMap<u32, EntityRecord>,
    /// Live entities in creation order.
    order: Vec<Entity>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            records: HashMap::new(),
            order: Vec::new(),
        }
    }

    // ── Spawn / Despawn ──────────────────────────────────────────────

    /// Create an entity with a fresh [`Transform`] at `position`.
    ///
    /// The name is for debugging only and need not be unique.
    pub fn spawn(&mut self, name: &str, kind: EntityKind, position: Vec2) -> Entity {
        let entity = self.allocator.allocate();
        self.records.insert(
            entity.index(),
            EntityRecord {
                name: name.to_string(),
                kind,
                enabled: true,
                transform: Transform::from_position(position),
                components: Vec::new(),
            },
        );
        self.order.push(entity);
        entity
    }

    /// Destroy an entity immediately, dropping all of its components.
    ///
    /// Returns `false` for a dead or stale handle. Frame-loop code should
    /// prefer deferred destruction via [`DestructionQueue`]; this is the
    /// terminal operation the cleanup phase calls.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.allocator.deallocate(entity) {
            return false;
        }
        self.records.remove(&entity.index());
        self.order.retain(|&e| e != entity);
        true
    }

    /// Destroy every entity, returning the container to empty.
    pub fn despawn_all(&mut self) {
        for entity in std::mem::take(&mut self.order) {
            self.allocator.deallocate(entity);
            self.records.remove(&entity.index());
        }
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Snapshot of all live entities, in creation order.
    pub fn entities(&self) -> Vec<Entity> {
        self.order.clone()
    }

    /// Snapshot of live entities of one kind, in creation order.
    pub fn entities_of_kind(&self, kind: EntityKind) -> Vec<Entity> {
        self.order
            .iter()
            .copied()
            .filter(|e| self.record(*e).is_some_and(|r| r.kind == kind))
            .collect()
    }

    /// Snapshot of live entities carrying a component of type `T`.
    pub fn entities_with<T: Component>(&self) -> Vec<Entity> {
        let tid = TypeId::of::<T>();
        self.order
            .iter()
            .copied()
            .filter(|e| {
                self.record(*e)
                    .is_some_and(|r| r.components.iter().any(|(t, _)| *t == tid))
            })
            .collect()
    }

    // ── Per-entity state ─────────────────────────────────────────────

    pub fn name(&self, entity: Entity) -> Option<&str> {
        self.record(entity).map(|r| r.name.as_str())
    }

    pub fn kind(&self, entity: Entity) -> Option<EntityKind> {
        self.record(entity).map(|r| r.kind)
    }

    /// Whether the entity participates in the update pass at all.
    pub fn is_enabled(&self, entity: Entity) -> bool {
        self.record(entity).is_some_and(|r| r.enabled)
    }

    pub fn set_enabled(&mut self, entity: Entity, enabled: bool) {
        if let Some(record) = self.record_mut(entity) {
            record.enabled = enabled;
        }
    }

    pub fn transform(&self, entity: Entity) -> Option<&Transform> {
        self.record(entity).map(|r| &r.transform)
    }

    pub fn transform_mut(&mut self, entity: Entity) -> Option<&mut Transform> {
        self.record_mut(entity).map(|r| &mut r.transform)
    }

    /// World position of an entity, composing the parent chain.
    ///
    /// A parented transform contributes its `local_position` on top of the
    /// parent's world position. A dangling parent (destroyed entity) makes
    /// this transform behave as a root. Cycles in the parent chain are a
    /// caller error and are not checked.
    pub fn world_position(&self, entity: Entity) -> Option<Vec2> {
        let record = self.record(entity)?;
        match record.transform.parent {
            Some(parent) => match self.world_position(parent) {
                Some(base) => Some(base + record.transform.local_position),
                None => Some(record.transform.position),
            },
            None => Some(record.transform.position),
        }
    }

    // ── Components ───────────────────────────────────────────────────

    /// Attach a component, replacing any existing instance of the same type.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) {
        let Some(record) = self.record_mut(entity) else {
            log::warn!("add_component on dead entity {entity:?}");
            return;
        };
        let tid = TypeId::of::<T>();
        if let Some(slot) = record.components.iter_mut().find(|(t, _)| *t == tid) {
            slot.1 = Box::new(component);
        } else {
            record.components.push((tid, Box::new(component)));
        }
    }

    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        let record = self.record(entity)?;
        let tid = TypeId::of::<T>();
        record
            .components
            .iter()
            .find(|(t, _)| *t == tid)
            .and_then(|(_, c)| (c.as_ref() as &dyn Any).downcast_ref::<T>())
    }

    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        let record = self.record_mut(entity)?;
        let tid = TypeId::of::<T>();
        record
            .components
            .iter_mut()
            .find(|(t, _)| *t == tid)
            .and_then(|(_, c)| (c.as_mut() as &mut dyn Any).downcast_mut::<T>())
    }

    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.get_component::<T>(entity).is_some()
    }

    /// Detach a component by type. Returns `false` if it wasn't attached.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> bool {
        let Some(record) = self.record_mut(entity) else {
            return false;
        };
        let tid = TypeId::of::<T>();
        let before = record.components.len();
        record.components.retain(|(t, _)| *t != tid);
        record.components.len() != before
    }

    /// Detach every component. The transform stays: it is part of the
    /// entity, not an attachment.
    pub fn remove_all_components(&mut self, entity: Entity) {
        if let Some(record) = self.record_mut(entity) {
            record.components.clear();
        }
    }

    // ── Frame-loop iteration ─────────────────────────────────────────

    /// Run `f` over every component of every enabled entity.
    ///
    /// Iterates a snapshot, so entities spawned or marked from inside `f`
    /// don't disturb this pass. Disabled entities (the entity flag off, or
    /// the transform disabled or invisible) are skipped entirely: none of
    /// their components update. The transform is borrowed apart from the
    /// component map, so components may mutate their own spatial state
    /// freely.
    pub(crate) fn update_pass(
        &mut self,
        mut f: impl FnMut(Entity, EntityKind, Vec2, &mut Transform, &mut dyn Component),
    ) {
        let snapshot = self.order.clone();
        for entity in snapshot {
            if !self.allocator.is_alive(entity) {
                continue;
            }
            let Some(position) = self.world_position(entity) else {
                continue;
            };
            let Some(record) = self.records.get_mut(&entity.index()) else {
                continue;
            };
            if !record.enabled || !record.transform.enabled || !record.transform.visible {
                continue;
            }
            let kind = record.kind;
            let EntityRecord {
                transform,
                components,
                ..
            } = record;
            for (_, component) in components.iter_mut() {
                f(entity, kind, position, transform, component.as_mut());
            }
        }
    }

    /// Visit the renderable view of each of the entity's components, in
    /// attach order.
    pub(crate) fn each_renderable(
        &self,
        entity: Entity,
        mut f: impl FnMut(TypeId, &dyn crate::ecs::component::Renderable),
    ) {
        if let Some(record) = self.record(entity) {
            for (tid, component) in &record.components {
                if let Some(renderable) = component.renderable() {
                    f(*tid, renderable);
                }
            }
        }
    }

    /// Call `f` with the renderable view of one component, if present.
    pub(crate) fn with_renderable(
        &self,
        entity: Entity,
        tid: TypeId,
        f: impl FnOnce(&dyn crate::ecs::component::Renderable, &Transform),
    ) {
        let Some(record) = self.record(entity) else {
            return;
        };
        if let Some((_, component)) = record.components.iter().find(|(t, _)| *t == tid) {
            if let Some(renderable) = component.renderable() {
                f(renderable, &record.transform);
            }
        }
    }

    fn record(&self, entity: Entity) -> Option<&EntityRecord> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.records.get(&entity.index())
    }

    fn record_mut(&mut self, entity: Entity) -> Option<&mut EntityRecord> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.records.get_mut(&entity.index())
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

// ── DestructionQueue ─────────────────────────────────────────────────────

/// Entities awaiting deferred destruction, partitioned by kind.
///
/// Marking is a request, not a removal: set membership makes repeated marks
/// idempotent, and nothing is destroyed until the scene's cleanup phase
/// drains the queue.
#[derive(Default)]
pub struct DestructionQueue {
    game: HashSet<Entity>,
    scene: HashSet<Entity>,
}

impl DestructionQueue {
    pub fn mark(&mut self, kind: EntityKind, entity: Entity) {
        match kind {
            EntityKind::Game => self.game.insert(entity),
            EntityKind::Scene => self.scene.insert(entity),
        };
    }

    pub fn is_pending(&self, entity: Entity) -> bool {
        self.game.contains(&entity) || self.scene.contains(&entity)
    }

    pub fn is_empty(&self) -> bool {
        self.game.is_empty() && self.scene.is_empty()
    }

    pub fn len(&self) -> usize {
        self.game.len() + self.scene.len()
    }

    /// Take every pending entity, game kind first, emptying both sets.
    pub(crate) fn drain(&mut self) -> Vec<Entity> {
        let mut pending: Vec<Entity> = self.game.drain().collect();
        pending.extend(self.scene.drain());
        pending
    }

    pub fn clear(&mut self) {
        self.game.clear();
        self.scene.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2;

    struct Health(u32);
    impl Component for Health {}

    struct Marker;
    impl Component for Marker {}

    #[test]
    fn spawn_attaches_transform_at_position() {
        let mut store = EntityStore::new();
        let e = store.spawn("tank", EntityKind::Game, vec2(3.0, 4.0));
        assert!(store.is_alive(e));
        assert_eq!(store.name(e), Some("tank"));
        assert_eq!(store.kind(e), Some(EntityKind::Game));
        assert_eq!(store.transform(e).unwrap().position, vec2(3.0, 4.0));
        assert!(store.is_enabled(e));
    }

    #[test]
    fn component_round_trip() {
        let mut store = EntityStore::new();
        let e = store.spawn("e", EntityKind::Game, Vec2::ZERO);

        assert!(!store.has_component::<Health>(e));
        store.add_component(e, Health(10));
        assert_eq!(store.get_component::<Health>(e).unwrap().0, 10);

        store.get_component_mut::<Health>(e).unwrap().0 = 25;
        assert_eq!(store.get_component::<Health>(e).unwrap().0, 25);

        assert!(store.remove_component::<Health>(e));
        assert!(!store.remove_component::<Health>(e));
        assert!(store.get_component::<Health>(e).is_none());
    }

    #[test]
    fn add_replaces_same_type() {
        let mut store = EntityStore::new();
        let e = store.spawn("e", EntityKind::Game, Vec2::ZERO);
        store.add_component(e, Health(1));
        store.add_component(e, Health(2));
        assert_eq!(store.get_component::<Health>(e).unwrap().0, 2);
        assert_eq!(store.entities_with::<Health>().len(), 1);
    }

    #[test]
    fn queries_follow_creation_order() {
        let mut store = EntityStore::new();
        let a = store.spawn("a", EntityKind::Game, Vec2::ZERO);
        let b = store.spawn("b", EntityKind::Scene, Vec2::ZERO);
        let c = store.spawn("c", EntityKind::Game, Vec2::ZERO);

        assert_eq!(store.entities(), vec![a, b, c]);
        assert_eq!(store.entities_of_kind(EntityKind::Game), vec![a, c]);
        assert_eq!(store.entities_of_kind(EntityKind::Scene), vec![b]);
    }

    #[test]
    fn despawn_removes_from_queries_and_invalidates_handle() {
        let mut store = EntityStore::new();
        let a = store.spawn("a", EntityKind::Game, Vec2::ZERO);
        let b = store.spawn("b", EntityKind::Game, Vec2::ZERO);
        store.add_component(a, Marker);

        assert!(store.despawn(a));
        assert!(!store.despawn(a));
        assert!(!store.is_alive(a));
        assert_eq!(store.entities(), vec![b]);
        assert!(store.entities_with::<Marker>().is_empty());
        assert!(store.get_component::<Marker>(a).is_none());
        assert!(store.transform(a).is_none());
    }

    #[test]
    fn recycled_slot_does_not_resurrect_old_handle() {
        let mut store = EntityStore::new();
        let old = store.spawn("old", EntityKind::Game, vec2(1.0, 1.0));
        store.despawn(old);
        let new = store.spawn("new", EntityKind::Game, vec2(2.0, 2.0));
        assert_eq!(new.index(), old.index());
        assert!(store.transform(old).is_none());
        assert_eq!(store.transform(new).unwrap().position, vec2(2.0, 2.0));
    }

    #[test]
    fn world_position_composes_parent_chain() {
        let mut store = EntityStore::new();
        let tank = store.spawn("tank", EntityKind::Game, vec2(300.0, 500.0));
        let turret = store.spawn("turret", EntityKind::Game, Vec2::ZERO);
        let muzzle = store.spawn("muzzle", EntityKind::Game, Vec2::ZERO);

        let t = store.transform_mut(turret).unwrap();
        t.parent = Some(tank);
        t.local_position = vec2(0.0, -10.0);
        let m = store.transform_mut(muzzle).unwrap();
        m.parent = Some(turret);
        m.local_position = vec2(0.0, -500.0);

        assert_eq!(store.world_position(tank), Some(vec2(300.0, 500.0)));
        assert_eq!(store.world_position(turret), Some(vec2(300.0, 490.0)));
        assert_eq!(store.world_position(muzzle), Some(vec2(300.0, -10.0)));
    }

    #[test]
    fn dangling_parent_resolves_as_root() {
        let mut store = EntityStore::new();
        let parent = store.spawn("parent", EntityKind::Game, vec2(100.0, 0.0));
        let child = store.spawn("child", EntityKind::Game, vec2(7.0, 7.0));
        let t = store.transform_mut(child).unwrap();
        t.parent = Some(parent);
        t.local_position = vec2(1.0, 1.0);
        assert_eq!(store.world_position(child), Some(vec2(101.0, 1.0)));

        store.despawn(parent);
        // Weak relation: the lookup resolves to absent, child falls back to
        // its own position.
        assert_eq!(store.world_position(child), Some(vec2(7.0, 7.0)));
    }

    #[test]
    fn update_pass_skips_disabled_entities() {
        struct Counter(u32);
        impl Component for Counter {
            fn update(&mut self, _ctx: &mut crate::ecs::component::ComponentContext<'_>) {
                self.0 += 1;
            }
        }

        let mut store = EntityStore::new();
        let on = store.spawn("on", EntityKind::Game, Vec2::ZERO);
        let off = store.spawn("off", EntityKind::Game, Vec2::ZERO);
        store.add_component(on, Counter(0));
        store.add_component(off, Counter(0));
        store.set_enabled(off, false);

        let mut visited = Vec::new();
        store.update_pass(|entity, _, _, _, _| visited.push(entity));
        assert_eq!(visited, vec![on]);
    }

    #[test]
    fn remove_all_components_keeps_transform() {
        let mut store = EntityStore::new();
        let e = store.spawn("e", EntityKind::Game, vec2(5.0, 5.0));
        store.add_component(e, Health(3));
        store.add_component(e, Marker);

        store.remove_all_components(e);
        assert!(!store.has_component::<Health>(e));
        assert!(!store.has_component::<Marker>(e));
        assert_eq!(store.transform(e).unwrap().position, vec2(5.0, 5.0));
    }

    #[test]
    fn destruction_queue_marking_is_idempotent() {
        let mut store = EntityStore::new();
        let e = store.spawn("e", EntityKind::Game, Vec2::ZERO);

        let mut queue = DestructionQueue::default();
        queue.mark(EntityKind::Game, e);
        queue.mark(EntityKind::Game, e);
        assert_eq!(queue.len(), 1);
        assert!(queue.is_pending(e));

        let drained = queue.drain();
        assert_eq!(drained, vec![e]);
        assert!(queue.is_empty());
    }
}
