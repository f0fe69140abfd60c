//! # Scene — The Per-Frame Coordinator
//!
//! A [`Scene`] owns the entity container, the systems runner, the collider
//! registry, the destruction queue, the camera, and the backend, and drives
//! the cooperative frame sequence:
//!
//! ```text
//! update()                    camera zoom/reset → 3D delegate → frame delta
//!                             → component pass (owner injected per call)
//!                             → systems → force-end signal
//! render()                    partition by kind → collect renderables from
//!                             enabled+visible game entities → follow camera
//!                             → layer-sorted draw (stable) → scene/UI pass
//!                             on top → debug diagnostics
//! remove_deleted_entities()   drain destruction sets → detach components,
//!                             purge collider rows, destroy → systems cleanup
//! ```
//!
//! The contract is single-threaded and strictly ordered: `update` exactly
//! once per frame before `render`, `remove_deleted_entities` after `render`
//! and before the next `update`. Nothing here locks — every guarantee comes
//! from that ordering. [`Scene::run_frame`] encodes the sequence for hosts
//! that don't need to interleave their own steps.
//!
//! Concrete scenes hook in through [`SceneScript`]: `on_start` fires from
//! [`Scene::begin`], `play` is invoked once by the host's scene manager to
//! build content, and the optional `update`/`render` extensions run after
//! the base passes.

pub mod camera;

use std::any::TypeId;

use serde::{Deserialize, Serialize};

use crate::backend::{Backend, CAMERA_RESET_KEY, Color};
use crate::components::collider::ColliderRegistry;
use crate::ecs::component::{ComponentContext, RenderContext};
use crate::ecs::entity::Entity;
use crate::ecs::store::{DestructionQueue, EntityKind, EntityStore};
use crate::ecs::system::{System, SystemContext, SystemSet};
use crate::math::Vec2;
use camera::{Camera2d, CameraFollow, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};

/// Static scene parameters: window size, world bounds, title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    pub title: String,
    /// Viewport width in pixels.
    pub width: f32,
    /// Viewport height in pixels.
    pub height: f32,
    /// World width the inside-map follow clamps against.
    pub world_width: f32,
    /// World height the inside-map follow clamps against.
    pub world_height: f32,
}

impl SceneConfig {
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "untitled".to_string(),
            width: 800.0,
            height: 800.0,
            world_width: 800.0,
            world_height: 800.0,
        }
    }
}

/// Coarse game state the host's scene manager reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Running,
    /// Terminal: a scene requested exit via `force_end_scene`. The scene
    /// manager, not the scene, performs the actual teardown.
    ForcedExit,
}

/// Hooks a concrete scene implements. Only `play` is required.
pub trait SceneScript {
    /// Pre-construction setup, before the scene manager calls anything else.
    fn initialize(&mut self) {}

    /// Invoked by [`Scene::begin`].
    fn on_start(&mut self, _scene: &mut Scene) {}

    /// Build content: entities, components, systems. Invoked once by the
    /// host's scene manager after `begin`.
    fn play(&mut self, scene: &mut Scene);

    /// Extension run after the base update pass.
    fn update(&mut self, _scene: &mut Scene) {}

    /// Extension run after the base render pass.
    fn render(&mut self, _scene: &mut Scene) {}
}

/// The top-level per-frame coordinator.
pub struct Scene {
    config: SceneConfig,
    store: EntityStore,
    systems: SystemSet,
    colliders: ColliderRegistry,
    destroy: DestructionQueue,
    backend: Box<dyn Backend>,

    /// 2D camera state. Public so scripts can position it directly.
    pub camera: Camera2d,
    pub camera_2d_enabled: bool,
    /// Enables the opaque 3D pass-through (delegated to the backend).
    pub camera_3d_enabled: bool,
    pub follow: CameraFollow,
    /// Weak reference to the entity the camera follows. A dead entity here
    /// simply disables following until it is reassigned.
    pub follow_target: Option<Entity>,

    /// Scripts set this to request scene exit; observed at the end of each
    /// update as a signal, never an immediate teardown.
    pub force_end_scene: bool,
    /// Enables debug overlays: collider outlines, follow crosshair, FPS and
    /// pointer diagnostics.
    pub debug_render: bool,

    state: GameState,
    delta: f32,
}

impl Scene {
    /// Build a scene over `backend`. The camera starts centered on the
    /// window with zoom 1 and following disabled.
    pub fn new(backend: Box<dyn Backend>, config: SceneConfig) -> Self {
        let center = config.viewport() * 0.5;
        Self {
            config,
            store: EntityStore::new(),
            systems: SystemSet::new(),
            colliders: ColliderRegistry::default(),
            destroy: DestructionQueue::default(),
            backend,
            camera: Camera2d::centered(center),
            camera_2d_enabled: false,
            camera_3d_enabled: false,
            follow: CameraFollow::default(),
            follow_target: None,
            force_end_scene: false,
            debug_render: false,
            state: GameState::default(),
            delta: 0.0,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    /// The broad-phase collider table, for external collision queries.
    pub fn colliders(&self) -> &ColliderRegistry {
        &self.colliders
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Frame delta published by the latest update.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    // ── Content API ──────────────────────────────────────────────────

    /// Create a camera-relative world entity.
    pub fn create_game_entity(&mut self, name: &str, position: Vec2) -> Entity {
        self.store.spawn(name, EntityKind::Game, position)
    }

    /// Create a screen-space entity, always drawn on top of the world.
    pub fn create_scene_entity(&mut self, name: &str, position: Vec2) -> Entity {
        self.store.spawn(name, EntityKind::Scene, position)
    }

    /// Request deferred destruction. The entity stays live until
    /// [`remove_deleted_entities`](Scene::remove_deleted_entities) runs;
    /// repeated requests are idempotent.
    pub fn destroy_entity(&mut self, entity: Entity) {
        if let Some(kind) = self.store.kind(entity) {
            self.destroy.mark(kind, entity);
        }
    }

    pub fn is_pending_destroy(&self, entity: Entity) -> bool {
        self.destroy.is_pending(entity)
    }

    /// Register a logic system, executed each update after all component
    /// updates, in registration order.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        self.systems.add_system(system);
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Start the scene: reset the collider registry and the systems runner,
    /// then hand control to the script's `on_start`.
    pub fn begin(&mut self, script: &mut dyn SceneScript) {
        log::debug!("scene \"{}\": begin", self.config.title);
        self.colliders.clear();
        self.systems.clear();
        self.destroy.clear();
        self.state = GameState::Running;
        script.on_start(self);
    }

    /// End the scene: tear down systems and destroy every entity, returning
    /// the container to empty.
    pub fn end(&mut self) {
        log::debug!(
            "scene \"{}\": end ({} entities)",
            self.config.title,
            self.store.len()
        );
        let Self {
            store,
            systems,
            colliders,
            destroy,
            backend,
            delta,
            ..
        } = self;
        let mut ctx = SystemContext {
            store,
            colliders,
            destroy,
            backend: backend.as_mut(),
            delta: *delta,
        };
        systems.teardown(&mut ctx);
        systems.clear();
        self.store.despawn_all();
        self.colliders.clear();
        self.destroy.clear();
    }

    // ── Frame sequence ───────────────────────────────────────────────

    /// Advance the scene by one frame: camera controls, delta, component
    /// updates (with the owner injected per call), then systems.
    pub fn update(&mut self) {
        if self.camera_2d_enabled {
            let wheel = self.backend.mouse_wheel_move();
            self.camera.zoom = (self.camera.zoom + wheel * ZOOM_STEP).clamp(ZOOM_MIN, ZOOM_MAX);

            if self.backend.key_pressed(CAMERA_RESET_KEY) {
                self.camera.zoom = 1.0;
                self.camera.rotation = 0.0;
            }
        }

        if self.camera_3d_enabled {
            self.backend.update_camera_3d();
        }

        self.delta = self.backend.frame_delta();

        {
            let Self {
                store,
                colliders,
                destroy,
                backend,
                delta,
                ..
            } = self;
            let delta = *delta;
            store.update_pass(|entity, kind, position, transform, component| {
                let mut ctx = ComponentContext {
                    entity,
                    kind,
                    position,
                    delta,
                    transform,
                    colliders: &mut *colliders,
                    destroy: &mut *destroy,
                    backend: backend.as_mut(),
                };
                component.update(&mut ctx);
            });
        }

        // Systems run strictly after every component has updated, so they
        // only ever observe fully-updated state for the frame.
        {
            let Self {
                store,
                systems,
                colliders,
                destroy,
                backend,
                delta,
                ..
            } = self;
            let mut ctx = SystemContext {
                store,
                colliders,
                destroy,
                backend: backend.as_mut(),
                delta: *delta,
            };
            systems.execute(&mut ctx);
        }

        if self.force_end_scene {
            self.state = GameState::ForcedExit;
        }
    }

    /// Draw the frame: game entities layer-sorted under the camera, scene
    /// entities unconditionally on top, debug overlays last.
    pub fn render(&mut self) {
        let viewport = self.config.viewport();
        let world = self.config.world_size();

        // Re-query rather than reuse the update snapshot; entities may have
        // been added or removed between the phases.
        let game_entities = self.store.entities_of_kind(EntityKind::Game);
        let scene_entities = self.store.entities_of_kind(EntityKind::Scene);

        // Collect renderables from enabled+visible game entities.
        let mut draw_list: Vec<(i32, Entity, TypeId)> = Vec::new();
        for &entity in &game_entities {
            let Some(transform) = self.store.transform(entity) else {
                continue;
            };
            if !(transform.enabled && transform.visible) {
                continue;
            }
            self.store.each_renderable(entity, |tid, renderable| {
                draw_list.push((renderable.render_layer(), entity, tid));
            });
        }
        // Stable: components sharing a layer keep collection order, which is
        // what keeps overlapping sprites (shadows under units) deterministic.
        draw_list.sort_by_key(|&(layer, _, _)| layer);

        // Following a dead entity is a no-op, not an error: the camera stays
        // wherever it last was.
        let followed = self
            .follow_target
            .filter(|&entity| self.store.is_alive(entity));
        let camera_active = self.camera_2d_enabled && followed.is_some();

        if let Some(target) = followed {
            if self.camera_2d_enabled {
                let position = self
                    .store
                    .world_position(target)
                    .unwrap_or(self.camera.target);
                self.camera = self
                    .follow
                    .apply(&self.camera, position, viewport, world, self.delta);
                self.backend.begin_mode_2d(&self.camera);
            }
        }
        if self.camera_3d_enabled {
            self.backend.begin_mode_3d();
        }

        {
            let Self { store, backend, debug_render, .. } = self;
            for &(_, entity, tid) in &draw_list {
                let Some(position) = store.world_position(entity) else {
                    continue;
                };
                store.with_renderable(entity, tid, |renderable, transform| {
                    let mut ctx = RenderContext {
                        entity,
                        position,
                        transform,
                        backend: backend.as_mut(),
                        debug: *debug_render,
                    };
                    renderable.render(&mut ctx);
                });
            }
        }

        if camera_active {
            if self.debug_render {
                self.draw_follow_crosshair(viewport);
            }
            self.backend.end_mode_2d();
        }
        if self.camera_3d_enabled {
            self.backend.end_mode_3d();
        }

        // Scene/UI entities draw after the world, unsorted, in entity-list
        // order: always on top regardless of their render layers.
        {
            let Self { store, backend, debug_render, .. } = self;
            for &entity in &scene_entities {
                let Some(transform) = store.transform(entity) else {
                    continue;
                };
                if !(transform.enabled && transform.visible) {
                    continue;
                }
                let Some(position) = store.world_position(entity) else {
                    continue;
                };
                store.each_renderable(entity, |_, renderable| {
                    let mut ctx = RenderContext {
                        entity,
                        position,
                        transform,
                        backend: backend.as_mut(),
                        debug: *debug_render,
                    };
                    renderable.render(&mut ctx);
                });
            }
        }

        if self.debug_render {
            let mouse = self.backend.mouse_position();
            self.backend.draw_text(
                &format!("({:.0}, {:.0})", mouse.x, mouse.y),
                Vec2::new(10.0, 10.0),
                20.0,
                Color::WHITE,
            );
            self.backend.draw_fps(Vec2::new(10.0, 30.0));
            if camera_active {
                self.backend.draw_text(
                    &format!("zoom {:.2}", self.camera.zoom),
                    Vec2::new(10.0, 50.0),
                    20.0,
                    Color::WHITE,
                );
            }
        }
    }

    /// Crosshair lines through the followed entity, drawn in world space.
    fn draw_follow_crosshair(&mut self, viewport: Vec2) {
        let Some(position) = self
            .follow_target
            .and_then(|entity| self.store.world_position(entity))
        else {
            return;
        };
        let reach_x = viewport.x * 10.0;
        let reach_y = viewport.y * 10.0;
        self.backend.draw_line(
            Vec2::new(position.x, -reach_y),
            Vec2::new(position.x, reach_y),
            Color::GREEN,
        );
        self.backend.draw_line(
            Vec2::new(-reach_x, position.y),
            Vec2::new(reach_x, position.y),
            Color::GREEN,
        );
    }

    /// Apply deferred destruction: the only transition out of
    /// pending-destroy. Detaches components, purges collider rows, destroys
    /// the entities, then runs the systems cleanup pass.
    ///
    /// Must run between `render` and the next `update`, never during them.
    pub fn remove_deleted_entities(&mut self) {
        let pending = self.destroy.drain();
        if !pending.is_empty() {
            log::debug!(
                "scene \"{}\": destroying {} entities",
                self.config.title,
                pending.len()
            );
        }
        for entity in pending {
            self.store.remove_all_components(entity);
            self.colliders.remove(entity);
            self.store.despawn(entity);
        }

        let Self {
            store,
            systems,
            colliders,
            destroy,
            backend,
            delta,
            ..
        } = self;
        let mut ctx = SystemContext {
            store,
            colliders,
            destroy,
            backend: backend.as_mut(),
            delta: *delta,
        };
        systems.cleanup(&mut ctx);
    }

    /// Drive one whole frame in contract order: base update, script update,
    /// base render, script render, destruction sweep.
    pub fn run_frame(&mut self, script: &mut dyn SceneScript) {
        self.update();
        script.update(self);
        self.render();
        script.render(self);
        self.remove_deleted_entities();
    }
}
