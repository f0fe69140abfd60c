//! One-stop imports for scene scripts and systems.

pub use crate::backend::{Backend, Color, HeadlessBackend, Key, TextureHandle};
pub use crate::components::{
    BoxCollider, CircleCollider, ColliderRegistry, ColliderShape, Label, Sprite, Transform,
};
pub use crate::ecs::{
    Component, ComponentContext, DestructionQueue, Entity, EntityKind, EntityStore, RenderContext,
    Renderable, System, SystemContext, SystemSet,
};
pub use crate::math::{Aabb, Vec2, vec2};
pub use crate::scene::camera::{Camera2d, CameraFollow};
pub use crate::scene::{GameState, Scene, SceneConfig, SceneScript};
