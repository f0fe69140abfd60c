//! Entity-component core: generational entities, the entity container,
//! component contracts, and the systems runner.

pub mod component;
pub mod entity;
pub mod store;
pub mod system;

pub use component::{Component, ComponentContext, RenderContext, Renderable};
pub use entity::Entity;
pub use store::{DestructionQueue, EntityKind, EntityStore};
pub use system::{System, SystemContext, SystemSet};
