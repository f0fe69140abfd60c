//! Built-in components: the transform every entity carries, the two generic
//! renderables, and the broad-phase colliders.

pub mod collider;
pub mod label;
pub mod sprite;
pub mod transform;

pub use collider::{BoxCollider, CircleCollider, ColliderRegistry, ColliderShape};
pub use label::Label;
pub use sprite::Sprite;
pub use transform::Transform;
