//! # Skald — 2D Scene/Entity Frame-Loop Core
//!
//! The orchestration core of a 2D scene/entity engine: an entity container
//! with exact-type component lookup, a cooperative
//! Update → Systems → Render → Cleanup frame sequence, camera-follow
//! strategies, and broad-phase collider registration. Drawing, windowing,
//! and input stay behind the [`Backend`](backend::Backend) trait.
//!
//! Start with `use skald::prelude::*`, implement
//! [`SceneScript`](scene::SceneScript), and drive a [`Scene`](scene::Scene)
//! from your host loop.

pub mod backend;
pub mod components;
pub mod ecs;
pub mod math;
pub mod prelude;
pub mod scene;
