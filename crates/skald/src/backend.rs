//! # Backend — The Opaque Drawing/Input Seam
//!
//! The frame loop never talks to a window, a GPU, or an input device
//! directly. Everything it needs from the platform goes through the
//! [`Backend`] trait: frame delta, a handful of input queries, camera-mode
//! brackets, and a small set of draw primitives.
//!
//! This keeps the orchestration core testable (see [`HeadlessBackend`]) and
//! lets a host wire in any renderer that can satisfy the contract — the core
//! holds a `Box<dyn Backend>` and nothing else.

use crate::math::{Aabb, Vec2};
use crate::scene::camera::Camera2d;
use std::collections::HashSet;

/// Backend-agnostic key identifiers for the few keys the core itself reads.
///
/// Hosts translate their windowing layer's key codes into these. Game content
/// polls its own richer input through whatever the host exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    R,
    Space,
    Enter,
    Escape,
}

/// The key that resets camera zoom and rotation.
pub const CAMERA_RESET_KEY: Key = Key::R;

/// An RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(230, 41, 55);
    pub const GREEN: Color = Color::rgb(0, 228, 48);
    pub const BLUE: Color = Color::rgb(0, 121, 241);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Opaque handle to a texture owned by the backend.
///
/// The core never loads or inspects image data; it only passes handles back
/// to the backend for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// The narrow platform contract the frame loop depends on.
///
/// Methods take `&mut self` uniformly so implementations can buffer draw
/// commands or record calls without interior mutability.
pub trait Backend {
    // ── Frame ────────────────────────────────────────────────────────

    /// Seconds elapsed since the previous frame.
    fn frame_delta(&mut self) -> f32;

    // ── Input ────────────────────────────────────────────────────────

    /// Scroll-wheel movement since the previous frame, in notches.
    fn mouse_wheel_move(&mut self) -> f32;

    /// Whether `key` was pressed this frame.
    fn key_pressed(&mut self, key: Key) -> bool;

    /// Pointer position in screen coordinates.
    fn mouse_position(&mut self) -> Vec2;

    // ── Camera brackets ──────────────────────────────────────────────

    /// Enter camera-relative 2D drawing.
    fn begin_mode_2d(&mut self, camera: &Camera2d);

    /// Leave camera-relative 2D drawing.
    fn end_mode_2d(&mut self);

    /// Advance the backend-owned 3D camera. Pass-through; default no-op.
    fn update_camera_3d(&mut self) {}

    /// Enter 3D drawing. Pass-through; default no-op.
    fn begin_mode_3d(&mut self) {}

    /// Leave 3D drawing. Pass-through; default no-op.
    fn end_mode_3d(&mut self) {}

    // ── Draw primitives ──────────────────────────────────────────────

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn draw_rect_lines(&mut self, rect: Aabb, color: Color);

    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, color: Color);

    fn draw_texture(
        &mut self,
        texture: TextureHandle,
        position: Vec2,
        rotation: f32,
        scale: Vec2,
        tint: Color,
    );

    /// Draw the backend's frame-rate counter.
    fn draw_fps(&mut self, position: Vec2);
}

// ── HeadlessBackend ──────────────────────────────────────────────────────

/// A backend with no output: draws are discarded, input is scripted.
///
/// Lets a [`Scene`](crate::scene::Scene) run without a window — unit tests,
/// CI, server-side simulation. Set [`delta`](HeadlessBackend::delta),
/// [`wheel`](HeadlessBackend::wheel), and the pressed-key set before each
/// frame to drive it.
pub struct HeadlessBackend {
    /// Value returned by `frame_delta`.
    pub delta: f32,
    /// Value returned by `mouse_wheel_move`.
    pub wheel: f32,
    /// Keys reported as pressed this frame.
    pub pressed: HashSet<Key>,
    /// Pointer position reported to the core.
    pub mouse: Vec2,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::with_delta(1.0 / 60.0)
    }

    /// A headless backend reporting a fixed frame delta.
    pub fn with_delta(delta: f32) -> Self {
        Self {
            delta,
            wheel: 0.0,
            pressed: HashSet::new(),
            mouse: Vec2::ZERO,
        }
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for HeadlessBackend {
    fn frame_delta(&mut self) -> f32 {
        self.delta
    }

    fn mouse_wheel_move(&mut self) -> f32 {
        self.wheel
    }

    fn key_pressed(&mut self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn mouse_position(&mut self) -> Vec2 {
        self.mouse
    }

    fn begin_mode_2d(&mut self, _camera: &Camera2d) {}

    fn end_mode_2d(&mut self) {}

    fn draw_line(&mut self, _from: Vec2, _to: Vec2, _color: Color) {}

    fn draw_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}

    fn draw_rect_lines(&mut self, _rect: Aabb, _color: Color) {}

    fn draw_text(&mut self, _text: &str, _position: Vec2, _size: f32, _color: Color) {}

    fn draw_texture(
        &mut self,
        _texture: TextureHandle,
        _position: Vec2,
        _rotation: f32,
        _scale: Vec2,
        _tint: Color,
    ) {
    }

    fn draw_fps(&mut self, _position: Vec2) {}
}
