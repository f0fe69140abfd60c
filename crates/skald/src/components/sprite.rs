//! Textured quad renderable.

use crate::backend::{Color, TextureHandle};
use crate::ecs::component::{Component, RenderContext, Renderable};
use crate::math::Vec2;

/// Draws a texture at the owner's world position, with the owner's rotation
/// and scale applied by the backend.
pub struct Sprite {
    pub texture: TextureHandle,
    /// Point of the texture placed at the owner's position. Defaults to the
    /// texture's top-left corner (zero).
    pub origin: Vec2,
    pub tint: Color,
    pub render_layer: i32,
}

impl Sprite {
    pub fn new(texture: TextureHandle) -> Self {
        Self {
            texture,
            origin: Vec2::ZERO,
            tint: Color::WHITE,
            render_layer: 0,
        }
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.render_layer = layer;
        self
    }
}

impl Component for Sprite {
    fn renderable(&self) -> Option<&dyn Renderable> {
        Some(self)
    }
}

impl Renderable for Sprite {
    fn render_layer(&self) -> i32 {
        self.render_layer
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        ctx.backend.draw_texture(
            self.texture,
            ctx.position - self.origin,
            ctx.transform.rotation,
            ctx.transform.scale,
            self.tint,
        );
    }
}
