//! Text renderable with owner-registered click dispatch.

use crate::backend::Color;
use crate::ecs::component::{Component, RenderContext, Renderable};
use crate::ecs::entity::Entity;

/// Handler invoked synchronously when a label is clicked. Receives the
/// owning entity.
pub type ClickHandler = Box<dyn FnMut(Entity)>;

/// Draws a line of text at the owner's world position.
pub struct Label {
    pub text: String,
    pub font_size: f32,
    pub color: Color,
    pub render_layer: i32,
    on_click: Option<ClickHandler>,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: 20.0,
            color: Color::WHITE,
            render_layer: 0,
            on_click: None,
        }
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.render_layer = layer;
        self
    }

    /// Register the click handler. The owner supplies the handler value;
    /// hit-testing is the host UI layer's job.
    pub fn set_on_click(&mut self, handler: ClickHandler) {
        self.on_click = Some(handler);
    }

    /// Dispatch the click handler synchronously, if one is registered.
    pub fn click(&mut self, owner: Entity) {
        if let Some(handler) = self.on_click.as_mut() {
            handler(owner);
        }
    }
}

impl Component for Label {
    fn renderable(&self) -> Option<&dyn Renderable> {
        Some(self)
    }
}

impl Renderable for Label {
    fn render_layer(&self) -> i32 {
        self.render_layer
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        ctx.backend
            .draw_text(&self.text, ctx.position, self.font_size, self.color);
    }
}
