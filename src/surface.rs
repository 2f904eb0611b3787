//! Drawing capability injected by the host
//!
//! The core never creates or owns a window. Whatever the host renders with
//! only has to implement [`Surface`]; the simulation emits plain rectangle
//! and text calls and nothing else.

/// RGBA color, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const WHITE: Color = Color::rgb(240, 240, 240);
    pub const DIM: Color = Color::rgb(120, 120, 140);
    pub const ACCENT: Color = Color::rgb(155, 155, 255);
}

/// Primitive draw calls the core needs from the host
pub trait Surface {
    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
    fn draw_text(&mut self, x: f32, y: f32, text: &str, color: Color);
}

/// Surface that discards everything; used by headless hosts
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn draw_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32, _color: Color) {}
    fn draw_text(&mut self, _x: f32, _y: f32, _text: &str, _color: Color) {}
}

/// Surface that records every call, for tests and diagnostics
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub rects: Vec<(f32, f32, f32, f32, Color)>,
    pub texts: Vec<(f32, f32, String, Color)>,
}

impl Surface for RecordingSurface {
    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.rects.push((x, y, width, height, color));
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, color: Color) {
        self.texts.push((x, y, text.to_string(), color));
    }
}
