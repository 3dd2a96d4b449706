//=========================================================================
// Rendering Surface
//=========================================================================
//
// A 2D immediate-mode drawing context.
//
// Scenes issue draw calls in arena units through the `Canvas` trait and
// never touch pixels directly. The driver applies the viewport transform
// (translate to the arena offset, scale by pixels-per-cell) before the
// scene renders.
//
// Architecture:
// ```text
//   Scene ──draw calls──> dyn Canvas
//                            └─ Rasterizer (Vec<u32> framebuffer)
//                                  └─ presented by the platform layer
// ```
//
//=========================================================================

//=== Module Declarations =================================================

mod font;
mod rasterizer;

//=== Public API ==========================================================

pub use rasterizer::Rasterizer;

//=== Color ===============================================================

/// Straight (non-premultiplied) RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,

    /// Opacity in `0.0..=1.0`.
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Packs the colour as `0x00RRGGBB`, discarding alpha.
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Returns the colour with its alpha multiplied by `factor`.
    pub fn faded(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }
}

//=== Canvas ==============================================================

/// Immediate-mode 2D drawing context.
///
/// Coordinates pass through the current transform (translation and scale,
/// no rotation). `save`/`restore` push and pop the transform and the
/// global alpha together.
pub trait Canvas {
    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);

    /// Fills the whole surface, ignoring transform and alpha.
    fn clear(&mut self, color: Color);

    fn save(&mut self);
    fn restore(&mut self);

    fn translate(&mut self, dx: f32, dy: f32);
    fn scale(&mut self, sx: f32, sy: f32);

    /// Multiplies every subsequent draw by `alpha` until restored.
    fn set_alpha(&mut self, alpha: f32);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    /// Draws a line of `width` units between two points.
    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color);

    /// Draws `text` centred on `(cx, cy)`, with glyphs `size` units tall.
    fn fill_text(&mut self, text: &str, cx: f32, cy: f32, size: f32, color: Color);
}

//=========================================================================
// Test Support
//=========================================================================


//=========================================================================
// Unit Tests
//=========================================================================
