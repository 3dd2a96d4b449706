//=========================================================================
// Software Rasterizer
//=========================================================================
//
// CPU implementation of `Canvas` over a `0x00RRGGBB` framebuffer.
//
// Supports translation + scale transforms, a save/restore stack and
// source-over alpha blending. A pixel is covered by a shape when its
// centre lies inside it, so adjacent cells tile without gaps or overlap.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::font::{glyph, text_width, GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
use super::{Canvas, Color};

//=== DrawState ===========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct DrawState {
    translate: (f32, f32),
    scale: (f32, f32),
    alpha: f32,
}

impl DrawState {
    const IDENTITY: Self = Self {
        translate: (0.0, 0.0),
        scale: (1.0, 1.0),
        alpha: 1.0,
    };

    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.scale.0 + self.translate.0,
            y * self.scale.1 + self.translate.1,
        )
    }
}

//=== Rasterizer ==========================================================

pub struct Rasterizer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl Rasterizer {
    //--- Construction -----------------------------------------------------

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize)],
            state: DrawState::IDENTITY,
            stack: Vec::with_capacity(8),
        }
    }

    /// Resizes the framebuffer, clearing it to black.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize((width as usize) * (height as usize), 0);
    }

    //--- Accessors --------------------------------------------------------

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    //--- Internal Helpers -------------------------------------------------

    /// Converts a device-space span to a clamped pixel index range.
    fn span(&self, from: f32, to: f32, limit: u32) -> (usize, usize) {
        let lo = from.min(to).round().max(0.0).min(limit as f32) as usize;
        let hi = from.max(to).round().max(0.0).min(limit as f32) as usize;
        (lo, hi)
    }

    fn blend(&mut self, index: usize, color: Color, alpha: f32) {
        let Some(dst) = self.pixels.get_mut(index) else {
            return;
        };

        if alpha >= 1.0 {
            *dst = color.to_u32();
            return;
        }

        let mix = |src: u8, dst: u32| -> u32 {
            let value = src as f32 * alpha + dst as f32 * (1.0 - alpha);
            value.round().clamp(0.0, 255.0) as u32
        };

        let r = mix(color.r, (*dst >> 16) & 0xFF);
        let g = mix(color.g, (*dst >> 8) & 0xFF);
        let b = mix(color.b, *dst & 0xFF);
        *dst = (r << 16) | (g << 8) | b;
    }

    fn fill_device_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
        let alpha = color.a * self.state.alpha;
        if alpha <= 0.0 {
            return;
        }

        let (left, right) = self.span(x0, x1, self.width);
        let (top, bottom) = self.span(y0, y1, self.height);
        let stride = self.width as usize;

        for y in top..bottom {
            for x in left..right {
                self.blend(y * stride + x, color, alpha);
            }
        }
    }
}

//=== Canvas Implementation ===============================================

impl Canvas for Rasterizer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_u32());
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        let (x, y) = self.state.apply(dx, dy);
        self.state.translate = (x, y);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.state.scale.0 *= sx;
        self.state.scale.1 *= sy;
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let (x0, y0) = self.state.apply(x, y);
        let (x1, y1) = self.state.apply(x + width, y + height);
        self.fill_device_rect(x0, y0, x1, y1, color);
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color) {
        let (x0, y0) = self.state.apply(from.0, from.1);
        let (x1, y1) = self.state.apply(to.0, to.1);
        let thickness = (width * self.state.scale.0.abs().max(self.state.scale.1.abs())).max(1.0);
        let half = thickness / 2.0;

        // Axis-aligned lines are a single rectangle
        if x0 == x1 || y0 == y1 {
            let (rx0, rx1) = if x0 == x1 { (x0 - half, x0 + half) } else { (x0, x1) };
            let (ry0, ry1) = if y0 == y1 { (y0 - half, y0 + half) } else { (y0, y1) };
            self.fill_device_rect(rx0, ry0, rx1, ry1, color);
            return;
        }

        let alpha = color.a * self.state.alpha;
        if alpha <= 0.0 {
            return;
        }

        // Collect covered pixels first so translucent strokes blend once
        let length = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
        let steps = length.ceil() as usize + 1;
        let stride = self.width as usize;
        let mut covered = Vec::with_capacity(steps * thickness.ceil() as usize);

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let cx = x0 + (x1 - x0) * t;
            let cy = y0 + (y1 - y0) * t;
            let (left, right) = self.span(cx - half, cx + half, self.width);
            let (top, bottom) = self.span(cy - half, cy + half, self.height);
            for y in top..bottom {
                for x in left..right {
                    covered.push(y * stride + x);
                }
            }
        }

        covered.sort_unstable();
        covered.dedup();
        for index in covered {
            self.blend(index, color, alpha);
        }
    }

    fn fill_text(&mut self, text: &str, cx: f32, cy: f32, size: f32, color: Color) {
        let dot = size / GLYPH_HEIGHT as f32;
        let left = cx - text_width(text) as f32 * dot / 2.0;
        let top = cy - size / 2.0;

        for (index, c) in text.chars().enumerate() {
            let origin = left + (index as u32 * GLYPH_ADVANCE) as f32 * dot;
            for (row, bits) in glyph(c).iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                        self.fill_rect(
                            origin + col as f32 * dot,
                            top + row as f32 * dot,
                            dot,
                            dot,
                            color,
                        );
                    }
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
