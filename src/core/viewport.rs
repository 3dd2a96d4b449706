//=========================================================================
// Viewport
//=========================================================================
//
// Maps the window's pixel size onto a grid of square cells.
//
// The arena is always `virtual_height` cells tall. The integer scale
// factor is the number of pixels per cell; the width is however many
// whole cells fit horizontally. Leftover pixels are split evenly on both
// sides so the arena stays centred.
//
//=========================================================================

/// Grid extents and the pixel transform for the arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Arena width in cells.
    pub width: u32,

    /// Arena height in cells.
    pub height: u32,

    /// Pixels per cell.
    pub scale_factor: u32,

    /// Horizontal pixel offset of the arena origin.
    pub offset_x: f32,

    /// Vertical pixel offset of the arena origin.
    pub offset_y: f32,
}

impl Viewport {
    /// Derives the viewport for a window of `window_width` x `window_height`
    /// pixels.
    ///
    /// Degenerate sizes never divide by zero: the scale factor is at least
    /// one pixel per cell and both extents are at least one cell.
    pub fn from_window(window_width: u32, window_height: u32, virtual_height: u32) -> Self {
        let height = virtual_height.max(1);
        let scale_factor = (window_height / height).max(1);
        let width = (window_width / scale_factor).max(1);

        let offset_x = (window_width as f32 - (scale_factor * width) as f32) / 2.0;
        let offset_y = (window_height as f32 - (scale_factor * height) as f32) / 2.0;

        Self {
            width,
            height,
            scale_factor,
            offset_x,
            offset_y,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
