//! Monochrome pixel framebuffer with the drawing primitives the game needs.

use super::font;

/// Panel width of the handheld's display.
pub const PANEL_WIDTH: u16 = 128;
/// Panel height of the handheld's display.
pub const PANEL_HEIGHT: u16 = 64;

/// 1-bit framebuffer. Drawing outside the panel is clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelPanel {
    width: u16,
    height: u16,
    pixels: Vec<bool>,
}

impl PixelPanel {
    /// Creates a blank panel.
    pub fn new(width: u16, height: u16) -> Self {
        let len = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            pixels: vec![false; len],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        let x = u16::try_from(x).ok()?;
        let y = u16::try_from(y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Whether a pixel is lit. Outside the panel reads as dark.
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        self.idx(x, y).is_some_and(|i| self.pixels[i])
    }

    /// Lights a pixel.
    pub fn set_pixel(&mut self, x: i32, y: i32) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = true;
        }
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }

    /// Number of lit pixels.
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    /// One-pixel outline of a `w` x `h` rectangle at (`x`, `y`).
    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        for dx in 0..w {
            self.set_pixel(x + dx, y);
            self.set_pixel(x + dx, y + h - 1);
        }
        for dy in 0..h {
            self.set_pixel(x, y + dy);
            self.set_pixel(x + w - 1, y + dy);
        }
    }

    /// Solid `w` x `h` rectangle.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        for dy in 0..h.max(0) {
            for dx in 0..w.max(0) {
                self.set_pixel(x + dx, y + dy);
            }
        }
    }

    /// Bresenham line including both endpoints.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set_pixel(x, y);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draws one glyph with its top-left at (`x`, `y`), each font pixel
    /// scaled to `size` x `size`.
    pub fn draw_char(&mut self, x: i32, y: i32, ch: char, size: i32) {
        let glyph = font::glyph(ch);
        for (column, bits) in (0i32..).zip(glyph) {
            for row in 0..font::GLYPH_HEIGHT {
                if bits & (1 << row) != 0 {
                    self.fill_rect(x + column * size, y + row * size, size, size);
                }
            }
        }
    }

    /// Draws text left to right, advancing one glyph cell per character.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, size: i32) {
        let mut cx = x;
        for ch in text.chars() {
            self.draw_char(cx, y, ch, size);
            cx += font::ADVANCE * size;
        }
    }

    /// Rows of `#` (lit) and `.` (dark), newline separated.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.pixels.len() + usize::from(self.height));
        for row in self.pixels.chunks(usize::from(self.width)) {
            out.extend(row.iter().map(|lit| if *lit { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}

impl Default for PixelPanel {
    fn default() -> Self {
        Self::new(PANEL_WIDTH, PANEL_HEIGHT)
    }
}
