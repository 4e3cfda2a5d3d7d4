// Screen-side types for the window front-end.

use image::RgbaImage;

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // window width (pixels)
    pub height: usize,     // window height (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// Pack an RGBA image as 0x00RRGGBB, dropping alpha.
    pub fn from_rgba(img: &RgbaImage) -> Self {
        let pixels = img
            .pixels()
            .map(|px| {
                let [r, g, b, _] = px.0;
                ((r as u32) << 16) | ((g as u32) << 8) | b as u32
            })
            .collect();
        Self { width: img.width() as usize, height: img.height() as usize, pixels }
    }
}

/// What held mouse buttons do to the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Draw,
    Erase,
}
