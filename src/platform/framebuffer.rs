//! In-memory monochrome display
//!
//! Mirrors the panel driver's buffer: `begin` clears it, writes outside the
//! panel are clipped, `end` counts as a flush. Text is recorded as labels
//! rather than rasterized.

use super::Display;
use crate::DeviceError;

/// A text label as handed to the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLabel {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub size: u8,
    pub spacing: u8,
}

#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
    labels: Vec<TextLabel>,
    flushes: u64,
    in_session: bool,
}

impl FrameBuffer {
    /// Create a blank buffer; both dimensions must be positive
    pub fn new(width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "display dimensions must be positive, got {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            pixels: vec![false; (width * height) as usize],
            labels: Vec::new(),
            flushes: 0,
            in_session: false,
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Whether a pixel is lit (off-panel coordinates read as dark)
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map(|i| self.pixels[i]).unwrap_or(false)
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    /// Number of completed draw sessions
    pub fn flushes(&self) -> u64 {
        self.flushes
    }

    pub fn in_session(&self) -> bool {
        self.in_session
    }

    /// Pixel and label contents are identical
    pub fn same_image(&self, other: &FrameBuffer) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.pixels == other.pixels
            && self.labels == other.labels
    }

    pub fn clear(&mut self) {
        self.pixels.fill(false);
        self.labels.clear();
    }
}

impl Display for FrameBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) -> Result<(), DeviceError> {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = on;
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        size: u8,
        spacing: u8,
    ) -> Result<(), DeviceError> {
        self.labels.push(TextLabel {
            x,
            y,
            text: text.to_string(),
            size,
            spacing,
        });
        Ok(())
    }

    fn begin(&mut self) -> Result<(), DeviceError> {
        self.clear();
        self.in_session = true;
        Ok(())
    }

    fn end(&mut self) -> Result<(), DeviceError> {
        self.in_session = false;
        self.flushes += 1;
        Ok(())
    }
}
