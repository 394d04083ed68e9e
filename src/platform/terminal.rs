//! Terminal mirror of the panel
//!
//! Draws into a [`FrameBuffer`] and prints it on every flush, two pixel rows
//! per text line using half-block glyphs. Labels are listed under the image.

use std::io::Write;

use super::{Display, FrameBuffer};
use crate::DeviceError;

pub struct TerminalDisplay<W: Write> {
    buffer: FrameBuffer,
    out: W,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(width: u32, height: u32, out: W) -> Self {
        Self {
            buffer: FrameBuffer::new(width, height),
            out,
        }
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Render the buffer as text
    pub fn render(&self) -> String {
        let (w, h) = (self.buffer.width() as i32, self.buffer.height() as i32);
        let mut s = String::with_capacity(((w + 1) * (h / 2 + 1)) as usize * 3);
        for row in (0..h).step_by(2) {
            for x in 0..w {
                let glyph = match (self.buffer.pixel(x, row), self.buffer.pixel(x, row + 1)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                };
                s.push(glyph);
            }
            s.push('\n');
        }
        for label in self.buffer.labels() {
            s.push_str(&format!("[{},{} x{}] {}\n", label.x, label.y, label.size, label.text));
        }
        s
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn width(&self) -> u32 {
        self.buffer.width()
    }

    fn height(&self) -> u32 {
        self.buffer.height()
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) -> Result<(), DeviceError> {
        self.buffer.set_pixel(x, y, on)
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        size: u8,
        spacing: u8,
    ) -> Result<(), DeviceError> {
        self.buffer.draw_text(x, y, text, size, spacing)
    }

    fn begin(&mut self) -> Result<(), DeviceError> {
        self.buffer.begin()
    }

    fn end(&mut self) -> Result<(), DeviceError> {
        self.buffer.end()?;
        let frame = self.render();
        // Home the cursor so frames overwrite each other
        write!(self.out, "\x1b[H{}", frame)?;
        self.out.flush()?;
        Ok(())
    }
}
