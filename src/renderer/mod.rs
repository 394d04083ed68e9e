//! Drawable primitives
//!
//! Views describe a frame as a lazy stream of [`Primitive`]s instead of raw
//! pixel writes. Shapes are authored in local coordinates and moved into place
//! with [`shapes::relative`].

pub mod shapes;

pub use shapes::{RectStyle, point, rectangle, relative, text};

use crate::DeviceError;
use crate::platform::Display;

/// A single drawing instruction for a monochrome panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    /// One pixel, lit when `on` and cleared otherwise
    Point { x: i32, y: i32, on: bool },
    /// A text label rasterized by the display driver
    Text {
        x: i32,
        y: i32,
        text: String,
        size: u8,
        spacing: u8,
    },
}

impl Primitive {
    /// Shift by an offset, leaving every other field untouched
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        match self {
            Primitive::Point { x, y, on } => Primitive::Point {
                x: x + dx,
                y: y + dy,
                on,
            },
            Primitive::Text {
                x,
                y,
                text,
                size,
                spacing,
            } => Primitive::Text {
                x: x + dx,
                y: y + dy,
                text,
                size,
                spacing,
            },
        }
    }

    /// Hand this primitive to the display driver
    pub fn draw<D: Display + ?Sized>(&self, display: &mut D) -> Result<(), DeviceError> {
        match self {
            Primitive::Point { x, y, on } => display.set_pixel(*x, *y, *on),
            Primitive::Text {
                x,
                y,
                text,
                size,
                spacing,
            } => display.draw_text(*x, *y, text, *size, *spacing),
        }
    }
}
