//! Shape generation for monochrome primitives
//!
//! Every constructor returns a fresh, lazy iterator. Composite shapes are
//! produced in a local frame starting at (0, 0) and wrapped in [`relative`].

use std::iter;

use super::Primitive;

/// How a rectangle is rasterized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectStyle {
    /// Every cell of the w×h grid
    Filled,
    /// Border cells only
    Outlined,
}

/// Place a locally-authored shape at `(dx, dy)`
pub fn relative<I>(dx: i32, dy: i32, shape: I) -> impl Iterator<Item = Primitive>
where
    I: IntoIterator<Item = Primitive>,
{
    shape.into_iter().map(move |p| p.translate(dx, dy))
}

/// A single pixel
pub fn point(x: i32, y: i32, on: bool) -> impl Iterator<Item = Primitive> {
    iter::once(Primitive::Point { x, y, on })
}

/// A text label
pub fn text(
    x: i32,
    y: i32,
    label: impl Into<String>,
    size: u8,
    spacing: u8,
) -> impl Iterator<Item = Primitive> {
    iter::once(Primitive::Text {
        x,
        y,
        text: label.into(),
        size,
        spacing,
    })
}

/// Axis-aligned rectangle with its top-left corner at `(x, y)`
///
/// A zero width or height yields nothing.
pub fn rectangle(
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    style: RectStyle,
    on: bool,
) -> impl Iterator<Item = Primitive> {
    relative(x, y, local_rectangle(w as i32, h as i32, style, on))
}

fn local_rectangle(w: i32, h: i32, style: RectStyle, on: bool) -> impl Iterator<Item = Primitive> {
    (0..w).flat_map(move |x| {
        (0..h).filter_map(move |y| {
            let border = x == 0 || y == 0 || x == w - 1 || y == h - 1;
            (style == RectStyle::Filled || border).then_some(Primitive::Point { x, y, on })
        })
    })
}
