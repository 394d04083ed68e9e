//! The two games
//!
//! Each game is a [`crate::Game`]: a state record, a controller that advances
//! it one tick, and a view that turns it into primitives.

pub mod breakout;
pub mod pong;

pub use breakout::Breakout;
pub use pong::Pong;

use glam::Vec2;

use crate::renderer::{Primitive, RectStyle, rectangle};

/// Solid box covering a body, snapped to whole pixels
pub(crate) fn body_shape(pos: Vec2, size: Vec2) -> impl Iterator<Item = Primitive> {
    rectangle(
        pos.x as i32,
        pos.y as i32,
        size.x as u32,
        size.y as u32,
        RectStyle::Filled,
        true,
    )
}
