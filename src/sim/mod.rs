//! Ball physics
//!
//! Pure functions and plain records; nothing here touches a device.
//! - Fixed one-tick steps, no sub-stepping
//! - Speed is restored exactly on every deflection
//! - Paddles are clamped to their track on every move

pub mod body;
pub mod collision;

pub use body::{Ball, Brick, Paddle, slide_along_track};
pub use collision::{
    AngledDeflection, Arena, Deflection, Walls, advance, collides, reflect_off_paddle,
    reflect_off_paddle_vertical, reflect_off_wall, resolve_brick_contact,
};
