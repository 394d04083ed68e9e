//! Pocket Arcade - Breakout and Pong for a tiny monochrome panel
//!
//! Core modules:
//! - `renderer`: Drawable primitives and shape composition
//! - `sim`: Ball physics and collision response
//! - `games`: The two game state machines (controller + view)
//! - `engine`: Poll / update / draw / idle loop
//! - `platform`: Device collaborator traits and host implementations
//! - `settings`: Host configuration

pub mod engine;
pub mod error;
pub mod games;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use engine::{Engine, FrameInput, Game};
pub use error::{DeviceError, EngineError, SettingsError};
pub use settings::{GameKind, Settings};

/// Device configuration constants
pub mod consts {
    /// SSD1306 panel dimensions
    pub const DISPLAY_WIDTH: u32 = 128;
    pub const DISPLAY_HEIGHT: u32 = 64;

    /// Raw joystick units per pixel of paddle travel
    pub const JOYSTICK_DIVISOR: f32 = 10.0;

    /// Pause between frames on the host (the device sleeps until an interrupt)
    pub const FRAME_DELAY_MS: u64 = 33;
}

/// Convert a raw joystick deflection into whole pixels of paddle travel
#[inline]
pub fn joystick_to_pixels(deflection: f32) -> f32 {
    (deflection / consts::JOYSTICK_DIVISOR).trunc()
}
