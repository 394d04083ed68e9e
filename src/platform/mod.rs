//! Platform abstraction layer
//!
//! The engine only talks to hardware through these traits:
//! - `Display`: buffered monochrome panel
//! - `Joystick`: analog stick with a click button
//! - `RandomSource`: hardware RNG
//! - `Idle`: sleep until the next interrupt
//!
//! Host implementations live in the submodules so the games run and test
//! off-device.

pub mod framebuffer;
pub mod host;
pub mod joystick;
pub mod terminal;

pub use framebuffer::FrameBuffer;
pub use host::{PcgRandom, SleepIdle};
pub use joystick::{AdcJoystick, AnalogChannel, Button, PulseButton, ScriptedJoystick, SweepChannel};
pub use terminal::TerminalDisplay;

use crate::DeviceError;

/// Monochrome display with a buffered draw session
pub trait Display {
    /// Width in pixels, fixed for the process lifetime
    fn width(&self) -> u32;
    /// Height in pixels, fixed for the process lifetime
    fn height(&self) -> u32;
    fn set_pixel(&mut self, x: i32, y: i32, on: bool) -> Result<(), DeviceError>;
    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        size: u8,
        spacing: u8,
    ) -> Result<(), DeviceError>;
    /// Start buffering writes for a new frame
    fn begin(&mut self) -> Result<(), DeviceError>;
    /// Push the buffered frame to the panel
    fn end(&mut self) -> Result<(), DeviceError>;
}

/// One joystick sample
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JoystickState {
    /// Horizontal deflection (signed, device scale)
    pub x: f32,
    /// Vertical deflection (signed, device scale)
    pub y: f32,
    pub clicked: bool,
}

pub trait Joystick {
    fn read(&mut self) -> Result<JoystickState, DeviceError>;
}

pub trait RandomSource {
    /// A value in `[0, bound)`; `bound` must be non-zero
    fn below(&mut self, bound: u32) -> u32;
}

pub trait Idle {
    /// Block until something worth waking for happens
    fn wait(&mut self);
}

/// Scoped acquisition of the display buffer
///
/// `begin` runs on creation. The frame is flushed by [`DisplaySession::finish`]
/// or, if drawing bailed out early, when the session is dropped.
pub struct DisplaySession<'a, D: Display + ?Sized> {
    display: &'a mut D,
    open: bool,
}

impl<'a, D: Display + ?Sized> DisplaySession<'a, D> {
    pub fn begin(display: &'a mut D) -> Result<Self, DeviceError> {
        display.begin()?;
        Ok(Self {
            display,
            open: true,
        })
    }

    pub fn display(&mut self) -> &mut D {
        &mut *self.display
    }

    /// Flush and release, reporting flush failures
    pub fn finish(mut self) -> Result<(), DeviceError> {
        self.open = false;
        self.display.end()
    }
}

impl<D: Display + ?Sized> Drop for DisplaySession<'_, D> {
    fn drop(&mut self) {
        if self.open {
            if let Err(e) = self.display.end() {
                log::error!("Flush after aborted frame failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_flushes_on_finish() {
        let mut fb = FrameBuffer::new(8, 8);
        let mut session = DisplaySession::begin(&mut fb).unwrap();
        session.display().set_pixel(1, 1, true).unwrap();
        session.finish().unwrap();
        assert_eq!(fb.flushes(), 1);
        assert!(fb.pixel(1, 1));
    }

    #[test]
    fn test_session_flushes_on_early_exit() {
        fn draw_then_fail(fb: &mut FrameBuffer) -> Result<(), DeviceError> {
            let mut session = DisplaySession::begin(fb)?;
            session.display().set_pixel(2, 3, true)?;
            Err(DeviceError::Display("bus stalled".to_string()))
        }

        let mut fb = FrameBuffer::new(8, 8);
        assert!(draw_then_fail(&mut fb).is_err());
        assert_eq!(fb.flushes(), 1);
        assert!(!fb.in_session());
    }
}
