//! Frame loop shared by every game
//!
//! Each frame the engine:
//! 1. Samples the joystick and display size into an immutable [`FrameInput`]
//! 2. Hands the previous state and that input to [`Game::controller`]
//! 3. Draws the primitives from [`Game::view`] inside a display session
//! 4. Idles until the next interrupt
//!
//! State is an owned value threaded from one frame to the next; nothing else
//! survives between frames.

use std::convert::Infallible;

use crate::platform::{Display, DisplaySession, Idle, Joystick, JoystickState, RandomSource};
use crate::renderer::Primitive;
use crate::{DeviceError, EngineError};

/// Panel size as seen by a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayInfo {
    pub width: u32,
    pub height: u32,
}

impl DisplayInfo {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "display dimensions must be positive, got {}x{}",
            width,
            height
        );
        Self { width, height }
    }
}

/// Everything a controller learns about the outside world in one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub display: DisplayInfo,
    pub joystick: JoystickState,
}

impl FrameInput {
    pub fn new(display: DisplayInfo, joystick: JoystickState) -> Self {
        Self { display, joystick }
    }

    /// Centred stick, no click
    pub fn at_rest(display: DisplayInfo) -> Self {
        Self::new(display, JoystickState::default())
    }
}

/// A game as a state machine plus a view
pub trait Game {
    type State;

    fn name(&self) -> &'static str;

    /// State at power-on, before the first click
    fn initial_state(&self, display: DisplayInfo) -> Self::State;

    /// Advance one tick. `rng` is only consulted when a new round is dealt.
    fn controller(
        &self,
        state: Self::State,
        input: FrameInput,
        rng: &mut dyn RandomSource,
    ) -> Self::State;

    /// Describe the state as primitives. Must not depend on anything but
    /// `state`, so two calls on the same state draw the same frame.
    fn view<'a>(&self, state: &'a Self::State) -> impl Iterator<Item = Primitive> + 'a;
}

/// Draw a primitive stream inside one display session
///
/// The session is flushed whether or not drawing succeeds. Returns the number
/// of primitives drawn.
pub fn render<D, I>(display: &mut D, primitives: I) -> Result<usize, DeviceError>
where
    D: Display + ?Sized,
    I: IntoIterator<Item = Primitive>,
{
    let mut session = DisplaySession::begin(display)?;
    let mut count = 0;
    for primitive in primitives {
        primitive.draw(session.display())?;
        count += 1;
    }
    session.finish()?;
    Ok(count)
}

pub struct Engine<G, D, J, R, I> {
    game: G,
    display: D,
    joystick: J,
    rng: R,
    idle: I,
    frame: u64,
}

impl<G, D, J, R, I> Engine<G, D, J, R, I>
where
    G: Game,
    D: Display,
    J: Joystick,
    R: RandomSource,
    I: Idle,
{
    pub fn new(game: G, display: D, joystick: J, rng: R, idle: I) -> Self {
        Self {
            game,
            display,
            joystick,
            rng,
            idle,
            frame: 0,
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn joystick_mut(&mut self) -> &mut J {
        &mut self.joystick
    }

    /// Frames completed so far
    pub fn frames(&self) -> u64 {
        self.frame
    }

    pub fn display_info(&self) -> DisplayInfo {
        DisplayInfo::new(self.display.width(), self.display.height())
    }

    pub fn initial_state(&self) -> G::State {
        self.game.initial_state(self.display_info())
    }

    /// Sample every input device once
    pub fn poll(&mut self) -> Result<FrameInput, DeviceError> {
        let joystick = self.joystick.read()?;
        Ok(FrameInput::new(self.display_info(), joystick))
    }

    /// Run one frame: poll, update, draw. Does not idle.
    pub fn step(&mut self, state: G::State) -> Result<G::State, EngineError> {
        let frame = self.frame;
        let input = self
            .poll()
            .map_err(|source| EngineError::Device { frame, source })?;
        let state = self.game.controller(state, input, &mut self.rng);

        let drawn = render(&mut self.display, self.game.view(&state))
            .map_err(|source| EngineError::Device { frame, source })?;
        log::trace!("frame {}: {} primitives", frame, drawn);

        self.frame += 1;
        Ok(state)
    }

    /// Loop forever. Only a device failure ends the loop.
    pub fn run(mut self) -> Result<Infallible, EngineError> {
        let info = self.display_info();
        log::info!(
            "Starting {} on a {}x{} display",
            self.game.name(),
            info.width,
            info.height
        );

        let mut state = self.initial_state();
        loop {
            state = self.step(state)?;
            self.idle.wait();
        }
    }
}
