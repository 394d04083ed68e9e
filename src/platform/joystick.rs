//! Joystick implementations
//!
//! [`AdcJoystick`] turns two raw analog channels and a button into a
//! [`JoystickState`]. The module on the board is mounted rotated, so the first
//! channel drives the vertical axis and the second the horizontal one, both
//! inverted.

use std::collections::VecDeque;

use super::{Joystick, JoystickState};
use crate::DeviceError;

/// Raw reading with the stick at rest
pub const ADC_CENTER: f32 = 2000.0;
/// Raw units per unit of reported deflection
pub const ADC_DIVISOR: f32 = 20.0;
/// Largest value a 12-bit converter reports
pub const ADC_MAX: u16 = 4095;

/// A single analog-to-digital converter input
pub trait AnalogChannel {
    fn read(&mut self) -> Result<u16, DeviceError>;
}

/// A digital push button
pub trait Button {
    fn is_pressed(&mut self) -> Result<bool, DeviceError>;
}

pub struct AdcJoystick<A, B, P> {
    first: A,
    second: B,
    button: P,
}

impl<A: AnalogChannel, B: AnalogChannel, P: Button> AdcJoystick<A, B, P> {
    pub fn new(first: A, second: B, button: P) -> Self {
        Self {
            first,
            second,
            button,
        }
    }
}

fn deflection(raw: u16) -> f32 {
    -(raw as f32 - ADC_CENTER) / ADC_DIVISOR
}

impl<A: AnalogChannel, B: AnalogChannel, P: Button> Joystick for AdcJoystick<A, B, P> {
    fn read(&mut self) -> Result<JoystickState, DeviceError> {
        let y = deflection(self.first.read()?);
        let x = deflection(self.second.read()?);
        let clicked = self.button.is_pressed()?;
        Ok(JoystickState { x, y, clicked })
    }
}

/// Synthetic channel sweeping a sine wave around the rest position
#[derive(Debug, Clone)]
pub struct SweepChannel {
    amplitude: f32,
    phase: f32,
    step: f32,
}

impl SweepChannel {
    /// `step` is the phase advance per read in radians
    pub fn new(amplitude: f32, phase: f32, step: f32) -> Self {
        Self {
            amplitude,
            phase,
            step,
        }
    }
}

impl AnalogChannel for SweepChannel {
    fn read(&mut self) -> Result<u16, DeviceError> {
        let raw = ADC_CENTER + self.amplitude * self.phase.sin();
        self.phase = (self.phase + self.step) % std::f32::consts::TAU;
        Ok(raw.round().clamp(0.0, ADC_MAX as f32) as u16)
    }
}

/// Synthetic button pressed for one read out of every `period`
#[derive(Debug, Clone)]
pub struct PulseButton {
    period: u32,
    count: u32,
}

impl PulseButton {
    pub fn new(period: u32) -> Self {
        assert!(period > 0, "pulse period must be positive");
        Self { period, count: 0 }
    }
}

impl Button for PulseButton {
    fn is_pressed(&mut self) -> Result<bool, DeviceError> {
        let pressed = self.count == 0;
        self.count = (self.count + 1) % self.period;
        Ok(pressed)
    }
}

/// Replays queued samples, then reports a centred stick forever
#[derive(Debug, Clone, Default)]
pub struct ScriptedJoystick {
    script: VecDeque<JoystickState>,
}

impl ScriptedJoystick {
    pub fn new(script: impl IntoIterator<Item = JoystickState>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    pub fn push(&mut self, state: JoystickState) {
        self.script.push_back(state);
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Joystick for ScriptedJoystick {
    fn read(&mut self) -> Result<JoystickState, DeviceError> {
        Ok(self.script.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(u16);

    impl AnalogChannel for Fixed {
        fn read(&mut self) -> Result<u16, DeviceError> {
            Ok(self.0)
        }
    }

    struct Held(bool);

    impl Button for Held {
        fn is_pressed(&mut self) -> Result<bool, DeviceError> {
            Ok(self.0)
        }
    }

    struct Broken;

    impl AnalogChannel for Broken {
        fn read(&mut self) -> Result<u16, DeviceError> {
            Err(DeviceError::Joystick("adc timeout".to_string()))
        }
    }

    #[test]
    fn test_rest_position_is_centred() {
        let mut stick = AdcJoystick::new(Fixed(2000), Fixed(2000), Held(false));
        assert_eq!(stick.read().unwrap(), JoystickState::default());
    }

    #[test]
    fn test_axes_are_swapped_and_inverted() {
        let mut stick = AdcJoystick::new(Fixed(1000), Fixed(3000), Held(true));
        let state = stick.read().unwrap();
        assert!((state.y - 50.0).abs() < 1e-4);
        assert!((state.x + 50.0).abs() < 1e-4);
        assert!(state.clicked);
    }

    #[test]
    fn test_channel_failure_propagates() {
        let mut stick = AdcJoystick::new(Broken, Fixed(2000), Held(false));
        assert!(matches!(stick.read(), Err(DeviceError::Joystick(_))));
    }

    #[test]
    fn test_sweep_stays_in_converter_range() {
        let mut ch = SweepChannel::new(5000.0, 0.0, 0.3);
        for _ in 0..100 {
            assert!(ch.read().unwrap() <= ADC_MAX);
        }
    }

    #[test]
    fn test_pulse_button_period() {
        let mut b = PulseButton::new(3);
        let presses: Vec<bool> = (0..6).map(|_| b.is_pressed().unwrap()).collect();
        assert_eq!(presses, vec![true, false, false, true, false, false]);
    }

    #[test]
    fn test_script_runs_out_to_neutral() {
        let click = JoystickState {
            clicked: true,
            ..Default::default()
        };
        let mut stick = ScriptedJoystick::new([click]);
        assert!(stick.read().unwrap().clicked);
        assert_eq!(stick.remaining(), 0);
        assert!(!stick.read().unwrap().clicked);
    }
}
