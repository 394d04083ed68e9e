//! Pocket Arcade entry point
//!
//! Boots the configured game against host stand-ins for the board's
//! peripherals: the panel is mirrored to the terminal, the joystick is a pair
//! of swept analog channels with a periodic click, and wait-for-interrupt is a
//! short sleep. The loop only ends if a device fails.

use std::convert::Infallible;
use std::io;

use pocket_arcade::games::{Breakout, Pong};
use pocket_arcade::platform::{
    AdcJoystick, PcgRandom, PulseButton, SleepIdle, SweepChannel, TerminalDisplay,
};
use pocket_arcade::{Engine, EngineError, Game, GameKind, Settings};

/// Raw-unit swing of the synthetic stick around its rest position
const SWEEP_AMPLITUDE: f32 = 1800.0;

fn main() {
    env_logger::init();
    log::info!("Pocket Arcade starting...");

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            std::process::exit(2);
        }
    };

    let result = match settings.game {
        GameKind::Breakout => launch(Breakout, &settings),
        GameKind::Pong => launch(Pong, &settings),
    };

    match result {
        Ok(never) => match never {},
        Err(e) => {
            log::error!("Frame cycle halted: {}", e);
            std::process::exit(1);
        }
    }
}

fn launch<G: Game>(game: G, settings: &Settings) -> Result<Infallible, EngineError> {
    let display = TerminalDisplay::new(
        settings.display_width,
        settings.display_height,
        io::stdout(),
    );
    let joystick = AdcJoystick::new(
        SweepChannel::new(SWEEP_AMPLITUDE, 0.0, 0.05),
        SweepChannel::new(SWEEP_AMPLITUDE, 1.3, 0.08),
        PulseButton::new(settings.click_interval),
    );
    let rng = match settings.seed {
        Some(seed) => PcgRandom::seeded(seed),
        None => PcgRandom::from_entropy(),
    };
    let idle = SleepIdle::new(settings.frame_delay());

    Engine::new(game, display, joystick, rng, idle).run()
}
