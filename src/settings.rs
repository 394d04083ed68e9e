//! Host settings
//!
//! Read from the JSON file named by `POCKET_ARCADE_SETTINGS` when set, then
//! `POCKET_ARCADE_GAME` overrides the game choice. The device build has no
//! settings at all; these only shape the host stand-ins.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::SettingsError;
use crate::consts::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FRAME_DELAY_MS};
use crate::games::{breakout, pong};

/// Environment variable naming a settings file
pub const SETTINGS_ENV: &str = "POCKET_ARCADE_SETTINGS";
/// Environment variable selecting the game
pub const GAME_ENV: &str = "POCKET_ARCADE_GAME";

/// Which game to boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    #[default]
    Breakout,
    Pong,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Breakout => "breakout",
            GameKind::Pong => "pong",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakout" => Some(GameKind::Breakout),
            "pong" => Some(GameKind::Pong),
            _ => None,
        }
    }

    /// Smallest panel the game's layout fits on
    pub fn min_display(&self) -> (u32, u32) {
        match self {
            GameKind::Breakout => (
                breakout::PADDLE_W as u32,
                (breakout::PADDLE_H * 2.0 + breakout::BALL_H) as u32,
            ),
            GameKind::Pong => (
                (pong::PADDLE_MARGIN + pong::PADDLE_W) as u32 * 2,
                pong::PADDLE_H as u32,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameKind,

    // === Panel ===
    pub display_width: u32,
    pub display_height: u32,

    // === Host stand-ins ===
    /// Sleep between frames in place of wait-for-interrupt
    pub frame_delay_ms: u64,
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
    /// Frames between synthetic button presses
    pub click_interval: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game: GameKind::Breakout,
            display_width: DISPLAY_WIDTH,
            display_height: DISPLAY_HEIGHT,
            frame_delay_ms: FRAME_DELAY_MS,
            seed: None,
            click_interval: 300,
        }
    }
}

impl Settings {
    /// Settings file if configured, environment overrides, then validation
    pub fn load() -> Result<Self, SettingsError> {
        let mut settings = match std::env::var_os(SETTINGS_ENV) {
            Some(path) => {
                let settings = Self::from_file(Path::new(&path))?;
                log::info!("Loaded settings from {}", Path::new(&path).display());
                settings
            }
            None => Self::default(),
        };

        if let Ok(name) = std::env::var(GAME_ENV) {
            settings.apply_game_override(&name);
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Switch game by name; unknown names are logged and ignored
    pub fn apply_game_override(&mut self, name: &str) {
        match GameKind::from_str(name) {
            Some(game) => self.game = game,
            None => log::warn!("Unknown game '{}', keeping {}", name, self.game.as_str()),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let (min_w, min_h) = self.game.min_display();
        if self.display_width < min_w || self.display_height < min_h {
            return Err(SettingsError::Invalid(format!(
                "{} needs at least a {}x{} display, got {}x{}",
                self.game.as_str(),
                min_w,
                min_h,
                self.display_width,
                self.display_height
            )));
        }
        if self.click_interval == 0 {
            return Err(SettingsError::Invalid(
                "click_interval must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}
