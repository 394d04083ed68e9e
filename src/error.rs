//! Error types
//!
//! Device failures halt the frame cycle; there is no retry policy on a
//! single-purpose device. Logic errors (bad dimensions, impossible layouts) are
//! panics, not variants here.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by a hardware collaborator
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Pixel or text write rejected by the display
    #[error("display write failed: {0}")]
    Display(String),
    /// Buffer could not be pushed to the panel
    #[error("display flush failed: {0}")]
    Flush(String),
    /// Analog or digital input could not be sampled
    #[error("joystick read failed: {0}")]
    Joystick(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failure while loading [`crate::Settings`]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Why the engine stopped running
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("frame {frame} failed: {source}")]
    Device {
        frame: u64,
        #[source]
        source: DeviceError,
    },
}
