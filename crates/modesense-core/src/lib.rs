//! Core types for the modesense input mode detector.
//!
//! This crate provides the vocabulary shared by detection and prompt lookup:
//! - [`InputMode`], the device class a player is currently using
//! - [`DeviceAffinity`], the device bucket of a single physical key
//! - Error types and default tuning constants

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{DeviceAffinity, InputMode, PlayerIndex};

/// Default tuning values.
pub mod constants {
    use std::time::Duration;

    use crate::types::InputMode;

    /// General mode assumed for players that have not produced any input.
    pub const DEFAULT_INPUT_MODE: InputMode = InputMode::Mouse;
    /// Button mode assumed for players that have not pressed anything.
    pub const DEFAULT_BUTTON_INPUT_MODE: InputMode = InputMode::Keyboard;
    /// Analog magnitude a gamepad axis must exceed to count as gamepad use.
    pub const DEFAULT_GAMEPAD_AXIS_THRESHOLD: f32 = 0.2;
    /// Per-axis cursor travel that must be exceeded to count as mouse use.
    pub const DEFAULT_MOUSE_MOVE_THRESHOLD: f32 = 1.0;
    /// Players pre-allocated by a new tracker (grows on demand).
    pub const DEFAULT_PLAYER_CAPACITY: usize = 4;
    /// Player indices at or above this are ignored by mode detection.
    pub const MAX_PLAYERS: usize = 64;
    /// Stick deflection at which stick-direction pseudo-buttons are pressed.
    pub const DEFAULT_STICK_PRESS_THRESHOLD: f32 = 0.5;
    /// Interval between window foreground checks.
    pub const DEFAULT_FOREGROUND_POLL_INTERVAL: Duration = Duration::from_millis(500);
}
