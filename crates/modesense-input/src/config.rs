//! Tracker configuration.

use modesense_core::constants::{
    DEFAULT_BUTTON_INPUT_MODE, DEFAULT_GAMEPAD_AXIS_THRESHOLD, DEFAULT_INPUT_MODE,
    DEFAULT_MOUSE_MOVE_THRESHOLD, DEFAULT_PLAYER_CAPACITY, DEFAULT_STICK_PRESS_THRESHOLD,
    MAX_PLAYERS,
};
use modesense_core::{Error, InputMode, PlayerIndex, Result};
use serde::{Deserialize, Serialize};

/// Input mode tracker configuration.
///
/// Values are fixed once a tracker is built. Missing fields take their
/// defaults when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// General mode reported for players that have produced no input.
    pub default_mode: InputMode,
    /// Button mode reported for players that have pressed nothing.
    pub default_button_mode: InputMode,
    /// Analog magnitude that must be exceeded to switch to gamepad.
    pub gamepad_axis_threshold: f32,
    /// Per-axis cursor travel that must be exceeded to switch to mouse.
    pub mouse_move_threshold: f32,
    /// Number of player slots allocated up front.
    pub initial_players: usize,
    /// Player that owns the keyboard and mouse.
    pub keyboard_player: PlayerIndex,
    /// Stick deflection at which stick-direction pseudo-buttons fire.
    pub stick_press_threshold: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            default_mode: DEFAULT_INPUT_MODE,
            default_button_mode: DEFAULT_BUTTON_INPUT_MODE,
            gamepad_axis_threshold: DEFAULT_GAMEPAD_AXIS_THRESHOLD,
            mouse_move_threshold: DEFAULT_MOUSE_MOVE_THRESHOLD,
            initial_players: DEFAULT_PLAYER_CAPACITY,
            keyboard_player: 0,
            stick_press_threshold: DEFAULT_STICK_PRESS_THRESHOLD,
        }
    }
}

impl TrackerConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the modes assumed for players that have not been seen.
    #[must_use]
    pub const fn with_defaults(mut self, mode: InputMode, button_mode: InputMode) -> Self {
        self.default_mode = mode;
        self.default_button_mode = button_mode;
        self
    }

    /// Set the gamepad axis threshold.
    #[must_use]
    pub const fn with_gamepad_axis_threshold(mut self, threshold: f32) -> Self {
        self.gamepad_axis_threshold = threshold;
        self
    }

    /// Set the mouse move threshold.
    #[must_use]
    pub const fn with_mouse_move_threshold(mut self, threshold: f32) -> Self {
        self.mouse_move_threshold = threshold;
        self
    }

    /// Set the number of pre-allocated player slots.
    #[must_use]
    pub const fn with_initial_players(mut self, players: usize) -> Self {
        self.initial_players = players;
        self
    }

    /// Set the player that owns the keyboard and mouse.
    #[must_use]
    pub const fn with_keyboard_player(mut self, player: PlayerIndex) -> Self {
        self.keyboard_player = player;
        self
    }

    /// Set the stick press threshold.
    #[must_use]
    pub const fn with_stick_press_threshold(mut self, threshold: f32) -> Self {
        self.stick_press_threshold = threshold;
        self
    }

    /// Check that every value can be used by a tracker.
    pub fn validate(&self) -> Result<()> {
        if !self.default_mode.is_concrete() || !self.default_button_mode.is_concrete() {
            return Err(Error::InvalidConfig(format!(
                "default modes must name a device, got {} / {}",
                self.default_mode, self.default_button_mode
            )));
        }
        check_threshold("gamepad_axis_threshold", self.gamepad_axis_threshold)?;
        check_threshold("mouse_move_threshold", self.mouse_move_threshold)?;
        if self.initial_players > MAX_PLAYERS || self.keyboard_player >= MAX_PLAYERS {
            return Err(Error::InvalidConfig(format!(
                "player indices must stay below {MAX_PLAYERS}, got {} initial players and keyboard player {}",
                self.initial_players, self.keyboard_player
            )));
        }
        if !(self.stick_press_threshold > 0.0 && self.stick_press_threshold <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "stick_press_threshold must be in (0, 1], got {}",
                self.stick_press_threshold
            )));
        }
        Ok(())
    }
}

fn check_threshold(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{name} must be a finite non-negative number, got {value}"
        )))
    }
}
