//! Device classification types shared by detection and binding resolution.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a local player, starting at 0.
pub type PlayerIndex = usize;

/// Device class associated with an input event or a player's current state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputMode {
    /// No device class; never stored as a player's mode.
    #[default]
    Unknown,
    Keyboard,
    Mouse,
    Gamepad,
}

impl InputMode {
    /// Returns `true` for every mode except [`InputMode::Unknown`].
    #[inline]
    #[must_use]
    pub const fn is_concrete(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Name of the mode as shown in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Keyboard => "Keyboard",
            Self::Mouse => "Mouse",
            Self::Gamepad => "Gamepad",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device bucket a physical key belongs to when choosing between bindings.
///
/// Mouse buttons are kept apart from mouse motion: an action bound to a click
/// and an axis bound to mouse movement are preferred under different rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceAffinity {
    Gamepad,
    Keyboard,
    /// Mouse motion and wheel axes.
    Mouse,
    /// Discrete mouse buttons, including wheel steps.
    MouseButton,
}

impl DeviceAffinity {
    /// The input mode a key of this affinity switches a player into.
    #[must_use]
    pub const fn input_mode(self) -> InputMode {
        match self {
            Self::Gamepad => InputMode::Gamepad,
            Self::Keyboard => InputMode::Keyboard,
            Self::Mouse | Self::MouseButton => InputMode::Mouse,
        }
    }
}
