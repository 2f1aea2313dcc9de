//! Device preference orderings.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use modesense_core::{DeviceAffinity, Error, InputMode, Result};
use serde::{Deserialize, Serialize};

/// One entry of a preference ordering.
///
/// Concrete tokens name a device bucket directly. Relative tokens are
/// substituted from the player's current modes when the order is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceToken {
    Gamepad,
    Keyboard,
    Mouse,
    MouseButton,
    /// Gamepad, but only while the player's general mode is Gamepad.
    ActiveGamepad,
    /// The device of the player's most recent input of any kind.
    LastInput,
    /// The device of the player's most recent button press.
    LastButton,
    /// Like `LastButton`, but only when that press was on the keyboard or
    /// mouse. Skipped for gamepad presses.
    LastKeyboardMouseButton,
}

const GAMEPAD: &[DeviceAffinity] = &[DeviceAffinity::Gamepad];
const KEYBOARD: &[DeviceAffinity] = &[DeviceAffinity::Keyboard];
const MOUSE: &[DeviceAffinity] = &[DeviceAffinity::Mouse];
const MOUSE_BUTTON: &[DeviceAffinity] = &[DeviceAffinity::MouseButton];
const ANY_MOUSE: &[DeviceAffinity] = &[DeviceAffinity::Mouse, DeviceAffinity::MouseButton];
const ANY_MOUSE_BUTTON_FIRST: &[DeviceAffinity] =
    &[DeviceAffinity::MouseButton, DeviceAffinity::Mouse];

impl DeviceToken {
    /// Device buckets this token stands for given the player's modes.
    ///
    /// An empty slice means the token does not apply and is skipped.
    #[must_use]
    pub const fn affinities(
        self,
        last_mode: InputMode,
        last_button_mode: InputMode,
    ) -> &'static [DeviceAffinity] {
        match self {
            Self::Gamepad => GAMEPAD,
            Self::Keyboard => KEYBOARD,
            Self::Mouse => MOUSE,
            Self::MouseButton => MOUSE_BUTTON,
            Self::ActiveGamepad => match last_mode {
                InputMode::Gamepad => GAMEPAD,
                _ => &[],
            },
            Self::LastInput => match last_mode {
                InputMode::Gamepad => GAMEPAD,
                InputMode::Keyboard => KEYBOARD,
                InputMode::Mouse => ANY_MOUSE,
                InputMode::Unknown => &[],
            },
            Self::LastButton => match last_button_mode {
                InputMode::Gamepad => GAMEPAD,
                InputMode::Keyboard => KEYBOARD,
                InputMode::Mouse => ANY_MOUSE_BUTTON_FIRST,
                InputMode::Unknown => &[],
            },
            Self::LastKeyboardMouseButton => match last_button_mode {
                InputMode::Keyboard => KEYBOARD,
                InputMode::Mouse => ANY_MOUSE_BUTTON_FIRST,
                InputMode::Gamepad | InputMode::Unknown => &[],
            },
        }
    }
}

/// Kind of binding being looked up. `Auto` preferences resolve per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Action,
    Axis,
}

/// A validated, ordered list of device tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreferenceOrder {
    tokens: Cow<'static, [DeviceToken]>,
}

impl PreferenceOrder {
    /// Build a custom ordering. Rejects empty lists and repeated tokens.
    pub fn new(tokens: Vec<DeviceToken>) -> Result<Self> {
        if tokens.is_empty() {
            return Err(Error::InvalidPreference(
                "preference order must name at least one device".to_string(),
            ));
        }
        for (i, token) in tokens.iter().enumerate() {
            if tokens[..i].contains(token) {
                return Err(Error::InvalidPreference(format!(
                    "device token {token:?} appears more than once"
                )));
            }
        }
        Ok(Self {
            tokens: Cow::Owned(tokens),
        })
    }

    const fn canned(tokens: &'static [DeviceToken]) -> Self {
        Self {
            tokens: Cow::Borrowed(tokens),
        }
    }

    /// The tokens, most preferred first.
    #[must_use]
    pub fn tokens(&self) -> &[DeviceToken] {
        &self.tokens
    }
}

impl TryFrom<Vec<DeviceToken>> for PreferenceOrder {
    type Error = Error;

    fn try_from(tokens: Vec<DeviceToken>) -> Result<Self> {
        Self::new(tokens)
    }
}

/// Gamepad, Keyboard, Mouse, with the gamepad only first while in use.
const GAMEPAD_KEYBOARD_MOUSE: &[DeviceToken] = &[
    DeviceToken::ActiveGamepad,
    DeviceToken::Keyboard,
    DeviceToken::MouseButton,
    DeviceToken::Mouse,
    DeviceToken::Gamepad,
];

/// Gamepad, Mouse, Keyboard, with the gamepad only first while in use.
const GAMEPAD_MOUSE_KEYBOARD: &[DeviceToken] = &[
    DeviceToken::ActiveGamepad,
    DeviceToken::Mouse,
    DeviceToken::MouseButton,
    DeviceToken::Keyboard,
    DeviceToken::Gamepad,
];

/// Gamepad, Keyboard, Mouse, MouseButton, with the gamepad only first while
/// in use and the last pressed keyboard or mouse device ahead of the rest.
const GAMEPAD_KEYBOARD_MOUSE_BUTTON: &[DeviceToken] = &[
    DeviceToken::ActiveGamepad,
    DeviceToken::LastKeyboardMouseButton,
    DeviceToken::Keyboard,
    DeviceToken::MouseButton,
    DeviceToken::Mouse,
    DeviceToken::Gamepad,
];

/// Named device preferences for picking which binding to show.
///
/// Every named ordering puts the gamepad first while a gamepad is in use and
/// last otherwise, so controller prompts never show for a keyboard player
/// that happens to have a pad plugged in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DevicePreference {
    /// `GamepadKeyboardMouseButton` for actions, `GamepadMouseKeyboard` for axes.
    #[default]
    Auto,
    #[serde(rename = "Gamepad_Keyboard_Mouse")]
    GamepadKeyboardMouse,
    #[serde(rename = "Gamepad_Mouse_Keyboard")]
    GamepadMouseKeyboard,
    #[serde(rename = "Gamepad_Keyboard_Mouse_Button")]
    GamepadKeyboardMouseButton,
}

impl DevicePreference {
    pub const ALL: [Self; 4] = [
        Self::Auto,
        Self::GamepadKeyboardMouse,
        Self::GamepadMouseKeyboard,
        Self::GamepadKeyboardMouseButton,
    ];

    /// Configuration name of the preference.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::GamepadKeyboardMouse => "Gamepad_Keyboard_Mouse",
            Self::GamepadMouseKeyboard => "Gamepad_Mouse_Keyboard",
            Self::GamepadKeyboardMouseButton => "Gamepad_Keyboard_Mouse_Button",
        }
    }

    /// Replace `Auto` with the concrete preference for a binding kind.
    #[must_use]
    pub const fn resolve(self, kind: BindingKind) -> Self {
        match (self, kind) {
            (Self::Auto, BindingKind::Action) => Self::GamepadKeyboardMouseButton,
            (Self::Auto, BindingKind::Axis) => Self::GamepadMouseKeyboard,
            (other, _) => other,
        }
    }

    /// Token ordering for a binding kind.
    #[must_use]
    pub const fn order(self, kind: BindingKind) -> PreferenceOrder {
        match self.resolve(kind) {
            Self::GamepadKeyboardMouse => PreferenceOrder::canned(GAMEPAD_KEYBOARD_MOUSE),
            Self::GamepadMouseKeyboard | Self::Auto => {
                PreferenceOrder::canned(GAMEPAD_MOUSE_KEYBOARD)
            }
            Self::GamepadKeyboardMouseButton => {
                PreferenceOrder::canned(GAMEPAD_KEYBOARD_MOUSE_BUTTON)
            }
        }
    }
}

impl fmt::Display for DevicePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DevicePreference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|preference| preference.as_str() == s)
            .ok_or_else(|| Error::InvalidPreference(format!("unknown device preference '{s}'")))
    }
}
