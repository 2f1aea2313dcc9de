//! Physical key identifiers for keyboard, mouse and gamepad devices.

use std::borrow::Cow;
use std::fmt;

use bitflags::bitflags;
use gilrs::{Axis as GilrsAxis, Button as GilrsButton};
use modesense_core::DeviceAffinity;
use serde::{Deserialize, Serialize};
use winit::event::MouseButton as WinitMouseButton;
use winit::keyboard::KeyCode;

bitflags! {
    /// Device traits of a key.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyFlags: u8 {
        /// Key belongs to a gamepad.
        const GAMEPAD     = 0b0000_0001;
        /// Key belongs to a mouse (buttons, wheel and motion).
        const MOUSE       = 0b0000_0010;
        /// Key reports a continuous value.
        const AXIS        = 0b0000_0100;
        /// Digital event synthesized from an axis crossing a threshold.
        const BUTTON_AXIS = 0b0000_1000;
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    WheelUp,
    WheelDown,
}

impl MouseButton {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "LeftMouseButton",
            Self::Right => "RightMouseButton",
            Self::Middle => "MiddleMouseButton",
            Self::Back => "ThumbMouseButton",
            Self::Forward => "ThumbMouseButton2",
            Self::WheelUp => "MouseScrollUp",
            Self::WheelDown => "MouseScrollDown",
        }
    }
}

impl TryFrom<WinitMouseButton> for MouseButton {
    type Error = ();

    fn try_from(button: WinitMouseButton) -> Result<Self, Self::Error> {
        match button {
            WinitMouseButton::Left => Ok(Self::Left),
            WinitMouseButton::Right => Ok(Self::Right),
            WinitMouseButton::Middle => Ok(Self::Middle),
            WinitMouseButton::Back => Ok(Self::Back),
            WinitMouseButton::Forward => Ok(Self::Forward),
            WinitMouseButton::Other(_) => Err(()),
        }
    }
}

/// Continuous mouse inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseAxis {
    X,
    Y,
    Wheel,
}

impl MouseAxis {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X => "MouseX",
            Self::Y => "MouseY",
            Self::Wheel => "MouseWheelAxis",
        }
    }
}

/// Gamepad buttons, axes and stick-direction pseudo-buttons.
///
/// Face buttons use positional names so that one binding covers every
/// controller family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamepadKey {
    FaceButtonBottom,
    FaceButtonRight,
    FaceButtonLeft,
    FaceButtonTop,
    LeftShoulder,
    RightShoulder,
    LeftTrigger,
    RightTrigger,
    LeftThumb,
    RightThumb,
    Select,
    Start,
    Mode,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    LeftStickUp,
    LeftStickDown,
    LeftStickLeft,
    LeftStickRight,
    RightStickUp,
    RightStickDown,
    RightStickLeft,
    RightStickRight,
    LeftX,
    LeftY,
    RightX,
    RightY,
    LeftTriggerAxis,
    RightTriggerAxis,
}

impl GamepadKey {
    /// Digital events raised for stick motion. They are gamepad keys but not
    /// presses of a physical button.
    pub const STICK_DIRECTIONS: [Self; 8] = [
        Self::LeftStickUp,
        Self::LeftStickDown,
        Self::LeftStickLeft,
        Self::LeftStickRight,
        Self::RightStickUp,
        Self::RightStickDown,
        Self::RightStickLeft,
        Self::RightStickRight,
    ];

    /// Returns `true` for the eight stick-direction pseudo-buttons.
    #[inline]
    #[must_use]
    pub const fn is_stick_direction(self) -> bool {
        matches!(
            self,
            Self::LeftStickUp
                | Self::LeftStickDown
                | Self::LeftStickLeft
                | Self::LeftStickRight
                | Self::RightStickUp
                | Self::RightStickDown
                | Self::RightStickLeft
                | Self::RightStickRight
        )
    }

    /// Returns `true` for keys reporting a continuous value.
    #[inline]
    #[must_use]
    pub const fn is_axis(self) -> bool {
        matches!(
            self,
            Self::LeftX
                | Self::LeftY
                | Self::RightX
                | Self::RightY
                | Self::LeftTriggerAxis
                | Self::RightTriggerAxis
        )
    }

    /// The `(negative, positive)` pseudo-buttons of a stick axis.
    ///
    /// Y axes point up, matching gilrs.
    #[must_use]
    pub const fn stick_directions(self) -> Option<(Self, Self)> {
        match self {
            Self::LeftX => Some((Self::LeftStickLeft, Self::LeftStickRight)),
            Self::LeftY => Some((Self::LeftStickDown, Self::LeftStickUp)),
            Self::RightX => Some((Self::RightStickLeft, Self::RightStickRight)),
            Self::RightY => Some((Self::RightStickDown, Self::RightStickUp)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FaceButtonBottom => "Gamepad_FaceButton_Bottom",
            Self::FaceButtonRight => "Gamepad_FaceButton_Right",
            Self::FaceButtonLeft => "Gamepad_FaceButton_Left",
            Self::FaceButtonTop => "Gamepad_FaceButton_Top",
            Self::LeftShoulder => "Gamepad_LeftShoulder",
            Self::RightShoulder => "Gamepad_RightShoulder",
            Self::LeftTrigger => "Gamepad_LeftTrigger",
            Self::RightTrigger => "Gamepad_RightTrigger",
            Self::LeftThumb => "Gamepad_LeftThumbstick",
            Self::RightThumb => "Gamepad_RightThumbstick",
            Self::Select => "Gamepad_Special_Left",
            Self::Start => "Gamepad_Special_Right",
            Self::Mode => "Gamepad_Mode",
            Self::DPadUp => "Gamepad_DPad_Up",
            Self::DPadDown => "Gamepad_DPad_Down",
            Self::DPadLeft => "Gamepad_DPad_Left",
            Self::DPadRight => "Gamepad_DPad_Right",
            Self::LeftStickUp => "Gamepad_LeftStick_Up",
            Self::LeftStickDown => "Gamepad_LeftStick_Down",
            Self::LeftStickLeft => "Gamepad_LeftStick_Left",
            Self::LeftStickRight => "Gamepad_LeftStick_Right",
            Self::RightStickUp => "Gamepad_RightStick_Up",
            Self::RightStickDown => "Gamepad_RightStick_Down",
            Self::RightStickLeft => "Gamepad_RightStick_Left",
            Self::RightStickRight => "Gamepad_RightStick_Right",
            Self::LeftX => "Gamepad_LeftX",
            Self::LeftY => "Gamepad_LeftY",
            Self::RightX => "Gamepad_RightX",
            Self::RightY => "Gamepad_RightY",
            Self::LeftTriggerAxis => "Gamepad_LeftTriggerAxis",
            Self::RightTriggerAxis => "Gamepad_RightTriggerAxis",
        }
    }
}

impl TryFrom<GilrsButton> for GamepadKey {
    type Error = ();

    fn try_from(button: GilrsButton) -> Result<Self, Self::Error> {
        match button {
            GilrsButton::South => Ok(Self::FaceButtonBottom),
            GilrsButton::East => Ok(Self::FaceButtonRight),
            GilrsButton::West => Ok(Self::FaceButtonLeft),
            GilrsButton::North => Ok(Self::FaceButtonTop),
            GilrsButton::LeftTrigger => Ok(Self::LeftShoulder),
            GilrsButton::RightTrigger => Ok(Self::RightShoulder),
            GilrsButton::LeftTrigger2 => Ok(Self::LeftTrigger),
            GilrsButton::RightTrigger2 => Ok(Self::RightTrigger),
            GilrsButton::LeftThumb => Ok(Self::LeftThumb),
            GilrsButton::RightThumb => Ok(Self::RightThumb),
            GilrsButton::Select => Ok(Self::Select),
            GilrsButton::Start => Ok(Self::Start),
            GilrsButton::Mode => Ok(Self::Mode),
            GilrsButton::DPadUp => Ok(Self::DPadUp),
            GilrsButton::DPadDown => Ok(Self::DPadDown),
            GilrsButton::DPadLeft => Ok(Self::DPadLeft),
            GilrsButton::DPadRight => Ok(Self::DPadRight),
            _ => Err(()),
        }
    }
}

impl TryFrom<GilrsAxis> for GamepadKey {
    type Error = ();

    fn try_from(axis: GilrsAxis) -> Result<Self, Self::Error> {
        match axis {
            GilrsAxis::LeftStickX => Ok(Self::LeftX),
            GilrsAxis::LeftStickY => Ok(Self::LeftY),
            GilrsAxis::RightStickX => Ok(Self::RightX),
            GilrsAxis::RightStickY => Ok(Self::RightY),
            GilrsAxis::LeftZ => Ok(Self::LeftTriggerAxis),
            GilrsAxis::RightZ => Ok(Self::RightTriggerAxis),
            _ => Err(()),
        }
    }
}

/// A physical key, button or axis on any supported device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A keyboard key.
    Keyboard(KeyCode),
    /// A mouse button or wheel step.
    Mouse(MouseButton),
    /// Mouse motion or the wheel as an axis.
    MouseAxis(MouseAxis),
    /// A gamepad button, axis or stick direction.
    Gamepad(GamepadKey),
}

impl Key {
    /// Device traits of this key.
    #[must_use]
    pub const fn flags(&self) -> KeyFlags {
        match self {
            Self::Keyboard(_) => KeyFlags::empty(),
            Self::Mouse(_) => KeyFlags::MOUSE,
            Self::MouseAxis(_) => KeyFlags::MOUSE.union(KeyFlags::AXIS),
            Self::Gamepad(key) => {
                if key.is_stick_direction() {
                    KeyFlags::GAMEPAD.union(KeyFlags::BUTTON_AXIS)
                } else if key.is_axis() {
                    KeyFlags::GAMEPAD.union(KeyFlags::AXIS)
                } else {
                    KeyFlags::GAMEPAD
                }
            }
        }
    }

    /// Returns `true` if the key belongs to a gamepad.
    #[inline]
    #[must_use]
    pub const fn is_gamepad_key(&self) -> bool {
        self.flags().contains(KeyFlags::GAMEPAD)
    }

    /// Returns `true` if the key belongs to a mouse.
    #[inline]
    #[must_use]
    pub const fn is_mouse_key(&self) -> bool {
        self.flags().contains(KeyFlags::MOUSE)
    }

    /// Returns `true` for digital events synthesized from stick motion.
    #[inline]
    #[must_use]
    pub const fn is_button_axis(&self) -> bool {
        self.flags().contains(KeyFlags::BUTTON_AXIS)
    }

    /// Device bucket used when choosing between bindings.
    #[must_use]
    pub const fn affinity(&self) -> DeviceAffinity {
        match self {
            Self::Keyboard(_) => DeviceAffinity::Keyboard,
            Self::Mouse(_) => DeviceAffinity::MouseButton,
            Self::MouseAxis(_) => DeviceAffinity::Mouse,
            Self::Gamepad(_) => DeviceAffinity::Gamepad,
        }
    }

    /// Stable name of the key, used as the row name in image tables.
    #[must_use]
    pub fn name(&self) -> Cow<'static, str> {
        match self {
            Self::Keyboard(code) => Cow::Owned(format!("{code:?}")),
            Self::Mouse(button) => Cow::Borrowed(button.as_str()),
            Self::MouseAxis(axis) => Cow::Borrowed(axis.as_str()),
            Self::Gamepad(key) => Cow::Borrowed(key.as_str()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }
}

impl From<MouseButton> for Key {
    fn from(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

impl From<MouseAxis> for Key {
    fn from(axis: MouseAxis) -> Self {
        Self::MouseAxis(axis)
    }
}

impl From<GamepadKey> for Key {
    fn from(key: GamepadKey) -> Self {
        Self::Gamepad(key)
    }
}
