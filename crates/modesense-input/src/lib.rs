//! Input mode detection for modesense.
//!
//! This crate observes raw keyboard, mouse and gamepad events and tracks, per
//! player, which device class is in use. Two modes are tracked independently:
//! the general mode follows any input (including mouse motion and analog
//! sticks), the button mode only follows discrete presses.
//!
//! # Core Types
//!
//! - [`InputModeTracker`]: Per-player classification and change notification
//! - [`InputModeSubsystem`]: Feeds winit window events and gilrs gamepad events
//!   into a tracker, handles foreground suppression and cursor hiding
//! - [`Key`]: Physical key identifiers across all devices
//!
//! # Usage
//!
//! ```ignore
//! use modesense_input::{InputModeTracker, Key, GamepadKey, TrackerConfig};
//!
//! let mut tracker = InputModeTracker::new(TrackerConfig::default())?;
//! tracker.on_mode_changed(|player, mode| {
//!     // Swap button prompts, show or hide the cursor...
//! });
//! tracker.on_button_mode_changed(|player, mode| {
//!     // Keyboard and mouse prompts differ only for button presses
//! });
//!
//! tracker.handle_key_down(0, Key::Gamepad(GamepadKey::FaceButtonBottom));
//! assert!(tracker.last_input_was_gamepad(0));
//! ```
//!
//! # Threading
//!
//! Everything runs on the thread that receives window events. Listeners are
//! called synchronously and cannot reach the tracker mutably while it is
//! dispatching.

mod changes;
mod config;
mod cursor;
mod foreground;
mod gamepad;
mod key;
mod subsystem;
mod tracker;

pub use changes::ModeChanges;
pub use config::TrackerConfig;
pub use cursor::{cursor_suppression_for, CursorSuppression};
pub use foreground::{FocusFlag, ForegroundConfig, ForegroundMonitor, ForegroundSource};
pub use gamepad::{GamepadInput, GamepadSlots, StickDirections};
pub use key::{GamepadKey, Key, KeyFlags, MouseAxis, MouseButton};
pub use subsystem::InputModeSubsystem;
pub use tracker::{classify_key, InputModeTracker, ModeListener, ModeSource, PlayerModeState};

pub use modesense_core::{DeviceAffinity, InputMode, PlayerIndex};

// Re-export winit and gilrs types commonly used with input
pub use gilrs::Event as GamepadEvent;
pub use winit::event::WindowEvent;
pub use winit::keyboard::KeyCode;
