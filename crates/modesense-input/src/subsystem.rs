//! Input mode subsystem wiring window and gamepad events into the tracker.

use std::fmt;
use std::time::Instant;

use gilrs::{Button, EventType, GamepadId};
use glam::Vec2;
use modesense_core::{InputMode, PlayerIndex, Result};
use tracing::{info, warn};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::PhysicalKey;

use crate::changes::ModeChanges;
use crate::config::TrackerConfig;
use crate::cursor::{cursor_suppression_for, CursorSuppression};
use crate::foreground::{FocusFlag, ForegroundConfig, ForegroundMonitor};
use crate::gamepad::{GamepadInput, GamepadSlots, StickDirections};
use crate::key::{GamepadKey, Key};
use crate::tracker::{InputModeTracker, ModeSource};

/// Input mode subsystem for a winit window with gilrs gamepads.
///
/// Sees every window and gamepad event before the application does and never
/// consumes any of them.
///
/// # Usage
///
/// ```ignore
/// // In your app struct
/// struct MyApp {
///     modes: InputModeSubsystem,
///     gilrs: Gilrs,
/// }
///
/// // In window_event
/// fn window_event(&mut self, event: &WindowEvent) {
///     self.modes.process_window_event(event);
/// }
///
/// // In about_to_wait
/// fn about_to_wait(&mut self) {
///     while let Some(event) = self.gilrs.next_event() {
///         self.modes.process_gamepad_event(&event);
///     }
///     self.modes.poll_foreground(Instant::now());
/// }
/// ```
pub struct InputModeSubsystem {
    tracker: InputModeTracker,
    focus: FocusFlag,
    foreground: ForegroundMonitor,
    cursor: Option<Box<dyn CursorSuppression>>,
    warned_missing_cursor: bool,
    cursor_position: Option<Vec2>,
    gamepads: GamepadSlots<GamepadId>,
    sticks: StickDirections,
}

impl InputModeSubsystem {
    /// Create a subsystem, validating both configurations.
    pub fn new(config: TrackerConfig, foreground: ForegroundConfig) -> Result<Self> {
        Ok(Self {
            tracker: InputModeTracker::new(config)?,
            focus: FocusFlag::new(),
            foreground: ForegroundMonitor::new(foreground)?,
            cursor: None,
            warned_missing_cursor: false,
            cursor_position: None,
            gamepads: GamepadSlots::new(),
            sticks: StickDirections::new(),
        })
    }

    /// Get a reference to the tracker.
    #[must_use]
    pub const fn tracker(&self) -> &InputModeTracker {
        &self.tracker
    }

    /// Get a mutable reference to the tracker, e.g. to register listeners.
    pub fn tracker_mut(&mut self) -> &mut InputModeTracker {
        &mut self.tracker
    }

    /// Get a mutable reference to the foreground monitor.
    pub fn foreground_mut(&mut self) -> &mut ForegroundMonitor {
        &mut self.foreground
    }

    /// Returns `true` if the window was in the foreground at the last poll.
    #[must_use]
    pub const fn is_foreground(&self) -> bool {
        self.foreground.is_foreground()
    }

    /// Install the hook used to hide the cursor during gamepad play.
    pub fn set_cursor_suppression(&mut self, sink: impl CursorSuppression + 'static) {
        self.cursor = Some(Box::new(sink));
    }

    /// Process a window event.
    ///
    /// Always returns `false`; events are observed, never consumed.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        let player = self.tracker.config().keyboard_player;
        let changes = match event {
            WindowEvent::KeyboardInput {
                event,
                is_synthetic,
                ..
            } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return false;
                };
                if *is_synthetic || event.repeat || event.state != ElementState::Pressed {
                    return false;
                }
                self.tracker.handle_key_down(player, Key::Keyboard(code))
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                ..
            } => self.tracker.handle_mouse_button_down(player),
            WindowEvent::CursorMoved { position, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let current = Vec2::new(position.x as f32, position.y as f32);
                let previous = self.cursor_position.replace(current).unwrap_or(current);
                self.tracker.handle_mouse_move(player, current, previous)
            }
            WindowEvent::MouseWheel { .. }
            | WindowEvent::PinchGesture { .. }
            | WindowEvent::PanGesture { .. }
            | WindowEvent::RotationGesture { .. }
            | WindowEvent::DoubleTapGesture { .. } => {
                self.tracker.handle_mouse_wheel_or_gesture(player)
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor_position = None;
                ModeChanges::empty()
            }
            WindowEvent::Focused(focused) => {
                self.focus.set(*focused);
                ModeChanges::empty()
            }
            _ => ModeChanges::empty(),
        };
        self.apply_cursor_policy(player, changes);
        false
    }

    /// Process a gilrs event.
    ///
    /// Always returns `false`; events are observed, never consumed.
    pub fn process_gamepad_event(&mut self, event: &gilrs::Event) -> bool {
        let id = event.id;
        match event.event {
            EventType::Connected => {
                let player = self.gamepads.connect(id);
                info!(gamepad = %id, player, "gamepad connected");
            }
            EventType::Disconnected => {
                if let Some(player) = self.gamepads.disconnect(id) {
                    self.sticks.release_player(player);
                    info!(gamepad = %id, player, "gamepad disconnected");
                }
            }
            EventType::ButtonPressed(button, _) => {
                if let Ok(key) = GamepadKey::try_from(button) {
                    let player = self.gamepads.connect(id);
                    self.process_gamepad_input(player, GamepadInput::ButtonDown(key));
                }
            }
            EventType::ButtonChanged(button, value, _) => {
                let axis = match button {
                    Button::LeftTrigger2 => GamepadKey::LeftTriggerAxis,
                    Button::RightTrigger2 => GamepadKey::RightTriggerAxis,
                    _ => return false,
                };
                let player = self.gamepads.connect(id);
                self.process_gamepad_input(player, GamepadInput::Axis(axis, value));
            }
            EventType::AxisChanged(axis, value, _) => {
                if let Ok(key) = GamepadKey::try_from(axis) {
                    let player = self.gamepads.connect(id);
                    self.process_gamepad_input(player, GamepadInput::Axis(key, value));
                }
            }
            _ => {}
        }
        false
    }

    /// Process a gamepad input for a player.
    ///
    /// Stick axes also press the matching stick-direction pseudo-button when
    /// they cross the stick press threshold. While detection is suspended no
    /// direction is held, so a stick still deflected on resume fires again.
    pub fn process_gamepad_input(&mut self, player: PlayerIndex, input: GamepadInput) -> ModeChanges {
        let changes = match input {
            GamepadInput::ButtonDown(key) => self.tracker.handle_key_down(player, Key::Gamepad(key)),
            GamepadInput::Axis(axis, value) => {
                let mut changes = self
                    .tracker
                    .handle_analog_input(player, Key::Gamepad(axis), value);
                if self.tracker.is_ignoring_events() {
                    self.sticks.clear();
                    return changes;
                }
                let threshold = self.tracker.config().stick_press_threshold;
                if let Some(direction) = self.sticks.update(player, axis, value, threshold) {
                    changes |= self.tracker.handle_key_down(player, Key::Gamepad(direction));
                }
                changes
            }
        };
        self.apply_cursor_policy(player, changes);
        changes
    }

    /// Check the window foreground state if the poll interval has elapsed.
    pub fn poll_foreground(&mut self, now: Instant) -> Option<bool> {
        self.foreground.poll(now, &self.focus, &mut self.tracker)
    }

    /// Get the general mode of a player.
    #[must_use]
    pub fn last_mode(&self, player: PlayerIndex) -> InputMode {
        self.tracker.last_mode(player)
    }

    /// Get the button mode of a player.
    #[must_use]
    pub fn last_button_mode(&self, player: PlayerIndex) -> InputMode {
        self.tracker.last_button_mode(player)
    }

    /// Returns `true` if the player's most recent input came from a gamepad.
    #[must_use]
    pub fn last_input_was_gamepad(&self, player: PlayerIndex) -> bool {
        self.tracker.last_input_was_gamepad(player)
    }

    fn apply_cursor_policy(&mut self, player: PlayerIndex, changes: ModeChanges) {
        if !changes.general() {
            return;
        }
        let Some(cursor) = self.cursor.as_mut() else {
            if !self.warned_missing_cursor {
                warn!("no cursor suppression hook installed; the cursor stays visible during gamepad play");
                self.warned_missing_cursor = true;
            }
            return;
        };
        if let Some(suppressed) = cursor_suppression_for(self.tracker.last_mode(player)) {
            cursor.set_cursor_suppressed(suppressed);
        }
    }
}

impl Default for InputModeSubsystem {
    fn default() -> Self {
        Self {
            tracker: InputModeTracker::default(),
            focus: FocusFlag::new(),
            foreground: ForegroundMonitor::default(),
            cursor: None,
            warned_missing_cursor: false,
            cursor_position: None,
            gamepads: GamepadSlots::new(),
            sticks: StickDirections::new(),
        }
    }
}

impl ModeSource for InputModeSubsystem {
    fn last_mode(&self, player: PlayerIndex) -> InputMode {
        self.tracker.last_mode(player)
    }

    fn last_button_mode(&self, player: PlayerIndex) -> InputMode {
        self.tracker.last_button_mode(player)
    }
}

impl fmt::Debug for InputModeSubsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputModeSubsystem")
            .field("tracker", &self.tracker)
            .field("focus", &self.focus)
            .field("foreground", &self.foreground)
            .field("has_cursor_hook", &self.cursor.is_some())
            .field("cursor_position", &self.cursor_position)
            .field("gamepads", &self.gamepads)
            .finish_non_exhaustive()
    }
}
