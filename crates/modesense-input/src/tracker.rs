//! Per-player input mode detection.

use std::fmt;

use glam::Vec2;
use modesense_core::constants::MAX_PLAYERS;
use modesense_core::{InputMode, PlayerIndex, Result};
use tracing::{debug, trace};

use crate::changes::ModeChanges;
use crate::config::TrackerConfig;
use crate::key::Key;

/// Callback invoked with `(player, new_mode)` after a mode changed.
pub type ModeListener = Box<dyn FnMut(PlayerIndex, InputMode)>;

/// Read access to per-player modes.
///
/// Prompt lookup only needs these two values, so it depends on this trait
/// rather than on a concrete tracker.
pub trait ModeSource {
    /// Device class of the most recent input of any kind.
    fn last_mode(&self, player: PlayerIndex) -> InputMode;
    /// Device class of the most recent button press.
    fn last_button_mode(&self, player: PlayerIndex) -> InputMode;
}

/// Last known modes of one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerModeState {
    /// Mode from any input, including mouse motion and analog sticks.
    pub last_mode: InputMode,
    /// Mode from discrete presses only.
    pub last_button_mode: InputMode,
}

/// Classify a pressed key as `(mode, is_button)`.
///
/// Stick-direction pseudo-buttons count as gamepad use but not as a button
/// press. Anything that is neither gamepad nor mouse is a keyboard.
#[must_use]
pub const fn classify_key(key: &Key) -> (InputMode, bool) {
    if key.is_gamepad_key() {
        (InputMode::Gamepad, !key.is_button_axis())
    } else if key.is_mouse_key() {
        (InputMode::Mouse, true)
    } else {
        (InputMode::Keyboard, true)
    }
}

/// Observes raw input and tracks which device class each player is using.
///
/// Two modes are kept per player. The general mode follows any input,
/// including passive mouse motion. The button mode only follows discrete
/// presses, which tells keyboard and mouse users apart even while the cursor
/// is drifting.
///
/// All handlers run synchronously. Listeners are called after the state for
/// the event has been committed, button listeners first.
///
/// # Usage
///
/// ```ignore
/// let mut tracker = InputModeTracker::new(TrackerConfig::default())?;
/// tracker.on_mode_changed(|player, mode| println!("player {player} is now on {mode}"));
///
/// tracker.handle_key_down(0, Key::Gamepad(GamepadKey::FaceButtonBottom));
/// assert_eq!(tracker.last_mode(0), InputMode::Gamepad);
/// ```
pub struct InputModeTracker {
    config: TrackerConfig,
    players: Vec<PlayerModeState>,
    ignore_events: bool,
    mode_listeners: Vec<ModeListener>,
    button_mode_listeners: Vec<ModeListener>,
}

impl InputModeTracker {
    /// Create a tracker, validating the configuration.
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: TrackerConfig) -> Self {
        let default_state = PlayerModeState {
            last_mode: config.default_mode,
            last_button_mode: config.default_button_mode,
        };
        Self {
            config,
            players: vec![default_state; config.initial_players],
            ignore_events: false,
            mode_listeners: Vec::new(),
            button_mode_listeners: Vec::new(),
        }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Register a listener for general mode changes.
    pub fn on_mode_changed(&mut self, listener: impl FnMut(PlayerIndex, InputMode) + 'static) {
        self.mode_listeners.push(Box::new(listener));
    }

    /// Register a listener for button mode changes.
    pub fn on_button_mode_changed(
        &mut self,
        listener: impl FnMut(PlayerIndex, InputMode) + 'static,
    ) {
        self.button_mode_listeners.push(Box::new(listener));
    }

    /// Suppress or resume detection, e.g. while the window is in the background.
    pub fn set_ignore_events(&mut self, ignore: bool) {
        if self.ignore_events != ignore {
            debug!(ignore, "input mode detection suppression changed");
        }
        self.ignore_events = ignore;
    }

    /// Returns `true` while events are being ignored.
    #[must_use]
    pub const fn is_ignoring_events(&self) -> bool {
        self.ignore_events
    }

    /// Process a key or button press, including gamepad buttons.
    pub fn handle_key_down(&mut self, player: PlayerIndex, key: Key) -> ModeChanges {
        if self.ignore_events {
            return ModeChanges::empty();
        }
        let (mode, is_button) = classify_key(&key);
        self.set_mode(player, mode, is_button)
    }

    /// Process an analog value, e.g. a stick or trigger axis.
    ///
    /// Magnitudes at or below the gamepad axis threshold are stick drift and
    /// are ignored.
    pub fn handle_analog_input(&mut self, player: PlayerIndex, key: Key, value: f32) -> ModeChanges {
        if self.ignore_events {
            return ModeChanges::empty();
        }
        if value.abs() > self.config.gamepad_axis_threshold {
            self.set_mode(player, InputMode::Gamepad, false)
        } else {
            trace!(player, %key, value, "analog input below threshold");
            ModeChanges::empty()
        }
    }

    /// Process cursor motion from `previous` to `current`.
    pub fn handle_mouse_move(
        &mut self,
        player: PlayerIndex,
        current: Vec2,
        previous: Vec2,
    ) -> ModeChanges {
        if self.ignore_events {
            return ModeChanges::empty();
        }
        let travel = (current - previous).abs();
        let threshold = self.config.mouse_move_threshold;
        if travel.x > threshold || travel.y > threshold {
            self.set_mode(player, InputMode::Mouse, false)
        } else {
            ModeChanges::empty()
        }
    }

    /// Process a mouse button press. Which button does not matter.
    pub fn handle_mouse_button_down(&mut self, player: PlayerIndex) -> ModeChanges {
        if self.ignore_events {
            return ModeChanges::empty();
        }
        self.set_mode(player, InputMode::Mouse, true)
    }

    /// Process a wheel or touchpad gesture event.
    pub fn handle_mouse_wheel_or_gesture(&mut self, player: PlayerIndex) -> ModeChanges {
        if self.ignore_events {
            return ModeChanges::empty();
        }
        self.set_mode(player, InputMode::Mouse, false)
    }

    /// Get the general mode of a player, or the default if never seen.
    #[must_use]
    pub fn last_mode(&self, player: PlayerIndex) -> InputMode {
        self.players
            .get(player)
            .map_or(self.config.default_mode, |p| p.last_mode)
    }

    /// Get the button mode of a player, or the default if never seen.
    #[must_use]
    pub fn last_button_mode(&self, player: PlayerIndex) -> InputMode {
        self.players
            .get(player)
            .map_or(self.config.default_button_mode, |p| p.last_button_mode)
    }

    /// Returns `true` if the player's most recent input came from a gamepad.
    #[must_use]
    pub fn last_input_was_gamepad(&self, player: PlayerIndex) -> bool {
        self.last_mode(player) == InputMode::Gamepad
    }

    /// Number of player slots currently allocated.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    fn player_mut(&mut self, player: PlayerIndex) -> &mut PlayerModeState {
        if player >= self.players.len() {
            let default_state = PlayerModeState {
                last_mode: self.config.default_mode,
                last_button_mode: self.config.default_button_mode,
            };
            self.players.resize(player + 1, default_state);
        }
        &mut self.players[player]
    }

    fn set_mode(&mut self, player: PlayerIndex, mode: InputMode, is_button: bool) -> ModeChanges {
        let mut changes = ModeChanges::empty();
        if !mode.is_concrete() {
            return changes;
        }
        if player >= MAX_PLAYERS {
            trace!(player, %mode, "player index out of range, input ignored");
            return changes;
        }

        if is_button && mode != self.last_button_mode(player) {
            self.player_mut(player).last_button_mode = mode;
            changes |= ModeChanges::BUTTON;
        }
        if mode != self.last_mode(player) {
            self.player_mut(player).last_mode = mode;
            changes |= ModeChanges::GENERAL;
        }

        if changes.button() {
            debug!(player, %mode, "button input mode changed");
            for listener in &mut self.button_mode_listeners {
                listener(player, mode);
            }
        }
        if changes.general() {
            debug!(player, %mode, "input mode changed");
            for listener in &mut self.mode_listeners {
                listener(player, mode);
            }
        }
        changes
    }
}

impl Default for InputModeTracker {
    fn default() -> Self {
        Self::with_valid_config(TrackerConfig::default())
    }
}

impl ModeSource for InputModeTracker {
    fn last_mode(&self, player: PlayerIndex) -> InputMode {
        Self::last_mode(self, player)
    }

    fn last_button_mode(&self, player: PlayerIndex) -> InputMode {
        Self::last_button_mode(self, player)
    }
}

impl fmt::Debug for InputModeTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputModeTracker")
            .field("config", &self.config)
            .field("players", &self.players)
            .field("ignore_events", &self.ignore_events)
            .field("mode_listeners", &self.mode_listeners.len())
            .field("button_mode_listeners", &self.button_mode_listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use winit::keyboard::KeyCode;

    use super::*;
    use crate::key::{GamepadKey, MouseAxis, MouseButton};

    type Log = Rc<RefCell<Vec<(&'static str, PlayerIndex, InputMode)>>>;

    /// Tracker whose notifications are recorded in order.
    fn recording_tracker() -> (InputModeTracker, Log) {
        let log: Log = Rc::default();
        let mut tracker = InputModeTracker::default();

        let button_log = Rc::clone(&log);
        tracker.on_button_mode_changed(move |player, mode| {
            button_log.borrow_mut().push(("button", player, mode));
        });
        let general_log = Rc::clone(&log);
        tracker.on_mode_changed(move |player, mode| {
            general_log.borrow_mut().push(("general", player, mode));
        });

        (tracker, log)
    }

    #[test]
    fn defaults_before_any_input() {
        let tracker = InputModeTracker::default();
        assert_eq!(tracker.last_mode(0), InputMode::Mouse);
        assert_eq!(tracker.last_button_mode(0), InputMode::Keyboard);
        assert_eq!(tracker.player_count(), 4);
    }

    #[test]
    fn unseen_player_reads_default() {
        let mut tracker = InputModeTracker::default();
        tracker.handle_key_down(0, Key::Gamepad(GamepadKey::FaceButtonBottom));

        assert_eq!(tracker.last_mode(7), InputMode::Mouse);
        assert_eq!(tracker.last_button_mode(7), InputMode::Keyboard);
        assert_eq!(tracker.last_mode(usize::MAX), InputMode::Mouse);
    }

    #[test]
    fn out_of_range_player_is_ignored() {
        let (mut tracker, log) = recording_tracker();
        let before = tracker.player_count();

        let changes = tracker.handle_key_down(usize::MAX, Key::Gamepad(GamepadKey::Start));
        assert!(changes.is_empty());
        assert!(tracker
            .handle_analog_input(MAX_PLAYERS, Key::Gamepad(GamepadKey::LeftX), 1.0)
            .is_empty());
        assert!(tracker.handle_mouse_button_down(usize::MAX / 2).is_empty());

        assert_eq!(tracker.player_count(), before);
        assert_eq!(tracker.last_mode(usize::MAX), InputMode::Mouse);
        assert!(log.borrow().is_empty());

        // The last valid index still grows storage.
        tracker.handle_key_down(MAX_PLAYERS - 1, Key::Gamepad(GamepadKey::Start));
        assert_eq!(tracker.player_count(), MAX_PLAYERS);
        assert!(tracker.last_input_was_gamepad(MAX_PLAYERS - 1));
    }

    #[test]
    fn keyboard_press_changes_both_modes() {
        let (mut tracker, log) = recording_tracker();
        tracker.handle_mouse_move(0, Vec2::new(10.0, 0.0), Vec2::ZERO);
        tracker.handle_key_down(0, Key::Gamepad(GamepadKey::FaceButtonBottom));
        log.borrow_mut().clear();

        let changes = tracker.handle_key_down(0, Key::Keyboard(KeyCode::Space));

        assert_eq!(changes, ModeChanges::BUTTON | ModeChanges::GENERAL);
        assert_eq!(
            *log.borrow(),
            vec![
                ("button", 0, InputMode::Keyboard),
                ("general", 0, InputMode::Keyboard),
            ]
        );
    }

    #[test]
    fn mouse_move_changes_general_mode_only() {
        let (mut tracker, log) = recording_tracker();
        tracker.handle_key_down(0, Key::Keyboard(KeyCode::KeyA));
        log.borrow_mut().clear();

        let changes = tracker.handle_mouse_move(0, Vec2::new(5.0, 5.0), Vec2::ZERO);

        assert_eq!(changes, ModeChanges::GENERAL);
        assert_eq!(*log.borrow(), vec![("general", 0, InputMode::Mouse)]);
        assert_eq!(tracker.last_button_mode(0), InputMode::Keyboard);
    }

    #[test]
    fn repeated_classification_is_silent() {
        let (mut tracker, log) = recording_tracker();
        tracker.handle_key_down(1, Key::Gamepad(GamepadKey::Start));
        let count = log.borrow().len();

        assert!(tracker
            .handle_key_down(1, Key::Gamepad(GamepadKey::FaceButtonTop))
            .is_empty());
        assert!(tracker
            .handle_analog_input(1, Key::Gamepad(GamepadKey::LeftX), 0.9)
            .is_empty());
        assert_eq!(log.borrow().len(), count);
    }

    #[test]
    fn default_matching_event_does_not_notify() {
        let (mut tracker, log) = recording_tracker();
        // Defaults are Mouse / Keyboard
        tracker.handle_mouse_wheel_or_gesture(0);
        assert!(log.borrow().is_empty());

        tracker.handle_key_down(0, Key::Keyboard(KeyCode::Enter));
        assert_eq!(*log.borrow(), vec![("general", 0, InputMode::Keyboard)]);
    }

    #[test]
    fn analog_threshold_gating() {
        let mut tracker = InputModeTracker::default();
        let axis = Key::Gamepad(GamepadKey::LeftX);

        assert!(tracker.handle_analog_input(0, axis, 0.2).is_empty());
        assert!(tracker.handle_analog_input(0, axis, -0.2).is_empty());
        assert!(tracker.handle_analog_input(0, axis, 0.15).is_empty());
        assert_eq!(tracker.last_mode(0), InputMode::Mouse);

        assert_eq!(
            tracker.handle_analog_input(0, axis, -0.25),
            ModeChanges::GENERAL
        );
        assert_eq!(tracker.last_mode(0), InputMode::Gamepad);
        assert_eq!(tracker.last_button_mode(0), InputMode::Keyboard);
    }

    #[test]
    fn analog_threshold_is_configurable() {
        let mut tracker =
            InputModeTracker::new(TrackerConfig::new().with_gamepad_axis_threshold(0.5)).unwrap();
        let axis = Key::Gamepad(GamepadKey::RightY);

        assert!(tracker.handle_analog_input(0, axis, 0.4).is_empty());
        assert!(tracker.handle_analog_input(0, axis, 0.6).general());
    }

    #[test]
    fn mouse_jitter_gating() {
        let mut tracker = InputModeTracker::default();
        tracker.handle_key_down(0, Key::Gamepad(GamepadKey::DPadUp));
        let origin = Vec2::new(100.0, 100.0);

        assert!(tracker
            .handle_mouse_move(0, Vec2::new(101.0, 99.0), origin)
            .is_empty());
        assert!(tracker
            .handle_mouse_move(0, Vec2::new(100.5, 100.5), origin)
            .is_empty());
        assert_eq!(tracker.last_mode(0), InputMode::Gamepad);

        assert!(tracker
            .handle_mouse_move(0, Vec2::new(100.0, 101.5), origin)
            .general());
        assert_eq!(tracker.last_mode(0), InputMode::Mouse);

        tracker.handle_key_down(0, Key::Gamepad(GamepadKey::DPadUp));
        assert!(tracker
            .handle_mouse_move(0, Vec2::new(98.0, 100.0), origin)
            .general());
    }

    #[test]
    fn stick_directions_never_change_button_mode() {
        let (mut tracker, log) = recording_tracker();

        for direction in GamepadKey::STICK_DIRECTIONS {
            let changes = tracker.handle_key_down(2, Key::Gamepad(direction));
            assert!(!changes.button());
        }

        assert_eq!(tracker.last_mode(2), InputMode::Gamepad);
        assert_eq!(tracker.last_button_mode(2), InputMode::Keyboard);
        assert_eq!(*log.borrow(), vec![("general", 2, InputMode::Gamepad)]);
    }

    #[test]
    fn gamepad_button_is_a_button() {
        let mut tracker = InputModeTracker::default();
        let changes = tracker.handle_key_down(0, Key::Gamepad(GamepadKey::FaceButtonRight));

        assert_eq!(changes, ModeChanges::BUTTON | ModeChanges::GENERAL);
        assert_eq!(tracker.last_button_mode(0), InputMode::Gamepad);
        assert!(tracker.last_input_was_gamepad(0));
    }

    #[test]
    fn mouse_keys_classify_as_mouse_buttons() {
        assert_eq!(
            classify_key(&Key::Mouse(MouseButton::Right)),
            (InputMode::Mouse, true)
        );
        assert_eq!(
            classify_key(&Key::MouseAxis(MouseAxis::Wheel)),
            (InputMode::Mouse, true)
        );
        assert_eq!(
            classify_key(&Key::Keyboard(KeyCode::ShiftLeft)),
            (InputMode::Keyboard, true)
        );
        assert_eq!(
            classify_key(&Key::Gamepad(GamepadKey::RightStickLeft)),
            (InputMode::Gamepad, false)
        );
    }

    #[test]
    fn mouse_button_down_sets_button_mode() {
        let mut tracker = InputModeTracker::default();
        assert_eq!(tracker.handle_mouse_button_down(0), ModeChanges::BUTTON);
        assert_eq!(tracker.last_button_mode(0), InputMode::Mouse);
        assert_eq!(tracker.last_mode(0), InputMode::Mouse);
    }

    #[test]
    fn ignored_events_are_no_ops() {
        let (mut tracker, log) = recording_tracker();
        tracker.set_ignore_events(true);
        assert!(tracker.is_ignoring_events());

        assert!(tracker
            .handle_key_down(0, Key::Gamepad(GamepadKey::Start))
            .is_empty());
        assert!(tracker
            .handle_analog_input(0, Key::Gamepad(GamepadKey::LeftY), 1.0)
            .is_empty());
        assert!(tracker
            .handle_mouse_move(0, Vec2::new(500.0, 0.0), Vec2::ZERO)
            .is_empty());
        assert!(tracker.handle_mouse_button_down(9).is_empty());
        assert!(tracker.handle_mouse_wheel_or_gesture(0).is_empty());
        assert!(tracker
            .handle_key_down(3, Key::Keyboard(KeyCode::KeyQ))
            .is_empty());

        assert!(log.borrow().is_empty());
        assert_eq!(tracker.last_mode(0), InputMode::Mouse);
        assert_eq!(tracker.last_button_mode(0), InputMode::Keyboard);
        assert_eq!(tracker.player_count(), 4);

        tracker.set_ignore_events(false);
        assert!(tracker
            .handle_key_down(0, Key::Gamepad(GamepadKey::Start))
            .general());
    }

    #[test]
    fn storage_grows_with_default_backfill() {
        let mut tracker =
            InputModeTracker::new(TrackerConfig::new().with_initial_players(1)).unwrap();
        tracker.handle_key_down(0, Key::Keyboard(KeyCode::KeyE));
        tracker.handle_key_down(5, Key::Gamepad(GamepadKey::FaceButtonLeft));

        assert_eq!(tracker.player_count(), 6);
        assert_eq!(tracker.last_mode(0), InputMode::Keyboard);
        assert_eq!(tracker.last_mode(3), InputMode::Mouse);
        assert_eq!(tracker.last_button_mode(3), InputMode::Keyboard);
        assert_eq!(tracker.last_mode(5), InputMode::Gamepad);
    }

    #[test]
    fn players_are_independent() {
        let mut tracker = InputModeTracker::default();
        tracker.handle_key_down(0, Key::Gamepad(GamepadKey::FaceButtonBottom));
        tracker.handle_key_down(1, Key::Keyboard(KeyCode::KeyW));

        assert_eq!(tracker.last_mode(0), InputMode::Gamepad);
        assert_eq!(tracker.last_mode(1), InputMode::Keyboard);
    }

    #[test]
    fn invalid_config_rejected() {
        let config = TrackerConfig::new().with_defaults(InputMode::Unknown, InputMode::Keyboard);
        assert!(InputModeTracker::new(config).is_err());
    }
}
