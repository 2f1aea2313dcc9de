//! Gamepad player slots and stick-direction synthesis.

use std::hash::Hash;

use hashbrown::HashMap;
use modesense_core::PlayerIndex;

use crate::key::GamepadKey;

/// A device-independent gamepad input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GamepadInput {
    /// A button was pressed.
    ButtonDown(GamepadKey),
    /// An axis reported a new value.
    Axis(GamepadKey, f32),
}

/// Assigns connected gamepads to player indices.
///
/// Each new gamepad takes the lowest free index, so the first pad shares
/// player 0 with the keyboard and mouse.
#[derive(Debug)]
pub struct GamepadSlots<K> {
    slots: HashMap<K, PlayerIndex>,
}

impl<K> Default for GamepadSlots<K> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> GamepadSlots<K> {
    /// Create an empty slot table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a player to a gamepad. Reconnecting keeps the existing slot.
    pub fn connect(&mut self, id: K) -> PlayerIndex {
        if let Some(&player) = self.slots.get(&id) {
            return player;
        }
        let player = (0..)
            .find(|slot| !self.slots.values().any(|taken| taken == slot))
            .unwrap_or_default();
        self.slots.insert(id, player);
        player
    }

    /// Release the slot of a gamepad.
    pub fn disconnect(&mut self, id: K) -> Option<PlayerIndex> {
        self.slots.remove(&id)
    }

    /// Get the player of a gamepad, if connected.
    #[must_use]
    pub fn player(&self, id: K) -> Option<PlayerIndex> {
        self.slots.get(&id).copied()
    }

    /// Number of connected gamepads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no gamepad is connected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Turns stick axis motion into stick-direction pseudo-button presses.
///
/// A press is reported once when an axis crosses the threshold and again only
/// after it returns inside the threshold or flips direction.
#[derive(Debug, Default)]
pub struct StickDirections {
    held: HashMap<(PlayerIndex, GamepadKey), GamepadKey>,
}

impl StickDirections {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update a stick axis and return a newly pressed direction, if any.
    pub fn update(
        &mut self,
        player: PlayerIndex,
        axis: GamepadKey,
        value: f32,
        threshold: f32,
    ) -> Option<GamepadKey> {
        let (negative, positive) = axis.stick_directions()?;
        let pressed = if value > threshold {
            Some(positive)
        } else if value < -threshold {
            Some(negative)
        } else {
            None
        };

        if let Some(direction) = pressed {
            let previous = self.held.insert((player, axis), direction);
            (previous != Some(direction)).then_some(direction)
        } else {
            self.held.remove(&(player, axis));
            None
        }
    }

    /// Forget every held direction of a player.
    pub fn release_player(&mut self, player: PlayerIndex) {
        self.held.retain(|(held_player, _), _| *held_player != player);
    }

    /// Forget every held direction.
    pub fn clear(&mut self) {
        self.held.clear();
    }
}
