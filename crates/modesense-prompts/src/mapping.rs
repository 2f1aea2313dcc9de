//! Action and axis key mappings.

use hashbrown::HashMap;
use modesense_input::Key;
use serde::{Deserialize, Serialize};

/// A read-only `(name, key)` pair for an action or axis.
pub trait KeyMapping {
    /// Name of the action or axis.
    fn name(&self) -> &str;
    /// The physical key bound to it.
    fn key(&self) -> Key;
}

/// A key bound to a named action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionKeyMapping {
    pub action: String,
    pub key: Key,
}

impl KeyMapping for ActionKeyMapping {
    fn name(&self) -> &str {
        &self.action
    }

    fn key(&self) -> Key {
        self.key
    }
}

/// A key bound to a named axis with a scale, e.g. `S` at `-1.0` for moving back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisKeyMapping {
    pub axis: String,
    pub key: Key,
    pub scale: f32,
}

impl KeyMapping for AxisKeyMapping {
    fn name(&self) -> &str {
        &self.axis
    }

    fn key(&self) -> Key {
        self.key
    }
}

/// Source of the mappings configured for actions and axes.
///
/// Mappings are handed out in configuration order, which is the tie-break
/// order when several keys of one device match.
pub trait MappingSource {
    fn action_mappings(&self, action: &str) -> &[ActionKeyMapping];
    fn axis_mappings(&self, axis: &str) -> &[AxisKeyMapping];
}

/// Action and axis bindings.
///
/// Maps names to keys, allowing several keys (and devices) per name.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputBindings {
    /// Action mappings by action name.
    actions: HashMap<String, Vec<ActionKeyMapping>>,
    /// Axis mappings by axis name.
    axes: HashMap<String, Vec<AxisKeyMapping>>,
}

impl InputBindings {
    /// Create an empty binding table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a binding table with a builder pattern.
    #[must_use]
    pub fn builder() -> InputBindingsBuilder {
        InputBindingsBuilder::new()
    }

    /// Bind a key to an action. Binding the same key twice has no effect.
    pub fn bind_action(&mut self, action: impl Into<String>, key: impl Into<Key>) {
        let action = action.into();
        let key = key.into();
        let mappings = self.actions.entry(action.clone()).or_default();
        if !mappings.iter().any(|m| m.key == key) {
            mappings.push(ActionKeyMapping { action, key });
        }
    }

    /// Bind a key to an axis. Rebinding a key updates its scale in place.
    pub fn bind_axis(&mut self, axis: impl Into<String>, key: impl Into<Key>, scale: f32) {
        let axis = axis.into();
        let key = key.into();
        let mappings = self.axes.entry(axis.clone()).or_default();
        if let Some(existing) = mappings.iter_mut().find(|m| m.key == key) {
            existing.scale = scale;
        } else {
            mappings.push(AxisKeyMapping { axis, key, scale });
        }
    }

    /// Remove a key from an action.
    pub fn unbind_action(&mut self, action: &str, key: Key) {
        if let Some(mappings) = self.actions.get_mut(action) {
            mappings.retain(|m| m.key != key);
        }
    }

    /// Remove a key from an axis.
    pub fn unbind_axis(&mut self, axis: &str, key: Key) {
        if let Some(mappings) = self.axes.get_mut(axis) {
            mappings.retain(|m| m.key != key);
        }
    }

    /// Clear all keys of an action.
    pub fn clear_action(&mut self, action: &str) {
        if let Some(mappings) = self.actions.get_mut(action) {
            mappings.clear();
        }
    }

    /// Clear all keys of an axis.
    pub fn clear_axis(&mut self, axis: &str) {
        if let Some(mappings) = self.axes.get_mut(axis) {
            mappings.clear();
        }
    }
}

impl MappingSource for InputBindings {
    fn action_mappings(&self, action: &str) -> &[ActionKeyMapping] {
        self.actions.get(action).map_or(&[], Vec::as_slice)
    }

    fn axis_mappings(&self, axis: &str) -> &[AxisKeyMapping] {
        self.axes.get(axis).map_or(&[], Vec::as_slice)
    }
}

/// Builder for creating a binding table with a fluent API.
#[derive(Debug, Default)]
pub struct InputBindingsBuilder {
    bindings: InputBindings,
}

impl InputBindingsBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to an action.
    #[must_use]
    pub fn action(mut self, action: impl Into<String>, key: impl Into<Key>) -> Self {
        self.bindings.bind_action(action, key);
        self
    }

    /// Bind several keys to an action, in order.
    #[must_use]
    pub fn action_many(
        mut self,
        action: impl Into<String>,
        keys: impl IntoIterator<Item = impl Into<Key>>,
    ) -> Self {
        let action = action.into();
        for key in keys {
            self.bindings.bind_action(action.clone(), key);
        }
        self
    }

    /// Bind a key to an axis.
    #[must_use]
    pub fn axis(mut self, axis: impl Into<String>, key: impl Into<Key>, scale: f32) -> Self {
        self.bindings.bind_axis(axis, key, scale);
        self
    }

    /// Build the binding table.
    #[must_use]
    pub fn build(self) -> InputBindings {
        self.bindings
    }
}
