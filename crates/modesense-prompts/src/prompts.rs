//! Binding to key to image lookup.

use modesense_core::PlayerIndex;
use modesense_input::{Key, ModeSource};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::mapping::{KeyMapping, MappingSource};
use crate::preference::{BindingKind, DevicePreference};
use crate::resolver::BindingPreferenceResolver;
use crate::theme::ImageTheme;

/// What a prompt is shown for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputBinding {
    /// A named action, resolved through the action mappings.
    Action(String),
    /// A named axis, resolved through the axis mappings.
    Axis(String),
    /// A fixed key shown as is.
    Key(Key),
}

impl InputBinding {
    pub fn action(name: impl Into<String>) -> Self {
        Self::Action(name.into())
    }

    pub fn axis(name: impl Into<String>) -> Self {
        Self::Axis(name.into())
    }
}

/// Looks up the key and image to show for a binding, given a player's modes.
#[derive(Debug)]
pub struct InputPrompts<S, I> {
    bindings: S,
    default_theme: Option<ImageTheme<I>>,
    resolver: BindingPreferenceResolver,
}

impl<S: MappingSource, I> InputPrompts<S, I> {
    pub fn new(bindings: S) -> Self {
        Self {
            bindings,
            default_theme: None,
            resolver: BindingPreferenceResolver::new(),
        }
    }

    /// Theme used when [`InputPrompts::image_for`] is not given one.
    #[must_use]
    pub fn with_default_theme(mut self, theme: ImageTheme<I>) -> Self {
        self.default_theme = Some(theme);
        self
    }

    pub fn set_default_theme(&mut self, theme: Option<ImageTheme<I>>) {
        self.default_theme = theme;
    }

    pub const fn default_theme(&self) -> Option<&ImageTheme<I>> {
        self.default_theme.as_ref()
    }

    pub const fn bindings(&self) -> &S {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut S {
        &mut self.bindings
    }

    /// Key to show for an action.
    pub fn key_for_action(
        &self,
        action: &str,
        preference: DevicePreference,
        player: PlayerIndex,
        modes: &impl ModeSource,
    ) -> Option<Key> {
        let order = preference.order(BindingKind::Action);
        self.resolver
            .resolve(
                self.bindings.action_mappings(action),
                &order,
                modes.last_mode(player),
                modes.last_button_mode(player),
            )
            .map(KeyMapping::key)
    }

    /// Key to show for an axis.
    pub fn key_for_axis(
        &self,
        axis: &str,
        preference: DevicePreference,
        player: PlayerIndex,
        modes: &impl ModeSource,
    ) -> Option<Key> {
        let order = preference.order(BindingKind::Axis);
        self.resolver
            .resolve(
                self.bindings.axis_mappings(axis),
                &order,
                modes.last_mode(player),
                modes.last_button_mode(player),
            )
            .map(KeyMapping::key)
    }

    /// Key to show for any binding.
    pub fn key_for(
        &self,
        binding: &InputBinding,
        preference: DevicePreference,
        player: PlayerIndex,
        modes: &impl ModeSource,
    ) -> Option<Key> {
        match binding {
            InputBinding::Action(name) => self.key_for_action(name, preference, player, modes),
            InputBinding::Axis(name) => self.key_for_axis(name, preference, player, modes),
            InputBinding::Key(key) => Some(*key),
        }
    }

    /// Image to show for a binding.
    ///
    /// Uses `theme` if given, the default theme otherwise. Returns `None` when
    /// there is no theme, the binding has no matching key, or the theme has no
    /// image for the key.
    pub fn image_for<'a>(
        &'a self,
        binding: &InputBinding,
        preference: DevicePreference,
        player: PlayerIndex,
        modes: &impl ModeSource,
        theme: Option<&'a ImageTheme<I>>,
    ) -> Option<&'a I> {
        let Some(theme) = theme.or(self.default_theme.as_ref()) else {
            debug!(?binding, "no prompt theme available");
            return None;
        };
        let key = self.key_for(binding, preference, player, modes)?;
        theme.image_for_key(key)
    }
}
