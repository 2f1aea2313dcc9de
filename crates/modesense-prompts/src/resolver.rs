//! Preference-ordered binding selection.

use std::fmt;

use modesense_core::{DeviceAffinity, InputMode};
use modesense_input::Key;
use tracing::trace;

use crate::mapping::KeyMapping;
use crate::preference::PreferenceOrder;

/// Default key classifier.
fn key_affinity(key: &Key) -> DeviceAffinity {
    key.affinity()
}

/// Picks which of several mappings to display for a player.
///
/// Walks the preference order token by token and returns the first mapping,
/// in configuration order, whose key belongs to a device the token names.
/// Resolution is pure: the same inputs always yield the same mapping.
#[derive(Clone, Copy)]
pub struct BindingPreferenceResolver<F = fn(&Key) -> DeviceAffinity> {
    affinity_of: F,
}

impl Default for BindingPreferenceResolver {
    fn default() -> Self {
        Self {
            affinity_of: key_affinity,
        }
    }
}

impl BindingPreferenceResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F> BindingPreferenceResolver<F>
where
    F: Fn(&Key) -> DeviceAffinity,
{
    /// Use a custom key classifier, e.g. to treat a touch-emulated key as a
    /// gamepad.
    pub const fn with_affinity(affinity_of: F) -> Self {
        Self { affinity_of }
    }

    /// Select the preferred mapping, or `None` if no mapping matches.
    pub fn resolve<'a, M: KeyMapping>(
        &self,
        mappings: &'a [M],
        order: &PreferenceOrder,
        last_mode: InputMode,
        last_button_mode: InputMode,
    ) -> Option<&'a M> {
        if mappings.is_empty() {
            return None;
        }

        for &token in order.tokens() {
            let wanted = token.affinities(last_mode, last_button_mode);
            if wanted.is_empty() {
                continue;
            }
            if let Some(mapping) = mappings
                .iter()
                .find(|m| wanted.contains(&(self.affinity_of)(&m.key())))
            {
                trace!(?token, key = %mapping.key(), "binding resolved");
                return Some(mapping);
            }
        }
        None
    }
}

impl<F> fmt::Debug for BindingPreferenceResolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingPreferenceResolver").finish_non_exhaustive()
    }
}
