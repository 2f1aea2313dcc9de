//! Input prompt lookup for modesense.
//!
//! Given a player's current input modes, pick which of an action's or axis's
//! bindings to display and the image that goes with it.
//!
//! # Core Types
//!
//! - [`InputBindings`]: Action and axis to key mappings
//! - [`DevicePreference`]: Named device orderings, [`PreferenceOrder`] for custom ones
//! - [`BindingPreferenceResolver`]: Chooses one mapping per preference order
//! - [`ImageTheme`]: Key images split by device
//! - [`InputPrompts`]: Binding to key to image in one call
//!
//! # Usage
//!
//! ```ignore
//! use modesense_prompts::{DevicePreference, ImageTheme, InputBinding, InputBindings, InputPrompts};
//!
//! let bindings = InputBindings::builder()
//!     .action("jump", KeyCode::Space)
//!     .action("jump", GamepadKey::FaceButtonBottom)
//!     .build();
//! let prompts = InputPrompts::new(bindings).with_default_theme(theme);
//!
//! let image = prompts.image_for(
//!     &InputBinding::action("jump"),
//!     DevicePreference::Auto,
//!     player,
//!     subsystem.tracker(),
//!     None,
//! );
//! ```

mod mapping;
mod preference;
mod prompts;
mod resolver;
mod theme;

pub use mapping::{
    ActionKeyMapping, AxisKeyMapping, InputBindings, InputBindingsBuilder, KeyMapping,
    MappingSource,
};
pub use preference::{BindingKind, DevicePreference, DeviceToken, PreferenceOrder};
pub use prompts::{InputBinding, InputPrompts};
pub use resolver::BindingPreferenceResolver;
pub use theme::ImageTheme;
