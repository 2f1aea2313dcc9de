//! Prompt image themes.

use hashbrown::HashMap;
use modesense_input::Key;
use serde::{Deserialize, Serialize};

/// Images for keys, split into a keyboard/mouse table and a gamepad table.
///
/// Rows are keyed by [`Key::name`], so a theme can be authored as data
/// (`"KeyW"`, `"Gamepad_FaceButton_Bottom"`). The image type is up to the
/// host: a texture handle, a path or a glyph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "I: Deserialize<'de>"))]
pub struct ImageTheme<I> {
    name: String,
    #[serde(default)]
    keyboard_mouse: HashMap<String, I>,
    #[serde(default)]
    gamepad: HashMap<String, I>,
}

impl<I> ImageTheme<I> {
    /// Create an empty theme.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keyboard_mouse: HashMap::new(),
            gamepad: HashMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add or replace the image for a key.
    pub fn insert(&mut self, key: Key, image: I) {
        self.table_mut(key).insert(key.name().into_owned(), image);
    }

    /// Add an image, builder style.
    #[must_use]
    pub fn with_image(mut self, key: impl Into<Key>, image: I) -> Self {
        self.insert(key.into(), image);
        self
    }

    /// Image for a key, if the theme has one.
    pub fn image_for_key(&self, key: Key) -> Option<&I> {
        let table = if key.is_gamepad_key() {
            &self.gamepad
        } else {
            &self.keyboard_mouse
        };
        table.get(key.name().as_ref())
    }

    /// Number of images across both tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keyboard_mouse.len() + self.gamepad.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn table_mut(&mut self, key: Key) -> &mut HashMap<String, I> {
        if key.is_gamepad_key() {
            &mut self.gamepad
        } else {
            &mut self.keyboard_mouse
        }
    }
}
