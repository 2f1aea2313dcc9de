//! Cursor suppression for gamepad play.

use modesense_core::InputMode;

/// Host hook that hides or restores the mouse cursor.
///
/// The cursor is suppressed when a player switches to a gamepad and restored
/// when the mouse is used again.
pub trait CursorSuppression {
    fn set_cursor_suppressed(&mut self, suppressed: bool);
}

impl<F: FnMut(bool)> CursorSuppression for F {
    fn set_cursor_suppressed(&mut self, suppressed: bool) {
        self(suppressed);
    }
}

/// Cursor visibility implied by a new general mode. Keyboard leaves the
/// cursor as it is.
#[must_use]
pub const fn cursor_suppression_for(mode: InputMode) -> Option<bool> {
    match mode {
        InputMode::Gamepad => Some(true),
        InputMode::Mouse => Some(false),
        InputMode::Keyboard | InputMode::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suppression_by_mode() {
        assert_eq!(cursor_suppression_for(InputMode::Gamepad), Some(true));
        assert_eq!(cursor_suppression_for(InputMode::Mouse), Some(false));
        assert_eq!(cursor_suppression_for(InputMode::Keyboard), None);
    }
}
