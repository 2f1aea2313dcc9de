//! Mode transition flags.

use bitflags::bitflags;

bitflags! {
    /// Which stored modes an event changed.
    ///
    /// Either, both or neither flag may be set for a single event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModeChanges: u8 {
        /// The button mode changed.
        const BUTTON  = 0b0000_0001;
        /// The general mode changed.
        const GENERAL = 0b0000_0010;
    }
}

impl ModeChanges {
    /// Returns `true` if the button mode changed.
    #[inline]
    #[must_use]
    pub const fn button(self) -> bool {
        self.contains(Self::BUTTON)
    }

    /// Returns `true` if the general mode changed.
    #[inline]
    #[must_use]
    pub const fn general(self) -> bool {
        self.contains(Self::GENERAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_flags() {
        let both = ModeChanges::BUTTON | ModeChanges::GENERAL;
        assert!(both.button());
        assert!(both.general());

        let none = ModeChanges::empty();
        assert!(!none.button());
        assert!(!none.general());
        assert_eq!(none, ModeChanges::default());
    }
}
