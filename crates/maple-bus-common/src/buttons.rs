//! Controller button masks and edge detection.

use bitflags::bitflags;

bitflags! {
    /// Button bitmask as reported by the controller function.
    ///
    /// The bit positions are fixed by the controller report format. A set
    /// bit means the button is currently held down.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u32 {
        /// C trigger button.
        const C          = 1 << 0;
        /// B face button.
        const B          = 1 << 1;
        /// A face button.
        const A          = 1 << 2;
        /// Start button.
        const START      = 1 << 3;
        /// Directional pad up.
        const DPAD_UP    = 1 << 4;
        /// Directional pad down.
        const DPAD_DOWN  = 1 << 5;
        /// Directional pad left.
        const DPAD_LEFT  = 1 << 6;
        /// Directional pad right.
        const DPAD_RIGHT = 1 << 7;
        /// Z trigger button.
        const Z          = 1 << 8;
        /// Y face button.
        const Y          = 1 << 9;
        /// X face button.
        const X          = 1 << 10;
        /// D button.
        const D          = 1 << 11;
    }
}

impl Buttons {
    /// Buttons that transitioned from released to pressed between two
    /// snapshots.
    ///
    /// XOR isolates the bits that changed; masking with the current
    /// snapshot keeps only those now held down, so a button held across
    /// both snapshots does not retrigger.
    #[must_use]
    pub const fn newly_pressed(previous: Self, current: Self) -> Self {
        Self::from_bits_truncate((previous.bits() ^ current.bits()) & current.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn press_is_detected_once() {
        let pressed = Buttons::newly_pressed(Buttons::empty(), Buttons::A);
        assert_eq!(pressed, Buttons::A);

        // Held across the next snapshot: no retrigger.
        let held = Buttons::newly_pressed(Buttons::A, Buttons::A);
        assert_eq!(held, Buttons::empty());
    }

    #[test]
    fn release_is_not_a_press() {
        let released = Buttons::newly_pressed(Buttons::A, Buttons::empty());
        assert_eq!(released, Buttons::empty());
    }

    #[test]
    fn simultaneous_presses_are_all_reported() {
        let prev = Buttons::DPAD_LEFT;
        let cur = Buttons::DPAD_LEFT | Buttons::A | Buttons::START;
        assert_eq!(
            Buttons::newly_pressed(prev, cur),
            Buttons::A | Buttons::START
        );
    }

    proptest! {
        /// Newly pressed bits are always a subset of the current snapshot
        /// and never include bits already held.
        #[test]
        fn prop_edges_subset_of_current(prev: u32, cur: u32) {
            let prev = Buttons::from_bits_truncate(prev);
            let cur = Buttons::from_bits_truncate(cur);
            let pressed = Buttons::newly_pressed(prev, cur);
            prop_assert!(cur.contains(pressed));
            prop_assert!((pressed & prev).is_empty());
        }
    }
}
