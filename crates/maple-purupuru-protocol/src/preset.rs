//! Built-in effect preset catalog.
//!
//! An ordered, read-only sequence of precomputed command words with
//! operator-facing labels. The editor cycles through it one entry at a
//! time with wraparound; entries are copied into the live word, never
//! edited in place.

use serde::Serialize;

use crate::EffectCommand;

/// One catalog entry: a precomputed command word and its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    /// The raw wire word.
    pub raw: u32,
    /// Human-readable description shown on preset load.
    pub label: &'static str,
}

impl Preset {
    /// Decoded field set of this preset.
    #[must_use]
    pub const fn command(&self) -> EffectCommand {
        EffectCommand::decode(self.raw)
    }
}

/// The built-in catalog, in cycle order.
///
/// The first two entries are mild general-purpose effects (a symmetric
/// buzz and a continuous diverging hum); the rest are the classic named
/// patterns. All use motor 1, the only motor populated on common packs.
const CATALOG: [Preset; 8] = [
    Preset {
        raw: 0x1077_1C80,
        label: "Custom one",
    },
    Preset {
        raw: 0x110B_0C80,
        label: "Custom two",
    },
    Preset {
        raw: 0x1070_1A01,
        label: "Basic Thud (simple .5s jolt)",
    },
    Preset {
        raw: 0x1110_0731,
        label: "Car Idle (69 Mustang)",
    },
    Preset {
        raw: 0x10F0_1526,
        label: "Car Idle (VW beetle)",
    },
    Preset {
        raw: 0x10F0_3933,
        label: "Earthquake (vibrate, and fade out)",
    },
    Preset {
        raw: 0x1110_2805,
        label: "Helicopter",
    },
    Preset {
        raw: 0x1020_0700,
        label: "Ship's Thrust (as in AAC)",
    },
];

/// The full catalog in cycle order.
#[must_use]
pub const fn catalog() -> &'static [Preset] {
    &CATALOG
}

/// Next catalog index after `index`, wrapping past the end.
#[must_use]
pub const fn cycle(index: usize) -> usize {
    (index + 1) % CATALOG.len()
}
