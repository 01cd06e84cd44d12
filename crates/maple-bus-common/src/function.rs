//! Maple function codes.
//!
//! Each device on the bus reports the set of functions it implements as a
//! 32-bit mask. The codes below are fixed by the platform; the suite only
//! ever enumerates controllers and vibration packs, but the full catalog
//! is kept for diagnostics display.

use std::fmt;

/// Fixed function-code catalog, one bit per device class.
pub mod codes {
    /// Standard game controller.
    pub const CONTROLLER: u32 = 0x0100_0000;
    /// Memory card storage.
    pub const MEMORY_CARD: u32 = 0x0200_0000;
    /// VMU LCD screen.
    pub const LCD: u32 = 0x0400_0000;
    /// Real-time clock.
    pub const CLOCK: u32 = 0x0800_0000;
    /// Microphone.
    pub const MICROPHONE: u32 = 0x1000_0000;
    /// AR gun.
    pub const AR_GUN: u32 = 0x2000_0000;
    /// Keyboard.
    pub const KEYBOARD: u32 = 0x4000_0000;
    /// Light gun.
    pub const LIGHT_GUN: u32 = 0x8000_0000;
    /// Vibration pack (puru puru).
    pub const VIBRATION: u32 = 0x0010_0000;
    /// Mouse.
    pub const MOUSE: u32 = 0x0020_0000;
}

/// The two logical peripherals the diagnostic tool drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    /// The input controller supplying button snapshots.
    Controller,
    /// The rumble actuator receiving effect command words.
    Rumble,
}

impl Function {
    /// Function-code mask this peripheral advertises on the bus.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Function::Controller => codes::CONTROLLER,
            Function::Rumble => codes::VIBRATION,
        }
    }

    /// Operator-facing name, used in attach prompts.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Function::Controller => "controller",
            Function::Rumble => "rumble pack",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
