//! The effect command word as a struct of named fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Field, STOP_COMMAND};

/// One vibration effect, decoded into its named fields.
///
/// The struct is the structured twin of the raw 32-bit word: `decode` and
/// `encode` convert losslessly in both directions. Field values are stored
/// already masked to their width; the constrained edit operations
/// ([`set`](Self::set), [`adjust`](Self::adjust)) keep the
/// mutually-exclusive fields consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectCommand {
    /// Continuous-vibration flag.
    pub cont: bool,
    /// Reserved bits; always 0 on wire words built by this tool, but
    /// preserved verbatim by the codec so decode/encode stays bijective.
    pub reserved: u8,
    /// Motor/source index. Legal range 1-15; edits never store 0.
    pub motor: u8,
    /// Backward-direction intensity (0-7). Mutually exclusive with `fpow`.
    pub bpow: u8,
    /// Divergent-envelope flag. Mutually exclusive with `conv`.
    pub div: bool,
    /// Forward-direction intensity (0-7). Mutually exclusive with `bpow`.
    pub fpow: u8,
    /// Convergent-envelope flag. Mutually exclusive with `div`.
    pub conv: bool,
    /// Vibration frequency. Most packs respond in the 4-59 range.
    pub freq: u8,
    /// Inclination/decay period. Must be nonzero when `conv` or `div` is
    /// set; see [`inclination_warning`](Self::inclination_warning).
    pub inc: u8,
}

impl EffectCommand {
    /// Split a raw word into its fields. Pure and total: every 32-bit
    /// value is a valid (if possibly nonsensical) field set, and no
    /// normalization is applied.
    #[must_use]
    pub const fn decode(raw: u32) -> Self {
        Self {
            cont: (raw >> Field::Cont.shift()) & 1 != 0,
            reserved: ((raw >> Field::Reserved.shift()) & Field::Reserved.max_value()) as u8,
            motor: ((raw >> Field::Motor.shift()) & Field::Motor.max_value()) as u8,
            bpow: ((raw >> Field::Bpow.shift()) & Field::Bpow.max_value()) as u8,
            div: (raw >> Field::Div.shift()) & 1 != 0,
            fpow: ((raw >> Field::Fpow.shift()) & Field::Fpow.max_value()) as u8,
            conv: (raw >> Field::Conv.shift()) & 1 != 0,
            freq: ((raw >> Field::Freq.shift()) & Field::Freq.max_value()) as u8,
            inc: ((raw >> Field::Inc.shift()) & Field::Inc.max_value()) as u8,
        }
    }

    /// Pack the fields back into the raw wire word. Exact inverse of
    /// [`decode`](Self::decode), explicit shifts and masks only.
    #[must_use]
    pub const fn encode(&self) -> u32 {
        ((self.cont as u32) << Field::Cont.shift())
            | (((self.reserved as u32) & Field::Reserved.max_value()) << Field::Reserved.shift())
            | (((self.motor as u32) & Field::Motor.max_value()) << Field::Motor.shift())
            | (((self.bpow as u32) & Field::Bpow.max_value()) << Field::Bpow.shift())
            | ((self.div as u32) << Field::Div.shift())
            | (((self.fpow as u32) & Field::Fpow.max_value()) << Field::Fpow.shift())
            | ((self.conv as u32) << Field::Conv.shift())
            | ((self.freq as u32) << Field::Freq.shift())
            | ((self.inc as u32) << Field::Inc.shift())
    }

    /// The canonical stop effect: `motor = 1`, everything else zero.
    #[must_use]
    pub const fn stop() -> Self {
        Self::decode(STOP_COMMAND)
    }

    /// Current value of a field, right-aligned.
    #[must_use]
    pub const fn get(&self, field: Field) -> u32 {
        (self.encode() >> field.shift()) & field.max_value()
    }

    /// Write `value` into `field` with width-modulo wraparound, then apply
    /// the cross-field constraints.
    ///
    /// Constraint resolution is last-writer-wins: the field just written
    /// suppresses its conflicting partner, never the reverse. Writes to
    /// the reserved field are no-ops.
    #[must_use]
    pub fn set(&self, field: Field, value: u32) -> Self {
        if !field.is_editable() {
            return *self;
        }
        let raw = (self.encode() & !field.mask()) | ((value & field.max_value()) << field.shift());
        Self::decode(raw).normalized(field)
    }

    /// Add `delta` to a field with wraparound within its width. For 1-bit
    /// fields any nonzero delta toggles the flag instead of adding.
    #[must_use]
    pub fn adjust(&self, field: Field, delta: i32) -> Self {
        if !field.is_editable() || delta == 0 {
            return *self;
        }
        if field.width() == 1 {
            return self.set(field, self.get(field) ^ 1);
        }
        let modulus = i64::from(field.max_value()) + 1;
        let next = (i64::from(self.get(field)) + i64::from(delta)).rem_euclid(modulus);
        self.set(field, next as u32)
    }

    /// Enforce the mutual-exclusion invariants after a write to `written`.
    fn normalized(mut self, written: Field) -> Self {
        match written {
            Field::Motor => {
                if self.motor == 0 {
                    self.motor = 1;
                }
            }
            Field::Bpow => {
                if self.bpow != 0 {
                    self.fpow = 0;
                }
            }
            Field::Fpow => {
                if self.fpow != 0 {
                    self.bpow = 0;
                }
            }
            Field::Div => {
                if self.div {
                    self.conv = false;
                }
            }
            Field::Conv => {
                if self.conv {
                    self.div = false;
                }
            }
            _ => {}
        }
        self
    }

    /// True when the word is one the device is documented to reject:
    /// an envelope flag (`conv` or `div`) with a zero inclination period.
    ///
    /// Surfaced at the presentation boundary, never auto-corrected.
    #[must_use]
    pub const fn inclination_warning(&self) -> bool {
        self.inc == 0 && (self.conv || self.div)
    }
}

impl Default for EffectCommand {
    fn default() -> Self {
        Self::stop()
    }
}

impl From<u32> for EffectCommand {
    fn from(raw: u32) -> Self {
        Self::decode(raw)
    }
}

impl From<EffectCommand> for u32 {
    fn from(cmd: EffectCommand) -> Self {
        cmd.encode()
    }
}

impl fmt::Display for EffectCommand {
    /// Compact single-line listing of the editable fields, used by logs
    /// and the send echo.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for field in Field::EDITABLE {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{}={}", field, self.get(field))?;
        }
        Ok(())
    }
}
