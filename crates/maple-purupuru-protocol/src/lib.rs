//! Command-word codec for the Dreamcast vibration pack (puru puru).
//!
//! The pack is driven by a single 32-bit command word that fully describes
//! one vibration effect; that word is the entire protocol surface toward
//! the peripheral. Nine named fields partition all 32 bits:
//!
//! | field    | width | shift | semantics                                        |
//! |----------|-------|-------|--------------------------------------------------|
//! | motor    | 4     | 28    | motor/source index, 1-15 (0 rejected by hardware) |
//! | reserved | 3     | 25    | always 0                                          |
//! | cont     | 1     | 24    | continuous-vibration flag                         |
//! | conv     | 1     | 23    | convergent envelope (fades out)                   |
//! | fpow     | 3     | 20    | forward intensity                                 |
//! | div      | 1     | 19    | divergent envelope (ramps up)                     |
//! | bpow     | 3     | 16    | backward intensity                                |
//! | freq     | 8     | 8     | vibration frequency, nominal range 4-59           |
//! | inc      | 8     | 0     | inclination/decay period                          |
//!
//! Byte 0 (bits 31-24) is the most significant byte of the word; within
//! each byte the fields pack from the least-significant bit upward.
//!
//! ## Field constraints
//!
//! Three pairs of fields are mutually constrained. [`EffectCommand::set`]
//! and [`EffectCommand::adjust`] resolve them with a last-writer-wins
//! normalization pass, so the codec never produces an inconsistent set and
//! never reports a constraint error:
//!
//! - `bpow` and `fpow`: at most one nonzero; writing one zeroes the other
//! - `div` and `conv`: at most one set; setting one clears the other
//! - `motor`: never stored as 0; an edit that would produce 0 wraps to 1
//!
//! One combination is representable but rejected by the device: `inc == 0`
//! while `conv` or `div` is set. The codec surfaces it through
//! [`EffectCommand::inclination_warning`] and deliberately does not
//! correct it; the presentation layer decides how loudly to warn.
//!
//! ## Decode/encode totality
//!
//! [`EffectCommand::decode`] accepts every 32-bit value (a nonsensical
//! word is still a valid field set) and [`EffectCommand::encode`] is its
//! exact inverse, implemented with explicit shifts and masks so the wire
//! format is byte-exact regardless of host endianness.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(static_mut_refs)]

pub mod effect;
pub mod field;
pub mod preset;

pub use effect::EffectCommand;
pub use field::Field;
pub use preset::{Preset, catalog, cycle};

use thiserror::Error;

/// Errors returned by protocol lookups. The codec itself is total and has
/// no failure mode; only name-based field resolution can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A field name that does not appear in the layout table.
    #[error("unknown field '{0}'")]
    UnknownField(String),
}

/// Canonical stop word: `motor = 1`, every other field zero.
///
/// Never the all-zero word; `motor = 0` is invalid on the real hardware
/// and the pack would ignore it, leaving a running effect running.
pub const STOP_COMMAND: u32 = 0x1000_0000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_command_is_motor_one_rest_zero() {
        let cmd = EffectCommand::decode(STOP_COMMAND);
        assert_eq!(cmd.motor, 1);
        assert!(!cmd.cont);
        assert_eq!(cmd.bpow, 0);
        assert_eq!(cmd.fpow, 0);
        assert!(!cmd.div);
        assert!(!cmd.conv);
        assert_eq!(cmd.freq, 0);
        assert_eq!(cmd.inc, 0);
        assert_eq!(cmd.reserved, 0);
    }

    #[test]
    fn stop_command_matches_field_offsets() {
        // Computed from the layout table, not hard-coded.
        assert_eq!(STOP_COMMAND, 1u32 << Field::Motor.shift());
    }
}
