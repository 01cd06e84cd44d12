//! Common maple bus utilities for the OpenRumble diagnostic suite.
//!
//! The maple bus is the Dreamcast's serial peripheral bus. Every device on
//! it advertises one or more *function codes* (controller, vibration pack,
//! memory card, ...) and is addressed through an opaque per-slot handle.
//! This crate provides the vocabulary shared by the protocol, session and
//! editor layers:
//!
//! - [`function`]: the fixed function-code catalog and the [`Function`]
//!   enum for the two peripherals this suite drives
//! - [`buttons`]: controller button bitmask plus XOR edge detection
//! - [`bus`]: [`DeviceHandle`], the synchronous [`MapleBus`] port trait and
//!   a shared-state [`mock`](bus::mock) bus for tests and the simulator
//!
//! Transmission on the real bus is fire-and-forget: the peripheral either
//! accepts a command word or silently drops it, and neither case is
//! observable from the host side. The [`MapleBus`] trait mirrors that
//! contract, so device absence is represented as a state (`None` handles,
//! invalid handles) rather than as an error.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(static_mut_refs)]

pub mod bus;
pub mod buttons;
pub mod function;

pub use bus::{DeviceHandle, MapleBus};
pub use buttons::Buttons;
pub use function::Function;
