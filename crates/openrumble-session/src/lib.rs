//! Peripheral session management for the rumble diagnostic tool.
//!
//! Two logical peripherals make a usable session: the controller (input)
//! and the rumble actuator (output). Each is tracked through a two-state
//! machine, `Unattached` and `Attached`:
//!
//! - `Unattached -> Attached` when bus enumeration returns a handle whose
//!   validity flag is true
//! - `Attached -> Unattached` when the validity flag is observed false
//!   (physical detach)
//!
//! Absence is a state, never an error: [`DeviceSession::await_attached`]
//! blocks in a fixed-interval poll until the peripheral appears, and the
//! send operations silently skip when the actuator is gone. The bus gives
//! no transmission feedback, so there is no fatal path anywhere in this
//! crate. The only cleanup contract is that a still-attached actuator is
//! left stopped when the session is dropped, on every exit path.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(static_mut_refs)]

mod config;
mod session;

pub use config::SessionConfig;
pub use session::{DeviceSession, SendOutcome, SlotState};
