//! Interactive editor loop for the rumble diagnostic tool.
//!
//! One cooperative, single-threaded loop drives everything: ensure both
//! peripherals are attached, read a button snapshot, apply edge-triggered
//! edit intents to the live command word, transmit on demand, redraw.
//! There is no parallelism and no locking; the only suspension points are
//! the session's attach poll and the frame delay.
//!
//! The pieces:
//!
//! - [`EditorState`]: cursor, live word, preset marker, edge detection
//! - [`EditorCommand`]: the intents a button press can express
//! - [`Screen`]: the presentation sink (clear / draw text / present)
//! - [`Editor`]: the frame loop tying state, session and screen together

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(static_mut_refs)]

mod editor;
mod screen;
mod state;

pub use editor::{Editor, Tick};
pub use screen::{Screen, TextColor, TextPos};
pub use state::{EditorAction, EditorCommand, EditorState};
