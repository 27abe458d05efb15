//! Channel layer for prompt matching over an interactive PTY.
//!
//! Output from the device is accumulated in a [`PatternBuffer`] with ANSI
//! escapes stripped; prompts are only searched for in the buffer tail.

mod buffer;
mod pty;

pub use buffer::{DEFAULT_SEARCH_DEPTH, PatternBuffer};
pub use pty::PtyChannel;
