//! Core vocabulary shared by the kernel and its hosts.
//!
//! - Command: semantic commands
//! - Event: key chords independent of any UI toolkit

pub mod command;
pub mod event;

pub use command::Command;
pub use event::{Key, KeyCode, KeyModifiers};
