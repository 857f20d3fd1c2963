//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Nothing here
//! knows about rendering; the binary decides what to do with the actions.

pub mod map;

pub use tetjeweled_types as types;

pub use map::{handle_key_event, is_press, should_quit};
