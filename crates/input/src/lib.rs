//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]. There is no
//! auto-repeat handling: one key press is one action, and terminals that send
//! repeated press events simply produce repeated actions.

pub mod map;

pub use gravitris_types as types;

pub use map::{handle_key_event, should_quit};
