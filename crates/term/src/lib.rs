//! Terminal rendering for the game.
//!
//! Rendering happens in two steps: [`GameView`] turns a core snapshot into a
//! [`FrameBuffer`] (pure, testable), then [`TerminalRenderer`] diffs that
//! buffer against the last frame and writes only what changed.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use gravitris_core as core;
pub use gravitris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{shape_color, GameView, Projection, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
