//! Core game logic - grid, gravity, pieces and the session that drives them
//!
//! Nothing in this crate touches the terminal or the clock. Callers feed
//! elapsed milliseconds into [`GameSession::tick`] and player intents into
//! [`GameSession::apply_action`], then read a [`GameSnapshot`] back to draw.
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size cell storage and full-line detection
//! - [`blocks`]: generational arena owning every placed block
//! - [`playfield`]: grid plus arena, the shared world state
//! - [`gravity`]: periodic gravity rotation and its transition animation
//! - [`shapes`]: per-rotation offset tables for the seven shapes
//! - [`piece`]: the single live piece and its atomic transforms
//! - [`row_clear`]: gravity-aware line clearing with cascade
//! - [`scoring`]: points per landing
//! - [`spawner`]: shape sources (seeded random or scripted)
//! - [`session`]: tick ordering, landing flow and game over
//! - [`config`]: JSON-loadable game settings
//!
//! # Coordinates
//!
//! The grid frame has `+x` right and `+y` up while gravity points down.
//! When gravity changes the grid itself stays put; it is presented rotated
//! counter-clockwise by the gravity angle, so "down" on screen is always the
//! gravity vector in grid terms.
//!
//! # Example
//!
//! ```
//! use gravitris_core::{GameConfig, GameSession, ScriptedSpawner};
//! use gravitris_core::types::{GameAction, ShapeKind};
//!
//! let mut game = GameSession::new(GameConfig::default(), ScriptedSpawner::new([ShapeKind::O]));
//! game.start();
//!
//! game.apply_action(GameAction::MoveLeft);
//! while game.pieces().active().map(|p| p.id) == Some(1) {
//!     game.apply_action(GameAction::MoveDown);
//! }
//!
//! // A landing that clears nothing still earns the placement bonus.
//! assert_eq!(game.score(), 25);
//! ```

pub mod blocks;
pub mod config;
pub mod gravity;
pub mod grid;
pub mod piece;
pub mod playfield;
pub mod row_clear;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;
pub mod spawner;

pub use gravitris_types as types;

pub use blocks::{Block, BlockArena, BlockId, PieceId};
pub use config::{ConfigError, GameConfig, MAX_GRID_SIDE, MIN_GRID_SIDE};
pub use gravity::GravityController;
pub use grid::{Cell, Grid, LineAxis};
pub use piece::{can_occupy, MoveOutcome, Piece, PieceController, SpawnError};
pub use playfield::Playfield;
pub use row_clear::clear_full_rows;
pub use scoring::{landing_score, ScoringConfig};
pub use session::{GameSession, SessionEvent, EVENT_CAPACITY};
pub use snapshot::{ActiveSnapshot, GameSnapshot, GravitySnapshot};
pub use spawner::{RandomSpawner, ScriptedSpawner, SimpleRng, Spawner};
