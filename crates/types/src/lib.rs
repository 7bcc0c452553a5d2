//! Core types module - shared data structures and constants
//!
//! This crate defines the plain data types used by the simulation, the
//! terminal front end and the tests. Nothing here knows about the grid or
//! the session; everything is `Copy` and cheap to pass around.
//!
//! # Coordinate frames
//!
//! The grid frame has `+x` pointing right and `+y` pointing up while gravity
//! is [`GravityDirection::Down`]. When gravity changes the whole grid is
//! presented rotated counter-clockwise by [`GravityDirection::angle_degrees`],
//! so "world down" on screen always lines up with the active gravity vector.
//! [`GravityDirection::world_to_grid`] converts a world-frame step into the
//! grid frame.
//!
//! # Default timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `FALL_INTERVAL_MS` | 1000 | Automatic fall period |
//! | `GRAVITY_PERIOD_MS` | 10000 | Time between gravity changes |
//! | `ROTATION_DURATION_MS` | 1000 | Length of the grid rotation transition |
//!
//! # Examples
//!
//! ```
//! use gravitris_types::{GravityDirection, Vec2};
//!
//! let g = GravityDirection::Down;
//! assert_eq!(g.next(), GravityDirection::Left);
//! assert_eq!(g.vector(), Vec2::new(0, -1));
//!
//! // World down always maps onto the gravity vector.
//! let left = GravityDirection::Left;
//! assert_eq!(left.world_to_grid(Vec2::WORLD_DOWN), left.vector());
//! ```

use std::ops::{Add, AddAssign, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Default grid width in cells
pub const GRID_WIDTH: u16 = 20;

/// Default grid height in cells
pub const GRID_HEIGHT: u16 = 20;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Automatic fall period (one cell per second)
pub const FALL_INTERVAL_MS: u32 = 1000;

/// Time between two gravity direction changes
pub const GRAVITY_PERIOD_MS: u32 = 10_000;

/// Duration of the grid rotation transition after a gravity change
pub const ROTATION_DURATION_MS: u32 = 1000;

/// Points for a landing that clears nothing
pub const PLACEMENT_POINTS: u32 = 25;

/// Points per cleared row
pub const ROW_POINTS: u32 = 100;

/// Points for the first four rows of a clear larger than four rows
pub const FOUR_ROWS_POINTS: u32 = 800;

/// Number of blocks in every piece shape
pub const BLOCKS_PER_PIECE: usize = 4;

/// Integer 2D vector, used both for grid positions and unit steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0, 0);

    /// World-frame down (screen down), independent of gravity.
    pub const WORLD_DOWN: Vec2 = Vec2::new(0, -1);
    pub const WORLD_LEFT: Vec2 = Vec2::new(-1, 0);
    pub const WORLD_RIGHT: Vec2 = Vec2::new(1, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rotate by a quarter turn counter-clockwise.
    pub const fn rotate_ccw(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Rotate by a quarter turn clockwise.
    pub const fn rotate_cw(self) -> Self {
        Self::new(self.y, -self.x)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Gravity directions, cycled Down → Left → Up → Right → Down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GravityDirection {
    #[default]
    Down,
    Left,
    Up,
    Right,
}

impl GravityDirection {
    /// Next direction in the cycle.
    ///
    /// ```
    /// use gravitris_types::GravityDirection;
    ///
    /// assert_eq!(GravityDirection::Down.next(), GravityDirection::Left);
    /// assert_eq!(GravityDirection::Left.next(), GravityDirection::Up);
    /// assert_eq!(GravityDirection::Up.next(), GravityDirection::Right);
    /// assert_eq!(GravityDirection::Right.next(), GravityDirection::Down);
    /// ```
    pub fn next(&self) -> Self {
        match self {
            GravityDirection::Down => GravityDirection::Left,
            GravityDirection::Left => GravityDirection::Up,
            GravityDirection::Up => GravityDirection::Right,
            GravityDirection::Right => GravityDirection::Down,
        }
    }

    /// Unit vector of the gravity in the grid frame.
    pub fn vector(&self) -> Vec2 {
        match self {
            GravityDirection::Down => Vec2::new(0, -1),
            GravityDirection::Up => Vec2::new(0, 1),
            GravityDirection::Left => Vec2::new(-1, 0),
            GravityDirection::Right => Vec2::new(1, 0),
        }
    }

    /// Counter-clockwise presentation angle of the grid for this direction.
    pub fn angle_degrees(&self) -> i32 {
        match self {
            GravityDirection::Down => 0,
            GravityDirection::Left => 90,
            GravityDirection::Up => 180,
            GravityDirection::Right => 270,
        }
    }

    /// Number of counter-clockwise quarter turns the grid is presented with.
    pub fn quarter_turns(&self) -> u8 {
        (self.angle_degrees() / 90) as u8
    }

    /// True when rows run along `x` (gravity acts on `y`).
    pub fn is_vertical(&self) -> bool {
        matches!(self, GravityDirection::Down | GravityDirection::Up)
    }

    /// Map a world-frame step into the grid frame.
    ///
    /// The grid is presented rotated counter-clockwise by the gravity angle,
    /// so world vectors are rotated back clockwise by the same amount.
    pub fn world_to_grid(&self, world: Vec2) -> Vec2 {
        let mut v = world;
        for _ in 0..self.quarter_turns() {
            v = v.rotate_cw();
        }
        v
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "down" | "d" => Some(GravityDirection::Down),
            "left" | "l" => Some(GravityDirection::Left),
            "up" | "u" => Some(GravityDirection::Up),
            "right" | "r" => Some(GravityDirection::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GravityDirection::Down => "down",
            GravityDirection::Left => "left",
            GravityDirection::Up => "up",
            GravityDirection::Right => "right",
        }
    }
}

/// The seven piece shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Parse shape kind from string (case-insensitive)
    ///
    /// ```
    /// use gravitris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::O => "O",
            ShapeKind::T => "T",
            ShapeKind::S => "S",
            ShapeKind::Z => "Z",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
        }
    }
}

/// Piece rotation request.
///
/// `Left` is a +90° (counter-clockwise) turn, `Right` is -90°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    /// Signed rotation in degrees.
    pub fn delta_degrees(&self) -> i32 {
        match self {
            Turn::Left => 90,
            Turn::Right => -90,
        }
    }

    /// Signed rotation in quarter turns.
    pub fn quarter_turns(&self) -> i32 {
        self.delta_degrees() / 90
    }
}

/// Player movement request, expressed in the world (screen) frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

impl MoveDirection {
    pub fn world_vector(&self) -> Vec2 {
        match self {
            MoveDirection::Left => Vec2::WORLD_LEFT,
            MoveDirection::Right => Vec2::WORLD_RIGHT,
            MoveDirection::Down => Vec2::WORLD_DOWN,
        }
    }
}

/// Game actions produced by an input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell to the screen left
    MoveLeft,
    /// Move piece one cell to the screen right
    MoveRight,
    /// Move piece one cell along gravity (lands it when blocked)
    MoveDown,
    /// Rotate piece +90°
    RotateLeft,
    /// Rotate piece -90°
    RotateRight,
    /// Start a fresh session
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// ```
    /// use gravitris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateright"), Some(GameAction::RotateRight));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "rotateleft" => Some(GameAction::RotateLeft),
            "rotateright" => Some(GameAction::RotateRight),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::RotateLeft => "rotateLeft",
            GameAction::RotateRight => "rotateRight",
            GameAction::Restart => "restart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_vectors_are_unit_steps() {
        assert_eq!(GravityDirection::Down.vector(), Vec2::new(0, -1));
        assert_eq!(GravityDirection::Up.vector(), Vec2::new(0, 1));
        assert_eq!(GravityDirection::Left.vector(), Vec2::new(-1, 0));
        assert_eq!(GravityDirection::Right.vector(), Vec2::new(1, 0));
    }

    #[test]
    fn world_down_maps_to_gravity_vector() {
        for dir in [
            GravityDirection::Down,
            GravityDirection::Left,
            GravityDirection::Up,
            GravityDirection::Right,
        ] {
            assert_eq!(dir.world_to_grid(Vec2::WORLD_DOWN), dir.vector(), "{:?}", dir);
        }
    }

    #[test]
    fn world_sideways_is_perpendicular_to_gravity() {
        let left = GravityDirection::Left;
        assert_eq!(left.world_to_grid(Vec2::WORLD_RIGHT), Vec2::new(0, -1));
        assert_eq!(left.world_to_grid(Vec2::WORLD_LEFT), Vec2::new(0, 1));

        let up = GravityDirection::Up;
        assert_eq!(up.world_to_grid(Vec2::WORLD_RIGHT), Vec2::new(-1, 0));
    }

    #[test]
    fn turn_deltas() {
        assert_eq!(Turn::Left.delta_degrees(), 90);
        assert_eq!(Turn::Right.delta_degrees(), -90);
        assert_eq!(Turn::Left.quarter_turns(), 1);
        assert_eq!(Turn::Right.quarter_turns(), -1);
    }

    #[test]
    fn gravity_direction_parse_roundtrip() {
        for dir in [
            GravityDirection::Down,
            GravityDirection::Left,
            GravityDirection::Up,
            GravityDirection::Right,
        ] {
            assert_eq!(GravityDirection::from_str(dir.as_str()), Some(dir));
        }
        assert_eq!(GravityDirection::from_str("sideways"), None);
    }
}
