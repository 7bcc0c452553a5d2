//! Read-only view of a session for renderers.

use crate::types::{GravityDirection, ShapeKind, Vec2, BLOCKS_PER_PIECE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub id: u32,
    pub kind: ShapeKind,
    pub rotation: usize,
    pub anchor: Vec2,
    pub cells: [Vec2; BLOCKS_PER_PIECE],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravitySnapshot {
    pub direction: GravityDirection,
    pub rotating: bool,
    /// Presentation angle in degrees, counter-clockwise.
    pub display_angle: f32,
    /// Display angle snapped to quarter turns.
    pub quarter_turns: u8,
    pub seconds_until_change: u32,
}

impl Default for GravitySnapshot {
    fn default() -> Self {
        Self {
            direction: GravityDirection::Down,
            rotating: false,
            display_angle: 0.0,
            quarter_turns: 0,
            seconds_until_change: 0,
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Column-major (`x * height + y`), like the grid itself.
    pub cells: Vec<Option<ShapeKind>>,
    pub active: Option<ActiveSnapshot>,
    pub next: ShapeKind,
    pub gravity: GravitySnapshot,
    pub score: u32,
    pub lines: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            active: None,
            next: ShapeKind::O,
            gravity: GravitySnapshot::default(),
            score: 0,
            lines: 0,
            game_over: false,
        }
    }

    /// Shape at grid (x, y); `None` for empty or out-of-range cells.
    pub fn kind_at(&self, x: i32, y: i32) -> Option<ShapeKind> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        self.cells[x as usize * self.height as usize + y as usize]
    }

    pub fn set_kind(&mut self, x: i32, y: i32, kind: Option<ShapeKind>) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.cells[x as usize * self.height as usize + y as usize] = kind;
    }

    /// True when (x, y) belongs to the live piece.
    pub fn is_active_cell(&self, x: i32, y: i32) -> bool {
        self.active
            .map(|a| a.cells.contains(&Vec2::new(x, y)))
            .unwrap_or(false)
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}
