//! Grid module - the bounded cell array
//!
//! The grid is a `width x height` array of [`Cell`]s indexed `[x][y]`, with
//! `(0, 0)` in the bottom-left corner of the un-rotated playfield. It knows
//! nothing about gravity or pieces: it only stores non-owning [`BlockId`]
//! handles and answers bounded queries. Out-of-bounds access is an ordinary
//! outcome (`None` / `false`), never a panic.
//!
//! Storage is a flat column-major `Vec` (`x * height + y`), so a column is a
//! contiguous slice.

use crate::blocks::BlockId;

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Holds a handle to the block occupying the cell.
    Occupied(BlockId),
    /// Reserved for fixed obstacles. Never produced by the game itself.
    Wall,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn block(&self) -> Option<BlockId> {
        match self {
            Cell::Occupied(id) => Some(*id),
            _ => None,
        }
    }
}

/// Which grid dimension a line runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAxis {
    /// A horizontal strip at a fixed `y`, spanning every `x`.
    Row,
    /// A vertical strip at a fixed `x`, spanning every `y`.
    Column,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        }
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(x as usize * self.height as usize + y as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Handle of the block at (x, y), if the cell is in bounds and occupied
    pub fn block_at(&self, x: i32, y: i32) -> Option<BlockId> {
        self.get(x, y).and_then(|cell| cell.block())
    }

    /// True when (x, y) is in bounds and empty
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Cell::Empty))
    }

    /// Store a block handle at (x, y).
    ///
    /// Only an in-bounds `Empty` cell accepts the write. A write to an
    /// occupied cell is silently ignored and the existing occupant is kept.
    /// Returns true when the handle was stored.
    pub fn set_block(&mut self, x: i32, y: i32, block: BlockId) -> bool {
        match self.index(x, y) {
            Some(idx) if self.cells[idx].is_empty() => {
                self.cells[idx] = Cell::Occupied(block);
                true
            }
            _ => false,
        }
    }

    /// Place a wall at (x, y), replacing whatever is there.
    pub fn set_wall(&mut self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = Cell::Wall;
                true
            }
            None => false,
        }
    }

    /// Reset (x, y) to `Empty` regardless of its prior state.
    pub fn clear(&mut self, x: i32, y: i32) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = Cell::Empty;
        }
    }

    /// Clear (x, y) and return the block that occupied it.
    pub fn take(&mut self, x: i32, y: i32) -> Option<BlockId> {
        let idx = self.index(x, y)?;
        let block = self.cells[idx].block()?;
        self.cells[idx] = Cell::Empty;
        Some(block)
    }

    /// Clear (x, y) only if it holds `block`.
    pub fn clear_if(&mut self, x: i32, y: i32, block: BlockId) -> bool {
        match self.index(x, y) {
            Some(idx) if self.cells[idx] == Cell::Occupied(block) => {
                self.cells[idx] = Cell::Empty;
                true
            }
            _ => false,
        }
    }

    /// Number of cells along a line of the given axis.
    pub fn line_len(&self, axis: LineAxis) -> i32 {
        match axis {
            LineAxis::Row => self.width as i32,
            LineAxis::Column => self.height as i32,
        }
    }

    /// Grid coordinates of the `offset`-th cell of line `index`.
    pub fn line_cell(axis: LineAxis, index: i32, offset: i32) -> (i32, i32) {
        match axis {
            LineAxis::Row => (offset, index),
            LineAxis::Column => (index, offset),
        }
    }

    /// A line is full iff none of its cells is empty.
    ///
    /// An index outside the grid is never full.
    pub fn is_line_full(&self, axis: LineAxis, index: i32) -> bool {
        let len = self.line_len(axis);
        (0..len).all(|offset| {
            let (x, y) = Self::line_cell(axis, index, offset);
            matches!(self.get(x, y), Some(cell) if !cell.is_empty())
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Cell::Occupied(_)))
            .count()
    }

    /// Iterate `(x, y, block)` over every occupied cell.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32, BlockId)> + '_ {
        let height = self.height as usize;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.block()
                .map(|block| ((idx / height) as i32, (idx % height) as i32, block))
        })
    }

    /// Clear the entire grid
    pub fn clear_all(&mut self) {
        self.cells.fill(Cell::Empty);
    }
}
