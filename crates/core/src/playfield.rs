//! Playfield - the grid together with the blocks it refers to
//!
//! The grid never owns blocks, it only stores handles into the arena. The
//! two are kept side by side here so components can borrow them together.

use crate::blocks::{BlockArena, BlockId, PieceId};
use crate::grid::Grid;
use crate::types::{ShapeKind, Vec2};

#[derive(Debug, Clone, PartialEq)]
pub struct Playfield {
    pub grid: Grid,
    pub blocks: BlockArena,
}

impl Playfield {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            grid: Grid::new(width, height),
            blocks: BlockArena::new(),
        }
    }

    /// Shape kind of the block at (x, y), for presentation.
    pub fn kind_at(&self, x: i32, y: i32) -> Option<ShapeKind> {
        let id = self.grid.block_at(x, y)?;
        self.blocks.get(id).map(|block| block.kind)
    }

    /// Owner of the block at (x, y).
    pub fn owner_at(&self, x: i32, y: i32) -> Option<PieceId> {
        let id = self.grid.block_at(x, y)?;
        self.blocks.owner(id)
    }

    /// Drop a standalone block into an empty cell. Used to build fixtures.
    pub fn place_block(&mut self, x: i32, y: i32, kind: ShapeKind, owner: PieceId) -> Option<BlockId> {
        if !self.grid.is_empty(x, y) {
            return None;
        }
        let id = self.blocks.insert(kind, owner, Vec2::new(x, y));
        self.grid.set_block(x, y, id);
        Some(id)
    }

    pub fn clear(&mut self) {
        self.grid.clear_all();
        self.blocks.clear();
    }
}
