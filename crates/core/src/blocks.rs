//! Block arena
//!
//! Blocks are the individual squares a piece is built from. They live in a
//! generational slot arena; the grid only stores [`BlockId`] handles, so a
//! released slot can be reused without a stale handle aliasing the new
//! occupant.

use crate::types::{ShapeKind, Vec2};

/// Identifier of a spawned piece. Monotonic per session.
pub type PieceId = u32;

/// Non-owning handle to a block in a [`BlockArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId {
    index: u32,
    generation: u32,
}

impl BlockId {
    pub fn index(&self) -> u32 {
        self.index
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub kind: ShapeKind,
    /// Piece the block was spawned with.
    pub owner: PieceId,
    /// Current position in the grid frame.
    pub position: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    generation: u32,
    block: Option<Block>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl BlockArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: ShapeKind, owner: PieceId, position: Vec2) -> BlockId {
        let block = Block {
            kind,
            owner,
            position,
        };
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.block = Some(block);
            return BlockId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            block: Some(block),
        });
        BlockId {
            index,
            generation: 0,
        }
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.block.as_ref())
    }

    pub fn get_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.block.as_mut())
    }

    /// Release a block. Its handle (and every copy of it) becomes stale.
    pub fn remove(&mut self, id: BlockId) -> Option<Block> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let block = slot.block.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(block)
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.get(id).is_some()
    }

    /// Owner of a live block.
    pub fn owner(&self, id: BlockId) -> Option<PieceId> {
        self.get(id).map(|block| block.owner)
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }
}
