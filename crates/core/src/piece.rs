//! Piece controller - the single live piece
//!
//! The controller owns the falling piece: its block handles, anchor and
//! rotation index. Every transform is evaluated against the grid before it
//! is committed, so after any call the piece occupies either exactly its new
//! cells or exactly its old ones.
//!
//! Movement deltas passed to [`PieceController::try_move`] are in the grid
//! frame. Player requests and the automatic fall are expressed in the world
//! frame and mapped through the current gravity direction first, which makes
//! world-down the gravity vector.
//!
//! While the gravity controller reports a rotation transition, every move,
//! rotation and automatic fall is refused without side effects.

use thiserror::Error;
use tracing::{debug, trace};

use crate::blocks::{BlockId, PieceId};
use crate::gravity::GravityController;
use crate::grid::Cell;
use crate::playfield::Playfield;
use crate::shapes::{cells_at, rotate_index, OffsetTable};
use crate::types::{MoveDirection, ShapeKind, Turn, Vec2, BLOCKS_PER_PIECE};

/// Why a piece could not be spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("spawn cells for {kind:?} at ({}, {}) are blocked", anchor.x, anchor.y)]
    Blocked { kind: ShapeKind, anchor: Vec2 },
    #[error("piece {0} is still live")]
    PieceLive(PieceId),
}

/// Result of a movement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The piece moved one cell.
    Moved,
    /// The target cells were not free; the piece is unchanged.
    Blocked,
    /// The piece could not move along gravity and is now part of the grid.
    Landed(PieceId),
    /// A gravity transition is in flight; nothing was attempted.
    Suppressed,
    /// There is no live piece.
    Idle,
}

/// The live piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub kind: ShapeKind,
    /// Rotation index in `0..4` (multiples of 90° counter-clockwise).
    pub rotation: usize,
    pub anchor: Vec2,
    pub blocks: [BlockId; BLOCKS_PER_PIECE],
}

impl Piece {
    /// Grid cells currently covered by the piece.
    pub fn cells(&self) -> OffsetTable {
        cells_at(self.kind, self.rotation, self.anchor)
    }
}

/// Check whether `owner`'s blocks could occupy `cells`.
///
/// A cell fails when it is out of bounds, a wall, or occupied by a block that
/// does not belong to `owner`. Pass `None` for a piece that has no blocks yet.
pub fn can_occupy(field: &Playfield, owner: Option<PieceId>, cells: &[Vec2]) -> bool {
    cells.iter().all(|cell| match field.grid.get(cell.x, cell.y) {
        None | Some(Cell::Wall) => false,
        Some(Cell::Empty) => true,
        Some(Cell::Occupied(block)) => {
            owner.is_some() && field.blocks.owner(block) == owner
        }
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieceController {
    active: Option<Piece>,
    next_id: PieceId,
    fall_interval_ms: u32,
    fall_timer_ms: u32,
}

impl PieceController {
    pub fn new(fall_interval_ms: u32) -> Self {
        Self {
            active: None,
            next_id: 1,
            fall_interval_ms,
            fall_timer_ms: 0,
        }
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn has_piece(&self) -> bool {
        self.active.is_some()
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    /// Grid cells covered by the live piece.
    pub fn cells(&self) -> Option<OffsetTable> {
        self.active.map(|piece| piece.cells())
    }

    /// Spawn `kind` at `anchor` in rotation 0.
    ///
    /// Nothing is allocated or written when the spawn cells are not free.
    pub fn spawn(
        &mut self,
        field: &mut Playfield,
        kind: ShapeKind,
        anchor: Vec2,
    ) -> Result<PieceId, SpawnError> {
        if let Some(piece) = self.active {
            return Err(SpawnError::PieceLive(piece.id));
        }

        let cells = cells_at(kind, 0, anchor);
        if !can_occupy(field, None, &cells) {
            return Err(SpawnError::Blocked { kind, anchor });
        }

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        let blocks = cells.map(|cell| {
            let block = field.blocks.insert(kind, id, cell);
            field.grid.set_block(cell.x, cell.y, block);
            block
        });

        self.active = Some(Piece {
            id,
            kind,
            rotation: 0,
            anchor,
            blocks,
        });
        self.fall_timer_ms = 0;
        debug!(piece = id, kind = kind.as_str(), x = anchor.x, y = anchor.y, "piece spawned");
        Ok(id)
    }

    /// Check whether the live piece could occupy `cells`.
    pub fn can_occupy(&self, field: &Playfield, cells: &[Vec2]) -> bool {
        can_occupy(field, self.active.map(|piece| piece.id), cells)
    }

    /// Translate the live piece by a grid-frame `delta`.
    pub fn try_move(&mut self, field: &mut Playfield, gravity: &GravityController, delta: Vec2) -> bool {
        if gravity.is_rotating() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let anchor = piece.anchor + delta;
        let target = cells_at(piece.kind, piece.rotation, anchor);
        if !self.can_occupy(field, &target) {
            trace!(piece = piece.id, dx = delta.x, dy = delta.y, "move blocked");
            return false;
        }

        self.commit(field, piece.rotation, anchor, &target);
        true
    }

    /// Rotate the live piece by a quarter turn using its offset tables.
    pub fn try_rotate(&mut self, field: &mut Playfield, gravity: &GravityController, turn: Turn) -> bool {
        if gravity.is_rotating() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let rotation = rotate_index(piece.rotation, turn.quarter_turns());
        let target = cells_at(piece.kind, rotation, piece.anchor);
        if !self.can_occupy(field, &target) {
            trace!(piece = piece.id, degrees = turn.delta_degrees(), "rotation blocked");
            return false;
        }

        self.commit(field, rotation, piece.anchor, &target);
        true
    }

    /// Handle a world-frame movement request.
    ///
    /// A blocked world-down move lands the piece.
    pub fn request_move(
        &mut self,
        field: &mut Playfield,
        gravity: &GravityController,
        direction: MoveDirection,
    ) -> MoveOutcome {
        if direction == MoveDirection::Down {
            return self.fall(field, gravity);
        }
        if gravity.is_rotating() {
            return MoveOutcome::Suppressed;
        }
        if self.active.is_none() {
            return MoveOutcome::Idle;
        }

        let delta = gravity.direction().world_to_grid(direction.world_vector());
        if self.try_move(field, gravity, delta) {
            MoveOutcome::Moved
        } else {
            MoveOutcome::Blocked
        }
    }

    /// Advance the fall timer; falls one step when the interval elapsed.
    pub fn tick(&mut self, field: &mut Playfield, gravity: &GravityController, elapsed_ms: u32) -> MoveOutcome {
        if self.active.is_none() {
            return MoveOutcome::Idle;
        }
        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if gravity.is_rotating() {
            return MoveOutcome::Suppressed;
        }
        if self.fall_timer_ms < self.fall_interval_ms {
            return MoveOutcome::Idle;
        }
        self.fall(field, gravity)
    }

    /// Move one step along world-down, landing the piece if it cannot.
    pub fn fall(&mut self, field: &mut Playfield, gravity: &GravityController) -> MoveOutcome {
        if gravity.is_rotating() {
            return MoveOutcome::Suppressed;
        }
        let Some(piece) = self.active else {
            return MoveOutcome::Idle;
        };

        self.fall_timer_ms = 0;
        let down = gravity.direction().world_to_grid(Vec2::WORLD_DOWN);
        if self.try_move(field, gravity, down) {
            return MoveOutcome::Moved;
        }

        self.active = None;
        debug!(piece = piece.id, x = piece.anchor.x, y = piece.anchor.y, "piece landed");
        MoveOutcome::Landed(piece.id)
    }

    /// Forget the live piece without touching the grid.
    pub fn reset(&mut self) {
        self.active = None;
        self.fall_timer_ms = 0;
    }

    fn commit(&mut self, field: &mut Playfield, rotation: usize, anchor: Vec2, target: &OffsetTable) {
        let Some(piece) = self.active.as_mut() else {
            return;
        };

        for (block, cell) in piece.blocks.iter().zip(piece.cells().iter()) {
            field.grid.clear_if(cell.x, cell.y, *block);
        }
        for (block, cell) in piece.blocks.iter().zip(target.iter()) {
            field.grid.set_block(cell.x, cell.y, *block);
            if let Some(b) = field.blocks.get_mut(*block) {
                b.position = *cell;
            }
        }

        piece.rotation = rotation;
        piece.anchor = anchor;
    }
}
