//! Row clearing under rotating gravity
//!
//! Which lines are scanned depends on the gravity direction:
//!
//! | Gravity | Lines | Scan |
//! |---------|-------|------|
//! | Down | rows (`y`) | `0 ..= H/2` |
//! | Up | rows (`y`) | `H-1 ..= H/2` (descending) |
//! | Left | columns (`x`) | `0 ..= W/2` |
//! | Right | columns (`x`) | `W-1 ..= W/2` (descending) |
//!
//! Pieces spawn on the midline, so only the half between the gravity-facing
//! wall and the midline is considered. Material stacked against the opposite
//! wall under an earlier gravity direction is neither cleared nor shifted.
//!
//! When a line is cleared, every line between it and the midline moves one
//! step along gravity, and the same index is examined again so stacked full
//! lines clear in a single pass.

use tracing::debug;

use crate::blocks::BlockArena;
use crate::grid::{Grid, LineAxis};
use crate::types::{GravityDirection, Vec2};

/// Scan plan derived from a gravity direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScanPlan {
    axis: LineAxis,
    /// First index scanned (the gravity-facing wall).
    start: i32,
    /// Last index scanned, inclusive (the midline).
    midline: i32,
    /// +1 when scanning upward from 0, -1 when scanning down from the far wall.
    step: i32,
}

impl ScanPlan {
    fn new(grid: &Grid, gravity: GravityDirection) -> Self {
        let w = grid.width() as i32;
        let h = grid.height() as i32;
        match gravity {
            GravityDirection::Down => Self {
                axis: LineAxis::Row,
                start: 0,
                midline: h / 2,
                step: 1,
            },
            GravityDirection::Up => Self {
                axis: LineAxis::Row,
                start: h - 1,
                midline: h / 2,
                step: -1,
            },
            GravityDirection::Left => Self {
                axis: LineAxis::Column,
                start: 0,
                midline: w / 2,
                step: 1,
            },
            GravityDirection::Right => Self {
                axis: LineAxis::Column,
                start: w - 1,
                midline: w / 2,
                step: -1,
            },
        }
    }

    fn contains(&self, index: i32) -> bool {
        if self.step > 0 {
            index <= self.midline
        } else {
            index >= self.midline
        }
    }
}

/// Detect and remove full lines, cascading the material behind them.
///
/// Returns the number of lines cleared, counting every repeat at the same
/// index. Cleared blocks are released from `blocks`.
pub fn clear_full_rows(
    grid: &mut Grid,
    blocks: &mut BlockArena,
    gravity: GravityDirection,
) -> usize {
    let plan = ScanPlan::new(grid, gravity);
    let mut count = 0;
    let mut index = plan.start;

    while plan.contains(index) {
        if grid.is_line_full(plan.axis, index) {
            remove_line(grid, blocks, plan.axis, index);
            cascade(grid, blocks, &plan, index, gravity);
            count += 1;
            debug!(
                gravity = gravity.as_str(),
                axis = ?plan.axis,
                index,
                "line cleared"
            );
            // Re-examine the same index: material from behind may have filled it.
            continue;
        }
        index += plan.step;
    }

    count
}

fn remove_line(grid: &mut Grid, blocks: &mut BlockArena, axis: LineAxis, index: i32) {
    for offset in 0..grid.line_len(axis) {
        let (x, y) = Grid::line_cell(axis, index, offset);
        if let Some(block) = grid.take(x, y) {
            blocks.remove(block);
        } else {
            grid.clear(x, y);
        }
    }
}

/// Shift every line from `cleared + 1` (against gravity) up to the midline
/// one step along gravity.
fn cascade(
    grid: &mut Grid,
    blocks: &mut BlockArena,
    plan: &ScanPlan,
    cleared: i32,
    gravity: GravityDirection,
) {
    let fall = gravity.vector();
    // The presentation moves fallen blocks along world-down, which in the
    // grid frame is the same step as the gravity vector.
    let visual_step = gravity.world_to_grid(Vec2::WORLD_DOWN);

    let mut line = cleared + plan.step;
    while plan.contains(line) {
        for offset in 0..grid.line_len(plan.axis) {
            let (x, y) = Grid::line_cell(plan.axis, line, offset);
            let Some(block) = grid.take(x, y) else {
                continue;
            };
            if !grid.set_block(x + fall.x, y + fall.y, block) {
                // Walls do not fall and hold up whatever rests on them.
                grid.set_block(x, y, block);
                continue;
            }
            if let Some(b) = blocks.get_mut(block) {
                b.position += visual_step;
            }
        }
        line += plan.step;
    }
}
