//! Shapes module - per-rotation offset tables
//!
//! Every shape has four hand-authored tables of block offsets relative to
//! the piece anchor, one per rotation index (0°, 90°, 180°, 270°
//! counter-clockwise). Rotating a piece means switching tables, not rotating
//! the base shape geometrically: I, S and Z only alternate between two tables
//! so they stay in place instead of drifting around the anchor.
//!
//! Offsets are in the grid frame (`+y` up).

use crate::types::{ShapeKind, Vec2, BLOCKS_PER_PIECE};

/// Block offsets for one rotation index
pub type OffsetTable = [Vec2; BLOCKS_PER_PIECE];

/// The four offset tables of a shape, indexed by rotation index
pub type ShapeTables = [OffsetTable; 4];

const fn v(x: i32, y: i32) -> Vec2 {
    Vec2::new(x, y)
}

const I_TABLES: ShapeTables = [
    [v(-1, 0), v(0, 0), v(1, 0), v(2, 0)],
    [v(0, -1), v(0, 0), v(0, 1), v(0, 2)],
    [v(-1, 0), v(0, 0), v(1, 0), v(2, 0)],
    [v(0, -1), v(0, 0), v(0, 1), v(0, 2)],
];

const O_TABLES: ShapeTables = [[v(0, 0), v(1, 0), v(0, 1), v(1, 1)]; 4];

const T_TABLES: ShapeTables = [
    [v(-1, 0), v(0, 0), v(1, 0), v(0, 1)],
    [v(0, -1), v(0, 0), v(0, 1), v(-1, 0)],
    [v(1, 0), v(0, 0), v(-1, 0), v(0, -1)],
    [v(0, 1), v(0, 0), v(0, -1), v(1, 0)],
];

const S_TABLES: ShapeTables = [
    [v(-1, 0), v(0, 0), v(0, 1), v(1, 1)],
    [v(0, -1), v(0, 0), v(-1, 0), v(-1, 1)],
    [v(-1, 0), v(0, 0), v(0, 1), v(1, 1)],
    [v(0, -1), v(0, 0), v(-1, 0), v(-1, 1)],
];

const Z_TABLES: ShapeTables = [
    [v(-1, 1), v(0, 1), v(0, 0), v(1, 0)],
    [v(-1, -1), v(-1, 0), v(0, 0), v(0, 1)],
    [v(-1, 1), v(0, 1), v(0, 0), v(1, 0)],
    [v(-1, -1), v(-1, 0), v(0, 0), v(0, 1)],
];

const J_TABLES: ShapeTables = [
    [v(-1, 1), v(-1, 0), v(0, 0), v(1, 0)],
    [v(-1, -1), v(0, -1), v(0, 0), v(0, 1)],
    [v(1, -1), v(1, 0), v(0, 0), v(-1, 0)],
    [v(1, 1), v(0, 1), v(0, 0), v(0, -1)],
];

const L_TABLES: ShapeTables = [
    [v(1, 1), v(1, 0), v(0, 0), v(-1, 0)],
    [v(-1, 1), v(0, 1), v(0, 0), v(0, -1)],
    [v(-1, -1), v(-1, 0), v(0, 0), v(1, 0)],
    [v(1, -1), v(0, -1), v(0, 0), v(0, 1)],
];

/// All four offset tables for a shape
pub fn shape_tables(kind: ShapeKind) -> &'static ShapeTables {
    match kind {
        ShapeKind::I => &I_TABLES,
        ShapeKind::O => &O_TABLES,
        ShapeKind::T => &T_TABLES,
        ShapeKind::S => &S_TABLES,
        ShapeKind::Z => &Z_TABLES,
        ShapeKind::J => &J_TABLES,
        ShapeKind::L => &L_TABLES,
    }
}

/// Offsets for a shape at a rotation index (taken modulo 4)
pub fn offsets(kind: ShapeKind, rotation: usize) -> &'static OffsetTable {
    &shape_tables(kind)[rotation % 4]
}

/// Normalize `current + quarter_turns` into `0..4`.
pub fn rotate_index(current: usize, quarter_turns: i32) -> usize {
    (current as i32 + quarter_turns).rem_euclid(4) as usize
}

/// Grid cells covered by a shape placed at `anchor`.
pub fn cells_at(kind: ShapeKind, rotation: usize, anchor: Vec2) -> OffsetTable {
    offsets(kind, rotation).map(|offset| anchor + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_has_distinct_cells_and_contains_anchor() {
        for kind in ShapeKind::ALL {
            for rotation in 0..4 {
                let table = offsets(kind, rotation);
                for (i, a) in table.iter().enumerate() {
                    for b in &table[i + 1..] {
                        assert_ne!(a, b, "{:?} rotation {} repeats a cell", kind, rotation);
                    }
                }
                assert!(
                    table.contains(&Vec2::ZERO),
                    "{:?} rotation {} does not cover its anchor",
                    kind,
                    rotation
                );
            }
        }
    }

    #[test]
    fn test_rotate_index_wraps_both_ways() {
        assert_eq!(rotate_index(0, 1), 1);
        assert_eq!(rotate_index(3, 1), 0);
        assert_eq!(rotate_index(0, -1), 3);
        assert_eq!(rotate_index(2, -1), 1);
    }

    #[test]
    fn test_t_tables_are_quarter_turns() {
        for rotation in 0..4 {
            let next = offsets(ShapeKind::T, rotation + 1);
            let turned = offsets(ShapeKind::T, rotation).map(|o| o.rotate_ccw());
            assert_eq!(&turned, next);
        }
    }
}
