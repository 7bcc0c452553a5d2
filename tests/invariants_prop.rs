//! Property tests for grid occupancy and transform atomicity.
//!
//! Invariants covered:
//! - Every occupied cell refers to a live block whose recorded position is
//!   that cell, no block is referenced twice, and every live block is on
//!   the grid.
//! - The live piece occupies exactly the cells its anchor and rotation say.
//! - A failed move or rotation leaves the piece on exactly its old cells.
//! - Clearing twice in a row clears nothing the second time.

use std::collections::HashSet;

use proptest::prelude::*;

use gravitris::core::{
    clear_full_rows, GameConfig, GameSession, GravityController, PieceController, Playfield,
    RandomSpawner,
};
use gravitris::types::{GameAction, GravityDirection, ShapeKind, Turn, Vec2};

#[derive(Debug, Clone, Copy)]
enum Step {
    Act(GameAction),
    Tick(u32),
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Act(GameAction::MoveLeft)),
        Just(Step::Act(GameAction::MoveRight)),
        Just(Step::Act(GameAction::MoveDown)),
        Just(Step::Act(GameAction::RotateLeft)),
        Just(Step::Act(GameAction::RotateRight)),
        (1u32..400).prop_map(Step::Tick),
    ]
}

fn arb_gravity() -> impl Strategy<Value = GravityDirection> {
    prop_oneof![
        Just(GravityDirection::Down),
        Just(GravityDirection::Left),
        Just(GravityDirection::Up),
        Just(GravityDirection::Right),
    ]
}

fn assert_occupancy_consistent(field: &Playfield) {
    let mut seen = HashSet::new();
    for (x, y, id) in field.grid.occupied_cells() {
        let block = field
            .blocks
            .get(id)
            .unwrap_or_else(|| panic!("cell ({x}, {y}) holds a released block"));
        assert_eq!(block.position, Vec2::new(x, y), "stale position for {id:?}");
        assert!(seen.insert(id), "block {id:?} referenced twice");
    }
    assert_eq!(field.blocks.len(), seen.len(), "live block missing from grid");
}

fn owned_cells(field: &Playfield, owner: u32) -> Vec<(i32, i32)> {
    let mut cells: Vec<_> = field
        .grid
        .occupied_cells()
        .filter(|&(_, _, id)| field.blocks.owner(id) == Some(owner))
        .map(|(x, y, _)| (x, y))
        .collect();
    cells.sort();
    cells
}

fn sorted(cells: &[Vec2]) -> Vec<(i32, i32)> {
    let mut v: Vec<_> = cells.iter().map(|c| (c.x, c.y)).collect();
    v.sort();
    v
}

proptest! {
    #[test]
    fn session_rollout_keeps_occupancy_consistent(
        seed in any::<u32>(),
        steps in prop::collection::vec(arb_step(), 1..200),
    ) {
        let config = GameConfig {
            width: 8,
            height: 8,
            gravity_period_ms: 700,
            rotation_duration_ms: 150,
            fall_interval_ms: 120,
            seed,
            ..GameConfig::default()
        };
        let mut session = GameSession::new(config, RandomSpawner::new(seed));
        session.start();

        for step in steps {
            match step {
                Step::Act(action) => {
                    session.apply_action(action);
                }
                Step::Tick(ms) => session.tick(ms),
            }

            assert_occupancy_consistent(session.playfield());
            if let Some(piece) = session.pieces().active() {
                prop_assert_eq!(
                    owned_cells(session.playfield(), piece.id),
                    sorted(&piece.cells())
                );
            }
            if session.game_over() {
                prop_assert!(!session.pieces().has_piece());
            }
        }
    }

    #[test]
    fn failed_transforms_leave_piece_untouched(
        obstacles in prop::collection::vec((0i32..8, 0i32..8), 0..16),
        ops in prop::collection::vec(0u8..6, 1..60),
        kind_index in 0usize..7,
    ) {
        let mut field = Playfield::new(8, 8);
        let gravity = GravityController::new(60_000, 0);
        let mut pieces = PieceController::new(1000);

        for (x, y) in obstacles {
            field.place_block(x, y, ShapeKind::O, 10_000);
        }
        let kind = ShapeKind::ALL[kind_index];
        prop_assume!(pieces.spawn(&mut field, kind, Vec2::new(4, 4)).is_ok());

        for op in ops {
            let before = *pieces.active().unwrap();
            let ok = match op {
                0 => pieces.try_move(&mut field, &gravity, Vec2::new(1, 0)),
                1 => pieces.try_move(&mut field, &gravity, Vec2::new(-1, 0)),
                2 => pieces.try_move(&mut field, &gravity, Vec2::new(0, 1)),
                3 => pieces.try_move(&mut field, &gravity, Vec2::new(0, -1)),
                4 => pieces.try_rotate(&mut field, &gravity, Turn::Left),
                _ => pieces.try_rotate(&mut field, &gravity, Turn::Right),
            };

            let after = *pieces.active().unwrap();
            let on_grid = owned_cells(&field, after.id);
            if ok {
                prop_assert_eq!(on_grid, sorted(&after.cells()));
            } else {
                prop_assert_eq!(after, before);
                prop_assert_eq!(on_grid, sorted(&before.cells()));
            }
            assert_occupancy_consistent(&field);
        }
    }

    #[test]
    fn clearing_is_idempotent(
        filled in prop::collection::vec(any::<bool>(), 64),
        gravity in arb_gravity(),
    ) {
        let mut field = Playfield::new(8, 8);
        for (i, on) in filled.iter().enumerate() {
            if *on {
                field.place_block((i / 8) as i32, (i % 8) as i32, ShapeKind::T, 0);
            }
        }

        clear_full_rows(&mut field.grid, &mut field.blocks, gravity);
        assert_occupancy_consistent(&field);
        prop_assert_eq!(clear_full_rows(&mut field.grid, &mut field.blocks, gravity), 0);
    }
}
