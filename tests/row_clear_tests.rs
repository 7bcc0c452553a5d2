//! Row clear tests - line detection and cascade under every gravity

use gravitris::core::{clear_full_rows, Playfield};
use gravitris::types::{GravityDirection, ShapeKind, Vec2};

fn fill_row(field: &mut Playfield, y: i32) {
    for x in 0..field.grid.width() as i32 {
        field.place_block(x, y, ShapeKind::I, 0).unwrap();
    }
}

fn fill_column(field: &mut Playfield, x: i32) {
    for y in 0..field.grid.height() as i32 {
        field.place_block(x, y, ShapeKind::J, 0).unwrap();
    }
}

#[test]
fn test_bottom_row_of_four_single_blocks() {
    let mut field = Playfield::new(4, 8);
    fill_row(&mut field, 0);
    assert_eq!(field.blocks.len(), 4);

    let cleared = clear_full_rows(&mut field.grid, &mut field.blocks, GravityDirection::Down);

    assert_eq!(cleared, 1);
    for x in 0..4 {
        assert!(field.grid.is_empty(x, 0), "cell ({x}, 0) should be empty");
    }
    assert_eq!(field.grid.occupied_count(), 0);
    assert!(field.blocks.is_empty(), "cleared blocks are released");
}

#[test]
fn test_two_stacked_rows_clear_in_one_call() {
    let mut field = Playfield::new(6, 10);
    fill_row(&mut field, 0);
    fill_row(&mut field, 1);

    assert_eq!(
        clear_full_rows(&mut field.grid, &mut field.blocks, GravityDirection::Down),
        2
    );
    assert_eq!(field.grid.occupied_count(), 0);
}

#[test]
fn test_second_call_clears_nothing() {
    let mut field = Playfield::new(6, 10);
    fill_row(&mut field, 0);
    fill_row(&mut field, 1);
    field.place_block(2, 2, ShapeKind::T, 0);

    assert_eq!(
        clear_full_rows(&mut field.grid, &mut field.blocks, GravityDirection::Down),
        2
    );
    assert_eq!(
        clear_full_rows(&mut field.grid, &mut field.blocks, GravityDirection::Down),
        0
    );
    assert_eq!(field.kind_at(2, 0), Some(ShapeKind::T));
}

#[test]
fn test_partial_row_is_kept() {
    let mut field = Playfield::new(5, 8);
    for x in 0..4 {
        field.place_block(x, 0, ShapeKind::O, 0);
    }

    assert_eq!(
        clear_full_rows(&mut field.grid, &mut field.blocks, GravityDirection::Down),
        0
    );
    assert_eq!(field.grid.occupied_count(), 4);
}

#[test]
fn test_cascade_moves_material_and_block_positions() {
    let mut field = Playfield::new(4, 8);
    fill_row(&mut field, 0);
    let id = field.place_block(1, 3, ShapeKind::S, 0).unwrap();

    clear_full_rows(&mut field.grid, &mut field.blocks, GravityDirection::Down);

    assert!(field.grid.is_empty(1, 3));
    assert_eq!(field.grid.block_at(1, 2), Some(id));
    assert_eq!(field.blocks.get(id).unwrap().position, Vec2::new(1, 2));
}

#[test]
fn test_material_beyond_midline_is_untouched() {
    // Height 8: rows 0..=4 are scanned and shifted, 5..=7 are not.
    let mut field = Playfield::new(4, 8);
    fill_row(&mut field, 0);
    let at_midline = field.place_block(0, 4, ShapeKind::L, 0).unwrap();
    let beyond = field.place_block(0, 5, ShapeKind::L, 0).unwrap();

    clear_full_rows(&mut field.grid, &mut field.blocks, GravityDirection::Down);

    assert_eq!(field.grid.block_at(0, 3), Some(at_midline));
    assert_eq!(field.grid.block_at(0, 5), Some(beyond));
}

#[test]
fn test_full_row_in_far_half_is_not_cleared() {
    let mut field = Playfield::new(4, 8);
    fill_row(&mut field, 7);

    assert_eq!(
        clear_full_rows(&mut field.grid, &mut field.blocks, GravityDirection::Down),
        0
    );
    // The same row is in range once gravity points up.
    assert_eq!(
        clear_full_rows(&mut field.grid, &mut field.blocks, GravityDirection::Up),
        1
    );
}

#[test]
fn test_up_gravity_cascades_toward_top() {
    let mut field = Playfield::new(4, 8);
    fill_row(&mut field, 7);
    let id = field.place_block(2, 6, ShapeKind::Z, 0).unwrap();

    assert_eq!(
        clear_full_rows(&mut field.grid, &mut field.blocks, GravityDirection::Up),
        1
    );
    assert_eq!(field.grid.block_at(2, 7), Some(id));
    assert_eq!(field.blocks.get(id).unwrap().position, Vec2::new(2, 7));
}

#[test]
fn test_left_gravity_clears_columns() {
    let mut field = Playfield::new(8, 4);
    fill_column(&mut field, 0);
    let id = field.place_block(1, 2, ShapeKind::T, 0).unwrap();

    assert_eq!(
        clear_full_rows(&mut field.grid, &mut field.blocks, GravityDirection::Left),
        1
    );
    assert_eq!(field.grid.block_at(0, 2), Some(id));
    assert_eq!(field.grid.occupied_count(), 1);
}

#[test]
fn test_right_gravity_clears_and_cascades() {
    let mut field = Playfield::new(8, 4);
    fill_column(&mut field, 7);
    fill_column(&mut field, 6);
    let id = field.place_block(5, 0, ShapeKind::I, 0).unwrap();

    assert_eq!(
        clear_full_rows(&mut field.grid, &mut field.blocks, GravityDirection::Right),
        2
    );
    assert_eq!(field.grid.block_at(7, 0), Some(id));
    assert_eq!(field.blocks.get(id).unwrap().position, Vec2::new(7, 0));
}

#[test]
fn test_columns_are_ignored_under_vertical_gravity() {
    let mut field = Playfield::new(8, 4);
    fill_column(&mut field, 0);

    assert_eq!(
        clear_full_rows(&mut field.grid, &mut field.blocks, GravityDirection::Down),
        0
    );
    assert_eq!(field.grid.occupied_count(), 4);
}
