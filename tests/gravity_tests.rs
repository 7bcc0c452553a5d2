//! Gravity controller tests - cycle order, timing and transition window

use gravitris::core::GravityController;
use gravitris::types::GravityDirection;

#[test]
fn test_four_transitions_cycle_back_to_down() {
    let mut gravity = GravityController::new(1000, 200);
    let mut seen = Vec::new();

    for _ in 0..4 {
        let mut event = None;
        while event.is_none() {
            event = gravity.tick(100);
        }
        seen.push(event.unwrap());
    }

    assert_eq!(
        seen,
        vec![
            GravityDirection::Left,
            GravityDirection::Up,
            GravityDirection::Right,
            GravityDirection::Down,
        ]
    );
}

#[test]
fn test_transition_window_lasts_rotation_duration() {
    let mut gravity = GravityController::new(1000, 300);
    assert_eq!(gravity.tick(1000), Some(GravityDirection::Left));
    assert!(gravity.is_rotating());

    gravity.tick(299);
    assert!(gravity.is_rotating());
    gravity.tick(1);
    assert!(!gravity.is_rotating());
    assert_eq!(gravity.vector(), GravityDirection::Left.vector());
}

#[test]
fn test_countdown_rounds_up() {
    let mut gravity = GravityController::new(10_000, 1000);
    assert_eq!(gravity.seconds_until_change(), 10);
    gravity.tick(1);
    assert_eq!(gravity.seconds_until_change(), 10);
    gravity.tick(999);
    assert_eq!(gravity.seconds_until_change(), 9);
    assert_eq!(gravity.ms_until_change(), 9000);
}

#[test]
fn test_halted_controller_keeps_direction() {
    let mut gravity = GravityController::new(500, 100);
    gravity.halt();
    for _ in 0..20 {
        assert_eq!(gravity.tick(500), None);
    }
    assert_eq!(gravity.direction(), GravityDirection::Down);
}

#[test]
fn test_display_angle_settles_on_direction() {
    let mut gravity = GravityController::new(1000, 400);
    gravity.tick(1000);
    gravity.tick(200);
    let mid = gravity.display_angle();
    assert!(mid > 0.0 && mid < 90.0, "mid-transition angle {mid}");

    gravity.tick(200);
    assert_eq!(gravity.display_angle(), 90.0);
    assert_eq!(gravity.quarter_turns(), 1);
}

#[test]
fn test_set_direction_to_current_is_noop() {
    let mut gravity = GravityController::new(1000, 400);
    gravity.set_direction(GravityDirection::Down);
    assert!(!gravity.is_rotating());

    gravity.set_direction(GravityDirection::Up);
    assert!(gravity.is_rotating());
    assert_eq!(gravity.direction(), GravityDirection::Up);
}
