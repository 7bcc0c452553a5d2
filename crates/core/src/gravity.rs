//! Gravity controller - rotating gravity on a fixed period
//!
//! Gravity cycles Down → Left → Up → Right every `period_ms`. Each change
//! starts a rotation transition of `rotation_duration_ms`; while it is in
//! flight [`GravityController::is_rotating`] is true and the piece controller
//! refuses every move and rotation. The transition is a plain countdown
//! advanced by [`GravityController::tick`], it never touches grid contents.

use tracing::info;

use crate::types::{GravityDirection, Vec2};

#[derive(Debug, Clone, PartialEq)]
pub struct GravityController {
    direction: GravityDirection,
    period_ms: u32,
    rotation_duration_ms: u32,
    /// Time since the last direction change.
    timer_ms: u32,
    /// Remaining time of the in-flight rotation transition.
    rotation_remaining_ms: u32,
    /// Presentation angle the current transition started from.
    from_angle: f32,
    halted: bool,
}

impl GravityController {
    pub fn new(period_ms: u32, rotation_duration_ms: u32) -> Self {
        Self {
            direction: GravityDirection::Down,
            period_ms,
            rotation_duration_ms,
            timer_ms: 0,
            rotation_remaining_ms: 0,
            from_angle: 0.0,
            halted: false,
        }
    }

    pub fn direction(&self) -> GravityDirection {
        self.direction
    }

    /// Unit vector of the active gravity in the grid frame.
    pub fn vector(&self) -> Vec2 {
        self.direction.vector()
    }

    /// True while a rotation transition is in flight.
    pub fn is_rotating(&self) -> bool {
        self.rotation_remaining_ms > 0
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn rotation_duration_ms(&self) -> u32 {
        self.rotation_duration_ms
    }

    /// Advance timers by `elapsed_ms`.
    ///
    /// Returns the new direction when the period elapsed on this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<GravityDirection> {
        self.rotation_remaining_ms = self.rotation_remaining_ms.saturating_sub(elapsed_ms);
        self.timer_ms = self.timer_ms.saturating_add(elapsed_ms);

        if self.halted || self.timer_ms < self.period_ms {
            return None;
        }

        self.timer_ms = 0;
        let next = self.direction.next();
        self.begin_transition(next);
        Some(next)
    }

    /// Switch gravity immediately. Does nothing if `direction` is current.
    pub fn set_direction(&mut self, direction: GravityDirection) {
        if direction != self.direction {
            self.begin_transition(direction);
        }
    }

    /// Stop further direction changes. An in-flight transition still completes.
    pub fn halt(&mut self) {
        self.halted = true;
    }

    fn begin_transition(&mut self, direction: GravityDirection) {
        self.from_angle = self.display_angle();
        self.direction = direction;
        self.rotation_remaining_ms = self.rotation_duration_ms;
        info!(
            direction = direction.as_str(),
            duration_ms = self.rotation_duration_ms,
            "gravity changed"
        );
    }

    /// Milliseconds until the next direction change.
    pub fn ms_until_change(&self) -> u32 {
        self.period_ms.saturating_sub(self.timer_ms)
    }

    /// Whole seconds until the next change, rounded up (countdown display).
    pub fn seconds_until_change(&self) -> u32 {
        self.ms_until_change().div_ceil(1000)
    }

    /// Fraction of the current transition already played, in `[0, 1]`.
    pub fn rotation_progress(&self) -> f32 {
        if self.rotation_duration_ms == 0 {
            return 1.0;
        }
        1.0 - self.rotation_remaining_ms as f32 / self.rotation_duration_ms as f32
    }

    /// Presentation angle in degrees, `[0, 360)`, interpolated along the
    /// shortest arc while a transition is in flight.
    pub fn display_angle(&self) -> f32 {
        let target = self.direction.angle_degrees() as f32;
        if !self.is_rotating() {
            return target;
        }

        let mut delta = target - self.from_angle;
        if delta > 180.0 {
            delta -= 360.0;
        } else if delta < -180.0 {
            delta += 360.0;
        }
        (self.from_angle + delta * self.rotation_progress()).rem_euclid(360.0)
    }

    /// Display angle snapped to whole counter-clockwise quarter turns.
    pub fn quarter_turns(&self) -> u8 {
        ((self.display_angle() / 90.0).round() as i32).rem_euclid(4) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_down_without_transition() {
        let g = GravityController::new(10_000, 1000);
        assert_eq!(g.direction(), GravityDirection::Down);
        assert!(!g.is_rotating());
        assert_eq!(g.display_angle(), 0.0);
    }

    #[test]
    fn test_transition_fires_on_period() {
        let mut g = GravityController::new(100, 40);
        assert_eq!(g.tick(99), None);
        assert_eq!(g.tick(1), Some(GravityDirection::Left));
        assert!(g.is_rotating());
        assert_eq!(g.vector(), Vec2::new(-1, 0));

        assert_eq!(g.tick(39), None);
        assert!(g.is_rotating());
        assert_eq!(g.tick(1), None);
        assert!(!g.is_rotating());
    }

    #[test]
    fn test_set_direction_same_is_noop() {
        let mut g = GravityController::new(100, 40);
        g.set_direction(GravityDirection::Down);
        assert!(!g.is_rotating());

        g.set_direction(GravityDirection::Up);
        assert!(g.is_rotating());
        assert_eq!(g.direction(), GravityDirection::Up);
    }

    #[test]
    fn test_halt_stops_cycle() {
        let mut g = GravityController::new(50, 10);
        g.halt();
        assert_eq!(g.tick(500), None);
        assert_eq!(g.direction(), GravityDirection::Down);
    }

    #[test]
    fn test_display_angle_interpolates_shortest_arc() {
        let mut g = GravityController::new(200, 100);
        for _ in 0..3 {
            g.tick(200);
            g.tick(100);
        }
        assert_eq!(g.direction(), GravityDirection::Right);
        assert_eq!(g.display_angle(), 270.0);

        // Right -> Down goes through 315, not back through 135.
        assert_eq!(g.tick(200), Some(GravityDirection::Down));
        g.tick(50);
        let angle = g.display_angle();
        assert!((angle - 315.0).abs() < 0.01, "angle was {}", angle);
        assert_eq!(g.quarter_turns(), 0);
    }

    #[test]
    fn test_countdown_rounds_up() {
        let mut g = GravityController::new(10_000, 1000);
        assert_eq!(g.seconds_until_change(), 10);
        g.tick(16);
        assert_eq!(g.seconds_until_change(), 10);
        g.tick(9000);
        assert_eq!(g.seconds_until_change(), 1);
    }
}
