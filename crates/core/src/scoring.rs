//! Scoring module - points awarded per landing
//!
//! A landing that clears nothing earns a flat placement bonus. Clears earn
//! `rows * row_points`; anything above four rows is paid as a four-row bonus
//! plus `row_points` for every extra row.

use serde::{Deserialize, Serialize};

use crate::types::{FOUR_ROWS_POINTS, PLACEMENT_POINTS, ROW_POINTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub placement_points: u32,
    pub row_points: u32,
    pub four_rows_points: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            placement_points: PLACEMENT_POINTS,
            row_points: ROW_POINTS,
            four_rows_points: FOUR_ROWS_POINTS,
        }
    }
}

/// Points for one landing that cleared `rows` lines
pub fn landing_score(rows: usize, config: &ScoringConfig) -> u32 {
    let rows = rows as u32;
    match rows {
        0 => config.placement_points,
        1..=4 => rows.saturating_mul(config.row_points),
        _ => (rows - 4)
            .saturating_mul(config.row_points)
            .saturating_add(config.four_rows_points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_bonus_when_nothing_cleared() {
        assert_eq!(landing_score(0, &ScoringConfig::default()), 25);
    }

    #[test]
    fn test_rows_up_to_four_are_linear() {
        let config = ScoringConfig::default();
        assert_eq!(landing_score(1, &config), 100);
        assert_eq!(landing_score(2, &config), 200);
        assert_eq!(landing_score(4, &config), 400);
    }

    #[test]
    fn test_bonus_tier_above_four_rows() {
        let config = ScoringConfig::default();
        assert_eq!(landing_score(5, &config), 900);
        assert_eq!(landing_score(7, &config), 1100);
    }
}
