//! Idle/demo player
//!
//! Picks a target misalignment per level from a seeded RNG and presses when
//! the moving block crosses it. Same seed, same frames, same tower.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::TowerState;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    /// Largest deliberate misalignment
    aim_error: f32,
    /// (level, target offset from the previous center)
    target: Option<(u32, f32)>,
    /// Signed distance to the target on the last frame
    last_gap: Option<f32>,
}

impl Autopilot {
    pub fn new(seed: u64, aim_error: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            aim_error: aim_error.max(0.0),
            target: None,
            last_gap: None,
        }
    }

    /// Whether to drop the block this frame
    pub fn wants_place(&mut self, state: &TowerState) -> bool {
        let Some(block) = state.moving.filter(|_| state.is_active()) else {
            self.last_gap = None;
            return false;
        };

        let target = match self.target {
            Some((level, offset)) if level == state.level => offset,
            _ => {
                let offset = if self.aim_error > 0.0 {
                    self.rng.random_range(-self.aim_error..=self.aim_error)
                } else {
                    0.0
                };
                self.target = Some((state.level, offset));
                self.last_gap = None;
                offset
            }
        };

        let aim = block.axis.of(state.previous().center) + target;
        let gap = block.position() - aim;
        let crossed = self
            .last_gap
            .is_some_and(|last| last != 0.0 && last.signum() != gap.signum());
        self.last_gap = Some(gap);

        crossed || gap == 0.0
    }
}
