//! Run state and the stack simulator operations
//!
//! A single `TowerState` owns the placed stack and the one block in flight.
//! Rendering reads it after every call; nothing flows back the other way.

use serde::{Deserialize, Deserializer, Serialize};

use super::footprint::{Axis, Footprint};
use super::placement::{Placement, resolve_placement};
use crate::settings::TowerConfig;

/// Speed/tolerance profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    pub fn toggled(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Sweep direction of the moving block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// The block currently sliding back and forth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingBlock {
    pub footprint: Footprint,
    pub axis: Axis,
}

impl MovingBlock {
    /// Coordinate along the sliding axis
    #[inline]
    pub fn position(&self) -> f32 {
        self.axis.of(self.footprint.center)
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Dropped a block with no overlap
    Missed,
    /// Stacked past the configured maximum level
    Topped,
}

/// Run lifecycle: `Idle -> Active -> Ended`, back to `Active` on reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    Idle,
    Active,
    Ended(EndReason),
}

/// Result of `TowerState::spawn_next`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnOutcome {
    Spawned(MovingBlock),
    /// Past the maximum level; the run is won
    Topped,
}

/// Result of `TowerState::place`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaceOutcome {
    Hit {
        footprint: Footprint,
        score: u32,
        /// Snapped within tolerance (no trimming)
        perfect: bool,
        /// This hit completed the tower
        topped: bool,
    },
    Miss {
        score: u32,
    },
}

impl PlaceOutcome {
    pub fn score(&self) -> u32 {
        match *self {
            PlaceOutcome::Hit { score, .. } | PlaceOutcome::Miss { score } => score,
        }
    }
}

/// Complete run state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerState {
    /// Options the current run was started with
    pub config: TowerConfig,
    /// Active difficulty (may be toggled mid-run)
    pub difficulty: Difficulty,
    /// Level of the newest spawned block (0 = only the base)
    pub level: u32,
    /// Successful placements; always `stack.len() - 1`
    pub score: u32,
    pub phase: RunPhase,
    /// Sweep direction, carried over between spawns
    pub direction: Direction,
    /// Placed blocks, base first; never empty
    #[serde(deserialize_with = "non_empty_stack")]
    pub stack: Vec<Footprint>,
    /// Block in flight, if any
    pub moving: Option<MovingBlock>,
}

/// Reject snapshots without a base block
fn non_empty_stack<'de, D>(deserializer: D) -> Result<Vec<Footprint>, D::Error>
where
    D: Deserializer<'de>,
{
    let stack = Vec::<Footprint>::deserialize(deserializer)?;
    if stack.is_empty() {
        return Err(serde::de::Error::custom("stack must hold at least the base block"));
    }
    Ok(stack)
}

impl TowerState {
    /// Idle tower holding only the base
    pub fn new(config: TowerConfig) -> Self {
        Self {
            difficulty: config.difficulty,
            level: 0,
            score: 0,
            phase: RunPhase::Idle,
            direction: Direction::Forward,
            stack: vec![Footprint::base(config.base_size)],
            moving: None,
            config,
        }
    }

    /// Start a fresh run and spawn the first moving block
    pub fn reset(&mut self, config: TowerConfig) {
        *self = Self::new(config);
        self.phase = RunPhase::Active;
        log::info!(
            "Run started ({}, max level {})",
            self.difficulty.label(),
            self.config.max_level
        );
        self.spawn_next();
    }

    /// Reset with the current config (keeps a toggled difficulty)
    pub fn restart(&mut self) {
        let config = self.config.clone();
        self.reset(config);
    }

    /// Flip the difficulty; applies from the next tick/place on
    pub fn toggle_difficulty(&mut self) {
        self.difficulty = self.difficulty.toggled();
        self.config.difficulty = self.difficulty;
        log::info!("Difficulty: {}", self.difficulty.label());
    }

    pub fn is_active(&self) -> bool {
        self.phase == RunPhase::Active
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        match self.phase {
            RunPhase::Ended(reason) => Some(reason),
            _ => None,
        }
    }

    /// Score shown on the end-of-run overlay
    pub fn final_score(&self) -> Option<u32> {
        self.end_reason().map(|_| self.score)
    }

    /// Topmost placed block
    pub fn previous(&self) -> &Footprint {
        // The base is pushed on construction and never popped
        &self.stack[self.stack.len() - 1]
    }

    pub fn speed(&self) -> f32 {
        self.config.speed(self.difficulty)
    }

    pub fn tolerance(&self) -> f32 {
        self.config.tolerance(self.difficulty)
    }

    /// Advance to the next level and spawn its moving block
    ///
    /// Returns `None` while inactive or when a block is already in flight.
    /// Past `max_level` the run ends as won instead of spawning.
    pub fn spawn_next(&mut self) -> Option<SpawnOutcome> {
        if !self.is_active() || self.moving.is_some() {
            return None;
        }

        self.level += 1;
        if self.level > self.config.max_level {
            self.phase = RunPhase::Ended(EndReason::Topped);
            log::info!("Tower complete! Score {}", self.score);
            return Some(SpawnOutcome::Topped);
        }

        let axis = Axis::for_level(self.level);
        let mut footprint = *self.previous();
        footprint.level = self.level;
        *axis.of_mut(&mut footprint.center) -= self.config.spawn_offset;

        let block = MovingBlock { footprint, axis };
        self.moving = Some(block);
        log::debug!("Spawned level {} along {:?}", self.level, axis);
        Some(SpawnOutcome::Spawned(block))
    }

    /// Slide the moving block by `dt_ms` milliseconds of travel
    ///
    /// Reflects at ±`oscillation_limit`: the coordinate is pinned to the
    /// limit and the direction flips. No-op when nothing is in flight.
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.is_active() {
            return;
        }
        let speed = self.speed();
        let limit = self.config.oscillation_limit;
        let Some(block) = self.moving.as_mut() else {
            return;
        };

        let coord = block.axis.of_mut(&mut block.footprint.center);
        *coord += speed * dt_ms.max(0.0) * self.direction.sign();

        if *coord > limit {
            *coord = limit;
            self.direction = Direction::Backward;
        }
        if *coord < -limit {
            *coord = -limit;
            self.direction = Direction::Forward;
        }
    }

    /// Drop the moving block onto the stack
    ///
    /// Returns `None` (and changes nothing) when the run is inactive or no
    /// block is in flight, so stray input is harmless.
    pub fn place(&mut self) -> Option<PlaceOutcome> {
        if !self.is_active() {
            return None;
        }
        let block = self.moving.take()?;

        let placement = resolve_placement(self.previous(), &block.footprint, block.axis, self.tolerance());
        let (footprint, perfect) = match placement {
            Placement::Snap(fp) => (fp, true),
            Placement::Crop(fp) => (fp, false),
            Placement::Miss => {
                self.phase = RunPhase::Ended(EndReason::Missed);
                log::info!("Missed at level {}. Final score {}", self.level, self.score);
                return Some(PlaceOutcome::Miss { score: self.score });
            }
        };

        if perfect {
            log::debug!("Perfect drop at level {}", self.level);
        }

        self.stack.push(footprint);
        self.score += 1;
        let topped = matches!(self.spawn_next(), Some(SpawnOutcome::Topped));

        Some(PlaceOutcome::Hit {
            footprint,
            score: self.score,
            perfect,
            topped,
        })
    }
}
