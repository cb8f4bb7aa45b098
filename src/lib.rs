//! Stack Tower - A stacking-blocks timing game
//!
//! Core modules:
//! - `sim`: Deterministic stack simulation (placement geometry, run state)
//! - `renderer`: Isometric projection and Canvas 2D drawing
//! - `settings`: Run configuration (speeds, tolerances, sizes)

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::TowerConfig;
pub use sim::{Difficulty, Footprint, PlaceOutcome, TowerState};

/// Game configuration constants
pub mod consts {
    /// Side length of the square base block
    pub const BASE_SIZE: f32 = 80.0;
    /// Vertical distance between stacked levels
    pub const LEVEL_HEIGHT: f32 = 8.0;

    /// Moving block speed (units per millisecond)
    pub const SPEED_EASY: f32 = 0.35;
    pub const SPEED_HARD: f32 = 0.75;

    /// Misalignment still treated as a perfect hit
    pub const TOLERANCE_EASY: f32 = 8.0;
    pub const TOLERANCE_HARD: f32 = 3.0;

    /// Levels to stack before the run is won
    pub const MAX_LEVEL: u32 = 40;

    /// Moving block reflects at ±this coordinate
    pub const OSCILLATION_LIMIT: f32 = 120.0;
    /// New blocks start this far to one side of the block below
    pub const SPAWN_OFFSET: f32 = 140.0;

    /// Largest frame delta fed to the simulation (ms)
    pub const MAX_FRAME_DT_MS: f32 = 100.0;
}
