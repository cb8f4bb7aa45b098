//! Deterministic stack simulation
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only enters through `tick(dt_ms)`
//! - Seeded RNG only (autopilot)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod footprint;
pub mod placement;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use footprint::{Axis, Footprint};
pub use placement::{Placement, misalignment, overlap, resolve_placement};
pub use state::{
    Difficulty, Direction, EndReason, MovingBlock, PlaceOutcome, RunPhase, SpawnOutcome,
    TowerState,
};
pub use tick::{FrameInput, PressFilter, PressSource, frame};
