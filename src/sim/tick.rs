//! Per-frame driver
//!
//! The platform collects discrete input between frames into a `FrameInput`
//! and calls `frame` once per rendered frame with the elapsed milliseconds.

use super::state::{PlaceOutcome, TowerState};

/// Input gathered since the previous frame (one-shot flags)
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Primary action (space / pointer press): drop the moving block
    pub place: bool,
    /// Start button: only starts when no run is active
    pub start: bool,
    /// Restart button: always starts a fresh run
    pub restart: bool,
    /// Flip easy/hard
    pub toggle_difficulty: bool,
}

impl FrameInput {
    /// Clear one-shot inputs after they have been applied
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Mouse presses this soon after a touch are the browser's emulated copy
const EMULATED_MOUSE_MS: f64 = 800.0;

/// Pointer kind behind a drop request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressSource {
    Mouse,
    Touch,
}

/// Lets one tap count as one drop
///
/// Touch browsers follow `touchstart` with a compatibility `mousedown`; a
/// mouse press shortly after a touch is discarded.
#[derive(Debug, Clone, Default)]
pub struct PressFilter {
    last_touch_ms: Option<f64>,
}

impl PressFilter {
    /// Whether a press at `now_ms` should drop the block
    pub fn accept(&mut self, source: PressSource, now_ms: f64) -> bool {
        match source {
            PressSource::Touch => {
                self.last_touch_ms = Some(now_ms);
                true
            }
            PressSource::Mouse => match self.last_touch_ms {
                Some(t) => !(0.0..EMULATED_MOUSE_MS).contains(&(now_ms - t)),
                None => true,
            },
        }
    }
}

/// Apply `input`, then advance the moving block by `dt_ms`
///
/// Returns the placement result if a drop was attempted and accepted.
pub fn frame(state: &mut TowerState, input: &FrameInput, dt_ms: f32) -> Option<PlaceOutcome> {
    if input.restart || (input.start && !state.is_active()) {
        state.restart();
    }

    if input.toggle_difficulty {
        state.toggle_difficulty();
    }

    let outcome = if input.place { state.place() } else { None };

    state.tick(dt_ms);

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::TowerConfig;
    use crate::sim::state::{Difficulty, RunPhase};

    #[test]
    fn test_start_only_when_inactive() {
        let mut state = TowerState::new(TowerConfig::default());
        let start = FrameInput {
            start: true,
            ..Default::default()
        };
        frame(&mut state, &start, 0.0);
        assert_eq!(state.phase, RunPhase::Active);

        // Progress the run, then a second start must not reset it
        let prev = *state.previous();
        if let Some(block) = state.moving.as_mut() {
            *block.axis.of_mut(&mut block.footprint.center) = block.axis.of(prev.center);
        }
        let place = FrameInput {
            place: true,
            ..Default::default()
        };
        frame(&mut state, &place, 0.0);
        assert_eq!(state.score, 1);

        frame(&mut state, &start, 0.0);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_restart_always_resets() {
        let mut state = TowerState::new(TowerConfig::default());
        state.reset(TowerConfig::default());
        state.score = 7;
        let restart = FrameInput {
            restart: true,
            ..Default::default()
        };
        frame(&mut state, &restart, 0.0);
        assert_eq!(state.score, 0);
        assert!(state.is_active());
    }

    #[test]
    fn test_toggle_and_idle_frames() {
        let mut state = TowerState::new(TowerConfig::default());
        let toggle = FrameInput {
            toggle_difficulty: true,
            ..Default::default()
        };
        assert_eq!(frame(&mut state, &toggle, 16.0), None);
        assert_eq!(state.difficulty, Difficulty::Hard);

        // Placing with no run is ignored
        let place = FrameInput {
            place: true,
            ..Default::default()
        };
        assert_eq!(frame(&mut state, &place, 16.0), None);
        assert_eq!(state.phase, RunPhase::Idle);
    }

    #[test]
    fn test_tap_places_once() {
        let mut state = TowerState::new(TowerConfig::default());
        state.reset(TowerConfig::default());
        let mut presses = PressFilter::default();
        let mut input = FrameInput::default();

        // touchstart lands in one frame...
        input.place = presses.accept(PressSource::Touch, 1000.0);
        let prev = *state.previous();
        if let Some(block) = state.moving.as_mut() {
            *block.axis.of_mut(&mut block.footprint.center) = block.axis.of(prev.center);
        }
        assert!(frame(&mut state, &input, 16.0).is_some());
        input.clear();

        // ...its emulated mousedown in the next
        input.place = presses.accept(PressSource::Mouse, 1040.0);
        assert_eq!(frame(&mut state, &input, 16.0), None);
        assert_eq!(state.score, 1);
        assert_eq!(state.stack.len(), 2);
    }

    #[test]
    fn test_mouse_presses_pass_without_recent_touch() {
        let mut presses = PressFilter::default();
        assert!(presses.accept(PressSource::Mouse, 0.0));
        assert!(presses.accept(PressSource::Mouse, 5.0));

        assert!(presses.accept(PressSource::Touch, 100.0));
        assert!(!presses.accept(PressSource::Mouse, 899.0));
        assert!(presses.accept(PressSource::Mouse, 900.0));
        // Repeated taps are all real
        assert!(presses.accept(PressSource::Touch, 950.0));
        assert!(presses.accept(PressSource::Touch, 990.0));
    }

    #[test]
    fn test_clear_resets_flags() {
        let mut input = FrameInput {
            place: true,
            restart: true,
            ..Default::default()
        };
        input.clear();
        assert!(!input.place && !input.restart);
    }
}
