// Integration tests for the stack simulator through the public API.
// These avoid wasm-specific functionality so they run under `cargo test`
// on the host.

use stack_tower::TowerConfig;
use stack_tower::sim::{
    Axis, EndReason, Footprint, PlaceOutcome, Placement, RunPhase, TowerState, resolve_placement,
};

fn started(config: TowerConfig) -> TowerState {
    let mut state = TowerState::new(config.clone());
    state.reset(config);
    state
}

/// Put the moving block `delta` away from the block below
fn aim(state: &mut TowerState, delta: f32) {
    let prev = *state.previous();
    let block = state.moving.as_mut().expect("block in flight");
    *block.axis.of_mut(&mut block.footprint.center) = block.axis.of(prev.center) + delta;
}

#[test]
fn example_scenario_snap_crop_miss() {
    let prev = Footprint::base(80.0);
    let at = |x: f32| Footprint::new(x, 0.0, 80.0, 80.0, 1);

    assert_eq!(
        resolve_placement(&prev, &at(5.0), Axis::X, 8.0),
        Placement::Snap(Footprint::new(0.0, 0.0, 80.0, 80.0, 1))
    );
    assert_eq!(
        resolve_placement(&prev, &at(30.0), Axis::X, 8.0),
        Placement::Crop(Footprint::new(15.0, 0.0, 50.0, 80.0, 1))
    );
    assert_eq!(resolve_placement(&prev, &at(-90.0), Axis::X, 8.0), Placement::Miss);
}

#[test]
fn score_counts_hits_until_miss() {
    let mut state = started(TowerConfig::default());
    for k in 1..=5 {
        aim(&mut state, 2.0);
        let outcome = state.place().unwrap();
        assert_eq!(outcome.score(), k);
        assert_eq!(state.score as usize, state.stack.len() - 1);
    }

    aim(&mut state, 500.0);
    assert_eq!(state.place(), Some(PlaceOutcome::Miss { score: 5 }));
    assert_eq!(state.final_score(), Some(5));
    assert_eq!(state.stack.len(), 6);
}

#[test]
fn axis_alternates_regardless_of_outcome() {
    let mut state = started(TowerConfig::default());
    let deltas = [0.0, 20.0, -15.0, 3.0, 11.0, -4.0];
    for delta in deltas {
        let block = state.moving.unwrap();
        assert_eq!(block.axis, Axis::for_level(state.level));
        aim(&mut state, delta);
        state.place();
    }
    assert!(state.is_active());
    assert_eq!(state.level, deltas.len() as u32 + 1);
}

#[test]
fn crops_accumulate_on_alternating_axes() {
    let mut state = started(TowerConfig::default());
    // Level 1 slides on Z, level 2 on X
    aim(&mut state, 20.0);
    state.place();
    aim(&mut state, -30.0);
    state.place();

    let top = *state.previous();
    assert_eq!(top.depth(), 60.0);
    assert_eq!(top.center_z(), 10.0);
    assert_eq!(top.width(), 50.0);
    assert_eq!(top.center_x(), -15.0);

    // The next block is as big as what is left
    let next = state.moving.unwrap();
    assert_eq!(next.footprint.size, top.size);
}

#[test]
fn reaching_max_level_wins() {
    let config = TowerConfig {
        max_level: 4,
        ..TowerConfig::default()
    };
    let mut state = started(config);
    let mut last = None;
    while state.is_active() {
        aim(&mut state, 0.0);
        last = state.place();
    }
    assert!(matches!(last, Some(PlaceOutcome::Hit { topped: true, score: 4, .. })));
    assert_eq!(state.phase, RunPhase::Ended(EndReason::Topped));
    assert_eq!(state.level, 5);
    assert_eq!(state.score, 4);
}

#[test]
fn stray_input_after_end_is_harmless() {
    let mut state = started(TowerConfig::default());
    aim(&mut state, -200.0);
    state.place();
    let snapshot = (state.score, state.level, state.stack.clone());

    for _ in 0..3 {
        assert_eq!(state.place(), None);
        state.tick(16.0);
    }
    assert_eq!((state.score, state.level, state.stack.clone()), snapshot);
}

#[test]
fn reset_starts_over() {
    let mut state = started(TowerConfig::default());
    aim(&mut state, 30.0);
    state.place();
    aim(&mut state, 300.0);
    state.place();
    assert!(!state.is_active());

    state.reset(TowerConfig::default());
    assert!(state.is_active());
    assert_eq!(state.score, 0);
    assert_eq!(state.level, 1);
    assert_eq!(state.stack, vec![Footprint::base(80.0)]);
    assert!(state.moving.is_some());
}

#[test]
fn hard_mode_tightens_tolerance() {
    let mut easy = started(TowerConfig::default());
    aim(&mut easy, 5.0);
    assert!(matches!(easy.place(), Some(PlaceOutcome::Hit { perfect: true, .. })));

    let mut hard = started(TowerConfig::default());
    hard.toggle_difficulty();
    aim(&mut hard, 5.0);
    assert!(matches!(hard.place(), Some(PlaceOutcome::Hit { perfect: false, .. })));
}

#[test]
fn state_serializes_for_inspection() {
    let mut state = started(TowerConfig::default());
    aim(&mut state, 10.0);
    state.place();
    let json = serde_json::to_string(&state).unwrap();
    let back: TowerState = serde_json::from_str(&json).unwrap();
    assert_eq!(back.stack, state.stack);
    assert_eq!(back.phase, state.phase);
}
