//! Accuracy scoring and combos
//!
//! An action is scored against the beat intensity at the moment it happens:
//! hitting right on a full-strength beat is 100% accurate.

use serde::{Deserialize, Serialize};

/// Accuracy above this is a perfect cut
pub const PERFECT_THRESHOLD: f32 = 0.8;
/// Consecutive perfects needed to enter flow
pub const FLOW_COMBO: u32 = 3;
/// Score multiplier while in flow
pub const FLOW_MULTIPLIER: f32 = 1.5;

/// Per-player scoring state, reset at the start of each round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComboState {
    pub score: u64,
    pub combo: u32,
    pub best_combo: u32,
    pub perfect_cuts: u32,
    pub flow: bool,
}

/// Outcome of one scored action
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionResult {
    pub accuracy: f32,
    pub perfect: bool,
    pub points_awarded: u32,
    pub new_combo: u32,
    /// Flow started on this action
    pub flow_entered: bool,
    /// Flow was lost on this action
    pub flow_broken: bool,
}

/// 1.0 at full intensity, falling linearly to 0
#[inline]
pub fn accuracy(intensity: f32) -> f32 {
    (1.0 - (intensity - 1.0).abs()).max(0.0)
}

/// Score an action and update `state`
///
/// Perfect cuts use the flow multiplier as it stood before the action, so the
/// cut that enters flow is scored at 1x.
pub fn score_action(intensity: f32, state: &mut ComboState) -> ActionResult {
    let accuracy = accuracy(intensity);
    let perfect = accuracy > PERFECT_THRESHOLD;

    let mut flow_entered = false;
    let mut flow_broken = false;

    let points_awarded = if perfect {
        let multiplier = if state.flow { FLOW_MULTIPLIER } else { 1.0 };
        let points = (accuracy * 100.0 * multiplier).floor() as u32;

        state.combo += 1;
        state.perfect_cuts += 1;
        state.best_combo = state.best_combo.max(state.combo);
        if state.combo >= FLOW_COMBO && !state.flow {
            state.flow = true;
            flow_entered = true;
        }
        points
    } else {
        flow_broken = state.flow;
        state.combo = 0;
        state.flow = false;
        (accuracy * 100.0).floor() as u32
    };

    state.score += points_awarded as u64;

    ActionResult {
        accuracy,
        perfect,
        points_awarded,
        new_combo: state.combo,
        flow_entered,
        flow_broken,
    }
}

/// Scorer owning one player's combo state
#[derive(Debug, Clone, Default)]
pub struct AccuracyScorer {
    state: ComboState,
}

impl AccuracyScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_action(&mut self, current_intensity: f32) -> ActionResult {
        let result = score_action(current_intensity, &mut self.state);
        if result.flow_entered {
            log::debug!("Flow state entered at combo {}", result.new_combo);
        } else if result.flow_broken {
            log::debug!("Flow state broken");
        }
        result
    }

    pub fn state(&self) -> &ComboState {
        &self.state
    }

    pub fn in_flow(&self) -> bool {
        self.state.flow
    }

    pub fn reset(&mut self) {
        self.state = ComboState::default();
    }
}
