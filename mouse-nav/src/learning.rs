//! Online action-preference weights.
//!
//! Four bounded weights, one per maneuver, nudged by a scalar reward after
//! each executed action. Weights stay inside [`WEIGHT_MIN`], [`WEIGHT_MAX`]
//! no matter what reward sequence is applied.

use crate::core::{Action, SensorRead};
use serde::{Deserialize, Serialize};

/// Lower saturation bound for every weight
pub const WEIGHT_MIN: f32 = 0.2;
/// Upper saturation bound for every weight
pub const WEIGHT_MAX: f32 = 3.0;
/// Step size of the online update
pub const LEARNING_RATE: f32 = 0.05;

/// Per-action preference weights in [0.2, 3.0].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeuristicWeights {
    /// Preference for turning right
    pub right: f32,
    /// Preference for going straight
    pub front: f32,
    /// Preference for turning left
    pub left: f32,
    /// Preference for reversing out
    pub back: f32,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            right: 1.0,
            front: 1.0,
            left: 1.0,
            back: 1.0,
        }
    }
}

impl HeuristicWeights {
    /// Byte length of the packed little-endian form
    pub const PACKED_LEN: usize = 16;

    /// Current weight for an action
    #[inline]
    pub fn weight(&self, action: Action) -> f32 {
        match action {
            Action::Right => self.right,
            Action::Forward => self.front,
            Action::Left => self.left,
            Action::Back => self.back,
        }
    }

    /// Nudge the weight of `action` by `LEARNING_RATE * reward`, saturating
    /// at the [0.2, 3.0] bounds.
    pub fn update(&mut self, action: Action, reward: f32) {
        let w = match action {
            Action::Right => &mut self.right,
            Action::Forward => &mut self.front,
            Action::Left => &mut self.left,
            Action::Back => &mut self.back,
        };
        *w = (*w + LEARNING_RATE * reward).clamp(WEIGHT_MIN, WEIGHT_MAX);
    }

    /// Preference score 0..=10 for an action under the given sensor state.
    ///
    /// A blocked direction scores from a 0.1 base instead of its weight.
    /// Back only earns its weight when every sensed direction is blocked;
    /// otherwise it scores from a 0.2 base.
    pub fn score_for(&self, action: Action, sr: &SensorRead) -> u8 {
        let base = match action {
            Action::Right => {
                if sr.right_free {
                    self.right
                } else {
                    0.1
                }
            }
            Action::Forward => {
                if sr.front_free {
                    self.front
                } else {
                    0.1
                }
            }
            Action::Left => {
                if sr.left_free {
                    self.left
                } else {
                    0.1
                }
            }
            Action::Back => {
                if sr.all_blocked() {
                    self.back
                } else {
                    0.2
                }
            }
        };
        // Map the ~0.2..3.0 weight range onto the 0..10 integer scale.
        ((base / WEIGHT_MAX * 10.0).round()).clamp(0.0, 10.0) as u8
    }

    /// Pack as four little-endian f32 in right, front, left, back order
    pub fn to_bytes(&self) -> [u8; Self::PACKED_LEN] {
        let mut out = [0u8; Self::PACKED_LEN];
        out[0..4].copy_from_slice(&self.right.to_le_bytes());
        out[4..8].copy_from_slice(&self.front.to_le_bytes());
        out[8..12].copy_from_slice(&self.left.to_le_bytes());
        out[12..16].copy_from_slice(&self.back.to_le_bytes());
        out
    }

    /// Rebuild from the packed little-endian form
    pub fn from_bytes(bytes: &[u8; Self::PACKED_LEN]) -> Self {
        let f = |i: usize| f32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
        Self {
            right: f(0),
            front: f(4),
            left: f(8),
            back: f(12),
        }
    }
}
