//! Discretized obstacle readings relative to the robot's heading.

use serde::{Deserialize, Serialize};

/// Free/blocked flags for the three sensed directions.
///
/// `true` means the corresponding direction is open. The rear is never
/// sensed; the IR array only looks left, ahead and right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorRead {
    /// No obstacle to the robot's left
    pub left_free: bool,
    /// No obstacle straight ahead
    pub front_free: bool,
    /// No obstacle to the robot's right
    pub right_free: bool,
}

impl SensorRead {
    /// Build a reading from the three flags in left, front, right order
    #[inline]
    pub fn new(left_free: bool, front_free: bool, right_free: bool) -> Self {
        Self {
            left_free,
            front_free,
            right_free,
        }
    }

    /// All three sensed directions blocked
    #[inline]
    pub fn all_blocked(&self) -> bool {
        !self.left_free && !self.front_free && !self.right_free
    }
}
