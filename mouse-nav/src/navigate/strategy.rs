//! Navigation strategies dispatched at the decision boundary.

use serde::{Deserialize, Serialize};

/// How the navigator picks its next maneuver.
///
/// Each variant owns only its own behavior; dispatch happens in the single
/// decision function rather than through a trait hierarchy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Wall-following preference: right, then front, then left, then back.
    /// With a plan present, candidates are ranked by visit novelty, plan
    /// alignment and heuristic score.
    #[default]
    RightHand,
    /// Take the planned route's next direction unconditionally whenever it
    /// is free; fall back to the right-hand rule otherwise.
    FollowPlan,
}
