//! Observation, planning and the decision policy.

mod navigator;
mod strategy;
mod visits;

pub use navigator::{EpisodeState, Navigator};
pub use strategy::Strategy;
pub use visits::VisitCounts;
