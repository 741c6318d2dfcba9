//! Step-by-step attempt log.

use serde::{Deserialize, Serialize};

use crate::core::{Action, Heading, Point};
use crate::io::PointRecord;

/// What actually happened when a decided action was applied to the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepEvent {
    /// Advanced one cell
    Forward,
    /// Forward was decided but the ground truth blocked it
    Collision,
    /// Turned left
    Left,
    /// Turned right
    Right,
    /// Turned around
    Back,
}

/// One recorded step of an attempt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepEntry {
    /// 0-based position in the attempt
    pub step_index: u32,
    /// Agent cell before the action
    pub from: PointRecord,
    /// Agent cell after the action
    pub to: PointRecord,
    /// Heading before the action, 0=N 1=E 2=S 3=W
    pub heading_before: u8,
    /// The decided action
    pub action: Action,
    /// Whether the agent state changed (collisions do not move)
    pub moved: bool,
    /// Observed outcome
    pub event: StepEvent,
    /// Reward applied for this step
    pub delta_score: f32,
    /// Accumulated score after this step
    pub score_after: f32,
    /// Collision count including this step
    pub collisions_so_far: u32,
}

/// Buffers the step log of one attempt.
///
/// Cleared at every run start; the accumulated score and collision count
/// fold into each appended entry.
#[derive(Clone, Debug, Default)]
pub struct EpisodeRecorder {
    steps: Vec<StepEntry>,
    score: f32,
    collisions: u32,
}

impl EpisodeRecorder {
    /// An empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the buffer and zero the running score for a new attempt
    pub fn start(&mut self) {
        self.steps.clear();
        self.score = 0.0;
        self.collisions = 0;
    }

    /// Append one step with its observed outcome
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &mut self,
        from: Point,
        to: Point,
        heading_before: Heading,
        action: Action,
        moved: bool,
        event: StepEvent,
        delta_score: f32,
    ) {
        if event == StepEvent::Collision {
            self.collisions += 1;
        }
        self.score += delta_score;
        self.steps.push(StepEntry {
            step_index: self.steps.len() as u32,
            from: from.into(),
            to: to.into(),
            heading_before: heading_before as u8,
            action,
            moved,
            event,
            delta_score,
            score_after: self.score,
            collisions_so_far: self.collisions,
        });
    }

    /// The recorded entries in order
    #[inline]
    pub fn steps(&self) -> &[StepEntry] {
        &self.steps
    }

    /// Accumulated score
    #[inline]
    pub fn score(&self) -> f32 {
        self.score
    }

    /// Collisions recorded so far
    #[inline]
    pub fn collisions(&self) -> u32 {
        self.collisions
    }

    /// Number of steps that changed the agent state
    pub fn moved_steps(&self) -> u32 {
        self.steps.iter().filter(|s| s.moved).count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accumulates_score_and_collisions() {
        let mut rec = EpisodeRecorder::new();
        rec.start();
        rec.record(
            Point::new(0, 0),
            Point::new(1, 0),
            Heading::East,
            Action::Forward,
            true,
            StepEvent::Forward,
            1.0,
        );
        rec.record(
            Point::new(1, 0),
            Point::new(1, 0),
            Heading::East,
            Action::Forward,
            false,
            StepEvent::Collision,
            -5.0,
        );
        rec.record(
            Point::new(1, 0),
            Point::new(1, 0),
            Heading::South,
            Action::Right,
            true,
            StepEvent::Right,
            -0.1,
        );

        assert_eq!(rec.steps().len(), 3);
        assert_eq!(rec.collisions(), 1);
        assert_eq!(rec.moved_steps(), 2);
        assert!((rec.score() - (-4.1)).abs() < 1e-6);

        let last = &rec.steps()[2];
        assert_eq!(last.step_index, 2);
        assert_eq!(last.collisions_so_far, 1);
        assert!((last.score_after - (-4.1)).abs() < 1e-6);
    }

    #[test]
    fn test_start_clears_previous_attempt() {
        let mut rec = EpisodeRecorder::new();
        rec.start();
        rec.record(
            Point::new(0, 0),
            Point::new(0, 0),
            Heading::North,
            Action::Back,
            true,
            StepEvent::Back,
            -0.2,
        );
        rec.start();
        assert!(rec.steps().is_empty());
        assert_eq!(rec.score(), 0.0);
        assert_eq!(rec.collisions(), 0);
    }
}
