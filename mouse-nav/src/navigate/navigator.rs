//! The navigation decision core.
//!
//! A [`Navigator`] owns the known maze map, the learned action weights, the
//! per-cell visit counters and the current plan. The robot's own pose lives
//! with the caller: every operation takes the agent cell and heading as
//! arguments, which keeps the navigator restartable and single-owner.

use crate::core::{Action, Decision, Heading, Point, SensorRead};
use crate::grid::MazeGrid;
use crate::learning::HeuristicWeights;
use crate::planning;

use super::strategy::Strategy;
use super::visits::VisitCounts;

/// Episode phase as seen from the core.
///
/// The navigator never aborts an episode on its own; success is detected
/// from the caller-reported cell and failure from the caller-supplied step
/// budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EpisodeState {
    /// No episode in progress
    #[default]
    Idle,
    /// Episode running
    Running,
    /// Agent reached the goal
    Succeeded,
    /// Step budget exhausted
    Failed,
}

impl EpisodeState {
    /// True for both terminal phases
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, EpisodeState::Succeeded | EpisodeState::Failed)
    }
}

/// A free left/front/right candidate considered by the planned decision.
struct Candidate {
    action: Action,
    seen: u8,
    matches_plan: bool,
}

/// Observation, planning, decision policy and reward application.
pub struct Navigator {
    strategy: Strategy,
    grid: MazeGrid,
    start: Point,
    goal: Point,
    has_goal: bool,
    plan: Vec<Point>,
    weights: HeuristicWeights,
    visits: VisitCounts,
    episode: EpisodeState,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// A navigator over a 1x1 map with default weights.
    ///
    /// Call [`set_dimensions`](Self::set_dimensions) before use.
    pub fn new() -> Self {
        Self {
            strategy: Strategy::default(),
            grid: MazeGrid::new(1, 1),
            start: Point::default(),
            goal: Point::default(),
            has_goal: false,
            plan: Vec::new(),
            weights: HeuristicWeights::default(),
            visits: VisitCounts::new(1, 1),
            episode: EpisodeState::Idle,
        }
    }

    /// Select the active decision strategy
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    /// Active decision strategy
    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Replace the internal map with a fresh wall-less grid and reset the
    /// visit counters. Any stored plan is dropped.
    pub fn set_dimensions(&mut self, width: usize, height: usize) {
        self.grid = MazeGrid::new(width, height);
        self.visits = VisitCounts::new(width, height);
        self.plan.clear();
    }

    /// Set start and goal cells and enable goal-directed planning
    pub fn set_start_goal(&mut self, start: Point, goal: Point) {
        self.start = start;
        self.goal = goal;
        self.has_goal = true;
    }

    /// Goal cell, if one has been set
    #[inline]
    pub fn goal(&self) -> Option<Point> {
        self.has_goal.then_some(self.goal)
    }

    /// Read access to the known map
    #[inline]
    pub fn map(&self) -> &MazeGrid {
        &self.grid
    }

    /// Write access to the known map (used to load a snapshot at boot)
    #[inline]
    pub fn map_mut(&mut self) -> &mut MazeGrid {
        &mut self.grid
    }

    /// Learned action weights
    #[inline]
    pub fn heuristics(&self) -> HeuristicWeights {
        self.weights
    }

    /// Replace the learned action weights
    pub fn set_heuristics(&mut self, weights: HeuristicWeights) {
        self.weights = weights;
    }

    /// Visit count for a cell (255 out of bounds)
    #[inline]
    pub fn visit_count(&self, cell: Point) -> u8 {
        self.visits.count(cell)
    }

    // ---------- observation ----------

    /// Fold a sensor reading into the map.
    ///
    /// The left/front/right free flags become absolute walls on `cell`
    /// (a blocked direction is a present wall), mirrored bidirectionally.
    /// The rear is not sensed and stays untouched. Also counts a visit of
    /// `cell` when it is in bounds.
    pub fn observe(&mut self, cell: Point, sr: &SensorRead, heading: Heading) {
        let sides = [
            (heading.left(), sr.left_free),
            (heading, sr.front_free),
            (heading.right(), sr.right_free),
        ];
        for (dir, free) in sides {
            self.grid.set_wall(cell.x, cell.y, dir, !free);
        }
        self.visits.record(cell);
    }

    // ---------- planning ----------

    /// Plan a route from start to goal over the currently known walls.
    ///
    /// Returns true iff a non-empty plan was stored. Without a goal this
    /// is false and the stored plan is left untouched.
    pub fn plan_route(&mut self) -> bool {
        if !self.has_goal {
            return false;
        }
        match planning::shortest_path(&self.grid, self.start, self.goal) {
            Some(path) => {
                log::debug!(
                    "planned route with {} cells from ({},{}) to ({},{})",
                    path.len(),
                    self.start.x,
                    self.start.y,
                    self.goal.x,
                    self.goal.y
                );
                self.plan = path;
                !self.plan.is_empty()
            }
            None => {
                self.plan.clear();
                false
            }
        }
    }

    /// True iff a non-empty plan is stored
    #[inline]
    pub fn has_plan(&self) -> bool {
        !self.plan.is_empty()
    }

    /// The stored plan, start to goal inclusive; empty when unplanned
    #[inline]
    pub fn current_plan(&self) -> &[Point] {
        &self.plan
    }

    /// Absolute direction the plan wants next from `current`, when
    /// `current` is on the plan and has a successor one cell away.
    fn plan_wanted_direction(&self, current: Point) -> Option<Heading> {
        let pos = self.plan.iter().position(|&p| p == current)?;
        let next = *self.plan.get(pos + 1)?;
        let d = next - current;
        Heading::CARDINAL.into_iter().find(|dir| dir.delta() == (d.x, d.y))
    }

    // ---------- decisions ----------

    /// Pure wall-rule decision from sensor flags alone: right, then front,
    /// then left; back when cornered.
    pub fn decide(&self, sr: &SensorRead) -> Decision {
        let action = if sr.right_free {
            Action::Right
        } else if sr.front_free {
            Action::Forward
        } else if sr.left_free {
            Action::Left
        } else {
            Action::Back
        };
        Decision {
            action,
            score: self.weights.score_for(action, sr),
        }
    }

    /// Decision that blends the plan with exploration.
    ///
    /// Free candidates among left/front/right are ranked by, in order:
    /// never-visited first, then fewest visits, then plan alignment, then
    /// heuristic score. With all three blocked the decision is Back. Under
    /// [`Strategy::FollowPlan`] the plan's next direction is taken
    /// unconditionally whenever it is free.
    pub fn decide_planned(&self, current: Point, heading: Heading, sr: &SensorRead) -> Decision {
        let plan_wanted = self.plan_wanted_direction(current);

        if self.strategy == Strategy::FollowPlan {
            if let Some(dir) = plan_wanted {
                let action = Action::toward(heading, dir);
                let free = match action {
                    Action::Left => sr.left_free,
                    Action::Forward => sr.front_free,
                    Action::Right => sr.right_free,
                    Action::Back => true,
                };
                if free {
                    return Decision {
                        action,
                        score: self.weights.score_for(action, sr),
                    };
                }
            }
            return self.decide(sr);
        }

        // Candidate construction order fixes how full ties resolve.
        let mut candidates: Vec<Candidate> = Vec::with_capacity(3);
        let options = [
            (Action::Left, sr.left_free),
            (Action::Forward, sr.front_free),
            (Action::Right, sr.right_free),
        ];
        for (action, free) in options {
            if !free {
                continue;
            }
            let dir = action.absolute(heading);
            let neighbor = current.step(dir);
            candidates.push(Candidate {
                action,
                seen: self.visits.count(neighbor),
                matches_plan: plan_wanted == Some(dir),
            });
        }

        if candidates.is_empty() {
            return Decision {
                action: Action::Back,
                score: self.weights.score_for(Action::Back, sr),
            };
        }

        candidates.sort_by(|a, b| {
            (b.seen == 0)
                .cmp(&(a.seen == 0))
                .then(a.seen.cmp(&b.seen))
                .then(b.matches_plan.cmp(&a.matches_plan))
                .then_with(|| {
                    self.weights
                        .score_for(b.action, sr)
                        .cmp(&self.weights.score_for(a.action, sr))
                })
        });

        let action = candidates[0].action;
        Decision {
            action,
            score: self.weights.score_for(action, sr),
        }
    }

    // ---------- learning ----------

    /// Apply a scalar reward to the weight of the executed action
    pub fn apply_reward(&mut self, action: Action, reward: f32) {
        self.weights.update(action, reward);
    }

    // ---------- episode state machine ----------

    /// Current episode phase
    #[inline]
    pub fn episode(&self) -> EpisodeState {
        self.episode
    }

    /// Enter the Running phase, dropping any stored plan and optionally
    /// zeroing the visit counters.
    pub fn start_episode(&mut self, reset_visits: bool) {
        if reset_visits {
            self.visits.reset();
        }
        self.plan.clear();
        self.episode = EpisodeState::Running;
    }

    /// Report the agent cell after a step. Transitions to Succeeded when
    /// the cell equals the goal, to Failed when `steps` exceeds `budget`.
    /// Outside the Running phase this only reports the current state.
    pub fn finish_step(&mut self, cell: Point, steps: u32, budget: u32) -> EpisodeState {
        if self.episode == EpisodeState::Running {
            if self.has_goal && cell == self.goal {
                self.episode = EpisodeState::Succeeded;
            } else if steps > budget {
                self.episode = EpisodeState::Failed;
            }
        }
        self.episode
    }

    /// Leave a terminal phase and return to Idle
    pub fn reset_episode(&mut self) {
        self.episode = EpisodeState::Idle;
    }
}
