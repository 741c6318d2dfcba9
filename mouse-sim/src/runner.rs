//! The headless episode loop.
//!
//! Drives a [`Navigator`] against ground-truth walls exactly like the
//! on-robot control tick, minus the motors: derive a sensor reading from
//! the agent cell, observe, decide, apply the maneuver to the world model,
//! reward the outcome, and stop on goal or exhausted budget.

use std::path::Path;
use std::time::Instant;

use mouse_nav::core::{Action, Heading, Point};
use mouse_nav::episode::{
    write_plan, write_solution, EpisodeRecorder, EpisodeResult, Metrics, PlanArtifact,
    SolutionArtifact, StepEvent, Summary,
};
use mouse_nav::io::{Maze, PointRecord, PoseRecord};
use mouse_nav::store::PersistentStore;
use mouse_nav::{EpisodeState, Navigator};

use crate::config::SimConfig;

/// Result of one driven episode.
pub struct EpisodeOutcome {
    pub state: EpisodeState,
    pub steps: u32,
    pub collisions: u32,
    pub time_s: f32,
    /// Agent cell after every counted step, entrance included
    pub route: Vec<PointRecord>,
}

impl EpisodeOutcome {
    pub fn cost(&self) -> u32 {
        self.steps + 5 * self.collisions
    }
}

/// Relative free flags from ground truth at the agent cell.
fn sense(truth: &mouse_nav::MazeGrid, cell: Point, heading: Heading) -> mouse_nav::SensorRead {
    mouse_nav::SensorRead::new(
        truth.open(cell.x, cell.y, heading.left()),
        truth.open(cell.x, cell.y, heading),
        truth.open(cell.x, cell.y, heading.right()),
    )
}

/// Apply a maneuver to the agent pose. Turns rotate in place, Forward
/// advances along the heading.
fn apply_move(cell: &mut Point, heading: &mut Heading, action: Action) {
    match action {
        Action::Left => *heading = heading.left(),
        Action::Right => *heading = heading.right(),
        Action::Back => *heading = heading.reverse(),
        Action::Forward => *cell = cell.step(*heading),
    }
}

/// Run one episode, appending every step to `recorder`.
pub fn run_episode(
    maze: &Maze,
    nav: &mut Navigator,
    recorder: &mut EpisodeRecorder,
    config: &SimConfig,
) -> EpisodeOutcome {
    let budget = (maze.grid.cell_count() as u32) * config.budget_multiplier;
    let started = Instant::now();

    nav.start_episode(false);
    recorder.start();

    let mut agent = maze.entrance;
    let mut heading = maze.entrance_heading;
    let mut steps = 0u32;
    let mut route = vec![PointRecord::from(agent)];

    while nav.episode() == EpisodeState::Running {
        let sr = sense(&maze.grid, agent, heading);
        nav.observe(agent, &sr, heading);
        if !nav.has_plan() {
            nav.plan_route();
        }
        let decision = nav.decide_planned(agent, heading, &sr);
        log::debug!(
            "pos=({},{}) head={:?} act={:?} score={} free[L={} F={} R={}]",
            agent.x,
            agent.y,
            heading,
            decision.action,
            decision.score,
            sr.left_free,
            sr.front_free,
            sr.right_free
        );

        let from = agent;
        let heading_before = heading;
        let mut moved = false;
        let (event, delta) = if decision.action == Action::Forward {
            if maze.grid.open(agent.x, agent.y, heading) {
                apply_move(&mut agent, &mut heading, Action::Forward);
                moved = true;
                (StepEvent::Forward, config.rewards.forward)
            } else {
                // the plan disagreed with ground truth: report the
                // collision and replan from the updated map
                nav.plan_route();
                (StepEvent::Collision, config.rewards.collision)
            }
        } else {
            apply_move(&mut agent, &mut heading, decision.action);
            moved = true;
            match decision.action {
                Action::Left => (StepEvent::Left, config.rewards.turn),
                Action::Right => (StepEvent::Right, config.rewards.turn),
                _ => (StepEvent::Back, config.rewards.back),
            }
        };
        nav.apply_reward(decision.action, delta);
        recorder.record(from, agent, heading_before, decision.action, moved, event, delta);

        if moved {
            steps += 1;
            route.push(agent.into());
        }
        nav.finish_step(agent, steps, budget);
    }

    EpisodeOutcome {
        state: nav.episode(),
        steps,
        collisions: recorder.collisions(),
        time_s: started.elapsed().as_secs_f32(),
        route,
    }
}

/// Persist learned state and write both artifacts after a terminal state.
pub fn finish_episode(
    maze: &Maze,
    maze_path: &Path,
    nav: &Navigator,
    recorder: &EpisodeRecorder,
    outcome: &EpisodeOutcome,
    store: &mut dyn PersistentStore,
) -> mouse_nav::Result<()> {
    let map_file = maze_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let width = maze.grid.width() as u32;
    let height = maze.grid.height() as u32;
    let start = PoseRecord::new(maze.entrance, maze.entrance_heading);

    if outcome.state == EpisodeState::Succeeded {
        if !store.save_weights(&nav.heuristics()) {
            log::warn!("weights not persisted");
        }
        if !store.save_map(nav.map()) {
            log::warn!("map snapshot not persisted");
        }

        let solution = SolutionArtifact {
            map_file: map_file.clone(),
            width,
            height,
            entrance: start,
            goal: maze.goal.into(),
            metrics: Metrics::new(outcome.steps, outcome.collisions, outcome.time_s),
            path: outcome.route.clone(),
            meta: maze.meta.clone(),
        };
        let path = write_solution(maze_path, &solution)?;
        log::info!("solution: {}", path.display());
    }

    let plan = PlanArtifact {
        map_file,
        width,
        height,
        start,
        goal: maze.goal.into(),
        result: if outcome.state == EpisodeState::Succeeded {
            EpisodeResult::Success
        } else {
            EpisodeResult::Fail
        },
        summary: Summary {
            steps: outcome.steps,
            collisions: outcome.collisions,
            score: recorder.score(),
        },
        steps: recorder.steps().to_vec(),
        meta: maze.meta.clone(),
    };
    let path = write_plan(maze_path, &plan)?;
    log::info!("attempt log: {}", path.display());
    Ok(())
}
