//! Shared episode-driving helpers for the integration suites.
//!
//! These mirror the consumer contract: the caller owns the agent pose,
//! derives sensor readings from ground truth and applies decided actions
//! to its world model.

use mouse_nav::core::{Action, Heading, Point, SensorRead};
use mouse_nav::grid::MazeGrid;
use mouse_nav::Navigator;

/// Relative free flags at `cell` for an agent facing `heading`, from the
/// ground-truth walls.
pub fn make_sensor_read(truth: &MazeGrid, cell: Point, heading: Heading) -> SensorRead {
    SensorRead::new(
        truth.open(cell.x, cell.y, heading.left()),
        truth.open(cell.x, cell.y, heading),
        truth.open(cell.x, cell.y, heading.right()),
    )
}

/// Apply an action to the agent pose. Turns rotate in place; Forward
/// advances one cell along the heading.
pub fn apply_move(cell: &mut Point, heading: &mut Heading, action: Action) {
    match action {
        Action::Left => *heading = heading.left(),
        Action::Right => *heading = heading.right(),
        Action::Back => *heading = heading.reverse(),
        Action::Forward => *cell = cell.step(*heading),
    }
}

/// Outcome of one driven episode.
pub struct EpisodeRun {
    pub reached_goal: bool,
    pub steps: u32,
    pub collisions: u32,
}

/// Drive one episode against ground truth, rewarding the navigator the way
/// the firmware control loop does. The guard bounds runaway exploration.
pub fn run_episode(
    truth: &MazeGrid,
    nav: &mut Navigator,
    start: Point,
    start_heading: Heading,
    goal: Point,
) -> EpisodeRun {
    let mut agent = start;
    let mut heading = start_heading;
    let mut steps = 0u32;
    let mut collisions = 0u32;
    // Generous bound: once visit counts saturate the policy degrades to
    // plain wall-following, which always exits a perfect maze.
    let mut guard = (truth.width() * truth.height() * 128) as i32;

    nav.plan_route();
    while guard > 0 {
        guard -= 1;
        let sr = make_sensor_read(truth, agent, heading);
        nav.observe(agent, &sr, heading);
        let decision = nav.decide_planned(agent, heading, &sr);

        let mut moved = false;
        if decision.action == Action::Forward {
            if truth.open(agent.x, agent.y, heading) {
                apply_move(&mut agent, &mut heading, Action::Forward);
                moved = true;
            } else {
                collisions += 1;
                nav.apply_reward(Action::Forward, -5.0);
            }
        } else {
            apply_move(&mut agent, &mut heading, decision.action);
            moved = true;
        }
        if moved {
            steps += 1;
            nav.apply_reward(decision.action, -1.0);
        }
        if agent == goal {
            nav.apply_reward(Action::Forward, 10.0);
            return EpisodeRun {
                reached_goal: true,
                steps,
                collisions,
            };
        }
    }
    EpisodeRun {
        reached_goal: false,
        steps,
        collisions,
    }
}
