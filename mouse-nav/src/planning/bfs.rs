//! Breadth-first shortest path over the known maze graph.
//!
//! The graph's vertices are cells and its edges are the currently-absent
//! walls. Expansion order per cell is fixed as N, E, S, W so that equal-cost
//! ties resolve the same way on every run.

use crate::core::{Heading, Point};
use crate::grid::MazeGrid;
use std::collections::VecDeque;

/// Shortest path from `start` to `goal` under the grid's known walls.
///
/// The returned path includes both endpoints; consecutive vertices differ by
/// exactly one step along one axis. Returns `None` when either endpoint is
/// out of bounds or the goal is unreachable.
pub fn shortest_path(grid: &MazeGrid, start: Point, goal: Point) -> Option<Vec<Point>> {
    if !grid.in_bounds(start.x, start.y) || !grid.in_bounds(goal.x, goal.y) {
        return None;
    }

    let width = grid.width();
    let index = |p: Point| p.y as usize * width + p.x as usize;

    let mut prev: Vec<i32> = vec![-1; grid.cell_count()];
    let mut visited = vec![false; grid.cell_count()];
    let mut queue = VecDeque::new();

    queue.push_back(start);
    visited[index(start)] = true;

    while let Some(p) = queue.pop_front() {
        if p == goal {
            break;
        }
        for dir in Heading::CARDINAL {
            let n = p.step(dir);
            if grid.open(p.x, p.y, dir) && grid.in_bounds(n.x, n.y) && !visited[index(n)] {
                visited[index(n)] = true;
                prev[index(n)] = index(p) as i32;
                queue.push_back(n);
            }
        }
    }

    if !visited[index(goal)] {
        log::trace!(
            "no route from ({},{}) to ({},{}) under known walls",
            start.x,
            start.y,
            goal.x,
            goal.y
        );
        return None;
    }

    // Walk the predecessor table back from the goal.
    let mut path = Vec::new();
    let start_idx = index(start) as i32;
    let mut cur = index(goal) as i32;
    while cur != -1 {
        let x = (cur as usize % width) as i32;
        let y = (cur as usize / width) as i32;
        path.push(Point::new(x, y));
        if cur == start_idx {
            break;
        }
        cur = prev[cur as usize];
    }
    path.reverse();
    Some(path)
}
