//! The `.maze` textual record.
//!
//! Format (JSON):
//! - `width`, `height`: grid dimensions in cells
//! - `entrance`: `{x, y, heading}` with heading 0=N, 1=E, 2=S, 3=W
//! - `goal`: `{x, y}`
//! - `cells`: W*H objects `{n, e, s, w}` with 0/1 wall flags, row-major
//! - `meta`: `{name, email, github, date}`
//!
//! The field names are fixed; whitespace is free. Mazes are authored by the
//! external map editor or by [`generate_maze`].

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::{Heading, Point};
use crate::error::{Error, Result};
use crate::grid::MazeGrid;

use super::{Meta, PointRecord, PoseRecord};

/// One cell's wall flags as 0/1 integers.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
struct CellRecord {
    n: u8,
    e: u8,
    s: u8,
    w: u8,
}

/// The serialized shape of a `.maze` file.
#[derive(Serialize, Deserialize)]
struct MazeFile {
    width: u32,
    height: u32,
    entrance: PoseRecord,
    goal: PointRecord,
    cells: Vec<CellRecord>,
    meta: Meta,
}

/// An authored maze: ground-truth walls plus entrance, goal and meta.
#[derive(Clone, Debug)]
pub struct Maze {
    /// Ground-truth walls
    pub grid: MazeGrid,
    /// Entrance cell
    pub entrance: Point,
    /// Heading the robot starts with at the entrance
    pub entrance_heading: Heading,
    /// Goal cell
    pub goal: Point,
    /// Author block
    pub meta: Meta,
}

/// Write a maze to a `.maze` file
pub fn save_maze(path: &Path, maze: &Maze) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_maze(&mut writer, maze)?;
    writer.flush()?;
    log::info!("saved maze -> {}", path.display());
    Ok(())
}

/// Serialize a maze into a writer
pub fn write_maze<W: Write>(writer: &mut W, maze: &Maze) -> Result<()> {
    let cells = maze
        .grid
        .iter()
        .map(|(_, c)| CellRecord {
            n: c.north as u8,
            e: c.east as u8,
            s: c.south as u8,
            w: c.west as u8,
        })
        .collect();
    let record = MazeFile {
        width: maze.grid.width() as u32,
        height: maze.grid.height() as u32,
        entrance: PoseRecord::new(maze.entrance, maze.entrance_heading),
        goal: maze.goal.into(),
        cells,
        meta: maze.meta.clone(),
    };
    serde_json::to_writer_pretty(writer, &record)?;
    Ok(())
}

/// Load a maze from a `.maze` file
pub fn load_maze(path: &Path) -> Result<Maze> {
    let file = File::open(path)?;
    read_maze(&mut BufReader::new(file))
}

/// Deserialize a maze from a reader
pub fn read_maze<R: Read>(reader: &mut R) -> Result<Maze> {
    let record: MazeFile = serde_json::from_reader(reader)?;
    if record.width == 0 || record.height == 0 {
        return Err(Error::Format("zero maze dimension".into()));
    }
    let expected = record.width as usize * record.height as usize;
    if record.cells.len() != expected {
        return Err(Error::Format(format!(
            "expected {} cells, found {}",
            expected,
            record.cells.len()
        )));
    }

    let mut grid = MazeGrid::new(record.width as usize, record.height as usize);
    for (i, cell) in record.cells.iter().enumerate() {
        let x = (i % record.width as usize) as i32;
        let y = (i / record.width as usize) as i32;
        // set_wall keeps both sides of each edge coherent even if the
        // authored record is one-sided
        if cell.n != 0 {
            grid.set_wall(x, y, Heading::North, true);
        }
        if cell.e != 0 {
            grid.set_wall(x, y, Heading::East, true);
        }
        if cell.s != 0 {
            grid.set_wall(x, y, Heading::South, true);
        }
        if cell.w != 0 {
            grid.set_wall(x, y, Heading::West, true);
        }
    }

    Ok(Maze {
        grid,
        entrance: Point::new(record.entrance.x, record.entrance.y),
        entrance_heading: Heading::from_u8(record.entrance.heading),
        goal: record.goal.into(),
        meta: record.meta,
    })
}

/// Generate a perfect maze with randomized iterative DFS.
///
/// Every wall starts present; passages are carved along a random spanning
/// tree, so any two cells are connected by exactly one route. The entrance
/// and exit are cut into opposite borders (west to east, or north to
/// south) and the entrance heading points inward.
pub fn generate_maze<R: Rng>(width: usize, height: usize, rng: &mut R) -> Maze {
    let width = width.max(1);
    let height = height.max(1);
    let mut grid = MazeGrid::new(width, height);
    grid.fill_walls();

    let mut visited = vec![false; width * height];
    let index = |p: Point| p.y as usize * width + p.x as usize;

    let start = Point::new(
        rng.gen_range(0..width as i32),
        rng.gen_range(0..height as i32),
    );
    let mut stack = vec![start];
    visited[index(start)] = true;

    while let Some(&p) = stack.last() {
        let mut neighbors: Vec<Heading> = Heading::CARDINAL
            .into_iter()
            .filter(|dir| {
                let n = p.step(*dir);
                grid.in_bounds(n.x, n.y) && !visited[index(n)]
            })
            .collect();
        if neighbors.is_empty() {
            stack.pop();
            continue;
        }
        neighbors.shuffle(rng);
        let dir = neighbors[0];
        grid.set_wall(p.x, p.y, dir, false);
        let next = p.step(dir);
        visited[index(next)] = true;
        stack.push(next);
    }

    // Cut entrance and exit on opposite borders.
    let (entrance, goal, entrance_heading) = if rng.gen_bool(0.5) {
        let entrance = Point::new(0, rng.gen_range(0..height as i32));
        let goal = Point::new(width as i32 - 1, rng.gen_range(0..height as i32));
        grid.set_wall(entrance.x, entrance.y, Heading::West, false);
        grid.set_wall(goal.x, goal.y, Heading::East, false);
        (entrance, goal, Heading::East)
    } else {
        let entrance = Point::new(rng.gen_range(0..width as i32), 0);
        let goal = Point::new(rng.gen_range(0..width as i32), height as i32 - 1);
        grid.set_wall(entrance.x, entrance.y, Heading::North, false);
        grid.set_wall(goal.x, goal.y, Heading::South, false);
        (entrance, goal, Heading::South)
    };

    Maze {
        grid,
        entrance,
        entrance_heading,
        goal,
        meta: Meta::from_env(),
    }
}
