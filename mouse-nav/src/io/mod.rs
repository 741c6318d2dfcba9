//! Textual records exchanged with the map editor and episode artifacts.

mod maze_format;

pub use maze_format::{generate_maze, load_maze, read_maze, save_maze, write_maze, Maze};

use serde::{Deserialize, Serialize};

/// Author block carried by `.maze` files and episode artifacts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub name: String,
    pub email: String,
    pub github: String,
    /// ISO-8601 local timestamp
    pub date: String,
}

impl Meta {
    /// Collect author identity from the environment.
    ///
    /// Reads `GIT_AUTHOR_NAME`, `GIT_AUTHOR_EMAIL` and `GITHUB_PROFILE`;
    /// missing variables leave their field empty. The date is stamped with
    /// the current local time.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).unwrap_or_default();
        Self {
            name: var("GIT_AUTHOR_NAME"),
            email: var("GIT_AUTHOR_EMAIL"),
            github: var("GITHUB_PROFILE"),
            date: chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%z").to_string(),
        }
    }
}

/// An (x, y) cell in a textual record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: i32,
    pub y: i32,
}

impl From<crate::core::Point> for PointRecord {
    fn from(p: crate::core::Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<PointRecord> for crate::core::Point {
    fn from(r: PointRecord) -> Self {
        crate::core::Point::new(r.x, r.y)
    }
}

/// A cell plus heading, used for entrances and episode starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoseRecord {
    pub x: i32,
    pub y: i32,
    /// 0=N, 1=E, 2=S, 3=W
    pub heading: u8,
}

impl PoseRecord {
    /// Build from a cell and heading
    pub fn new(cell: crate::core::Point, heading: crate::core::Heading) -> Self {
        Self {
            x: cell.x,
            y: cell.y,
            heading: heading as u8,
        }
    }
}
