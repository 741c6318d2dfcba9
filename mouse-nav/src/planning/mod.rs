//! Route planning over the known maze graph.

mod bfs;

pub use bfs::shortest_path;
