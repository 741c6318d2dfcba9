//! # MouseNav: maze navigation and learning core
//!
//! The platform-agnostic engine of a two-wheeled maze-solving robot. The
//! same code drives the microcontroller firmware and the desktop
//! simulator: callers feed in discretized sensor readings and apply the
//! decided maneuvers to their own world model.
//!
//! ## Architecture
//!
//! - [`core`]: fundamental types (Point, Heading, Cell, SensorRead, Action)
//! - [`grid`]: the partially-observable maze map with bidirectional walls
//! - [`planning`]: BFS shortest path over the known maze graph
//! - [`learning`]: bounded per-action weights with an online update rule
//! - [`navigate`]: the Navigator decision core and episode state machine
//! - [`store`]: durable weights + map snapshots (flash sector or host files)
//! - [`episode`]: step-by-step attempt logs and versioned artifacts
//! - [`io`]: the `.maze` textual record and maze generation
//!
//! ## Data flow per step
//!
//! ```text
//!  sensors ──► Navigator::observe ──► MazeGrid
//!                    │
//!                    ▼ (plan_route on demand)
//!              Navigator::decide_planned ──► Decision (action + score)
//!                    │
//!                    ▼ on terminal success
//!    HeuristicWeights + MazeGrid ──► PersistentStore
//!    step log + final route      ──► episode artifacts
//! ```
//!
//! ## Concurrency
//!
//! The core is single-threaded and synchronous. A [`navigate::Navigator`]
//! exclusively owns its map, weights, visit counters and plan; the robot's
//! cell and heading live with the caller. Decisions are deterministic for
//! identical inputs: BFS expands N, E, S, W and the exploration policy
//! ranks candidates with a stable sort.

pub mod core;
pub mod episode;
pub mod error;
pub mod grid;
pub mod io;
pub mod learning;
pub mod navigate;
pub mod planning;
pub mod store;

pub use crate::core::{Action, Cell, Decision, Heading, Point, SensorRead};
pub use crate::error::{Error, Result};
pub use crate::grid::MazeGrid;
pub use crate::learning::HeuristicWeights;
pub use crate::navigate::{EpisodeState, Navigator, Strategy};
pub use crate::store::{FlashStore, HostStore, PersistentStore, RamFlash, StoreStatus};
