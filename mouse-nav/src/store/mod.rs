//! Durable persistence for learned weights and map snapshots.
//!
//! Two interchangeable backends sit behind [`PersistentStore`]:
//!
//! - [`FlashStore`]: the device's reserved flash sector (page 0 weights,
//!   page 1 map snapshot)
//! - [`HostStore`]: two files in a user-scoped directory
//!
//! Both write the same integrity-checked records, so content round-trips
//! identically across backends. Loaders treat corrupt records exactly like
//! absent ones; nothing here panics or retries.
//!
//! The store is an explicit handle, not hidden module state, so tests and
//! the simulator can redirect it freely. Each handle also keeps the last
//! weights written in RAM as a fallback for failed loads.

mod flash;
mod host;
mod records;

pub use flash::{FlashStore, RamFlash, SectorFlash, PAGE_SIZE, SECTOR_SIZE};
pub use host::HostStore;
pub use records::{MAP_MAGIC, RECORD_VERSION, WEIGHTS_MAGIC};

use crate::grid::MazeGrid;
use crate::learning::HeuristicWeights;

/// Summary of what the store currently holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreStatus {
    /// A valid weights record exists
    pub weights_present: bool,
    /// Reserved for multiple learning profiles; always 0 in this version
    pub active_profile: u32,
}

/// The persistence operations shared by both backends.
pub trait PersistentStore {
    /// Drop every persisted record. Returns false only on backend I/O
    /// failure; erasing an empty store succeeds.
    fn erase_all(&mut self) -> bool;

    /// What the store currently holds
    fn status(&self) -> StoreStatus;

    /// Persist the learned weights. Also updates the in-RAM fallback,
    /// even when the durable write fails.
    fn save_weights(&mut self, weights: &HeuristicWeights) -> bool;

    /// Load persisted weights, falling back to the last weights saved in
    /// this process; `None` when neither exists.
    fn load_weights(&mut self) -> Option<HeuristicWeights>;

    /// Persist a map snapshot. On the device backend the caller must have
    /// saved weights first (the weights save erases the shared sector).
    fn save_map(&mut self, grid: &MazeGrid) -> bool;

    /// Load a snapshot into `grid`. Fails, leaving `grid` untouched, when
    /// the record is absent, corrupt, or sized for different dimensions.
    fn load_map(&mut self, grid: &mut MazeGrid) -> bool;
}
