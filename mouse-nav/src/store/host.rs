//! Host-filesystem persistence backend.
//!
//! Two files under a user-scoped directory carry the same records as the
//! device sector: `weights.bin` (`MZHU`) and `map.bin` (`MZMP`). When the
//! `HOME` environment setting is absent the store degrades to the
//! in-process weights fallback only.

use std::fs;
use std::path::{Path, PathBuf};

use crate::grid::MazeGrid;
use crate::learning::HeuristicWeights;

use super::records;
use super::{PersistentStore, StoreStatus};

/// Directory created under `$HOME` for persisted state
const DATA_DIR_NAME: &str = ".mouse_maze";
/// Weights record file name
const WEIGHTS_FILE: &str = "weights.bin";
/// Map snapshot file name
const MAP_FILE: &str = "map.bin";

/// Persistent store backed by files in a directory.
pub struct HostStore {
    dir: Option<PathBuf>,
    last_weights: Option<HeuristicWeights>,
}

impl HostStore {
    /// Store rooted at an explicit directory (tests redirect here)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            last_weights: None,
        }
    }

    /// Store rooted at `$HOME/.mouse_maze`, or memory-only when `HOME`
    /// is not set.
    pub fn from_env() -> Self {
        let dir = std::env::var_os("HOME").map(|home| Path::new(&home).join(DATA_DIR_NAME));
        if dir.is_none() {
            log::warn!("host store: HOME not set, weights kept in memory only");
        }
        Self {
            dir,
            last_weights: None,
        }
    }

    fn weights_path(&self) -> Option<PathBuf> {
        self.dir.as_ref().map(|d| d.join(WEIGHTS_FILE))
    }

    fn map_path(&self) -> Option<PathBuf> {
        self.dir.as_ref().map(|d| d.join(MAP_FILE))
    }

    fn ensure_dir(&self) -> bool {
        match &self.dir {
            Some(dir) => fs::create_dir_all(dir)
                .map_err(|e| log::error!("host store: create {:?} failed: {}", dir, e))
                .is_ok(),
            None => false,
        }
    }

    fn read_weights_file(&self) -> Option<HeuristicWeights> {
        let data = fs::read(self.weights_path()?).ok()?;
        records::decode_weights(&data)
    }
}

impl PersistentStore for HostStore {
    fn erase_all(&mut self) -> bool {
        self.last_weights = None;
        let Some(dir) = &self.dir else {
            return true;
        };
        let mut ok = true;
        for name in [WEIGHTS_FILE, MAP_FILE] {
            let path = dir.join(name);
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    log::error!("host store: remove {:?} failed: {}", path, e);
                    ok = false;
                }
            }
        }
        ok
    }

    fn status(&self) -> StoreStatus {
        StoreStatus {
            weights_present: self.read_weights_file().is_some(),
            active_profile: 0,
        }
    }

    fn save_weights(&mut self, weights: &HeuristicWeights) -> bool {
        self.last_weights = Some(*weights);
        let Some(path) = self.weights_path() else {
            // no directory configured: the in-memory copy is the best we
            // can do, and load_weights will serve it back
            return true;
        };
        if !self.ensure_dir() {
            return false;
        }
        match fs::write(&path, records::encode_weights(weights)) {
            Ok(()) => {
                log::debug!("host store: saved weights -> {:?}", path);
                true
            }
            Err(e) => {
                log::error!("host store: write {:?} failed: {}", path, e);
                false
            }
        }
    }

    fn load_weights(&mut self) -> Option<HeuristicWeights> {
        if let Some(weights) = self.read_weights_file() {
            self.last_weights = Some(weights);
            return Some(weights);
        }
        self.last_weights
    }

    fn save_map(&mut self, grid: &MazeGrid) -> bool {
        let Some(path) = self.map_path() else {
            return false;
        };
        let Some(record) = records::encode_map(grid) else {
            return false;
        };
        if !self.ensure_dir() {
            return false;
        }
        match fs::write(&path, record) {
            Ok(()) => {
                log::debug!(
                    "host store: saved {}x{} map snapshot -> {:?}",
                    grid.width(),
                    grid.height(),
                    path
                );
                true
            }
            Err(e) => {
                log::error!("host store: write {:?} failed: {}", path, e);
                false
            }
        }
    }

    fn load_map(&mut self, grid: &mut MazeGrid) -> bool {
        let Some(path) = self.map_path() else {
            return false;
        };
        let Ok(data) = fs::read(&path) else {
            return false;
        };
        records::decode_map(&data, grid)
    }
}
