//! Device persistence over a reserved flash sector.
//!
//! The last sector of flash holds both records:
//!
//! - Page 0: weights record (`MZHU`)
//! - Page 1: map snapshot (`MZMP`)
//!
//! `save_weights` erases the sector before programming page 0, so a map
//! snapshot only survives when it is written after the weights. Callers
//! that save both must save weights first.
//!
//! The sector geometry sits behind [`SectorFlash`] so the record layout is
//! exercised against [`RamFlash`] on the host; the register-level RP2040
//! implementation lives with the firmware, which runs erase/program with
//! interrupts disabled.

use crate::grid::MazeGrid;
use crate::learning::HeuristicWeights;

use super::records;
use super::{PersistentStore, StoreStatus};

/// Reserved sector size in bytes
pub const SECTOR_SIZE: usize = 4096;
/// Flash programming page size in bytes
pub const PAGE_SIZE: usize = 256;

/// Minimal interface to one erasable flash sector.
pub trait SectorFlash {
    /// Erase the whole sector to 0xFF
    fn erase_sector(&mut self) -> bool;

    /// Program one page. `data` is at most [`PAGE_SIZE`] bytes; shorter
    /// slices leave the page tail erased.
    fn program_page(&mut self, page: usize, data: &[u8]) -> bool;

    /// Read bytes starting at `offset` within the sector
    fn read(&self, offset: usize, out: &mut [u8]) -> bool;
}

/// In-memory sector with NOR semantics: erase sets bits, programming only
/// clears them.
pub struct RamFlash {
    bytes: [u8; SECTOR_SIZE],
}

impl Default for RamFlash {
    fn default() -> Self {
        Self::new()
    }
}

impl RamFlash {
    /// A freshly erased sector
    pub fn new() -> Self {
        Self {
            bytes: [0xFF; SECTOR_SIZE],
        }
    }
}

impl SectorFlash for RamFlash {
    fn erase_sector(&mut self) -> bool {
        self.bytes.fill(0xFF);
        true
    }

    fn program_page(&mut self, page: usize, data: &[u8]) -> bool {
        if data.len() > PAGE_SIZE || (page + 1) * PAGE_SIZE > SECTOR_SIZE {
            return false;
        }
        let base = page * PAGE_SIZE;
        for (i, &b) in data.iter().enumerate() {
            self.bytes[base + i] &= b;
        }
        true
    }

    fn read(&self, offset: usize, out: &mut [u8]) -> bool {
        if offset + out.len() > SECTOR_SIZE {
            return false;
        }
        out.copy_from_slice(&self.bytes[offset..offset + out.len()]);
        true
    }
}

/// Persistent store backed by one flash sector.
pub struct FlashStore<F: SectorFlash> {
    flash: F,
    last_weights: Option<HeuristicWeights>,
}

impl<F: SectorFlash> FlashStore<F> {
    /// Wrap a sector
    pub fn new(flash: F) -> Self {
        Self {
            flash,
            last_weights: None,
        }
    }

    fn read_weights_record(&self) -> Option<HeuristicWeights> {
        let mut buf = [0u8; records::WEIGHTS_RECORD_LEN];
        if !self.flash.read(0, &mut buf) {
            return None;
        }
        records::decode_weights(&buf)
    }
}

impl<F: SectorFlash> PersistentStore for FlashStore<F> {
    fn erase_all(&mut self) -> bool {
        self.last_weights = None;
        self.flash.erase_sector()
    }

    fn status(&self) -> StoreStatus {
        StoreStatus {
            weights_present: self.read_weights_record().is_some(),
            active_profile: 0,
        }
    }

    fn save_weights(&mut self, weights: &HeuristicWeights) -> bool {
        self.last_weights = Some(*weights);
        let record = records::encode_weights(weights);
        if !self.flash.erase_sector() {
            return false;
        }
        let ok = self.flash.program_page(0, &record);
        if ok {
            log::debug!(
                "flash: saved weights (r={:.2} f={:.2} l={:.2} b={:.2})",
                weights.right,
                weights.front,
                weights.left,
                weights.back
            );
        }
        ok
    }

    fn load_weights(&mut self) -> Option<HeuristicWeights> {
        if let Some(weights) = self.read_weights_record() {
            self.last_weights = Some(weights);
            return Some(weights);
        }
        self.last_weights
    }

    fn save_map(&mut self, grid: &MazeGrid) -> bool {
        let Some(record) = records::encode_map(grid) else {
            return false;
        };
        if record.len() > PAGE_SIZE {
            log::warn!(
                "flash: map snapshot too large for one page ({} > {})",
                record.len(),
                PAGE_SIZE
            );
            return false;
        }
        let ok = self.flash.program_page(1, &record);
        if ok {
            log::debug!("flash: saved {}x{} map snapshot", grid.width(), grid.height());
        }
        ok
    }

    fn load_map(&mut self, grid: &mut MazeGrid) -> bool {
        let mut buf = vec![0u8; PAGE_SIZE];
        if !self.flash.read(PAGE_SIZE, &mut buf) {
            return false;
        }
        records::decode_map(&buf, grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Heading;

    fn sample_weights() -> HeuristicWeights {
        let mut weights = HeuristicWeights::default();
        weights.right = 1.4;
        weights.front = 0.2;
        weights
    }

    #[test]
    fn test_weights_roundtrip_bit_exact() {
        let mut store = FlashStore::new(RamFlash::new());
        let weights = sample_weights();
        assert!(store.save_weights(&weights));
        assert_eq!(store.load_weights(), Some(weights));
        assert!(store.status().weights_present);
        assert_eq!(store.status().active_profile, 0);
    }

    #[test]
    fn test_empty_sector_has_nothing() {
        let mut store = FlashStore::new(RamFlash::new());
        assert!(!store.status().weights_present);
        assert_eq!(store.load_weights(), None);
        let mut grid = MazeGrid::new(4, 4);
        assert!(!store.load_map(&mut grid));
    }

    #[test]
    fn test_map_survives_when_saved_after_weights() {
        let mut store = FlashStore::new(RamFlash::new());
        let mut grid = MazeGrid::new(4, 4);
        grid.set_wall(1, 1, Heading::East, true);
        grid.set_wall(2, 3, Heading::North, true);

        assert!(store.save_weights(&sample_weights()));
        assert!(store.save_map(&grid));

        let mut restored = MazeGrid::new(4, 4);
        assert!(store.load_map(&mut restored));
        assert_eq!(grid, restored);
        assert!(store.status().weights_present);
    }

    #[test]
    fn test_save_weights_erases_previous_map_page() {
        let mut store = FlashStore::new(RamFlash::new());
        let grid = MazeGrid::new(4, 4);
        assert!(store.save_weights(&sample_weights()));
        assert!(store.save_map(&grid));

        // a later weights save wipes the sector, including page 1
        assert!(store.save_weights(&sample_weights()));
        let mut restored = MazeGrid::new(4, 4);
        assert!(!store.load_map(&mut restored));
    }

    #[test]
    fn test_erase_all_clears_everything() {
        let mut store = FlashStore::new(RamFlash::new());
        assert!(store.save_weights(&sample_weights()));
        assert!(store.erase_all());
        assert!(!store.status().weights_present);
        assert_eq!(store.load_weights(), None);
    }

    #[test]
    fn test_ram_fallback_after_corruption() {
        let mut store = FlashStore::new(RamFlash::new());
        let weights = sample_weights();
        assert!(store.save_weights(&weights));
        // corrupt the magic in place; the RAM copy still answers
        store.flash.bytes[0] = 0;
        assert_eq!(store.load_weights(), Some(weights));
    }

    #[test]
    fn test_map_load_requires_matching_dimensions() {
        let mut store = FlashStore::new(RamFlash::new());
        assert!(store.save_weights(&sample_weights()));
        assert!(store.save_map(&MazeGrid::new(4, 4)));
        let mut wrong = MazeGrid::new(5, 5);
        assert!(!store.load_map(&mut wrong));
    }

    #[test]
    fn test_oversized_map_is_refused() {
        let mut store = FlashStore::new(RamFlash::new());
        // 16x16 = 256 payload bytes + header exceeds one page
        assert!(!store.save_map(&MazeGrid::new(16, 16)));
    }
}
