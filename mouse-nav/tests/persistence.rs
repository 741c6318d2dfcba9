//! Round-trip laws for both persistence backends.

use mouse_nav::core::Heading;
use mouse_nav::store::{FlashStore, HostStore, PersistentStore, RamFlash, SectorFlash};
use mouse_nav::{HeuristicWeights, MazeGrid};
use tempfile::TempDir;

/// The 4x4 pattern used across the backends: north walls along the top
/// row, east walls down the rightmost column.
fn checker_grid() -> MazeGrid {
    let mut grid = MazeGrid::new(4, 4);
    for i in 0..4 {
        grid.set_wall(i, 0, Heading::North, true);
        grid.set_wall(3, i, Heading::East, true);
    }
    grid
}

fn learned_weights() -> HeuristicWeights {
    let mut weights = HeuristicWeights::default();
    weights.update(mouse_nav::Action::Forward, 8.0);
    weights.update(mouse_nav::Action::Back, -12.0);
    weights
}

#[test]
fn flash_roundtrip_after_erase_and_fresh_save() {
    let mut store = FlashStore::new(RamFlash::new());
    let grid = checker_grid();
    let weights = learned_weights();

    assert!(store.save_weights(&weights));
    assert!(store.save_map(&grid));
    assert!(store.erase_all());

    // fresh save after a full erase
    assert!(store.save_weights(&weights));
    assert!(store.save_map(&grid));

    assert_eq!(store.load_weights(), Some(weights));
    let mut restored = MazeGrid::new(4, 4);
    assert!(store.load_map(&mut restored));
    for (p, cell) in grid.iter() {
        for dir in Heading::CARDINAL {
            assert_eq!(
                cell.wall(dir),
                restored.wall(p.x, p.y, dir),
                "wall ({},{}) {:?} differs after round-trip",
                p.x,
                p.y,
                dir
            );
        }
    }

    // the same snapshot must not load into a differently-sized grid
    let mut wrong = MazeGrid::new(5, 5);
    assert!(!store.load_map(&mut wrong));
}

#[test]
fn host_roundtrip_matches_source() {
    let dir = TempDir::new().unwrap();
    let mut store = HostStore::new(dir.path());
    let grid = checker_grid();
    let weights = learned_weights();

    assert!(store.save_weights(&weights));
    assert!(store.save_map(&grid));

    assert_eq!(store.load_weights(), Some(weights));
    let mut restored = MazeGrid::new(4, 4);
    assert!(store.load_map(&mut restored));
    assert_eq!(grid, restored);

    let mut wrong = MazeGrid::new(5, 5);
    assert!(!store.load_map(&mut wrong));
}

#[test]
fn backends_share_one_record_format() {
    // a weights file written by the host backend programs straight into a
    // flash page and reads back identically
    let dir = TempDir::new().unwrap();
    let mut host = HostStore::new(dir.path());
    let weights = learned_weights();
    assert!(host.save_weights(&weights));
    let record = std::fs::read(dir.path().join("weights.bin")).unwrap();

    let mut flash = RamFlash::new();
    assert!(flash.program_page(0, &record));
    let mut device = FlashStore::new(flash);
    assert_eq!(device.load_weights(), Some(weights));
}

#[test]
fn fresh_stores_report_nothing() {
    let dir = TempDir::new().unwrap();
    let mut host = HostStore::new(dir.path());
    assert!(!host.status().weights_present);
    assert_eq!(host.load_weights(), None);

    let mut device = FlashStore::new(RamFlash::new());
    assert!(!device.status().weights_present);
    assert_eq!(device.load_weights(), None);
    assert_eq!(device.status().active_profile, 0);
}
