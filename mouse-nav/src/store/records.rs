//! Binary record layout shared by both persistence backends.
//!
//! Weights record (24 bytes):
//! - Magic: u32 `MZHU` (4 bytes, little-endian)
//! - Version: u16 (2 bytes)
//! - Size: u16 payload length, always 16 (2 bytes)
//! - Payload: four f32 weights, little-endian
//!
//! Map record (12 + W*H bytes):
//! - Magic: u32 `MZMP` (4 bytes, little-endian)
//! - Version: u16 (2 bytes)
//! - Width: u16, Height: u16 (4 bytes)
//! - Size: u16 payload length, always W*H (2 bytes)
//! - Payload: one packed wall byte per cell, row-major

use crate::grid::MazeGrid;
use crate::learning::HeuristicWeights;

/// Magic for the weights record ('M','Z','H','U')
pub const WEIGHTS_MAGIC: u32 = 0x4D5A_4855;
/// Magic for the map snapshot ('M','Z','M','P')
pub const MAP_MAGIC: u32 = 0x4D5A_4D50;
/// Layout version of both records
pub const RECORD_VERSION: u16 = 1;

/// Weights record length: 8-byte header + 16-byte payload
pub const WEIGHTS_RECORD_LEN: usize = 8 + HeuristicWeights::PACKED_LEN;
/// Map header length
pub const MAP_HEADER_LEN: usize = 12;

/// Serialize a weights record
pub fn encode_weights(weights: &HeuristicWeights) -> [u8; WEIGHTS_RECORD_LEN] {
    let mut out = [0u8; WEIGHTS_RECORD_LEN];
    out[0..4].copy_from_slice(&WEIGHTS_MAGIC.to_le_bytes());
    out[4..6].copy_from_slice(&RECORD_VERSION.to_le_bytes());
    out[6..8].copy_from_slice(&(HeuristicWeights::PACKED_LEN as u16).to_le_bytes());
    out[8..].copy_from_slice(&weights.to_bytes());
    out
}

/// Parse and validate a weights record.
///
/// Any mismatch in magic, version or size reads as "not present".
pub fn decode_weights(data: &[u8]) -> Option<HeuristicWeights> {
    if data.len() < WEIGHTS_RECORD_LEN {
        return None;
    }
    let magic = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let version = u16::from_le_bytes([data[4], data[5]]);
    let size = u16::from_le_bytes([data[6], data[7]]);
    if magic != WEIGHTS_MAGIC || version != RECORD_VERSION {
        return None;
    }
    if size as usize != HeuristicWeights::PACKED_LEN {
        return None;
    }
    let mut payload = [0u8; HeuristicWeights::PACKED_LEN];
    payload.copy_from_slice(&data[8..WEIGHTS_RECORD_LEN]);
    Some(HeuristicWeights::from_bytes(&payload))
}

/// Serialize a map snapshot record.
///
/// Returns `None` when the grid dimensions do not fit the u16 header
/// fields.
pub fn encode_map(grid: &MazeGrid) -> Option<Vec<u8>> {
    let width = u16::try_from(grid.width()).ok()?;
    let height = u16::try_from(grid.height()).ok()?;
    let payload = grid.packed_cells();
    let size = u16::try_from(payload.len()).ok()?;

    let mut out = Vec::with_capacity(MAP_HEADER_LEN + payload.len());
    out.extend_from_slice(&MAP_MAGIC.to_le_bytes());
    out.extend_from_slice(&RECORD_VERSION.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&size.to_le_bytes());
    out.extend_from_slice(&payload);
    Some(out)
}

/// Parse a map snapshot record into `grid`.
///
/// Fails (leaving `grid` untouched) on bad magic/version/size, or when the
/// recorded dimensions differ from the grid's.
pub fn decode_map(data: &[u8], grid: &mut MazeGrid) -> bool {
    if data.len() < MAP_HEADER_LEN {
        return false;
    }
    let magic = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let version = u16::from_le_bytes([data[4], data[5]]);
    let width = u16::from_le_bytes([data[6], data[7]]) as usize;
    let height = u16::from_le_bytes([data[8], data[9]]) as usize;
    let size = u16::from_le_bytes([data[10], data[11]]) as usize;

    if magic != MAP_MAGIC || version != RECORD_VERSION {
        return false;
    }
    if width != grid.width() || height != grid.height() {
        return false;
    }
    if size != width * height || data.len() < MAP_HEADER_LEN + size {
        return false;
    }
    grid.apply_packed(&data[MAP_HEADER_LEN..MAP_HEADER_LEN + size])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Heading;

    #[test]
    fn test_weights_record_roundtrip() {
        let mut weights = HeuristicWeights::default();
        weights.right = 2.5;
        weights.back = 0.2;
        let record = encode_weights(&weights);
        assert_eq!(decode_weights(&record), Some(weights));
    }

    #[test]
    fn test_weights_record_rejects_corruption() {
        let record = encode_weights(&HeuristicWeights::default());

        let mut bad_magic = record;
        bad_magic[0] ^= 0xFF;
        assert_eq!(decode_weights(&bad_magic), None);

        let mut bad_version = record;
        bad_version[4] = 9;
        assert_eq!(decode_weights(&bad_version), None);

        let mut bad_size = record;
        bad_size[6] = 3;
        assert_eq!(decode_weights(&bad_size), None);

        assert_eq!(decode_weights(&record[..10]), None);
    }

    #[test]
    fn test_map_record_roundtrip() {
        let mut grid = MazeGrid::new(4, 4);
        for x in 0..4 {
            grid.set_wall(x, 0, Heading::North, true);
            grid.set_wall(3, x, Heading::East, true);
        }
        let record = encode_map(&grid).unwrap();

        let mut restored = MazeGrid::new(4, 4);
        assert!(decode_map(&record, &mut restored));
        assert_eq!(grid, restored);
    }

    #[test]
    fn test_map_record_rejects_dimension_mismatch() {
        let grid = MazeGrid::new(4, 4);
        let record = encode_map(&grid).unwrap();
        let mut wrong = MazeGrid::new(5, 5);
        assert!(!decode_map(&record, &mut wrong));
    }

    #[test]
    fn test_map_record_rejects_truncated_payload() {
        let grid = MazeGrid::new(4, 4);
        let record = encode_map(&grid).unwrap();
        let mut out = MazeGrid::new(4, 4);
        assert!(!decode_map(&record[..record.len() - 1], &mut out));
    }
}
