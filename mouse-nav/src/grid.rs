//! Partially-observable maze grid storage.
//!
//! Cells are stored row-major. The only mutation is wall placement, and
//! every interior wall is kept coherent from both sides: setting the east
//! wall of (x, y) also sets the west wall of (x+1, y) when that neighbor
//! exists.

use crate::core::{Cell, Heading, Point};

/// Rectangular grid of maze cells with bidirectional wall bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl MazeGrid {
    /// Create a wall-less grid with the given dimensions.
    ///
    /// Dimensions are clamped to at least 1x1.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            cells: vec![Cell::default(); width * height],
            width,
            height,
        }
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// True iff (x, y) addresses a cell of this grid
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Flat row-major index for in-bounds coordinates
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    /// Cell at (x, y), if in bounds
    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Wall flag at (x, y) on the given absolute side.
    ///
    /// Out-of-bounds coordinates read as wall-less.
    #[inline]
    pub fn wall(&self, x: i32, y: i32, dir: Heading) -> bool {
        self.index(x, y)
            .map(|i| self.cells[i].wall(dir))
            .unwrap_or(false)
    }

    /// Set the wall at (x, y) on the given side, mirroring the change on
    /// the neighbor across that edge when it exists.
    ///
    /// No-op for out-of-bounds (x, y).
    pub fn set_wall(&mut self, x: i32, y: i32, dir: Heading, present: bool) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        self.cells[i].set_wall(dir, present);
        let neighbor = Point::new(x, y).step(dir);
        if let Some(j) = self.index(neighbor.x, neighbor.y) {
            self.cells[j].set_wall(dir.reverse(), present);
        }
    }

    /// True iff travel from (x, y) toward `dir` is not blocked by a wall
    #[inline]
    pub fn open(&self, x: i32, y: i32, dir: Heading) -> bool {
        !self.wall(x, y, dir)
    }

    /// Remove every wall
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Put a wall on every side of every cell (all passages closed)
    pub fn fill_walls(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell {
                north: true,
                east: true,
                south: true,
                west: true,
            };
        }
    }

    /// Iterate all cells with their coordinates, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.cells.iter().enumerate().map(move |(i, &cell)| {
            let x = (i % self.width) as i32;
            let y = (i / self.width) as i32;
            (Point::new(x, y), cell)
        })
    }

    /// Pack all wall flags into one byte per cell, row-major
    pub fn packed_cells(&self) -> Vec<u8> {
        self.cells.iter().map(Cell::pack).collect()
    }

    /// Rebuild walls from packed bytes via `set_wall`, so the
    /// bidirectional invariant holds even for inconsistent input.
    ///
    /// Returns false if `data` is shorter than the grid.
    pub fn apply_packed(&mut self, data: &[u8]) -> bool {
        if data.len() < self.cell_count() {
            return false;
        }
        self.clear();
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let cell = Cell::unpack(data[y as usize * self.width + x as usize]);
                for dir in Heading::CARDINAL {
                    if cell.wall(dir) {
                        self.set_wall(x, y, dir, true);
                    }
                }
            }
        }
        true
    }
}
