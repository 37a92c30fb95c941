use bitvec::prelude::*;

use crate::shape::Cell;

/// Boolean occupancy state over a region's cells, row-major. Created fresh
/// for each region search, mutated only through [`PlacementGrid::try_place`],
/// and discarded once the verdict is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementGrid {
    width: usize,
    height: usize,
    bits: BitVec<usize, Lsb0>,
}

impl PlacementGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: BitVec::repeat(false, width * height),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of currently occupied cells. Always equals the total area of
    /// the placements whose guards are still alive.
    pub fn occupied(&self) -> usize {
        self.bits.count_ones()
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// A placement is legal only if every transformed cell lands in bounds
    /// on an unoccupied cell. Orientation cells are non-negative, so only
    /// the upper bounds need checking.
    pub fn can_place(&self, cells: &[Cell], row: usize, col: usize) -> bool {
        cells.iter().all(|cell| {
            let r = row + cell.row as usize;
            let c = col + cell.col as usize;
            r < self.height && c < self.width && !self.bits[self.index(r, c)]
        })
    }

    /// Marks the orientation's cells occupied and hands back a guard that
    /// clears exactly those cells again when dropped. Returns `None` when
    /// the placement is illegal, leaving the grid untouched.
    ///
    /// Routing every mutation through the guard keeps the undo paired with
    /// the placement on every exit path of a search branch, so no sibling
    /// branch ever observes ghost occupied cells.
    pub fn try_place<'g, 'o>(
        &'g mut self,
        cells: &'o [Cell],
        row: usize,
        col: usize,
    ) -> Option<Placed<'g, 'o>> {
        if !self.can_place(cells, row, col) {
            return None;
        }
        for cell in cells {
            let idx = self.index(row + cell.row as usize, col + cell.col as usize);
            self.bits.set(idx, true);
        }
        Some(Placed {
            grid: self,
            cells,
            row,
            col,
        })
    }
}

/// Scoped placement: while alive, the cells it covers read as occupied;
/// dropping it restores the grid bit-for-bit to its pre-placement state.
pub struct Placed<'g, 'o> {
    grid: &'g mut PlacementGrid,
    cells: &'o [Cell],
    row: usize,
    col: usize,
}

impl Placed<'_, '_> {
    /// Grid access for nested placements while this one is held.
    pub fn grid(&mut self) -> &mut PlacementGrid {
        self.grid
    }
}

impl Drop for Placed<'_, '_> {
    fn drop(&mut self) {
        for cell in self.cells {
            let idx = self
                .grid
                .index(self.row + cell.row as usize, self.col + cell.col as usize);
            self.grid.bits.set(idx, false);
        }
    }
}
