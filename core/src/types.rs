/// Position of a cell on the board, counted row-major from the top-left corner.
pub type CellIndex = u8;

/// Count type used for mine counts and cell counts.
pub type CellCount = u8;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (u8, u8);

/// Side length of the square board.
pub const GRID_SIDE: u8 = 5;

/// Number of cells on the board.
pub const TOTAL_CELLS: CellCount = GRID_SIDE * GRID_SIDE;

/// Fewest mines a configuration may hold.
pub const MIN_MINES: CellCount = 1;

/// Most mines a configuration may hold, leaving at least one safe cell.
pub const MAX_MINES: CellCount = TOTAL_CELLS - 1;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

impl ToNdIndex for CellIndex {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        index_to_coords(self).to_nd_index()
    }
}

pub const fn index_to_coords(index: CellIndex) -> Coord2 {
    (index / GRID_SIDE, index % GRID_SIDE)
}

pub const fn coords_to_index((row, col): Coord2) -> CellIndex {
    row * GRID_SIDE + col
}

pub const fn is_valid_index(index: CellIndex) -> bool {
    index < TOTAL_CELLS
}

/// Iterates every cell index in ascending order.
pub fn all_indices() -> impl Iterator<Item = CellIndex> {
    0..TOTAL_CELLS
}
