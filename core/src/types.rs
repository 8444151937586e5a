use ndarray::Array2;

/// Single axis value used for rows, columns, width and height.
pub type Coord = u8;

/// Count type used for hazard counts and total-cell counts.
pub type CellCount = u16;

/// Grid position as `(row, col)`.
pub type Coord2 = (Coord, Coord);

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

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Row/column offsets of the eight compass neighbors.
const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

fn offset(center: Coord2, (dr, dc): (i8, i8), (rows, cols): Coord2) -> Option<Coord2> {
    let row = center.0.checked_add_signed(dr)?;
    let col = center.1.checked_add_signed(dc)?;
    (row < rows && col < cols).then_some((row, col))
}

/// Iterates over the in-bounds neighbors of a position, no wraparound.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    /// `bounds` is `(rows, cols)`.
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = OFFSETS.get(usize::from(self.index)) {
            self.index += 1;
            if let Some(pos) = offset(self.center, delta, self.bounds) {
                return Some(pos);
            }
        }
        None
    }
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        // boards are built from `Coord` sized configs, so the dims always fit
        let bounds = (
            Coord::try_from(rows).unwrap_or(Coord::MAX),
            Coord::try_from(cols).unwrap_or(Coord::MAX),
        );
        NeighborIter::new(center, bounds)
    }
}
