use std::collections::HashSet;

use miette::*;

/// A single filled cell of a shape, as a (row, col) offset from the top-left
/// corner of the shape's bounding box.
///
/// `Ord` is row-major, so a sorted cell list is the canonical form used to
/// detect duplicate orientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: i8,
    pub col: i8,
}

impl Cell {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }
}

/// One rotation/reflection variant of a shape: normalized so the minimum row
/// and minimum column are both 0, sorted row-major.
pub type Orientation = Vec<Cell>;

/// A tile shape together with its full symmetry class.
#[derive(Debug, Clone)]
pub struct Shape {
    pub id: usize,
    /// Cell count; rotation and reflection preserve area, so this is the
    /// same for every orientation.
    pub area: usize,
    /// Unique orientations, at most 8. Generation order is fixed
    /// (rotation-major, flip-minor) so search traces are reproducible.
    pub orientations: Vec<Orientation>,
}

impl Shape {
    /// Builds a shape from a raw footprint in arbitrary position.
    ///
    /// An empty footprint is rejected: a shape with zero cells would
    /// trivially "fit" anywhere and corrupt feasibility results downstream.
    pub fn from_footprint(id: usize, cells: Vec<Cell>) -> Result<Self> {
        if cells.is_empty() {
            bail!("shape {id}: footprint has no filled cells");
        }
        let area = cells.len();
        Ok(Self {
            id,
            area,
            orientations: all_orientations(cells),
        })
    }
}

/// Shifts the cells so the bounding box starts at (0, 0), then sorts them
/// into canonical order. Idempotent on already-normalized input.
pub(crate) fn normalize(cells: &mut Orientation) {
    if cells.is_empty() {
        return;
    }
    let min_row = cells.iter().map(|c| c.row).min().unwrap_or(0);
    let min_col = cells.iter().map(|c| c.col).min().unwrap_or(0);
    for cell in cells.iter_mut() {
        cell.row -= min_row;
        cell.col -= min_col;
    }
    cells.sort_unstable();
}

// rotate 90 degrees clockwise: (r, c) -> (c, -r)
fn rotate90(cells: &Orientation) -> Orientation {
    cells.iter().map(|c| Cell::new(c.col, -c.row)).collect()
}

// mirror across the vertical axis: (r, c) -> (r, -c)
fn flip_horizontal(cells: &Orientation) -> Orientation {
    cells.iter().map(|c| Cell::new(c.row, -c.col)).collect()
}

/// Generates the footprint's image under the 8-element symmetry group of the
/// square: 4 rotations crossed with {identity, horizontal mirror}, each
/// normalized and deduplicated by canonical form. Symmetric shapes come out
/// with fewer than 8 variants with no special casing.
fn all_orientations(footprint: Vec<Cell>) -> Vec<Orientation> {
    let mut seen: HashSet<Orientation> = HashSet::new();
    let mut orientations = Vec::new();
    let mut current = footprint;

    for _ in 0..4 {
        for candidate in [current.clone(), flip_horizontal(&current)] {
            let mut normalized = candidate;
            normalize(&mut normalized);
            if seen.insert(normalized.clone()) {
                orientations.push(normalized);
            }
        }
        current = rotate90(&current);
    }

    orientations
}

/// Id-indexed shape lookup, built once per input and read-only afterwards.
///
/// Ids need not be dense; a gap only becomes an error when a region actually
/// requires the missing shape.
#[derive(Debug, Default)]
pub struct ShapeCatalog {
    slots: Vec<Option<Shape>>,
}

impl ShapeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of id slots, i.e. the arity every region's count list must
    /// match.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn insert(&mut self, shape: Shape) -> Result<()> {
        if self.slots.len() <= shape.id {
            self.slots.resize_with(shape.id + 1, || None);
        }
        let slot = &mut self.slots[shape.id];
        if slot.is_some() {
            bail!("shape {}: defined more than once", shape.id);
        }
        *slot = Some(shape);
        Ok(())
    }

    pub fn get(&self, id: usize) -> Option<&Shape> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    /// Resolves a required shape id, failing loudly when it was never
    /// defined rather than defaulting to zero orientations.
    pub fn shape(&self, id: usize) -> Result<&Shape> {
        self.get(id)
            .ok_or_else(|| miette!("shape {id} is required but not in the catalog"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn cells(raw: &[(i8, i8)]) -> Vec<Cell> {
        raw.iter().map(|&(r, c)| Cell::new(r, c)).collect()
    }

    #[rstest]
    #[case::monomino(&[(0, 0)], 1)]
    #[case::domino(&[(0, 0), (0, 1)], 2)]
    #[case::square(&[(0, 0), (0, 1), (1, 0), (1, 1)], 1)]
    #[case::l_tromino(&[(0, 0), (1, 0), (1, 1)], 4)]
    #[case::t_tetromino(&[(0, 0), (0, 1), (0, 2), (1, 1)], 4)]
    #[case::s_tetromino(&[(0, 1), (0, 2), (1, 0), (1, 1)], 4)]
    fn orientation_counts(#[case] footprint: &[(i8, i8)], #[case] expected: usize) {
        let shape = Shape::from_footprint(0, cells(footprint)).unwrap();
        assert_eq!(shape.orientations.len(), expected);
    }

    #[test]
    fn orientations_are_normalized_and_sorted() {
        let shape = Shape::from_footprint(0, cells(&[(2, 3), (3, 3), (3, 4)])).unwrap();
        for orientation in &shape.orientations {
            assert_eq!(orientation.len(), shape.area);
            assert_eq!(orientation.iter().map(|c| c.row).min(), Some(0));
            assert_eq!(orientation.iter().map(|c| c.col).min(), Some(0));
            assert!(orientation.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        let mut once = cells(&[(1, 2), (2, 2), (2, 1)]);
        normalize(&mut once);
        let mut twice = once.clone();
        normalize(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_footprint_is_rejected() {
        assert!(Shape::from_footprint(3, Vec::new()).is_err());
    }

    #[test]
    fn catalog_rejects_duplicate_ids() {
        let mut catalog = ShapeCatalog::new();
        catalog
            .insert(Shape::from_footprint(0, cells(&[(0, 0)])).unwrap())
            .unwrap();
        assert!(catalog
            .insert(Shape::from_footprint(0, cells(&[(0, 0)])).unwrap())
            .is_err());
    }

    #[test]
    fn catalog_reports_missing_ids() {
        let mut catalog = ShapeCatalog::new();
        catalog
            .insert(Shape::from_footprint(2, cells(&[(0, 0)])).unwrap())
            .unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.shape(2).is_ok());
        assert!(catalog.shape(1).is_err());
        assert!(catalog.shape(7).is_err());
    }
}
