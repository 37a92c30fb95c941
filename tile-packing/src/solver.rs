use miette::*;

use crate::grid::PlacementGrid;
use crate::region::Region;
use crate::shape::{Orientation, ShapeCatalog};

/// Feasibility verdict for one region.
///
/// `Inconclusive` only occurs under a node budget: the search ran out of
/// attempts before either finding an arrangement or exhausting the space,
/// which is not the same thing as proven infeasibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Fit,
    Unfit,
    Inconclusive,
}

/// Verdict plus the number of placement attempts the search made. A region
/// rejected by the area precheck reports zero nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub verdict: Verdict,
    pub nodes: u64,
}

/// Backtracking feasibility search: decides whether all required shape
/// instances can be placed in a region without overlap or going out of
/// bounds. The catalog is read-only, so one solver can evaluate many
/// regions, including in parallel.
pub struct Solver<'c> {
    catalog: &'c ShapeCatalog,
    budget: Option<u64>,
}

impl<'c> Solver<'c> {
    pub fn new(catalog: &'c ShapeCatalog) -> Self {
        Self {
            catalog,
            budget: None,
        }
    }

    /// Caps the number of placement attempts. An exhausted budget yields
    /// [`Verdict::Inconclusive`] instead of conflating it with infeasibility.
    pub fn with_budget(mut self, nodes: u64) -> Self {
        self.budget = Some(nodes);
        self
    }

    /// Pure feasibility, the boolean contract. An inconclusive budgeted
    /// search is an error rather than a silent "false".
    pub fn fits(&self, region: &Region) -> Result<bool> {
        match self.check(region)?.verdict {
            Verdict::Fit => Ok(true),
            Verdict::Unfit => Ok(false),
            Verdict::Inconclusive => Err(miette!(
                "search budget exhausted before a verdict for {}x{} region",
                region.width,
                region.height
            )),
        }
    }

    /// Full outcome, including the node count used by the precheck tests
    /// and by budgeted callers.
    pub fn check(&self, region: &Region) -> Result<Outcome> {
        let needed = region.cells_needed(self.catalog)?;

        // Mandatory fast reject: more required cells than the region has.
        // The search itself is never invoked on such inputs.
        if needed > region.area() {
            return Ok(Outcome {
                verdict: Verdict::Unfit,
                nodes: 0,
            });
        }

        // Flatten the count multiset into one entry per instance, catalog
        // order then repetition order, so the scan is deterministic.
        let mut instances: Vec<(usize, &'c [Orientation])> = Vec::new();
        for (id, &count) in region.counts.iter().enumerate() {
            if count > 0 {
                let shape = self.catalog.shape(id)?;
                for _ in 0..count {
                    instances.push((id, &shape.orientations));
                }
            }
        }

        let mut search = Search {
            instances,
            width: region.width,
            height: region.height,
            budget: self.budget,
            nodes: 0,
        };
        let mut grid = PlacementGrid::new(region.width, region.height);
        let verdict = match search.place_from(0, 0, &mut grid) {
            Some(true) => Verdict::Fit,
            Some(false) => Verdict::Unfit,
            None => Verdict::Inconclusive,
        };
        Ok(Outcome {
            verdict,
            nodes: search.nodes,
        })
    }
}

/// One in-flight search. The instance list is fixed; the cursor into it plus
/// the grid is the whole search state, so recursion allocates nothing.
struct Search<'c> {
    instances: Vec<(usize, &'c [Orientation])>,
    width: usize,
    height: usize,
    budget: Option<u64>,
    nodes: u64,
}

impl Search<'_> {
    /// Places the instance at `cursor` and recurses; first fit wins.
    /// Returns `None` when the node budget runs out.
    ///
    /// `min_anchor` breaks the symmetry between consecutive instances of the
    /// same shape: interchangeable copies are placed at non-decreasing
    /// anchor positions, which skips permutations of the same arrangement
    /// without changing the verdict.
    fn place_from(
        &mut self,
        cursor: usize,
        min_anchor: usize,
        grid: &mut PlacementGrid,
    ) -> Option<bool> {
        // All instances placed; leftover free cells are permitted.
        if cursor == self.instances.len() {
            return Some(true);
        }

        let (shape_id, orientations) = self.instances[cursor];

        for orientation in orientations {
            for anchor in min_anchor..self.width * self.height {
                if let Some(budget) = self.budget {
                    if self.nodes >= budget {
                        return None;
                    }
                }
                self.nodes += 1;

                let row = anchor / self.width;
                let col = anchor % self.width;
                if let Some(mut placed) = grid.try_place(orientation, row, col) {
                    let next_min = match self.instances.get(cursor + 1) {
                        Some(&(next_id, _)) if next_id == shape_id => anchor,
                        _ => 0,
                    };
                    if self.place_from(cursor + 1, next_min, placed.grid())? {
                        return Some(true);
                    }
                    // Dropping `placed` undoes the attempt before the next
                    // candidate is tried.
                }
            }
        }

        // No orientation at no position admits this instance.
        Some(false)
    }
}
