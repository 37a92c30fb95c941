//! Polyomino region-packing feasibility.
//!
//! Given a catalog of tile shapes (each usable in up to eight
//! rotation/reflection orientations) and a list of rectangular regions that
//! each require some number of instances per shape, count the regions in
//! which every required instance can be placed without overlap or going out
//! of bounds. Pure yes/no feasibility per region; no notion of a best
//! packing, and unused cells are allowed.

pub mod grid;
pub mod parse;
pub mod region;
pub mod shape;
pub mod solver;

use miette::*;
use rayon::prelude::*;

use crate::solver::Solver;

/// Parses the puzzle text and returns the number of feasible regions.
///
/// Regions are independent, so they are evaluated in parallel, each on its
/// own grid over the shared read-only catalog.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> Result<String> {
    let (catalog, regions) = parse::parse_input(input)?;

    for (index, region) in regions.iter().enumerate() {
        region
            .validate(&catalog)
            .wrap_err_with(|| format!("region {index} ({}x{})", region.width, region.height))?;
    }

    let solver = Solver::new(&catalog);
    let verdicts = regions
        .par_iter()
        .map(|region| solver.fits(region))
        .collect::<Result<Vec<_>>>()?;
    let feasible = verdicts.into_iter().filter(|&fit| fit).count();
    tracing::debug!(total = regions.len(), feasible, "evaluated regions");

    Ok(feasible.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() -> Result<()> {
        let input = "0:
###
##.
##.

1:
###
##.
.##

2:
.##
###
##.

3:
##.
###
##.

4:
###
#..
###

5:
###
.#.
###

4x4: 0 0 0 0 2 0
12x5: 1 0 1 0 2 2
12x5: 1 0 1 0 3 2";
        assert_eq!("2", process(input)?);
        Ok(())
    }

    #[test]
    fn exact_fill_is_feasible() -> Result<()> {
        let input = "0:
#

2x2: 4";
        assert_eq!("1", process(input)?);
        Ok(())
    }

    #[test]
    fn area_overflow_is_infeasible() -> Result<()> {
        let input = "0:
#

2x2: 5";
        assert_eq!("0", process(input)?);
        Ok(())
    }

    #[test]
    fn dominoes_tile_and_leftovers_are_allowed() -> Result<()> {
        let input = "0:
##

2x2: 2
3x1: 1";
        assert_eq!("2", process(input)?);
        Ok(())
    }

    #[test]
    fn count_arity_mismatch_aborts() {
        let input = "0:
##

2x2: 1 1";
        assert!(process(input).is_err());
    }

    #[test]
    fn undefined_required_shape_aborts() {
        let input = "0:
##

2:
#.
##

3x3: 1 1 1";
        assert!(process(input).is_err());
    }
}
