use chumsky::prelude::*;
use itertools::Itertools;
use miette::*;

use crate::region::Region;
use crate::shape::{Cell, Shape, ShapeCatalog};

/// Raw input items in file order, before catalog resolution.
#[derive(Debug)]
enum InputItem {
    /// Shape id plus its visual grid rows, kept raw so the rectangularity
    /// check can name the offending shape.
    Shape(usize, Vec<String>),
    Region(usize, usize, Vec<usize>),
}

fn parser<'a>() -> impl Parser<'a, &'a str, Vec<InputItem>, extra::Err<Rich<'a, char>>> {
    let newline = text::newline();
    let number = text::int(10).from_str::<usize>().unwrapped();

    // Shape block: "0:" (colon optional) followed by grid rows of '#'/'.'.
    let shape_rows = one_of("#.")
        .repeated()
        .at_least(1)
        .collect::<String>()
        .separated_by(newline)
        .at_least(1)
        .collect::<Vec<String>>();
    let shape_suffix = just(':')
        .or_not()
        .ignore_then(newline)
        .ignore_then(shape_rows)
        .map(Suffix::Rows);

    // Region line: "WxH: c0 c1 c2 ..."
    let region_suffix = just('x')
        .ignore_then(number)
        .then_ignore(just(':').padded())
        .then(number.separated_by(just(' ')).at_least(1).collect())
        .map(|(height, counts)| Suffix::Region(height, counts));

    let item = number
        .then(choice((region_suffix, shape_suffix)))
        .map(|(prefix, suffix)| match suffix {
            Suffix::Rows(rows) => InputItem::Shape(prefix, rows),
            Suffix::Region(height, counts) => InputItem::Region(prefix, height, counts),
        });

    item.separated_by(newline.repeated().at_least(1))
        .allow_trailing()
        .collect()
        .then_ignore(end())
}

enum Suffix {
    Rows(Vec<String>),
    Region(usize, Vec<usize>),
}

fn shape_from_rows(id: usize, rows: &[String]) -> Result<Shape> {
    if !rows.iter().map(|row| row.len()).all_equal() {
        bail!("shape {id}: grid rows have unequal lengths");
    }
    let mut cells = Vec::new();
    for (row, line) in rows.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            if ch == '#' {
                cells.push(Cell::new(row as i8, col as i8));
            }
        }
    }
    Shape::from_footprint(id, cells)
}

/// Parses the full puzzle text into a shape catalog and the region list.
///
/// Fails loudly on malformed blocks, degenerate shapes, and duplicate ids;
/// count-list arity and shape references are checked per region by the
/// caller so the error can name which region is at fault.
pub fn parse_input(input: &str) -> Result<(ShapeCatalog, Vec<Region>)> {
    let items = parser()
        .parse(input.trim())
        .into_result()
        .map_err(|e| miette!("parse failed: {:?}", e))?;

    let mut catalog = ShapeCatalog::new();
    let mut regions = Vec::new();
    for item in items {
        match item {
            InputItem::Shape(id, rows) => catalog.insert(shape_from_rows(id, &rows)?)?,
            InputItem::Region(width, height, counts) => {
                regions.push(Region::new(width, height, counts)?);
            }
        }
    }

    Ok((catalog, regions))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "0:
###
##.

1
.#
##

4x4: 1 0
2x3: 0 2";

    #[test]
    fn parses_shapes_and_regions() {
        let (catalog, regions) = parse_input(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.shape(0).unwrap().area, 5);
        assert_eq!(catalog.shape(1).unwrap().area, 3);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].width, 4);
        assert_eq!(regions[0].height, 4);
        assert_eq!(regions[0].counts, vec![1, 0]);
        assert_eq!(regions[1].width, 2);
        assert_eq!(regions[1].height, 3);
    }

    #[test]
    fn shape_header_colon_is_optional() {
        let (catalog, _) = parse_input("7\n##").unwrap();
        assert_eq!(catalog.shape(7).unwrap().area, 2);
    }

    #[test]
    fn non_rectangular_shape_is_rejected() {
        let input = "0:\n###\n##";
        assert!(parse_input(input).is_err());
    }

    #[test]
    fn cell_free_shape_is_rejected() {
        let input = "0:\n...\n...";
        assert!(parse_input(input).is_err());
    }

    #[test]
    fn duplicate_shape_id_is_rejected() {
        let input = "0:\n##\n\n0:\n#.";
        assert!(parse_input(input).is_err());
    }

    #[test]
    fn malformed_region_dimensions_are_rejected() {
        assert!(parse_input("0:\n##\n\n4y4: 1").is_err());
    }

    #[test]
    fn zero_sized_region_is_rejected() {
        assert!(parse_input("0:\n##\n\n0x4: 1").is_err());
    }
}
