use miette::*;

use crate::shape::ShapeCatalog;

/// A rectangular target area plus the required instance count per shape id.
#[derive(Debug, Clone)]
pub struct Region {
    pub width: usize,
    pub height: usize,
    /// `counts[id]` is the number of instances of shape `id` that must be
    /// placed; zero means the shape is unused in this region.
    pub counts: Vec<usize>,
}

impl Region {
    pub fn new(width: usize, height: usize, counts: Vec<usize>) -> Result<Self> {
        if width == 0 || height == 0 {
            bail!("region dimensions must be positive, got {width}x{height}");
        }
        Ok(Self {
            width,
            height,
            counts,
        })
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Checks the count list against the catalog: the arity must match, and
    /// every shape the region actually requires must be defined.
    pub fn validate(&self, catalog: &ShapeCatalog) -> Result<()> {
        if self.counts.len() != catalog.len() {
            bail!(
                "count list has {} entries but the catalog has {} shapes",
                self.counts.len(),
                catalog.len()
            );
        }
        for (id, &count) in self.counts.iter().enumerate() {
            if count > 0 {
                catalog.shape(id)?;
            }
        }
        Ok(())
    }

    /// Total number of cells the required instances cover. Any orientation
    /// of a shape has the same area, so this is independent of placement.
    pub fn cells_needed(&self, catalog: &ShapeCatalog) -> Result<usize> {
        self.validate(catalog)?;
        let mut total = 0;
        for (id, &count) in self.counts.iter().enumerate() {
            if count > 0 {
                total += count * catalog.shape(id)?.area;
            }
        }
        Ok(total)
    }
}
