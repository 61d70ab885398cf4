//! 3D boundary types: opened containers and the catalog of standard sizes.

use crate::geometry::{Dimensions, Item, PlacedBox};
use crate::search::Candidate;
use u_packing_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A container that has been opened and holds placed boxes.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Container {
    /// Index in the opened-container list.
    index: usize,

    /// Container extents.
    dimensions: Dimensions,

    /// Catalog position of the size, when opened from a catalog.
    catalog_index: Option<usize>,

    /// Boxes in placement order.
    boxes: Vec<PlacedBox>,
}

impl Container {
    /// Opens an empty container with the given index and extents.
    pub fn new(index: usize, dimensions: Dimensions) -> Self {
        Self {
            index,
            dimensions,
            catalog_index: None,
            boxes: Vec::new(),
        }
    }

    /// Opens an empty container of a catalog size.
    pub fn from_catalog(index: usize, catalog_index: usize, dimensions: Dimensions) -> Self {
        Self {
            catalog_index: Some(catalog_index),
            ..Self::new(index, dimensions)
        }
    }

    /// Returns the index in the opened-container list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the container extents.
    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    /// Returns the catalog position of the size, if any.
    pub fn catalog_index(&self) -> Option<usize> {
        self.catalog_index
    }

    /// Returns the boxes placed so far.
    pub fn boxes(&self) -> &[PlacedBox] {
        &self.boxes
    }

    /// Returns the container volume.
    pub fn volume(&self) -> f64 {
        self.dimensions.volume()
    }

    /// Returns the total volume of the placed boxes.
    pub fn placed_volume(&self) -> f64 {
        self.boxes.iter().map(PlacedBox::volume).sum()
    }

    /// Returns placed volume over container volume.
    pub fn utilization(&self) -> f64 {
        let volume = self.volume();
        if volume > 0.0 {
            self.placed_volume() / volume
        } else {
            0.0
        }
    }

    /// Records `item` at the position and rotation found by the search.
    ///
    /// The candidate must come from a search against this container's current
    /// boxes; no legality check is repeated here.
    pub fn place(&mut self, item: &Item, candidate: &Candidate) -> &PlacedBox {
        self.boxes.push(PlacedBox {
            item_id: item.id,
            container_index: self.index,
            position: candidate.position,
            dimensions: candidate.dimensions,
            rotation: candidate.rotation,
        });
        &self.boxes[self.boxes.len() - 1]
    }
}

/// Ordered list of standard container sizes.
///
/// The order is significant: the allocator opens the first size that accepts
/// an item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContainerCatalog {
    sizes: Vec<Dimensions>,
}

impl ContainerCatalog {
    /// Creates a catalog, rejecting an empty list or any invalid size.
    pub fn new(sizes: Vec<Dimensions>) -> Result<Self> {
        let catalog = Self { sizes };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Creates a catalog from `[l, w, h]` triples.
    pub fn from_triples(triples: &[[f64; 3]]) -> Result<Self> {
        Self::new(triples.iter().copied().map(Dimensions::from_array).collect())
    }

    /// The eight standard shipping carton sizes.
    pub fn standard() -> Self {
        let sizes = [
            [35.0, 23.0, 13.0],
            [37.0, 26.0, 13.0],
            [38.0, 26.0, 13.0],
            [40.0, 28.0, 16.0],
            [42.0, 30.0, 18.0],
            [42.0, 30.0, 40.0],
            [52.0, 40.0, 17.0],
            [54.0, 45.0, 36.0],
        ];
        Self {
            sizes: sizes.iter().copied().map(Dimensions::from_array).collect(),
        }
    }

    /// Checks that the catalog is non-empty and every size is positive.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(Error::InvalidBoundary(
                "Container catalog must contain at least one size".into(),
            ));
        }

        for (i, size) in self.sizes.iter().enumerate() {
            if !size.is_valid() {
                return Err(Error::InvalidBoundary(format!(
                    "Catalog entry {} has non-positive dimensions {:?}",
                    i,
                    size.to_array()
                )));
            }
        }

        Ok(())
    }

    /// Returns the sizes in catalog order.
    pub fn sizes(&self) -> &[Dimensions] {
        &self.sizes
    }

    /// Returns the size at `index`.
    pub fn get(&self, index: usize) -> Option<&Dimensions> {
        self.sizes.get(index)
    }

    /// Returns the number of sizes.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Returns true if the catalog has no sizes.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Iterates over the sizes in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Dimensions> {
        self.sizes.iter()
    }
}

impl Default for ContainerCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
