//! Placement records for positioned items.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identity of an item: its index in the expanded input sequence.
pub type ItemId = usize;

/// Where and how one item ended up inside a container.
///
/// Positions and dimensions are plain `[x, y, z]` arrays so the record can be
/// handed to reporting code without pulling in any geometry types.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// The placed item.
    pub item_id: ItemId,

    /// Index of the container in the opened-container list.
    pub container_index: usize,

    /// Minimum corner of the placed box.
    pub position: [f64; 3],

    /// Extents of the box as oriented inside the container.
    pub dimensions: [f64; 3],

    /// Index of the rotation used (0-5, in enumeration order).
    pub rotation_index: usize,

    /// Whether the position came from a hint provider rather than the
    /// exhaustive scan.
    pub from_hint: bool,
}

impl Placement {
    /// Creates a new placement.
    pub fn new(
        item_id: ItemId,
        container_index: usize,
        position: [f64; 3],
        dimensions: [f64; 3],
        rotation_index: usize,
    ) -> Self {
        Self {
            item_id,
            container_index,
            position,
            dimensions,
            rotation_index,
            from_hint: false,
        }
    }

    /// Marks whether the placement was taken from a hint.
    pub fn with_hint(mut self, from_hint: bool) -> Self {
        self.from_hint = from_hint;
        self
    }

    /// Returns the x coordinate.
    pub fn x(&self) -> f64 {
        self.position[0]
    }

    /// Returns the y coordinate.
    pub fn y(&self) -> f64 {
        self.position[1]
    }

    /// Returns the z coordinate.
    pub fn z(&self) -> f64 {
        self.position[2]
    }

    /// Volume of the placed box.
    pub fn volume(&self) -> f64 {
        self.dimensions[0] * self.dimensions[1] * self.dimensions[2]
    }
}

/// Placement statistics for a set of placements.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementStats {
    /// Total number of placements.
    pub count: usize,
    /// Number of placements accepted from a hint.
    pub hinted_count: usize,
    /// Distribution of rotation indices used.
    pub rotation_distribution: std::collections::BTreeMap<usize, usize>,
    /// Distribution of placements per container.
    pub container_distribution: std::collections::BTreeMap<usize, usize>,
}

impl PlacementStats {
    /// Computes statistics from a set of placements.
    pub fn from_placements(placements: &[Placement]) -> Self {
        let mut stats = Self {
            count: placements.len(),
            ..Default::default()
        };

        for p in placements {
            if p.from_hint {
                stats.hinted_count += 1;
            }
            *stats
                .rotation_distribution
                .entry(p.rotation_index)
                .or_insert(0) += 1;
            *stats
                .container_distribution
                .entry(p.container_index)
                .or_insert(0) += 1;
        }

        stats
    }
}
