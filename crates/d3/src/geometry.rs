//! 3D geometry types.
//!
//! Axis-aligned boxes only: an item is three extents, a placed box is those
//! extents (possibly permuted) at a minimum-corner position.

use nalgebra::Vector3;
use u_packing_core::{Error, ItemId, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance used by all containment and overlap comparisons.
pub const EPSILON: f64 = 1e-9;

/// Minimum corner of a box inside its container.
pub type Position = Vector3<f64>;

/// One of the six axis-aligned orientations of a box.
///
/// Variant names spell out which original extent lands on the x, y and z
/// axes. The declaration order is the search priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    /// (l, w, h)
    #[default]
    Lwh,
    /// (l, h, w)
    Lhw,
    /// (w, l, h)
    Wlh,
    /// (w, h, l)
    Whl,
    /// (h, l, w)
    Hlw,
    /// (h, w, l)
    Hwl,
}

impl Rotation {
    /// All rotations in enumeration order.
    pub const ALL: [Rotation; 6] = [
        Rotation::Lwh,
        Rotation::Lhw,
        Rotation::Wlh,
        Rotation::Whl,
        Rotation::Hlw,
        Rotation::Hwl,
    ];

    /// Position of this rotation in [`Rotation::ALL`].
    pub fn index(self) -> usize {
        match self {
            Rotation::Lwh => 0,
            Rotation::Lhw => 1,
            Rotation::Wlh => 2,
            Rotation::Whl => 3,
            Rotation::Hlw => 4,
            Rotation::Hwl => 5,
        }
    }

    /// Rotation at the given enumeration index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Source axis for each target axis, as (x_idx, y_idx, z_idx).
    pub fn axes(self) -> (usize, usize, usize) {
        match self {
            Rotation::Lwh => (0, 1, 2),
            Rotation::Lhw => (0, 2, 1),
            Rotation::Wlh => (1, 0, 2),
            Rotation::Whl => (1, 2, 0),
            Rotation::Hlw => (2, 0, 1),
            Rotation::Hwl => (2, 1, 0),
        }
    }
}

/// Extents of a box along x, y and z (length, width, height).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dimensions {
    extents: Vector3<f64>,
}

impl Dimensions {
    /// Creates dimensions without validating them.
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            extents: Vector3::new(length, width, height),
        }
    }

    /// Creates dimensions, rejecting non-positive or non-finite extents.
    pub fn try_new(length: f64, width: f64, height: f64) -> Result<Self> {
        let dims = Self::new(length, width, height);
        dims.validate()?;
        Ok(dims)
    }

    /// Creates dimensions from an `[l, w, h]` array.
    pub fn from_array(extents: [f64; 3]) -> Self {
        Self::new(extents[0], extents[1], extents[2])
    }

    /// Returns the extents as a vector.
    pub fn extents(&self) -> &Vector3<f64> {
        &self.extents
    }

    /// Returns the extents as an `[l, w, h]` array.
    pub fn to_array(&self) -> [f64; 3] {
        [self.extents.x, self.extents.y, self.extents.z]
    }

    /// Returns the length (x extent).
    pub fn length(&self) -> f64 {
        self.extents.x
    }

    /// Returns the width (y extent).
    pub fn width(&self) -> f64 {
        self.extents.y
    }

    /// Returns the height (z extent).
    pub fn height(&self) -> f64 {
        self.extents.z
    }

    /// Returns the volume.
    pub fn volume(&self) -> f64 {
        self.extents.x * self.extents.y * self.extents.z
    }

    /// Returns true if every extent is finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.extents.iter().all(|e| e.is_finite() && *e > 0.0)
    }

    /// Checks that every extent is finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::InvalidGeometry(format!(
                "All dimensions must be positive and finite, got ({}, {}, {})",
                self.extents.x, self.extents.y, self.extents.z
            )))
        }
    }

    /// Returns these dimensions permuted by `rotation`.
    pub fn rotated(&self, rotation: Rotation) -> Dimensions {
        let (x_idx, y_idx, z_idx) = rotation.axes();
        Self::new(
            self.extents[x_idx],
            self.extents[y_idx],
            self.extents[z_idx],
        )
    }

    /// Returns true if `other` is one of the six permutations of `self`.
    pub fn is_permutation_of(&self, other: &Dimensions) -> bool {
        Rotation::ALL
            .iter()
            .any(|r| self.rotated(*r).to_array() == other.to_array())
    }
}

/// All six oriented shapes of `dims`, in search priority order.
pub fn rotations(dims: &Dimensions) -> [Dimensions; 6] {
    Rotation::ALL.map(|r| dims.rotated(r))
}

/// An item to be packed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    /// Index in the input sequence.
    pub id: ItemId,
    /// Canonical (unrotated) dimensions.
    pub dimensions: Dimensions,
}

impl Item {
    /// Creates a new item.
    pub fn new(id: ItemId, length: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            dimensions: Dimensions::new(length, width, height),
        }
    }

    /// Returns the volume of the item.
    pub fn volume(&self) -> f64 {
        self.dimensions.volume()
    }

    /// Validates the item's dimensions.
    pub fn validate(&self) -> Result<()> {
        if self.dimensions.is_valid() {
            return Ok(());
        }
        Err(Error::InvalidGeometry(format!(
            "Dimensions of item {} must be positive and finite, got {:?}",
            self.id,
            self.dimensions.to_array()
        )))
    }
}

/// Expands `(dimensions, quantity)` records into individual items, keeping
/// input order. Ids are assigned sequentially from 0.
pub fn expand_items<I>(records: I) -> Vec<Item>
where
    I: IntoIterator<Item = (Dimensions, usize)>,
{
    let mut items = Vec::new();
    for (dimensions, quantity) in records {
        for _ in 0..quantity {
            items.push(Item {
                id: items.len(),
                dimensions,
            });
        }
    }
    items
}

/// Simple 3D AABB (Axis-Aligned Bounding Box).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3D {
    /// Minimum corner.
    pub min: Vector3<f64>,
    /// Maximum corner.
    pub max: Vector3<f64>,
}

impl Aabb3D {
    /// Creates an AABB from position and dimensions.
    pub fn from_position_and_size(position: &Position, size: &Dimensions) -> Self {
        Self {
            min: *position,
            max: position + size.extents(),
        }
    }

    /// Checks if this AABB intersects another with positive volume.
    ///
    /// Touching faces do not count: on every axis one interval must end
    /// strictly after the other begins.
    pub fn intersects(&self, other: &Aabb3D) -> bool {
        (0..3).all(|axis| {
            self.min[axis] < other.max[axis] - EPSILON && other.min[axis] < self.max[axis] - EPSILON
        })
    }

    /// Returns the volume of this AABB.
    pub fn volume(&self) -> f64 {
        let size = self.max - self.min;
        size.x * size.y * size.z
    }
}

/// A placed item: oriented dimensions at a position inside one container.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacedBox {
    /// The originating item.
    pub item_id: ItemId,
    /// Index of the owning container in the opened-container list.
    pub container_index: usize,
    /// Minimum corner.
    pub position: Position,
    /// Dimensions as oriented inside the container.
    pub dimensions: Dimensions,
    /// Rotation applied to the item's canonical dimensions.
    pub rotation: Rotation,
}

impl PlacedBox {
    /// Returns the bounding box occupied by this placement.
    pub fn aabb(&self) -> Aabb3D {
        Aabb3D::from_position_and_size(&self.position, &self.dimensions)
    }

    /// Returns the volume of the box.
    pub fn volume(&self) -> f64 {
        self.dimensions.volume()
    }
}

/// True iff a box of `oriented` extents at `position` lies entirely within a
/// container of extents `container`.
pub fn fits_within(container: &Dimensions, oriented: &Dimensions, position: &Position) -> bool {
    (0..3).all(|axis| {
        position[axis] >= -EPSILON
            && position[axis] + oriented.extents()[axis] <= container.extents()[axis] + EPSILON
    })
}

/// True iff two placed boxes intersect with positive volume.
pub fn overlaps(a: &PlacedBox, b: &PlacedBox) -> bool {
    a.aabb().intersects(&b.aabb())
}
