//! Placement search: the first legal (rotation, position) for an item.
//!
//! # Search order
//!
//! 1. If a hint provider is given, its single proposal is tried first.
//! 2. Rotations in [`Rotation::ALL`] order.
//! 3. Per rotation, integer positions with x outermost and z innermost, each
//!    axis ascending from 0 to `floor(container - item)` inclusive.
//!
//! The first candidate that lies within the container and overlaps no placed
//! box wins. The order fixes the packing, so callers may rely on it.

use crate::geometry::{
    fits_within, Aabb3D, Dimensions, Item, PlacedBox, Position, Rotation, EPSILON,
};
use crate::hint::{ContainerView, HintProvider};

/// A legal placement found by the search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Minimum corner.
    pub position: Position,
    /// Rotation applied to the item.
    pub rotation: Rotation,
    /// Oriented dimensions.
    pub dimensions: Dimensions,
    /// Whether the hint provider supplied this placement.
    pub from_hint: bool,
}

/// Finds the first legal placement of `item` in a container of extents
/// `container` already holding `placed`.
///
/// Returns `None` if no rotation fits anywhere. The item's dimensions must be
/// valid; solvers reject invalid items before calling this.
pub fn find_placement(
    container: &Dimensions,
    placed: &[PlacedBox],
    item: &Item,
    hint: Option<&dyn HintProvider>,
) -> Option<Candidate> {
    if let Some(provider) = hint {
        if let Some(candidate) = try_hint(container, placed, item, provider) {
            return Some(candidate);
        }
    }

    exhaustive_search(container, placed, item)
}

/// Scans every rotation and integer position in search order.
pub fn exhaustive_search(
    container: &Dimensions,
    placed: &[PlacedBox],
    item: &Item,
) -> Option<Candidate> {
    Rotation::ALL.iter().find_map(|&rotation| {
        let oriented = item.dimensions.rotated(rotation);
        scan_positions(container, placed, &oriented).map(|position| Candidate {
            position,
            rotation,
            dimensions: oriented,
            from_hint: false,
        })
    })
}

/// True iff a box of `oriented` extents at `position` is inside the container
/// and clear of every placed box.
pub fn is_legal(
    container: &Dimensions,
    placed: &[PlacedBox],
    oriented: &Dimensions,
    position: &Position,
) -> bool {
    if !fits_within(container, oriented, position) {
        return false;
    }
    let candidate = Aabb3D::from_position_and_size(position, oriented);
    !placed.iter().any(|b| b.aabb().intersects(&candidate))
}

fn try_hint(
    container: &Dimensions,
    placed: &[PlacedBox],
    item: &Item,
    provider: &dyn HintProvider,
) -> Option<Candidate> {
    let view = ContainerView {
        dimensions: container,
        placed,
    };
    let hint = provider.suggest(item, &view)?;
    let oriented = item.dimensions.rotated(hint.rotation);

    if is_legal(container, placed, &oriented, &hint.position) {
        log::debug!(
            "Hint '{}' accepted for item {} at {:?}",
            provider.name(),
            item.id,
            hint.position.as_slice()
        );
        Some(Candidate {
            position: hint.position,
            rotation: hint.rotation,
            dimensions: oriented,
            from_hint: true,
        })
    } else {
        log::debug!(
            "Hint '{}' rejected for item {} at {:?}",
            provider.name(),
            item.id,
            hint.position.as_slice()
        );
        None
    }
}

/// Largest integer offset along one axis, or `None` if the item is longer
/// than the container on that axis.
fn axis_limit(container_extent: f64, item_extent: f64) -> Option<u64> {
    let room = container_extent - item_extent;
    if room < -EPSILON {
        return None;
    }
    Some((room + EPSILON).floor().max(0.0) as u64)
}

fn scan_positions(
    container: &Dimensions,
    placed: &[PlacedBox],
    oriented: &Dimensions,
) -> Option<Position> {
    let max_x = axis_limit(container.length(), oriented.length())?;
    let max_y = axis_limit(container.width(), oriented.width())?;
    let max_z = axis_limit(container.height(), oriented.height())?;

    for x in 0..=max_x {
        for y in 0..=max_y {
            let mut z = 0;
            while z <= max_z {
                let position = Position::new(x as f64, y as f64, z as f64);
                let candidate = Aabb3D::from_position_and_size(&position, oriented);

                match placed.iter().find(|b| b.aabb().intersects(&candidate)) {
                    None if fits_within(container, oriented, &position) => {
                        return Some(position);
                    }
                    None => z += 1,
                    // Every integer z below the blocker's top still overlaps it.
                    Some(blocker) => z = next_z_above(z, blocker.aabb().max.z),
                }
            }
        }
    }

    None
}

fn next_z_above(z: u64, blocker_top: f64) -> u64 {
    let top = (blocker_top - EPSILON).ceil();
    if top > z as f64 {
        top as u64
    } else {
        z + 1
    }
}
