//! Placement hints consulted before the exhaustive scan.
//!
//! A hint is advisory: the search accepts it only if it is a legal placement
//! and otherwise falls through to the deterministic scan. A provider can never
//! make the packing invalid, only faster or different.

use crate::geometry::{Dimensions, Item, PlacedBox, Position, Rotation, EPSILON};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Read-only view of a container handed to hint providers.
#[derive(Debug, Clone, Copy)]
pub struct ContainerView<'a> {
    /// Container extents.
    pub dimensions: &'a Dimensions,
    /// Boxes already placed, in placement order.
    pub placed: &'a [PlacedBox],
}

/// A proposed placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hint {
    /// Proposed minimum corner.
    pub position: Position,
    /// Proposed rotation of the item.
    pub rotation: Rotation,
}

impl Hint {
    /// Creates a hint.
    pub fn new(position: Position, rotation: Rotation) -> Self {
        Self { position, rotation }
    }
}

/// Strategy proposing a single placement for an item.
pub trait HintProvider: Send + Sync {
    /// Proposes a placement for `item` in the viewed container, or `None`.
    fn suggest(&self, item: &Item, view: &ContainerView<'_>) -> Option<Hint>;

    /// Short name used in logs and reports.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Never proposes anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHint;

impl HintProvider for NoHint {
    fn suggest(&self, _item: &Item, _view: &ContainerView<'_>) -> Option<Hint> {
        None
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// Proposes the spot on top of the most recently placed box, unrotated.
///
/// An empty container gets the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackHint;

impl HintProvider for StackHint {
    fn suggest(&self, _item: &Item, view: &ContainerView<'_>) -> Option<Hint> {
        let position = match view.placed.last() {
            Some(last) => {
                let top = last.aabb().max.z;
                Position::new(last.position.x, last.position.y, top)
            }
            None => Position::zeros(),
        };
        Some(Hint::new(position, Rotation::Lwh))
    }

    fn name(&self) -> &str {
        "stack"
    }
}

/// Proposes a pseudo-random integer position and rotation.
///
/// The generator is reseeded from the base seed, the item id and the number of
/// boxes already in the container, so the same input always yields the same
/// guess.
#[derive(Debug, Clone, Copy)]
pub struct SeededHint {
    seed: u64,
}

impl SeededHint {
    /// Creates a provider with the given base seed.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng_for(&self, item: &Item, view: &ContainerView<'_>) -> StdRng {
        let mixed = self.seed
            ^ (item.id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
            ^ (view.placed.len() as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
        StdRng::seed_from_u64(mixed)
    }
}

impl Default for SeededHint {
    fn default() -> Self {
        Self::new(102)
    }
}

impl HintProvider for SeededHint {
    fn suggest(&self, item: &Item, view: &ContainerView<'_>) -> Option<Hint> {
        let mut rng = self.rng_for(item, view);
        let rotation = Rotation::ALL[rng.gen_range(0..Rotation::ALL.len())];
        let oriented = item.dimensions.rotated(rotation);

        let mut coords = [0.0; 3];
        for (axis, coord) in coords.iter_mut().enumerate() {
            let room = view.dimensions.extents()[axis] - oriented.extents()[axis];
            if room < -EPSILON {
                return None;
            }
            let limit = (room + EPSILON).floor().max(0.0) as u64;
            *coord = rng.gen_range(0..=limit) as f64;
        }

        Some(Hint::new(
            Position::new(coords[0], coords[1], coords[2]),
            rotation,
        ))
    }

    fn name(&self) -> &str {
        "seeded"
    }
}

/// Adapts a closure into a [`HintProvider`].
pub struct FnHint<F> {
    f: F,
}

/// Wraps a closure as a hint provider.
pub fn hint_fn<F>(f: F) -> FnHint<F>
where
    F: Fn(&Item, &ContainerView<'_>) -> Option<Hint> + Send + Sync,
{
    FnHint { f }
}

impl<F> HintProvider for FnHint<F>
where
    F: Fn(&Item, &ContainerView<'_>) -> Option<Hint> + Send + Sync,
{
    fn suggest(&self, item: &Item, view: &ContainerView<'_>) -> Option<Hint> {
        (self.f)(item, view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_of<'a>(dims: &'a Dimensions, placed: &'a [PlacedBox]) -> ContainerView<'a> {
        ContainerView {
            dimensions: dims,
            placed,
        }
    }

    #[test]
    fn test_no_hint() {
        let dims = Dimensions::new(10.0, 10.0, 10.0);
        let item = Item::new(0, 1.0, 1.0, 1.0);
        assert!(NoHint.suggest(&item, &view_of(&dims, &[])).is_none());
    }

    #[test]
    fn test_stack_hint_on_top_of_last() {
        let dims = Dimensions::new(10.0, 10.0, 10.0);
        let item = Item::new(1, 2.0, 2.0, 2.0);

        let empty = StackHint.suggest(&item, &view_of(&dims, &[])).unwrap();
        assert_eq!(empty.position, Position::zeros());

        let placed = vec![PlacedBox {
            item_id: 0,
            container_index: 0,
            position: Position::new(3.0, 4.0, 0.0),
            dimensions: Dimensions::new(2.0, 2.0, 5.0),
            rotation: Rotation::Lwh,
        }];
        let hint = StackHint.suggest(&item, &view_of(&dims, &placed)).unwrap();
        assert_eq!(hint.position, Position::new(3.0, 4.0, 5.0));
        assert_eq!(hint.rotation, Rotation::Lwh);
    }

    #[test]
    fn test_seeded_hint_is_deterministic_and_in_range() {
        let dims = Dimensions::new(10.0, 8.0, 6.0);
        let provider = SeededHint::new(7);

        for id in 0..50 {
            let item = Item::new(id, 3.0, 2.0, 1.0);
            let a = provider.suggest(&item, &view_of(&dims, &[])).unwrap();
            let b = provider.suggest(&item, &view_of(&dims, &[])).unwrap();
            assert_eq!(a, b);

            let oriented = item.dimensions.rotated(a.rotation);
            assert!(crate::geometry::fits_within(&dims, &oriented, &a.position));
        }
    }

    #[test]
    fn test_seeded_hint_gives_up_when_too_large() {
        let dims = Dimensions::new(2.0, 2.0, 2.0);
        let item = Item::new(0, 5.0, 5.0, 5.0);
        assert!(SeededHint::default()
            .suggest(&item, &view_of(&dims, &[]))
            .is_none());
    }

    #[test]
    fn test_closure_hint() {
        let dims = Dimensions::new(10.0, 10.0, 10.0);
        let item = Item::new(0, 1.0, 1.0, 1.0);
        let provider = hint_fn(|_item: &Item, view: &ContainerView<'_>| {
            Some(Hint::new(
                Position::new(view.placed.len() as f64, 0.0, 0.0),
                Rotation::Hwl,
            ))
        });

        let hint = provider.suggest(&item, &view_of(&dims, &[])).unwrap();
        assert_eq!(hint.rotation, Rotation::Hwl);
        assert_eq!(provider.name(), "custom");
    }
}
