//! Single-container packing solver.

use crate::boundary::Container;
use crate::geometry::{Dimensions, Item};
use crate::hint::HintProvider;
use crate::packing_utils::{
    finish_result, mark_interrupted, placement_record, record_not_attempted, record_unplaced,
    report_progress, RunControl,
};
use crate::search::find_placement;
use u_packing_core::solver::{Config, ProgressCallback, Solver};
use u_packing_core::{Error, Result, SolveResult, UnplacedReason};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Packs items, in input order, into one fixed-size container.
///
/// Each item is tried once. An item that does not fit is recorded as unplaced
/// and the solver moves on to the next one; earlier placements are never
/// revisited.
pub struct Packer3D {
    config: Config,
    cancelled: Arc<AtomicBool>,
    hint: Option<Arc<dyn HintProvider>>,
}

impl Packer3D {
    /// Creates a new packer with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cancelled: Arc::new(AtomicBool::new(false)),
            hint: None,
        }
    }

    /// Creates a packer with default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// Consults `hint` before the exhaustive scan for every item.
    pub fn with_hint(mut self, hint: impl HintProvider + 'static) -> Self {
        self.hint = Some(Arc::new(hint));
        self
    }

    /// Uses an already shared hint provider.
    pub fn with_shared_hint(mut self, hint: Arc<dyn HintProvider>) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn pack(
        &self,
        items: &[Item],
        container_dims: &Dimensions,
        callback: Option<&ProgressCallback>,
    ) -> Result<SolveResult> {
        self.config.validate()?;
        if !container_dims.is_valid() {
            return Err(Error::InvalidBoundary(format!(
                "Container dimensions must be positive and finite, got {:?}",
                container_dims.to_array()
            )));
        }

        // Reset cancellation flag
        self.cancelled.store(false, Ordering::Relaxed);

        let control = RunControl::start(&self.config, &self.cancelled);
        let mut result = SolveResult::new().with_strategy("SingleContainer");
        result.total_items = items.len();

        let mut containers = vec![Container::new(0, *container_dims)];
        let hint = self.hint.as_deref();

        for (processed, item) in items.iter().enumerate() {
            if let Some(interruption) = control.interruption() {
                mark_interrupted(&mut result, interruption, items.len() - processed);
                record_not_attempted(&mut result, &items[processed..]);
                break;
            }

            if item.validate().is_err() {
                record_unplaced(&mut result, item, UnplacedReason::InvalidDimensions);
            } else {
                let container = &mut containers[0];
                match find_placement(container.dimensions(), container.boxes(), item, hint) {
                    Some(candidate) => {
                        let placed = container.place(item, &candidate);
                        log::debug!(
                            "Item {} placed at {:?} with dimensions {:?}",
                            item.id,
                            placed.position.as_slice(),
                            placed.dimensions.to_array()
                        );
                        result
                            .placements
                            .push(placement_record(placed, candidate.from_hint));
                    }
                    None => record_unplaced(&mut result, item, UnplacedReason::NoFit),
                }
            }

            report_progress(
                callback,
                &control,
                &containers,
                processed + 1,
                items.len(),
                true,
            );
        }

        finish_result(&mut result, &containers, &control);
        report_progress(
            callback,
            &control,
            &containers,
            result.placed_count() + result.unplaced_count(),
            items.len(),
            false,
        );

        Ok(result)
    }
}

impl Solver for Packer3D {
    type Item = Item;
    type Boundary = Dimensions;

    fn solve(&self, items: &[Self::Item], boundary: &Self::Boundary) -> Result<SolveResult> {
        self.pack(items, boundary, None)
    }

    fn solve_with_progress(
        &self,
        items: &[Self::Item],
        boundary: &Self::Boundary,
        callback: ProgressCallback,
    ) -> Result<SolveResult> {
        self.pack(items, boundary, Some(&callback))
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{expand_items, overlaps, PlacedBox, Position, Rotation};
    use crate::hint::{SeededHint, StackHint};
    use approx::assert_relative_eq;
    use std::sync::Mutex;
    use u_packing_core::Placement;

    fn cubes(edge: f64, count: usize) -> Vec<Item> {
        expand_items(vec![(Dimensions::new(edge, edge, edge), count)])
    }

    #[test]
    fn test_single_exact_fit() {
        let packer = Packer3D::default_config();
        let container = Dimensions::new(10.0, 10.0, 10.0);
        let result = packer.solve(&cubes(10.0, 1), &container).unwrap();

        assert_eq!(result.placed_count(), 1);
        assert_eq!(result.containers_used(), 1);
        assert_eq!(result.placements[0].position, [0.0, 0.0, 0.0]);
        assert_relative_eq!(result.utilization, 1.0);
        assert_eq!(result.strategy.as_deref(), Some("SingleContainer"));
    }

    #[test]
    fn test_skip_on_failure_continues() {
        let items = vec![
            Item::new(0, 6.0, 6.0, 6.0),
            Item::new(1, 6.0, 6.0, 6.0),
            Item::new(2, 4.0, 4.0, 4.0),
        ];
        let packer = Packer3D::default_config();
        let result = packer
            .solve(&items, &Dimensions::new(10.0, 10.0, 10.0))
            .unwrap();

        assert_eq!(result.placed_count(), 2);
        assert_eq!(result.unplaced.len(), 1);
        assert_eq!(result.unplaced[0].item_id, 1);
        assert_eq!(result.unplaced[0].reason, UnplacedReason::NoFit);
        assert!(result.is_conserved());
        // The third item still gets a slot after the failure.
        assert_eq!(result.placements[1].item_id, 2);
        assert_eq!(result.placements[1].position, [0.0, 0.0, 6.0]);
    }

    #[test]
    fn test_invalid_item_is_rejected_before_search() {
        let items = vec![
            Item::new(0, 1.0, 0.0, 1.0),
            Item::new(1, -1.0, 1.0, 1.0),
            Item::new(2, 1.0, 1.0, 1.0),
        ];
        let packer = Packer3D::default_config();
        let result = packer
            .solve(&items, &Dimensions::new(2.0, 2.0, 2.0))
            .unwrap();

        assert_eq!(result.placed_count(), 1);
        assert_eq!(
            result
                .unplaced_with(UnplacedReason::InvalidDimensions)
                .count(),
            2
        );
        assert!(result.is_conserved());
    }

    #[test]
    fn test_invalid_container_is_an_error() {
        let packer = Packer3D::default_config();
        let result = packer.solve(&cubes(1.0, 1), &Dimensions::new(0.0, 10.0, 10.0));
        assert!(matches!(result, Err(Error::InvalidBoundary(_))));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let packer = Packer3D::new(Config::default().with_threads(2));
        let result = packer.solve(&cubes(1.0, 1), &Dimensions::new(1.0, 1.0, 1.0));
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_partial_unit_cubes() {
        let packer = Packer3D::default_config();
        let result = packer
            .solve(&cubes(1.0, 5), &Dimensions::new(2.0, 2.0, 2.0))
            .unwrap();

        assert_eq!(result.placed_count(), 5);
        assert_relative_eq!(result.utilization, 5.0 / 8.0);
    }

    #[test]
    fn test_hints_never_break_invariants() {
        let items = expand_items(vec![
            (Dimensions::new(3.0, 2.0, 1.0), 10),
            (Dimensions::new(2.0, 2.0, 2.0), 6),
        ]);
        let container = Dimensions::new(6.0, 6.0, 6.0);

        for packer in [
            Packer3D::default_config().with_hint(StackHint),
            Packer3D::default_config().with_hint(SeededHint::new(3)),
        ] {
            let result = packer.solve(&items, &container).unwrap();
            assert!(result.is_conserved());
            for (i, a) in result.placements.iter().enumerate() {
                for b in result.placements.iter().skip(i + 1) {
                    assert!(!overlaps(&as_box(a), &as_box(b)));
                }
            }
        }
    }

    fn as_box(p: &Placement) -> PlacedBox {
        PlacedBox {
            item_id: p.item_id,
            container_index: p.container_index,
            position: Position::new(p.position[0], p.position[1], p.position[2]),
            dimensions: Dimensions::from_array(p.dimensions),
            rotation: Rotation::from_index(p.rotation_index).unwrap_or_default(),
        }
    }

    #[test]
    fn test_cancel_before_solve_is_reset() {
        let packer = Packer3D::default_config();
        packer.cancel();
        // solve() clears a stale cancellation from an earlier run.
        let result = packer
            .solve(&cubes(1.0, 3), &Dimensions::new(3.0, 1.0, 1.0))
            .unwrap();
        assert!(!result.cancelled);
        assert_eq!(result.placed_count(), 3);
    }

    #[test]
    fn test_progress_reports() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ProgressCallback = Box::new(move |info| {
            if let Ok(mut v) = sink.lock() {
                v.push((info.items_processed, info.running));
            }
        });

        let packer = Packer3D::default_config();
        packer
            .solve_with_progress(&cubes(1.0, 3), &Dimensions::new(2.0, 2.0, 2.0), callback)
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![(1, true), (2, true), (3, true), (3, false)]);
    }
}
