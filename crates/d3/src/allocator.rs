//! First-Fit-Decreasing allocation across a catalog of container sizes.
//!
//! # Algorithm
//!
//! 1. Sort items by volume, largest first; ties keep input order.
//! 2. For each item, try the opened containers in the order they were opened.
//! 3. If none accepts it, open the first catalog size that accepts it empty.
//! 4. If no catalog size accepts it, record it as unplaced and move on.
//!
//! Step 2 only reads container state, so with `Config::parallel` the opened
//! containers are searched concurrently. The lowest-index container that
//! accepts the item wins, which is exactly the sequential answer.

use crate::boundary::{Container, ContainerCatalog};
use crate::geometry::Item;
use crate::hint::HintProvider;
use crate::metrics::total_container_volume;
use crate::packing_utils::{
    finish_result, mark_interrupted, placement_record, record_not_attempted, record_unplaced,
    report_progress, RunControl,
};
use crate::search::{find_placement, Candidate};
use rayon::prelude::*;
use rayon::ThreadPool;
use u_packing_core::solver::{Config, ProgressCallback, Solver};
use u_packing_core::{Error, Result, SolveResult, UnplacedReason};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Multi-container First-Fit-Decreasing allocator.
pub struct FfdAllocator {
    config: Config,
    cancelled: Arc<AtomicBool>,
    hint: Option<Arc<dyn HintProvider>>,
}

impl FfdAllocator {
    /// Creates a new allocator with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cancelled: Arc::new(AtomicBool::new(false)),
            hint: None,
        }
    }

    /// Creates an allocator with default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// Consults `hint` before the exhaustive scan in every container tried.
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

    fn build_pool(&self) -> Result<Option<ThreadPool>> {
        if !self.config.parallel || self.config.threads == 0 {
            return Ok(None);
        }
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()
            .map(Some)
            .map_err(|e| Error::Internal(format!("Failed to build thread pool: {}", e)))
    }

    /// Finds the first opened container accepting `item`.
    fn search_opened(
        &self,
        containers: &[Container],
        item: &Item,
        pool: Option<&ThreadPool>,
    ) -> Option<(usize, Candidate)> {
        let hint = self.hint.as_deref();
        let try_container = |(index, container): (usize, &Container)| {
            find_placement(container.dimensions(), container.boxes(), item, hint)
                .map(|candidate| (index, candidate))
        };

        if !self.config.parallel || containers.len() < 2 {
            return containers.iter().enumerate().find_map(try_container);
        }

        let parallel = || {
            containers
                .par_iter()
                .enumerate()
                .find_map_first(try_container)
        };
        match pool {
            Some(pool) => pool.install(parallel),
            None => parallel(),
        }
    }

    /// Opens the first catalog size that accepts `item` when empty.
    fn search_catalog(
        &self,
        catalog: &ContainerCatalog,
        item: &Item,
    ) -> Option<(usize, Candidate)> {
        let hint = self.hint.as_deref();
        catalog
            .iter()
            .enumerate()
            .find_map(|(catalog_index, size)| {
                find_placement(size, &[], item, hint).map(|candidate| (catalog_index, candidate))
            })
    }

    fn allocate(
        &self,
        items: &[Item],
        catalog: &ContainerCatalog,
        callback: Option<&ProgressCallback>,
    ) -> Result<SolveResult> {
        self.config.validate()?;
        catalog.validate()?;
        let pool = self.build_pool()?;

        // Reset cancellation flag
        self.cancelled.store(false, Ordering::Relaxed);

        let control = RunControl::start(&self.config, &self.cancelled);
        let mut result = SolveResult::new().with_strategy("FirstFitDecreasing");
        result.total_items = items.len();

        // Invalid items never enter the sort or the search.
        let (valid, invalid): (Vec<&Item>, Vec<&Item>) =
            items.iter().partition(|item| item.validate().is_ok());
        for item in &invalid {
            record_unplaced(&mut result, item, UnplacedReason::InvalidDimensions);
        }

        let mut order = valid;
        // Stable: equal volumes keep input order.
        order.sort_by(|a, b| b.volume().total_cmp(&a.volume()));

        let mut containers: Vec<Container> = Vec::new();

        for (processed, item) in order.iter().copied().enumerate() {
            if let Some(interruption) = control.interruption() {
                mark_interrupted(&mut result, interruption, order.len() - processed);
                record_not_attempted(&mut result, order[processed..].iter().copied());
                break;
            }

            let target = match self.search_opened(&containers, item, pool.as_ref()) {
                Some(found) => Some(found),
                None => self
                    .search_catalog(catalog, item)
                    .map(|(catalog_index, candidate)| {
                        let index = containers.len();
                        let size = catalog.sizes()[catalog_index];
                        log::debug!(
                            "Opening container {} with catalog size {} {:?}",
                            index,
                            catalog_index,
                            size.to_array()
                        );
                        containers.push(Container::from_catalog(index, catalog_index, size));
                        (index, candidate)
                    }),
            };

            match target {
                Some((index, candidate)) => {
                    let placed = containers[index].place(item, &candidate);
                    log::debug!(
                        "Item {} placed in container {} at {:?} with dimensions {:?}",
                        item.id,
                        index,
                        placed.position.as_slice(),
                        placed.dimensions.to_array()
                    );
                    result
                        .placements
                        .push(placement_record(placed, candidate.from_hint));
                }
                None => record_unplaced(&mut result, item, UnplacedReason::NoFit),
            }

            report_progress(
                callback,
                &control,
                &containers,
                invalid.len() + processed + 1,
                items.len(),
                true,
            );
        }

        finish_result(&mut result, &containers, &control);
        log::info!("Containers used: {}", containers.len());
        log::info!(
            "Total volume of all containers: {} cubic units",
            total_container_volume(&containers)
        );
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

impl Solver for FfdAllocator {
    type Item = Item;
    type Boundary = ContainerCatalog;

    fn solve(&self, items: &[Self::Item], boundary: &Self::Boundary) -> Result<SolveResult> {
        self.allocate(items, boundary, None)
    }

    fn solve_with_progress(
        &self,
        items: &[Self::Item],
        boundary: &Self::Boundary,
        callback: ProgressCallback,
    ) -> Result<SolveResult> {
        self.allocate(items, boundary, Some(&callback))
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{expand_items, Dimensions};
    use crate::hint::StackHint;
    use approx::assert_relative_eq;

    fn catalog(triples: &[[f64; 3]]) -> ContainerCatalog {
        ContainerCatalog::from_triples(triples).unwrap()
    }

    #[test]
    fn test_exact_fit_opens_one_container() {
        let items = vec![Item::new(0, 10.0, 10.0, 10.0)];
        let result = FfdAllocator::default_config()
            .solve(&items, &catalog(&[[10.0, 10.0, 10.0]]))
            .unwrap();

        assert_eq!(result.containers_used(), 1);
        assert_eq!(result.placements[0].position, [0.0, 0.0, 0.0]);
        assert_relative_eq!(result.utilization, 1.0);
    }

    #[test]
    fn test_second_container_opened_on_demand() {
        let items = vec![Item::new(0, 6.0, 6.0, 6.0), Item::new(1, 6.0, 6.0, 6.0)];
        let result = FfdAllocator::default_config()
            .solve(&items, &catalog(&[[10.0, 10.0, 10.0]]))
            .unwrap();

        assert_eq!(result.containers_used(), 2);
        assert_eq!(result.placements[0].container_index, 0);
        assert_eq!(result.placements[1].container_index, 1);
        assert_eq!(result.placements[1].position, [0.0, 0.0, 0.0]);
        assert!(result.all_placed());
    }

    #[test]
    fn test_largest_items_first() {
        let items = vec![
            Item::new(0, 1.0, 1.0, 1.0),
            Item::new(1, 3.0, 3.0, 3.0),
            Item::new(2, 2.0, 2.0, 2.0),
            Item::new(3, 2.0, 2.0, 2.0),
        ];
        let result = FfdAllocator::default_config()
            .solve(&items, &catalog(&[[10.0, 10.0, 10.0]]))
            .unwrap();

        let order: Vec<usize> = result.placements.iter().map(|p| p.item_id).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_catalog_order_decides_new_container() {
        // Both sizes accept the item; the first one listed is used.
        let items = vec![Item::new(0, 2.0, 2.0, 2.0)];
        let result = FfdAllocator::default_config()
            .solve(&items, &catalog(&[[5.0, 5.0, 5.0], [3.0, 3.0, 3.0]]))
            .unwrap();
        assert_eq!(result.containers[0].catalog_index, Some(0));

        // A size too small is skipped.
        let items = vec![Item::new(0, 4.0, 4.0, 4.0)];
        let result = FfdAllocator::default_config()
            .solve(&items, &catalog(&[[3.0, 3.0, 3.0], [5.0, 5.0, 5.0]]))
            .unwrap();
        assert_eq!(result.containers[0].catalog_index, Some(1));
        assert_eq!(result.containers[0].dimensions, [5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_oversized_item_opens_nothing() {
        let items = vec![Item::new(0, 100.0, 1.0, 1.0), Item::new(1, 1.0, 1.0, 1.0)];
        let result = FfdAllocator::default_config()
            .solve(&items, &catalog(&[[10.0, 10.0, 10.0]]))
            .unwrap();

        assert_eq!(result.containers_used(), 1);
        assert_eq!(result.unplaced.len(), 1);
        assert_eq!(result.unplaced[0].item_id, 0);
        assert_eq!(result.unplaced[0].reason, UnplacedReason::NoFit);
        assert!(result.is_conserved());
    }

    #[test]
    fn test_invalid_items_recorded_up_front() {
        let items = vec![
            Item::new(0, 1.0, 1.0, 1.0),
            Item::new(1, f64::NAN, 1.0, 1.0),
            Item::new(2, 0.0, 1.0, 1.0),
        ];
        let result = FfdAllocator::default_config()
            .solve(&items, &catalog(&[[2.0, 2.0, 2.0]]))
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
    fn test_no_items_opens_nothing() {
        let result = FfdAllocator::default_config()
            .solve(&[], &ContainerCatalog::standard())
            .unwrap();
        assert_eq!(result.containers_used(), 0);
        assert_eq!(result.utilization, 0.0);
        assert!(result.is_conserved());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let allocator = FfdAllocator::new(Config::default().with_threads(4));
        let result = allocator.solve(&[], &ContainerCatalog::standard());
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let items = expand_items(vec![
            (Dimensions::new(30.0, 20.0, 10.0), 6),
            (Dimensions::new(12.0, 12.0, 12.0), 5),
            (Dimensions::new(20.0, 8.0, 5.0), 8),
        ]);
        let sizes = ContainerCatalog::from_triples(&[[35.0, 23.0, 13.0], [42.0, 30.0, 18.0]])
            .unwrap();

        let sequential = FfdAllocator::default_config().solve(&items, &sizes).unwrap();
        let parallel = FfdAllocator::new(Config::default().with_parallel(true))
            .solve(&items, &sizes)
            .unwrap();
        let pooled = FfdAllocator::new(Config::default().with_parallel(true).with_threads(2))
            .solve(&items, &sizes)
            .unwrap();

        assert!(sequential.containers_used() > 1);
        assert_eq!(sequential.placements, parallel.placements);
        assert_eq!(sequential.placements, pooled.placements);
        assert_eq!(sequential.containers, parallel.containers);
    }

    #[test]
    fn test_hint_used_in_opened_containers() {
        let items = expand_items(vec![(Dimensions::new(2.0, 2.0, 2.0), 3)]);
        let result = FfdAllocator::default_config()
            .with_hint(StackHint)
            .solve(&items, &catalog(&[[2.0, 2.0, 6.0]]))
            .unwrap();

        assert_eq!(result.containers_used(), 1);
        assert_eq!(result.placements[2].position, [0.0, 0.0, 4.0]);
        assert_eq!(result.placement_stats().hinted_count, 3);
    }
}
