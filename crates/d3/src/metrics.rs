//! Volume metrics over opened containers.

use crate::boundary::Container;
use u_packing_core::ContainerStats;

/// Statistics for one container in its current state.
pub fn container_stats(container: &Container) -> ContainerStats {
    let mut stats = ContainerStats::new(container.index(), container.dimensions().to_array());
    if let Some(catalog_index) = container.catalog_index() {
        stats = stats.with_catalog_index(catalog_index);
    }
    for placed in container.boxes() {
        stats.record(placed.volume());
    }
    stats
}

/// Sum of the volumes of `containers`.
pub fn total_container_volume(containers: &[Container]) -> f64 {
    containers.iter().map(Container::volume).sum()
}

/// Placed volume over container volume across all `containers`; 0 if none.
pub fn aggregate_utilization(containers: &[Container]) -> f64 {
    let total = total_container_volume(containers);
    if total > 0.0 {
        containers.iter().map(Container::placed_volume).sum::<f64>() / total
    } else {
        0.0
    }
}
