//! Shared utilities for the single-container solver and the allocator.
//!
//! # Extracted Components
//!
//! - [`RunControl`]: Deadline and cancellation checks between items
//! - [`Interruption`]: Why a run stopped early
//! - [`placement_record`]: Converts a placed box to a core placement record
//! - [`record_not_attempted`]: Marks the remainder of a truncated run
//! - [`finish_result`]: Fills in container metrics and timing

use crate::boundary::Container;
use crate::geometry::{Item, PlacedBox};
use crate::metrics::{aggregate_utilization, container_stats};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use u_packing_core::solver::{Config, ProgressCallback, ProgressInfo};
use u_packing_core::{Placement, SolveResult, UnplacedItem, UnplacedReason};

/// Why a run stopped before processing every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interruption {
    /// The configured time limit elapsed.
    Deadline,
    /// `cancel()` was called.
    Cancelled,
}

/// Coarse-grained run control, checked between item placements.
pub struct RunControl<'a> {
    start: Instant,
    limit: Option<Duration>,
    cancelled: &'a AtomicBool,
}

impl<'a> RunControl<'a> {
    /// Starts the clock for a run.
    pub fn start(config: &Config, cancelled: &'a AtomicBool) -> Self {
        Self {
            start: Instant::now(),
            limit: config
                .has_time_limit()
                .then(|| Duration::from_millis(config.time_limit_ms)),
            cancelled,
        }
    }

    /// Returns why the run must stop, if it must.
    pub fn interruption(&self) -> Option<Interruption> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Some(Interruption::Cancelled);
        }
        match self.limit {
            Some(limit) if self.start.elapsed() >= limit => Some(Interruption::Deadline),
            _ => None,
        }
    }

    /// Milliseconds since the run started.
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Converts a placed box into the core placement record.
pub fn placement_record(placed: &PlacedBox, from_hint: bool) -> Placement {
    Placement::new(
        placed.item_id,
        placed.container_index,
        [placed.position.x, placed.position.y, placed.position.z],
        placed.dimensions.to_array(),
        placed.rotation.index(),
    )
    .with_hint(from_hint)
}

/// Records every remaining item as not attempted.
pub fn record_not_attempted<'i>(
    result: &mut SolveResult,
    remaining: impl IntoIterator<Item = &'i Item>,
) {
    for item in remaining {
        result.unplaced.push(UnplacedItem::new(
            item.id,
            item.dimensions.to_array(),
            UnplacedReason::NotAttempted,
        ));
    }
}

/// Records an item as unplaced, logging why.
pub fn record_unplaced(result: &mut SolveResult, item: &Item, reason: UnplacedReason) {
    match reason {
        UnplacedReason::InvalidDimensions => log::warn!(
            "Item {} has invalid dimensions {:?}; skipping",
            item.id,
            item.dimensions.to_array()
        ),
        UnplacedReason::NoFit => log::warn!(
            "No valid position for item {} {:?}; skipping",
            item.id,
            item.dimensions.to_array()
        ),
        UnplacedReason::NotAttempted => {}
    }
    result.unplaced.push(UnplacedItem::new(
        item.id,
        item.dimensions.to_array(),
        reason,
    ));
}

/// Marks a result as truncated by `interruption`.
pub fn mark_interrupted(result: &mut SolveResult, interruption: Interruption, remaining: usize) {
    log::warn!(
        "Packing truncated ({:?}); {} item(s) not attempted",
        interruption,
        remaining
    );
    result.truncated = true;
    result.cancelled = interruption == Interruption::Cancelled;
}

/// Sends a progress update if a callback is installed.
pub fn report_progress(
    callback: Option<&ProgressCallback>,
    control: &RunControl<'_>,
    containers: &[Container],
    items_processed: usize,
    total_items: usize,
    running: bool,
) {
    let Some(callback) = callback else {
        return;
    };

    callback(ProgressInfo {
        items_processed,
        total_items,
        containers_opened: containers.len(),
        utilization: aggregate_utilization(containers),
        elapsed_ms: control.elapsed_ms(),
        running,
    });
}

/// Fills in container statistics, aggregate metrics and timing.
pub fn finish_result(result: &mut SolveResult, containers: &[Container], control: &RunControl<'_>) {
    result.containers = containers.iter().map(container_stats).collect();
    result.calculate_utilization();
    result.computation_time_ms = control.elapsed_ms();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Dimensions, Position, Rotation};

    #[test]
    fn test_run_control_unlimited() {
        let flag = AtomicBool::new(false);
        let control = RunControl::start(&Config::default(), &flag);
        assert_eq!(control.interruption(), None);

        flag.store(true, Ordering::Relaxed);
        assert_eq!(control.interruption(), Some(Interruption::Cancelled));
    }

    #[test]
    fn test_run_control_deadline() {
        let flag = AtomicBool::new(false);
        let control = RunControl::start(&Config::default().with_time_limit(1), &flag);
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(control.interruption(), Some(Interruption::Deadline));
    }

    #[test]
    fn test_placement_record() {
        let placed = PlacedBox {
            item_id: 3,
            container_index: 1,
            position: Position::new(1.0, 2.0, 3.0),
            dimensions: Dimensions::new(4.0, 5.0, 6.0),
            rotation: Rotation::Wlh,
        };

        let record = placement_record(&placed, true);
        assert_eq!(record.item_id, 3);
        assert_eq!(record.container_index, 1);
        assert_eq!(record.position, [1.0, 2.0, 3.0]);
        assert_eq!(record.dimensions, [4.0, 5.0, 6.0]);
        assert_eq!(record.rotation_index, 2);
        assert!(record.from_hint);
    }

    #[test]
    fn test_record_not_attempted() {
        let items = vec![Item::new(0, 1.0, 1.0, 1.0), Item::new(1, 2.0, 2.0, 2.0)];
        let mut result = SolveResult::new();
        record_not_attempted(&mut result, &items[1..]);

        assert_eq!(result.unplaced.len(), 1);
        assert_eq!(result.unplaced[0].item_id, 1);
        assert_eq!(result.unplaced[0].reason, UnplacedReason::NotAttempted);
    }

    #[test]
    fn test_mark_interrupted() {
        let mut result = SolveResult::new();
        mark_interrupted(&mut result, Interruption::Deadline, 3);
        assert!(result.truncated);
        assert!(!result.cancelled);

        mark_interrupted(&mut result, Interruption::Cancelled, 3);
        assert!(result.cancelled);
    }
}
