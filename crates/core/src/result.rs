//! Solve result representation.

use crate::placement::{ItemId, Placement, PlacementStats};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Statistics for a single opened container.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContainerStats {
    /// Index of the container in the opened-container list (0-based).
    pub container_index: usize,
    /// Position of the container size in the catalog, if it came from one.
    pub catalog_index: Option<usize>,
    /// Container extents (length, width, height).
    pub dimensions: [f64; 3],
    /// Container volume.
    pub container_volume: f64,
    /// Total volume of the boxes placed in this container.
    pub placed_volume: f64,
    /// Number of boxes placed in this container.
    pub item_count: usize,
    /// placed_volume / container_volume.
    pub utilization: f64,
}

impl ContainerStats {
    /// Creates stats for an empty container.
    pub fn new(container_index: usize, dimensions: [f64; 3]) -> Self {
        Self {
            container_index,
            catalog_index: None,
            dimensions,
            container_volume: dimensions[0] * dimensions[1] * dimensions[2],
            ..Default::default()
        }
    }

    /// Sets the catalog index.
    pub fn with_catalog_index(mut self, index: usize) -> Self {
        self.catalog_index = Some(index);
        self
    }

    /// Accounts for one placed box of the given volume.
    pub fn record(&mut self, volume: f64) {
        self.item_count += 1;
        self.placed_volume += volume;
        if self.container_volume > 0.0 {
            self.utilization = self.placed_volume / self.container_volume;
        }
    }
}

/// Why an item ended up unplaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnplacedReason {
    /// Zero, negative or non-finite extent; rejected before search.
    InvalidDimensions,
    /// No legal position in any rotation in any candidate container.
    NoFit,
    /// The run was truncated (deadline or cancellation) before the item was
    /// attempted.
    NotAttempted,
}

/// An item that is not part of the packing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnplacedItem {
    /// The item.
    pub item_id: ItemId,
    /// Canonical item extents.
    pub dimensions: [f64; 3],
    /// Why it was not placed.
    pub reason: UnplacedReason,
}

impl UnplacedItem {
    /// Creates a new unplaced record.
    pub fn new(item_id: ItemId, dimensions: [f64; 3], reason: UnplacedReason) -> Self {
        Self {
            item_id,
            dimensions,
            reason,
        }
    }
}

/// Result of a packing solve operation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveResult {
    /// Placements of all successfully placed items, in placement order.
    pub placements: Vec<Placement>,

    /// Per-container statistics, in the order containers were opened.
    pub containers: Vec<ContainerStats>,

    /// Items that are not part of the packing.
    pub unplaced: Vec<UnplacedItem>,

    /// Number of items in the input.
    pub total_items: usize,

    /// Aggregate utilization ratio (0.0 - 1.0).
    /// Calculated as: total_placed_volume / total_container_volume
    pub utilization: f64,

    /// Sum of the volumes of all opened containers.
    pub total_container_volume: f64,

    /// Sum of the volumes of all placed boxes.
    pub total_placed_volume: f64,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,

    /// Strategy used for solving.
    pub strategy: Option<String>,

    /// Whether the run stopped early (deadline or cancellation).
    pub truncated: bool,

    /// Whether the run was cancelled.
    pub cancelled: bool,
}

impl SolveResult {
    /// Creates a new empty result.
    pub fn new() -> Self {
        Self {
            placements: Vec::new(),
            containers: Vec::new(),
            unplaced: Vec::new(),
            total_items: 0,
            utilization: 0.0,
            total_container_volume: 0.0,
            total_placed_volume: 0.0,
            computation_time_ms: 0,
            strategy: None,
            truncated: false,
            cancelled: false,
        }
    }

    /// Returns true if all items were placed.
    pub fn all_placed(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Returns the number of placed items.
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// Returns the number of unplaced items.
    pub fn unplaced_count(&self) -> usize {
        self.unplaced.len()
    }

    /// Returns the number of opened containers.
    pub fn containers_used(&self) -> usize {
        self.containers.len()
    }

    /// Returns true if at least one item was placed.
    pub fn is_successful(&self) -> bool {
        !self.placements.is_empty()
    }

    /// Returns true if the solve ran to completion.
    pub fn completed_normally(&self) -> bool {
        !self.truncated
    }

    /// Every input item is accounted for exactly once.
    pub fn is_conserved(&self) -> bool {
        if self.placed_count() + self.unplaced_count() != self.total_items {
            return false;
        }
        let mut seen = vec![false; self.total_items];
        let ids = self
            .placements
            .iter()
            .map(|p| p.item_id)
            .chain(self.unplaced.iter().map(|u| u.item_id));
        for id in ids {
            match seen.get_mut(id) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    /// Placements inside one container.
    pub fn placements_in(&self, container_index: usize) -> impl Iterator<Item = &Placement> {
        self.placements
            .iter()
            .filter(move |p| p.container_index == container_index)
    }

    /// Unplaced items with the given reason.
    pub fn unplaced_with(&self, reason: UnplacedReason) -> impl Iterator<Item = &UnplacedItem> {
        self.unplaced.iter().filter(move |u| u.reason == reason)
    }

    /// Sets the strategy name.
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    /// Computes placement statistics.
    pub fn placement_stats(&self) -> PlacementStats {
        PlacementStats::from_placements(&self.placements)
    }

    /// Returns utilization as a percentage string.
    pub fn utilization_percent(&self) -> String {
        format!("{:.1}%", self.utilization * 100.0)
    }

    /// Recomputes the aggregate volumes and utilization from the container
    /// statistics.
    pub fn calculate_utilization(&mut self) {
        self.total_container_volume = self.containers.iter().map(|c| c.container_volume).sum();
        self.total_placed_volume = self.containers.iter().map(|c| c.placed_volume).sum();

        self.utilization = if self.total_container_volume > 0.0 {
            self.total_placed_volume / self.total_container_volume
        } else {
            0.0
        };
    }
}

impl Default for SolveResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics for a solve result.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveSummary {
    /// Total items requested.
    pub total_requested: usize,
    /// Total items placed.
    pub total_placed: usize,
    /// Total items left unplaced.
    pub total_unplaced: usize,
    /// Utilization percentage.
    pub utilization_percent: f64,
    /// Number of containers opened.
    pub containers_used: usize,
    /// Total volume of the opened containers.
    pub total_container_volume: f64,
    /// Computation time in milliseconds.
    pub time_ms: u64,
    /// Whether the run was truncated.
    pub truncated: bool,
    /// Strategy used.
    pub strategy: String,
}

impl From<&SolveResult> for SolveSummary {
    fn from(result: &SolveResult) -> Self {
        Self {
            total_requested: result.total_items,
            total_placed: result.placed_count(),
            total_unplaced: result.unplaced_count(),
            utilization_percent: result.utilization * 100.0,
            containers_used: result.containers_used(),
            total_container_volume: result.total_container_volume,
            time_ms: result.computation_time_ms,
            truncated: result.truncated,
            strategy: result
                .strategy
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
        }
    }
}
