//! Item records as read from an item source.

use serde::{Deserialize, Serialize};
use u_packing_d3::{expand_items, Dimensions, Item};

/// One `length,width,height,quantity` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Item length
    pub length: f64,
    /// Item width
    pub width: f64,
    /// Item height
    pub height: f64,
    /// Number of identical items this row stands for
    pub quantity: usize,
}

impl ItemRecord {
    /// Creates a new record.
    pub fn new(length: f64, width: f64, height: f64, quantity: usize) -> Self {
        Self {
            length,
            width,
            height,
            quantity,
        }
    }

    /// Extents of one item of this record.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.length, self.width, self.height)
    }

    /// Volume of all items of this record.
    pub fn total_volume(&self) -> f64 {
        self.dimensions().volume() * self.quantity as f64
    }
}

/// Summary of a loaded dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Dataset name (file stem)
    pub name: String,
    /// Number of accepted rows
    pub record_count: usize,
    /// Items after quantity expansion
    pub total_items: usize,
    /// Sum of all item volumes
    pub total_volume: f64,
    /// Rows rejected while parsing
    pub skipped_rows: usize,
}

/// A parsed item source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Dataset name
    pub name: String,
    /// Accepted rows, in file order
    pub records: Vec<ItemRecord>,
    /// Number of malformed rows that were skipped
    pub skipped_rows: usize,
}

impl Dataset {
    /// Returns dataset information.
    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            name: self.name.clone(),
            record_count: self.records.len(),
            total_items: self.records.iter().map(|r| r.quantity).sum(),
            total_volume: self.records.iter().map(ItemRecord::total_volume).sum(),
            skipped_rows: self.skipped_rows,
        }
    }

    /// Expands records by quantity into individual items.
    /// Ids run from 0 in file order.
    pub fn expand_items(&self) -> Vec<Item> {
        expand_items(
            self.records
                .iter()
                .map(|record| (record.dimensions(), record.quantity)),
        )
    }
}
