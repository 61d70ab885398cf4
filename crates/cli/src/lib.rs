//! Item sources, synthetic instances and run reports for U-Packing.
//!
//! This crate provides:
//! - CSV item source and CSV/JSON container catalog parsers
//! - Synthetic instance generation by recursive cutting
//! - Run reports with JSON and CSV export

mod dataset;
mod parser;
mod report;
mod synthetic;

pub use dataset::{Dataset, DatasetInfo, ItemRecord};
pub use parser::{DatasetParser, ParseError};
pub use report::{ContainerRow, RunReport};
pub use synthetic::{generate_by_cutting, write_items_csv, DEFAULT_SEED};
