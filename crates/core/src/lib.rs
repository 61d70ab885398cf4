//! # U-Packing Core
//!
//! Core traits and abstractions for the U-Packing 3D box packing engine.
//!
//! This crate provides the types shared between the packing algorithms and
//! the code that feeds and reports on them. It holds no geometry.
//!
//! ## Core Components
//!
//! - **Solver trait**: Common interface for the single-container solver and
//!   the multi-container allocator
//! - **Configuration**: Deadline and parallelism settings
//! - **Result types**: Placements, unplaced items, per-container metrics
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod error;
pub mod placement;
pub mod result;
pub mod solver;

// Re-exports
pub use error::{Error, Result};
pub use placement::{ItemId, Placement, PlacementStats};
pub use result::{ContainerStats, SolveResult, SolveSummary, UnplacedItem, UnplacedReason};
pub use solver::{Config, ProgressCallback, ProgressInfo, Solver};
