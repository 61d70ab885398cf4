//! # U-Packing 3D
//!
//! Deterministic 3D box packing for the U-Packing engine.
//!
//! This crate provides axis-aligned box geometry with the six orthogonal
//! rotations, an exhaustive integer-grid placement search, a single-container
//! solver and a First-Fit-Decreasing allocator over a catalog of container
//! sizes.
//!
//! ## Quick Start
//!
//! ```rust
//! use u_packing_d3::{ContainerCatalog, FfdAllocator, Item, Solver};
//!
//! let items = vec![Item::new(0, 30.0, 20.0, 10.0), Item::new(1, 10.0, 10.0, 10.0)];
//! let allocator = FfdAllocator::default_config();
//! let result = allocator.solve(&items, &ContainerCatalog::standard()).unwrap();
//! assert!(result.all_placed());
//! ```

pub mod allocator;
pub mod boundary;
pub mod geometry;
pub mod hint;
pub mod metrics;
pub mod packer;
pub mod packing_utils;
pub mod search;

// Re-exports
pub use allocator::FfdAllocator;
pub use boundary::{Container, ContainerCatalog};
pub use geometry::{
    expand_items, fits_within, overlaps, rotations, Aabb3D, Dimensions, Item, PlacedBox,
    Position, Rotation, EPSILON,
};
pub use hint::{hint_fn, ContainerView, Hint, HintProvider, NoHint, SeededHint, StackHint};
pub use packer::Packer3D;
pub use search::{find_placement, Candidate};
pub use u_packing_core::{
    Config, Error, Placement, ProgressCallback, ProgressInfo, Result, SolveResult, Solver,
    UnplacedReason,
};
