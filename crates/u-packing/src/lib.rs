//! # U-Packing
//!
//! Deterministic 3D box packing.
//!
//! This crate provides:
//! - **Single-container packing**: items in input order, skip on failure
//! - **Multi-container allocation**: First-Fit-Decreasing over a catalog of
//!   container sizes
//!
//! ## Quick Start
//!
//! ```rust
//! use u_packing::d3::{ContainerCatalog, FfdAllocator, Item};
//! use u_packing::Solver;
//!
//! let items = vec![Item::new(0, 6.0, 6.0, 6.0), Item::new(1, 6.0, 6.0, 6.0)];
//! let catalog = ContainerCatalog::from_triples(&[[10.0, 10.0, 10.0]]).unwrap();
//! let result = FfdAllocator::default_config().solve(&items, &catalog).unwrap();
//! assert_eq!(result.containers_used(), 2);
//! ```
//!
//! ## Feature Flags
//!
//! - `d3` (default): 3D packing algorithms
//! - `serde`: Serialization support

/// Core traits and abstractions.
pub use u_packing_core as core;

/// 3D packing algorithms.
#[cfg(feature = "d3")]
pub use u_packing_d3 as d3;

// Re-export commonly used types at root level
pub use u_packing_core::{Config, Error, Placement, Result, SolveResult, Solver, UnplacedReason};
