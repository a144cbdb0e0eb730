//! mosaicrs - a virtual partitioned DataFrame engine
//!
//! One logical 2-dimensional labeled table is presented as a read-only
//! view over a collection of independently stored or loaded partitions.
//! Partitions live in an ordered, lazily-loading [`Bus`]; the
//! [`VirtualFrame`] facade derives unified axis labels on first access,
//! translates selections into per-partition sub-selections, and merges
//! the partial results back into a single correctly-labeled result.

// Core module with fundamental data structures and traits
pub mod core;

// Collaborator containers
pub mod bus;
pub mod frame;
pub mod series;

// The virtual frame facade
pub mod virtual_frame;

// Configuration and partition storage
pub mod config;
pub mod io;

// Re-export core types
pub use crate::core::axis::Axis;
pub use crate::core::axis_map::AxisMap;
pub use crate::core::error::{Error, Result};
pub use crate::core::hier_index::{AxisLabels, HierIndex, Label};
pub use crate::core::index::Index;
pub use crate::core::select::{LabelSelect, PosSelect};

// Re-export container types
pub use bus::{Bus, PartitionSource};
pub use config::EngineConfig;
pub use frame::{Extracted, Frame};
pub use series::Series;
pub use virtual_frame::VirtualFrame;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
