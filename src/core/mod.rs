// Core data structures and traits for mosaicrs
pub mod axis;
pub mod axis_map;
pub mod error;
pub mod hier_index;
pub mod index;
pub mod select;

// Re-exports for convenience
pub use axis::Axis;
pub use axis_map::AxisMap;
pub use error::{Error, Result};
pub use hier_index::{AxisLabels, HierIndex, Label};
pub use index::Index;
pub use select::{LabelSelect, PosSelect};
