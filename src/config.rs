//! Configuration for the partitioning engine
//!
//! Knobs for the partitioning constructor, loadable from and savable to
//! JSON files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::axis::Axis;
use crate::core::error::Result;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Positions per partition when splitting a monolithic frame
    pub chunksize: usize,
    /// Axis along which partitions are distributed
    pub partition_axis: Axis,
    /// Whether the partitioned axis keeps its partition label level
    pub retain_labels: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            chunksize: 100_000,
            partition_axis: Axis::Rows,
            retain_labels: false,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save the configuration to a JSON file
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
