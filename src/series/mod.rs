//! Series module - labeled one-dimensional data
//!
//! A Series pairs a value buffer with axis labels. Extractions from a
//! virtual frame that reduce one dimension produce a Series; its labels may
//! be flat or hierarchical depending on the label-retention policy.

use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use crate::core::error::{Error, Result};
use crate::core::hier_index::AxisLabels;
use crate::core::index::Index;

const DISPLAY_MAX_ROWS: usize = 10;

/// Series data structure
///
/// A one-dimensional array with axis labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<L, T>
where
    L: Debug + Clone + Eq + Hash + Display,
    T: Debug + Clone,
{
    /// Axis labels, one per value
    index: AxisLabels<L>,
    /// Series data values
    values: Vec<T>,
    /// Optional name for the series
    name: Option<String>,
}

impl<L, T> Series<L, T>
where
    L: Debug + Clone + Eq + Hash + Display,
    T: Debug + Clone,
{
    /// Create a new Series
    ///
    /// # Errors
    /// Returns `Error::LengthMismatch` if labels and values differ in length
    pub fn new(index: AxisLabels<L>, values: Vec<T>, name: Option<String>) -> Result<Self> {
        if index.len() != values.len() {
            return Err(Error::LengthMismatch {
                expected: index.len(),
                actual: values.len(),
            });
        }
        Ok(Self {
            index,
            values,
            name,
        })
    }

    /// Create a new Series over a flat index
    pub fn from_values(index: Index<L>, values: Vec<T>, name: Option<String>) -> Result<Self> {
        Self::new(AxisLabels::Flat(index), values, name)
    }

    /// Get the length of the Series
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the Series is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get an element at a position
    pub fn get(&self, pos: usize) -> Option<&T> {
        self.values.get(pos)
    }

    /// Get a reference to the values in the Series
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Get the axis labels
    pub fn index(&self) -> &AxisLabels<L> {
        &self.index
    }

    /// Get the name of the Series
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Copy the Series with a new name
    pub fn rename(&self, name: Option<String>) -> Self {
        let mut out = self.clone();
        out.name = name;
        out
    }

    /// Wrap every label with an outer level, turning flat labels hierarchical
    pub fn add_outer_label(&self, outer: &L) -> Result<Self> {
        Ok(Self {
            index: self.index.add_outer(outer)?,
            values: self.values.clone(),
            name: self.name.clone(),
        })
    }

    /// Concatenate several Series in input order
    ///
    /// The name is kept only when every part agrees on it.
    pub fn concat(parts: &[Self]) -> Result<Self> {
        let first = parts
            .first()
            .ok_or_else(|| Error::EmptyData("no series to concatenate".to_string()))?;
        let index = AxisLabels::concat(parts.iter().map(|p| &p.index))?;
        let mut values = Vec::with_capacity(index.len());
        for part in parts {
            values.extend(part.values.iter().cloned());
        }
        let name = if parts.iter().all(|p| p.name == first.name) {
            first.name.clone()
        } else {
            None
        };
        Self::new(index, values, name)
    }
}

impl<L, T> Display for Series<L, T>
where
    L: Debug + Clone + Eq + Hash + Display,
    T: Debug + Clone + Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => writeln!(f, "Series: {}", name)?,
            None => writeln!(f, "Series")?,
        }
        let max_show = self.len().min(DISPLAY_MAX_ROWS);
        for pos in 0..max_show {
            if let Some(label) = self.index.label_at(pos) {
                writeln!(f, "  {}  {}", label, self.values[pos])?;
            }
        }
        if self.len() > max_show {
            writeln!(f, "  ...")?;
            writeln!(f, "  {} rows total", self.len())?;
        }
        Ok(())
    }
}
