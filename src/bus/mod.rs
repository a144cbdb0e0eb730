//! Bus module - ordered, lazily-loading keyed collection of partitions
//!
//! A Bus maps partition labels to [`Frame`]s in a fixed order. Partitions
//! materialize on first access, either eagerly at construction or on demand
//! through a [`PartitionSource`], and stay cached for the Bus's lifetime.
//! Repeated fetches of the same label always return the same partition.

use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::sync::Arc;

use crate::core::error::{Error, Result};
use crate::frame::Frame;

/// Deferred partition storage
///
/// Loading is treated as potentially expensive and blocking; it must be
/// idempotent and side-effect-free as far as the Bus is concerned.
pub trait PartitionSource<L, T>
where
    L: Debug + Clone + Eq + Hash + Display,
    T: Debug + Clone,
{
    /// Materialize the partition stored under a label
    fn load(&self, label: &L) -> Result<Frame<L, T>>;
}

/// Ordered mapping from partition label to partition
#[derive(Clone)]
pub struct Bus<L, T>
where
    L: Debug + Clone + Eq + Hash + Display,
    T: Debug + Clone,
{
    /// Partition labels, in bus order
    labels: Vec<L>,
    /// Mapping from label to first occurrence slot
    map: HashMap<L, usize>,
    /// Per-slot load-once partition cache
    slots: Vec<OnceCell<Arc<Frame<L, T>>>>,
    /// Deferred storage; absent when every slot was filled at construction
    source: Option<Arc<dyn PartitionSource<L, T>>>,
    /// Optional bus name
    name: Option<String>,
}

impl<L, T> Debug for Bus<L, T>
where
    L: Debug + Clone + Eq + Hash + Display,
    T: Debug + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus")
            .field("labels", &self.labels)
            .field("loaded", &self.loaded())
            .field("name", &self.name)
            .finish()
    }
}

impl<L, T> Bus<L, T>
where
    L: Debug + Clone + Eq + Hash + Display,
    T: Debug + Clone,
{
    /// Create a Bus from fully materialized (label, partition) pairs
    ///
    /// Duplicate labels are kept in order; label lookup resolves to the
    /// first occurrence.
    pub fn from_frames(pairs: Vec<(L, Frame<L, T>)>, name: Option<String>) -> Self {
        let mut labels = Vec::with_capacity(pairs.len());
        let mut map = HashMap::with_capacity(pairs.len());
        let mut slots = Vec::with_capacity(pairs.len());
        for (i, (label, frame)) in pairs.into_iter().enumerate() {
            map.entry(label.clone()).or_insert(i);
            labels.push(label);
            let cell = OnceCell::new();
            let _ = cell.set(Arc::new(frame));
            slots.push(cell);
        }
        Self {
            labels,
            map,
            slots,
            source: None,
            name,
        }
    }

    /// Create a Bus whose partitions load on demand from a source
    pub fn from_source(
        labels: Vec<L>,
        source: Arc<dyn PartitionSource<L, T>>,
        name: Option<String>,
    ) -> Self {
        let mut map = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            map.entry(label.clone()).or_insert(i);
        }
        let slots = (0..labels.len()).map(|_| OnceCell::new()).collect();
        Self {
            labels,
            map,
            slots,
            source: Some(source),
            name,
        }
    }

    /// Number of partitions
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the Bus holds no partitions
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Partition labels, in bus order
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// The bus name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Copy the Bus with a new name, sharing partitions and source
    pub fn rename(&self, name: Option<String>) -> Self {
        let mut out = self.clone();
        out.name = name;
        out
    }

    /// Slot position of a label (first occurrence)
    pub fn position_of(&self, label: &L) -> Option<usize> {
        self.map.get(label).copied()
    }

    /// Number of partitions currently materialized
    pub fn loaded(&self) -> usize {
        self.slots.iter().filter(|cell| cell.get().is_some()).count()
    }

    /// Fetch a partition by label, loading it on first access
    pub fn get_by_label(&self, label: &L) -> Result<Arc<Frame<L, T>>> {
        let pos = self
            .position_of(label)
            .ok_or_else(|| Error::PartitionNotFound(label.to_string()))?;
        self.load_slot(pos)
    }

    /// Fetch a partition by position, loading it on first access
    pub fn get_by_position(&self, pos: usize) -> Result<Arc<Frame<L, T>>> {
        if pos >= self.labels.len() {
            return Err(Error::PositionOutOfBounds {
                index: pos,
                size: self.labels.len(),
            });
        }
        self.load_slot(pos)
    }

    /// Ordered iteration of (label, partition), loading lazily as it goes
    pub fn iter(&self) -> impl Iterator<Item = Result<(&L, Arc<Frame<L, T>>)>> + '_ {
        (0..self.len()).map(move |pos| self.load_slot(pos).map(|frame| (&self.labels[pos], frame)))
    }

    fn load_slot(&self, pos: usize) -> Result<Arc<Frame<L, T>>> {
        let slot = &self.slots[pos];
        if let Some(frame) = slot.get() {
            return Ok(frame.clone());
        }
        let source = self.source.as_ref().ok_or_else(|| {
            Error::PartitionNotFound(self.labels[pos].to_string())
        })?;
        let frame = Arc::new(source.load(&self.labels[pos])?);
        Ok(slot.get_or_init(|| frame).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::index::Index;
    use std::cell::RefCell;

    fn frame(tag: i64) -> Frame<String, i64> {
        Frame::new(
            Index::new(vec![format!("r{}", tag)]),
            Index::new(vec!["c0".to_string()]),
            vec![tag],
        )
        .unwrap()
    }

    struct CountingSource {
        loads: RefCell<Vec<String>>,
    }

    impl PartitionSource<String, i64> for CountingSource {
        fn load(&self, label: &String) -> Result<Frame<String, i64>> {
            self.loads.borrow_mut().push(label.clone());
            Ok(frame(label.trim_start_matches('p').parse().map_err(|_| {
                Error::ParseValue(label.clone())
            })?))
        }
    }

    #[test]
    fn test_eager_bus_lookup() {
        let bus = Bus::from_frames(
            vec![("p0".to_string(), frame(0)), ("p1".to_string(), frame(1))],
            None,
        );
        assert_eq!(bus.len(), 2);
        assert_eq!(bus.loaded(), 2);
        let part = bus.get_by_label(&"p1".to_string()).unwrap();
        assert_eq!(part.values(), &[1]);
        assert!(bus.get_by_label(&"p9".to_string()).is_err());
    }

    #[test]
    fn test_lazy_bus_loads_once() {
        let source = Arc::new(CountingSource {
            loads: RefCell::new(Vec::new()),
        });
        let bus = Bus::from_source(
            vec!["p0".to_string(), "p1".to_string()],
            source.clone(),
            None,
        );
        assert_eq!(bus.loaded(), 0);

        bus.get_by_label(&"p1".to_string()).unwrap();
        bus.get_by_label(&"p1".to_string()).unwrap();
        assert_eq!(bus.loaded(), 1);
        assert_eq!(source.loads.borrow().as_slice(), &["p1".to_string()]);

        for item in bus.iter() {
            item.unwrap();
        }
        assert_eq!(bus.loaded(), 2);
        assert_eq!(source.loads.borrow().len(), 2);
    }
}
