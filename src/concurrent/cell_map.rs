use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;

use super::guarded::Guarded;

/// A concurrent map from keys to shared guarded cells. Cells are created
/// lazily on first access and live until the map is dropped or cleared, so
/// holders of a cell handle never see it disappear mid-use.
pub struct CellMap<K: Eq + Hash, V> {
    cells: DashMap<K, Arc<Guarded<V>>>,
}

impl<K: Eq + Hash, V: Default> CellMap<K, V> {
    pub fn new() -> Self {
        Self {
            cells: DashMap::new(),
        }
    }

    /// Returns the cell for `key`, creating it atomically if absent.
    pub fn cell(&self, key: K) -> Arc<Guarded<V>> {
        self.cells
            .entry(key)
            .or_insert_with(|| Arc::new(Guarded::default()))
            .clone()
    }

    /// Returns the cell for `key` only if it already exists.
    pub fn peek(&self, key: &K) -> Option<Arc<Guarded<V>>> {
        self.cells.get(key).map(|cell| cell.clone())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.cells.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&self) {
        self.cells.clear();
    }
}

impl<K: Eq + Hash, V: Default> Default for CellMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
