//! Surface registry
//!
//! Correspondence between external surface identities and the tracked mesh
//! records the engine keeps for them. Records live in a slot-map arena and
//! are indexed by [`SurfaceKey`]; the registry never touches geometry.

use crate::foundation::collections::{HandleMap, NodeHandle, TrackedMeshKey};
use crate::sensing::{SurfaceKey, Timestamp};
use std::collections::HashMap;
use std::fmt;

/// Engine-assigned mesh id, issued from a monotonically increasing counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub u64);

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mesh#{}", self.0)
    }
}

/// Internal record correlating one external surface with its owned node
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedMesh {
    /// Id assigned at creation, never reused or reassigned
    pub id: MeshId,

    /// Change time of the surface at the last successful buffer rewrite
    pub timestamp: Timestamp,

    /// Scene node exclusively owned by this record
    pub node: NodeHandle,

    /// Tick on which the surface was last reported
    pub last_seen_tick: u64,
}

/// Mapping from surface identity to tracked mesh record
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    index: HashMap<SurfaceKey, TrackedMeshKey>,
    records: HandleMap<TrackedMeshKey, TrackedMesh>,
}

impl SurfaceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the record for a surface
    pub fn lookup(&self, surface: SurfaceKey) -> Option<&TrackedMesh> {
        self.records.get(*self.index.get(&surface)?)
    }

    /// Find the record for a surface, mutably
    pub fn lookup_mut(&mut self, surface: SurfaceKey) -> Option<&mut TrackedMesh> {
        self.records.get_mut(*self.index.get(&surface)?)
    }

    /// Register `record` for `surface`
    ///
    /// Each identity is inserted once by the engine. Inserting the same
    /// identity again replaces the previous record.
    pub fn insert(&mut self, surface: SurfaceKey, record: TrackedMesh) {
        let slot = self.records.insert(record);
        if let Some(previous) = self.index.insert(surface, slot) {
            self.records.remove(previous);
        }
    }

    /// Drop the record for a surface
    pub fn remove(&mut self, surface: SurfaceKey) -> Option<TrackedMesh> {
        let slot = self.index.remove(&surface)?;
        self.records.remove(slot)
    }

    /// Surfaces not reported for at least `missed` consecutive ticks as of `tick`
    pub fn missed_at_least(&self, tick: u64, missed: u32) -> Vec<SurfaceKey> {
        let mut stale: Vec<SurfaceKey> = self
            .index
            .iter()
            .filter(|(_, slot)| {
                self.records
                    .get(**slot)
                    .is_some_and(|r| tick.saturating_sub(r.last_seen_tick) >= u64::from(missed))
            })
            .map(|(surface, _)| *surface)
            .collect();
        stale.sort_unstable();
        stale
    }

    /// Iterate over all records
    pub fn iter(&self) -> impl Iterator<Item = (SurfaceKey, &TrackedMesh)> {
        self.index
            .iter()
            .filter_map(|(surface, slot)| self.records.get(*slot).map(|r| (*surface, r)))
    }

    /// Number of tracked surfaces
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether nothing is tracked
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn record(id: u64, node: NodeHandle, seen: u64) -> TrackedMesh {
        TrackedMesh {
            id: MeshId(id),
            timestamp: Timestamp::from_millis(0.0),
            node,
            last_seen_tick: seen,
        }
    }

    fn nodes(count: usize) -> Vec<NodeHandle> {
        let mut arena: SlotMap<NodeHandle, ()> = SlotMap::with_key();
        (0..count).map(|_| arena.insert(())).collect()
    }

    #[test]
    fn test_lookup_by_identity() {
        let handles = nodes(2);
        let mut registry = SurfaceRegistry::new();
        registry.insert(SurfaceKey(1), record(0, handles[0], 0));
        registry.insert(SurfaceKey(2), record(1, handles[1], 0));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup(SurfaceKey(1)).map(|r| r.id), Some(MeshId(0)));
        assert_eq!(registry.lookup(SurfaceKey(2)).map(|r| r.node), Some(handles[1]));
        assert!(registry.lookup(SurfaceKey(3)).is_none());
    }

    #[test]
    fn test_reinsert_replaces_record() {
        let handles = nodes(2);
        let mut registry = SurfaceRegistry::new();
        registry.insert(SurfaceKey(1), record(0, handles[0], 0));
        registry.insert(SurfaceKey(1), record(5, handles[1], 0));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.iter().count(), 1);
        assert_eq!(registry.lookup(SurfaceKey(1)).map(|r| r.id), Some(MeshId(5)));
    }

    #[test]
    fn test_lookup_mut_and_remove() {
        let handles = nodes(1);
        let mut registry = SurfaceRegistry::new();
        registry.insert(SurfaceKey(9), record(0, handles[0], 0));

        if let Some(r) = registry.lookup_mut(SurfaceKey(9)) {
            r.timestamp = Timestamp::from_millis(42.0);
        }
        let removed = registry.remove(SurfaceKey(9)).unwrap();

        assert_eq!(removed.timestamp, Timestamp::from_millis(42.0));
        assert!(registry.is_empty());
        assert!(registry.remove(SurfaceKey(9)).is_none());
    }

    #[test]
    fn test_missed_at_least() {
        let handles = nodes(3);
        let mut registry = SurfaceRegistry::new();
        registry.insert(SurfaceKey(0), record(0, handles[0], 10));
        registry.insert(SurfaceKey(1), record(1, handles[1], 7));
        registry.insert(SurfaceKey(2), record(2, handles[2], 4));

        assert_eq!(registry.missed_at_least(10, 3), vec![SurfaceKey(1), SurfaceKey(2)]);
        assert_eq!(registry.missed_at_least(10, 4), vec![SurfaceKey(2)]);
        assert!(registry.missed_at_least(10, 7).is_empty());
    }
}
