//! Handle types for arena-backed storage

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a scene node owned by a scene graph
    pub struct NodeHandle;

    /// Stable handle to a tracked mesh record inside the surface registry
    pub struct TrackedMeshKey;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<K, T> = SlotMap<K, T>;
