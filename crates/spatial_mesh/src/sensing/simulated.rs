//! Scripted in-memory sensing source
//!
//! Stands in for a real device in tests and replay tools. Surfaces are
//! mutated between ticks by the script driving them, and each tick is
//! captured as a [`SimulatedFrame`].

use super::{DetectedSurface, RigidTransform, SensingFrame, SurfaceKey, Timestamp};
use std::collections::HashMap;

/// A scripted surface with owned buffers
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedSurface {
    key: SurfaceKey,
    vertices: Vec<f32>,
    indices: Vec<u32>,
    last_changed_time: Timestamp,
}

impl SimulatedSurface {
    /// Create a surface with the given identity and initial geometry
    pub fn new(key: SurfaceKey, vertices: Vec<f32>, indices: Vec<u32>, changed_at: Timestamp) -> Self {
        Self {
            key,
            vertices,
            indices,
            last_changed_time: changed_at,
        }
    }

    /// Replace the geometry and advance the change timestamp
    pub fn remesh(&mut self, vertices: Vec<f32>, indices: Vec<u32>, changed_at: Timestamp) {
        self.vertices = vertices;
        self.indices = indices;
        self.last_changed_time = changed_at;
    }

    /// Advance the change timestamp without touching the geometry
    pub fn touch(&mut self, changed_at: Timestamp) {
        self.last_changed_time = changed_at;
    }
}

impl DetectedSurface for SimulatedSurface {
    fn key(&self) -> SurfaceKey {
        self.key
    }

    fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    fn indices(&self) -> &[u32] {
        &self.indices
    }

    fn last_changed_time(&self) -> Timestamp {
        self.last_changed_time
    }
}

/// Issues fresh surface identities
#[derive(Debug, Default)]
pub struct SurfaceKeyIssuer {
    next: u64,
}

impl SurfaceKeyIssuer {
    /// Create an issuer starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next unused key
    pub fn issue(&mut self) -> SurfaceKey {
        let key = SurfaceKey(self.next);
        self.next += 1;
        key
    }
}

/// One captured tick of the scripted source
#[derive(Debug, Clone, Default)]
pub struct SimulatedFrame {
    surfaces: Vec<SimulatedSurface>,
    poses: HashMap<SurfaceKey, RigidTransform>,
}

impl SimulatedFrame {
    /// Create an empty frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a surface without a resolvable pose
    pub fn with_surface(mut self, surface: SimulatedSurface) -> Self {
        self.surfaces.push(surface);
        self
    }

    /// Add a surface with a resolvable pose
    pub fn with_posed_surface(mut self, surface: SimulatedSurface, pose: RigidTransform) -> Self {
        self.poses.insert(surface.key, pose);
        self.surfaces.push(surface);
        self
    }

    /// Number of surfaces in this frame
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether this frame reports no surfaces
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl SensingFrame for SimulatedFrame {
    type Surface = SimulatedSurface;

    fn detected_surfaces(&self) -> &[SimulatedSurface] {
        &self.surfaces
    }

    fn resolve_pose(&self, surface: &SimulatedSurface) -> Option<RigidTransform> {
        self.poses.get(&surface.key).copied()
    }
}
