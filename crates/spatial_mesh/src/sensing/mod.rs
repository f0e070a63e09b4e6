//! Sensing source contracts
//!
//! The sensing collaborator (a headset or scanner continuously re-meshing
//! its surroundings) is external to this crate. These traits describe what
//! the synchronization engine needs from it each tick:
//!
//! ```text
//! SensingFrame
//!   ├─ detected_surfaces() ─→ [DetectedSurface]
//!   │                            ├─ key()               stable identity
//!   │                            ├─ vertices()          flat x,y,z floats
//!   │                            ├─ indices()           flat u32 triangles
//!   │                            └─ last_changed_time() monotonic stamp
//!   └─ resolve_pose(surface) ─→ Option<RigidTransform>
//! ```

pub mod simulated;

use crate::foundation::math::{quat_from_xyzw, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable identity of an external surface
///
/// Issued by the sensing collaborator. Two handles compare equal exactly when
/// they denote the same surface; content never participates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceKey(pub u64);

impl fmt::Display for SurfaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Monotonic change timestamp reported by the sensing source (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Timestamp(f64);

impl Timestamp {
    /// Create a timestamp from milliseconds
    pub const fn from_millis(millis: f64) -> Self {
        Self(millis)
    }

    /// Milliseconds since the source's time origin
    pub const fn as_millis(self) -> f64 {
        self.0
    }

    /// Whether this timestamp is strictly newer than `other`
    pub fn is_newer_than(self, other: Self) -> bool {
        self.0 > other.0
    }
}

/// Position plus orientation of a surface relative to the reference space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    /// Cartesian position
    pub position: Vec3,

    /// Unit orientation
    pub orientation: Quat,
}

impl RigidTransform {
    /// Create a rigid transform
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self { position, orientation }
    }

    /// Create from raw `{x, y, z}` position and `{x, y, z, w}` orientation
    pub fn from_components(position: [f32; 3], orientation: [f32; 4]) -> Self {
        let [x, y, z, w] = orientation;
        Self {
            position: Vec3::new(position[0], position[1], position[2]),
            orientation: quat_from_xyzw(x, y, z, w),
        }
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::new(Vec3::zeros(), Quat::identity())
    }
}

/// A surface reported by the sensing source this tick
///
/// Read-only to the engine; buffers are borrowed for the duration of a tick.
pub trait DetectedSurface {
    /// Stable identity used as the registry key
    fn key(&self) -> SurfaceKey;

    /// Flat vertex buffer, stride 3 (x, y, z per vertex)
    fn vertices(&self) -> &[f32];

    /// Flat triangle index buffer
    fn indices(&self) -> &[u32];

    /// Time the surface's geometry last changed
    fn last_changed_time(&self) -> Timestamp;
}

/// One tick of the sensing source, bound to a reference space
pub trait SensingFrame {
    /// Surface type enumerated by this frame
    type Surface: DetectedSurface;

    /// Surfaces detected this tick, in the source's enumeration order
    fn detected_surfaces(&self) -> &[Self::Surface];

    /// Resolve a surface's pose against the reference space
    ///
    /// Returns `None` when the pose cannot be resolved this tick; that is not
    /// an error.
    fn resolve_pose(&self, surface: &Self::Surface) -> Option<RigidTransform>;
}
