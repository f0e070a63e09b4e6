//! # Spatial Mesh
//!
//! Keeps a live set of scene-graph geometry in step with the surfaces an
//! environment-sensing device reports every frame.
//!
//! ## Features
//!
//! - **Incremental**: geometry is created on first sighting and rewritten in
//!   place only when a surface reports a newer change time
//! - **Allocation-stable**: nodes and buffers are never reallocated after
//!   creation
//! - **Pose tracking**: sensed rigid transforms become node world transforms
//! - **Collaborator traits**: bring your own scene graph and sensing source
//!
//! ## Quick Start
//!
//! ```rust
//! use spatial_mesh::prelude::*;
//! use spatial_mesh::sensing::simulated::{SimulatedFrame, SimulatedSurface};
//!
//! let mut scene = SimpleSceneGraph::new();
//! let mut engine = SyncEngine::with_config(SyncConfig::default().with_material(MaterialId(1)));
//!
//! let floor = SimulatedSurface::new(
//!     SurfaceKey(0),
//!     vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0],
//!     vec![0, 1, 2],
//!     Timestamp::from_millis(0.0),
//! );
//! let frame = SimulatedFrame::new().with_surface(floor);
//!
//! let report = engine.update(1.0 / 72.0, Some(&frame), &mut scene)?;
//! assert_eq!(report.created, 1);
//! # Ok::<(), spatial_mesh::sync::SyncError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod sensing;
pub mod scene;
pub mod sync;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigFormat, EvictionPolicy, PosePolicy, SyncConfig},
        foundation::math::{Quat, Transform, Vec3},
        scene::{Geometry, MaterialId, NodeHandle, SceneGraph, SimpleSceneGraph},
        sensing::{DetectedSurface, RigidTransform, SensingFrame, SurfaceKey, Timestamp},
        sync::{MeshId, SyncEngine, SyncError, TickReport},
    };
}
