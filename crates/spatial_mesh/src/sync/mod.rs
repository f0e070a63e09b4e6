//! Incremental surface synchronization
//!
//! ```text
//! SensingFrame ─→ SyncEngine ─→ SurfaceRegistry (lookup / insert)
//!                     │
//!                     ├─→ GeometryBufferWriter (create / rewrite in place)
//!                     └─→ TransformApplier ─→ SceneGraph
//! ```

mod buffer_writer;
mod engine;
mod error;
mod registry;
mod transform_applier;

#[cfg(test)]
mod tests;

pub use buffer_writer::GeometryBufferWriter;
pub use engine::{SyncEngine, TickReport};
pub use error::{GeometryError, SyncError};
pub use registry::{MeshId, SurfaceRegistry, TrackedMesh};
pub use transform_applier::TransformApplier;
