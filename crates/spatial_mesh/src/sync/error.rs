//! Synchronization errors

use crate::scene::SceneError;
use thiserror::Error;

/// Per-surface geometry contract violations
///
/// Recoverable: the engine skips the offending surface for the current tick
/// and keeps processing the rest.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Vertex buffer length is not a multiple of three
    #[error("Vertex buffer length {len} is not a multiple of 3")]
    VertexStride {
        /// Reported buffer length in floats
        len: usize,
    },

    /// Vertex count differs from the count fixed at allocation
    #[error("Vertex count mismatch: geometry holds {expected}, surface reports {actual}")]
    VertexCountMismatch {
        /// Count fixed at allocation
        expected: usize,
        /// Count reported by the surface
        actual: usize,
    },

    /// Index count differs from the count fixed at allocation
    #[error("Index count mismatch: geometry holds {expected}, surface reports {actual}")]
    IndexCountMismatch {
        /// Count fixed at allocation
        expected: usize,
        /// Count reported by the surface
        actual: usize,
    },
}

/// Tick-level synchronization failure
///
/// Returned from [`SyncEngine::step`](crate::sync::SyncEngine::step) when the
/// scene graph collaborator misbehaves and there is no safe partial state to
/// continue from.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Scene graph operation failed
    #[error("Scene graph error: {0}")]
    Scene(#[from] SceneError),
}
