//! Scene graph contracts
//!
//! The synchronization engine never owns a renderer. It talks to whatever
//! scene graph the host provides through [`SceneGraph`], and owns only the
//! nodes it created through that trait.
//!
//! ## Architecture
//!
//! ```text
//! SyncEngine (surface correspondence)
//!      ↓
//! SceneGraph trait (node + geometry + transform API)
//!      ↓
//! Host renderer (or SimpleSceneGraph in tests and tools)
//! ```

mod geometry;
mod material;
mod scene_graph;
mod scene_node;

pub use geometry::Geometry;
pub use material::MaterialId;
pub use scene_graph::{SceneError, SceneGraph, SimpleSceneGraph};
pub use scene_node::{NodeChanges, SceneNode};
pub use crate::foundation::collections::NodeHandle;
