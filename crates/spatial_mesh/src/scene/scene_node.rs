//! Scene node representation

use crate::foundation::collections::NodeHandle;
use crate::foundation::math::Transform;
use crate::scene::{Geometry, MaterialId};
use bitflags::bitflags;

bitflags! {
    /// What changed on a node since a renderer last consumed it
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeChanges: u8 {
        /// Geometry buffers were rewritten
        const GEOMETRY = 0b0000_0001;
        /// Local transform was modified
        const TRANSFORM = 0b0000_0010;
    }
}

impl Default for NodeChanges {
    fn default() -> Self {
        Self::empty()
    }
}

/// Node stored by [`SimpleSceneGraph`](crate::scene::SimpleSceneGraph)
///
/// Holds a local transform relative to its parent, optionally a geometry with
/// its material binding, and the change flags a renderer drains.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Transform relative to the parent (or world, for root nodes)
    pub local: Transform,

    /// Parent node, `None` for roots
    pub parent: Option<NodeHandle>,

    /// Attached geometry, `None` for grouping nodes
    pub geometry: Option<Geometry>,

    /// Bound material
    pub material: Option<MaterialId>,

    /// Pending change flags
    pub changes: NodeChanges,
}

impl SceneNode {
    /// Create a grouping node without geometry
    pub fn group(local: Transform, parent: Option<NodeHandle>) -> Self {
        Self {
            local,
            parent,
            geometry: None,
            material: None,
            changes: NodeChanges::TRANSFORM,
        }
    }

    /// Create a node carrying geometry
    pub fn mesh(geometry: Geometry, material: Option<MaterialId>, parent: Option<NodeHandle>) -> Self {
        Self {
            local: Transform::identity(),
            parent,
            geometry: Some(geometry),
            material,
            changes: NodeChanges::all(),
        }
    }
}
