//! Scene graph trait and implementations
//!
//! Provides the node API the synchronization engine drives, plus a simple
//! slot-map backed implementation used by tests and replay tools.

use crate::foundation::collections::{HandleMap, NodeHandle};
use crate::foundation::math::{Quat, Transform, Vec3};
use crate::scene::{Geometry, MaterialId, NodeChanges, SceneNode};
use thiserror::Error;

/// Scene graph errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Handle does not refer to a live node
    #[error("Scene node not found: {0:?}")]
    NodeNotFound(NodeHandle),

    /// Node or geometry allocation failed
    #[error("Allocation failed: {0}")]
    AllocationFailed(String),
}

/// Trait for scene graphs the synchronization engine can drive
///
/// Mirrors the small slice of a scene API the engine needs: creating a node
/// with geometry and material, in-place geometry access, and world-space
/// transform writes. Implementations own the nodes; callers hold handles.
pub trait SceneGraph {
    /// Create a node carrying `geometry`, bound to `material`
    fn create_mesh_node(
        &mut self,
        geometry: Geometry,
        material: Option<MaterialId>,
    ) -> Result<NodeHandle, SceneError>;

    /// Destroy a node and everything parented under it
    fn remove_node(&mut self, node: NodeHandle) -> Result<(), SceneError>;

    /// Geometry attached to a node
    fn geometry(&self, node: NodeHandle) -> Option<&Geometry>;

    /// Geometry attached to a node, for in-place rewrites
    fn geometry_mut(&mut self, node: NodeHandle) -> Option<&mut Geometry>;

    /// Reset the node's local position and rotation to identity
    fn reset_position_rotation(&mut self, node: NodeHandle) -> Result<(), SceneError>;

    /// Set the node's rotation in world space
    fn set_rotation_world(&mut self, node: NodeHandle, rotation: Quat) -> Result<(), SceneError>;

    /// Set the node's position in world space
    fn set_position_world(&mut self, node: NodeHandle, position: Vec3) -> Result<(), SceneError>;

    /// Current world transform of a node
    fn world_transform(&self, node: NodeHandle) -> Option<Transform>;

    /// Get the total number of nodes in the scene graph
    fn node_count(&self) -> usize;
}

/// Simple slot-map scene graph
///
/// No spatial acceleration; world transforms are resolved by walking the
/// parent chain on demand. Mesh nodes created through [`SceneGraph`] are
/// parented under the configured mesh parent, if any.
#[derive(Debug, Default)]
pub struct SimpleSceneGraph {
    nodes: HandleMap<NodeHandle, SceneNode>,
    mesh_parent: Option<NodeHandle>,
}

impl SimpleSceneGraph {
    /// Create a new empty scene graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a grouping node without geometry
    pub fn create_group(
        &mut self,
        local: Transform,
        parent: Option<NodeHandle>,
    ) -> Result<NodeHandle, SceneError> {
        if let Some(parent) = parent {
            self.require(parent)?;
        }
        Ok(self.nodes.insert(SceneNode::group(local, parent)))
    }

    /// Parent subsequently created mesh nodes under `parent`
    pub fn set_mesh_parent(&mut self, parent: Option<NodeHandle>) -> Result<(), SceneError> {
        if let Some(parent) = parent {
            self.require(parent)?;
        }
        self.mesh_parent = parent;
        Ok(())
    }

    /// Replace a node's local transform
    pub fn set_local_transform(&mut self, node: NodeHandle, local: Transform) -> Result<(), SceneError> {
        let entry = self.require_mut(node)?;
        entry.local = local;
        entry.changes |= NodeChanges::TRANSFORM;
        Ok(())
    }

    /// Get a node by handle
    pub fn node(&self, node: NodeHandle) -> Option<&SceneNode> {
        self.nodes.get(node)
    }

    /// Check if a node is alive
    pub fn contains(&self, node: NodeHandle) -> bool {
        self.nodes.contains_key(node)
    }

    /// Material bound to a node
    pub fn material(&self, node: NodeHandle) -> Option<MaterialId> {
        self.nodes.get(node).and_then(|n| n.material)
    }

    /// Drain a node's pending change flags
    pub fn take_changes(&mut self, node: NodeHandle) -> NodeChanges {
        self.nodes
            .get_mut(node)
            .map(|n| std::mem::replace(&mut n.changes, NodeChanges::empty()))
            .unwrap_or_default()
    }

    fn require(&self, node: NodeHandle) -> Result<&SceneNode, SceneError> {
        self.nodes.get(node).ok_or(SceneError::NodeNotFound(node))
    }

    fn require_mut(&mut self, node: NodeHandle) -> Result<&mut SceneNode, SceneError> {
        self.nodes.get_mut(node).ok_or(SceneError::NodeNotFound(node))
    }

    /// World transform of a node's parent, identity for roots
    fn parent_world(&self, node: NodeHandle) -> Result<Transform, SceneError> {
        match self.require(node)?.parent {
            Some(parent) => self
                .world_transform(parent)
                .ok_or(SceneError::NodeNotFound(parent)),
            None => Ok(Transform::identity()),
        }
    }
}

impl SceneGraph for SimpleSceneGraph {
    fn create_mesh_node(
        &mut self,
        geometry: Geometry,
        material: Option<MaterialId>,
    ) -> Result<NodeHandle, SceneError> {
        if let Some(parent) = self.mesh_parent {
            if !self.nodes.contains_key(parent) {
                return Err(SceneError::AllocationFailed(format!(
                    "mesh parent {:?} no longer exists",
                    parent
                )));
            }
        }
        Ok(self.nodes.insert(SceneNode::mesh(geometry, material, self.mesh_parent)))
    }

    fn remove_node(&mut self, node: NodeHandle) -> Result<(), SceneError> {
        self.require(node)?;

        let mut doomed = vec![node];
        let mut cursor = 0;
        while cursor < doomed.len() {
            let current = doomed[cursor];
            doomed.extend(
                self.nodes
                    .iter()
                    .filter(|(_, n)| n.parent == Some(current))
                    .map(|(handle, _)| handle),
            );
            cursor += 1;
        }

        for handle in doomed {
            self.nodes.remove(handle);
        }
        if self.mesh_parent.is_some_and(|p| !self.nodes.contains_key(p)) {
            self.mesh_parent = None;
        }
        Ok(())
    }

    fn geometry(&self, node: NodeHandle) -> Option<&Geometry> {
        self.nodes.get(node)?.geometry.as_ref()
    }

    fn geometry_mut(&mut self, node: NodeHandle) -> Option<&mut Geometry> {
        let entry = self.nodes.get_mut(node)?;
        if entry.geometry.is_some() {
            entry.changes |= NodeChanges::GEOMETRY;
        }
        entry.geometry.as_mut()
    }

    fn reset_position_rotation(&mut self, node: NodeHandle) -> Result<(), SceneError> {
        self.set_local_transform(node, Transform::identity())
    }

    fn set_rotation_world(&mut self, node: NodeHandle, rotation: Quat) -> Result<(), SceneError> {
        let parent = self.parent_world(node)?;
        let entry = self.require_mut(node)?;
        entry.local.rotation = parent.rotation.inverse() * rotation;
        entry.changes |= NodeChanges::TRANSFORM;
        Ok(())
    }

    fn set_position_world(&mut self, node: NodeHandle, position: Vec3) -> Result<(), SceneError> {
        let parent = self.parent_world(node)?;
        let entry = self.require_mut(node)?;
        entry.local.position = parent.rotation.inverse() * (position - parent.position);
        entry.changes |= NodeChanges::TRANSFORM;
        Ok(())
    }

    fn world_transform(&self, node: NodeHandle) -> Option<Transform> {
        let mut world = self.nodes.get(node)?.local;
        let mut parent = self.nodes.get(node)?.parent;
        while let Some(handle) = parent {
            let entry = self.nodes.get(handle)?;
            world = entry.local.combine(&world);
            parent = entry.parent;
        }
        Some(world)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
