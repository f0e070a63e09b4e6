//! Pose application
//!
//! Writes a sensed rigid transform onto a scene node as its world transform.

use crate::foundation::collections::NodeHandle;
use crate::scene::{SceneError, SceneGraph};
use crate::sensing::RigidTransform;

/// Stateless pose-to-world-transform writer
pub struct TransformApplier;

impl TransformApplier {
    /// Apply `pose` to `node` in world space
    ///
    /// Order matters: the local position and rotation are reset first so no
    /// stale local offset survives, then world rotation is set, then world
    /// position. Setting rotation before position keeps the position from
    /// being reinterpreted in a stale rotation frame. Applying the same pose
    /// twice yields the same world transform as applying it once.
    pub fn apply<S: SceneGraph + ?Sized>(
        scene: &mut S,
        node: NodeHandle,
        pose: &RigidTransform,
    ) -> Result<(), SceneError> {
        let orientation = pose.orientation;
        let position = pose.position;

        scene.reset_position_rotation(node)?;
        scene.set_rotation_world(node, orientation)?;
        scene.set_position_world(node, position)?;
        Ok(())
    }
}
