//! Per-tick surface synchronization
//!
//! The engine mirrors every surface the sensing source reports into a scene
//! node it owns:
//!
//! 1. First sighting: allocate geometry from the surface buffers, create a
//!    node bound to the configured material, register a tracked mesh.
//! 2. Later sightings with a strictly newer change time: rewrite the node's
//!    geometry in place and advance the stored timestamp.
//! 3. Later sightings with no change: leave the buffers alone.
//!
//! Resolved poses are then written to the node as its world transform,
//! gated by [`PosePolicy`].

use crate::config::{EvictionPolicy, PosePolicy, SyncConfig};
use crate::foundation::collections::NodeHandle;
use crate::scene::{SceneError, SceneGraph};
use crate::sensing::{DetectedSurface, SensingFrame, SurfaceKey};
use crate::sync::buffer_writer::GeometryBufferWriter;
use crate::sync::error::{GeometryError, SyncError};
use crate::sync::registry::{MeshId, SurfaceRegistry, TrackedMesh};
use crate::sync::transform_applier::TransformApplier;

/// Outcome of one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Tick number this report describes, 0 if no session was active
    pub tick: u64,

    /// Surfaces seen for the first time
    pub created: usize,

    /// Surfaces whose geometry was rewritten
    pub updated: usize,

    /// Surfaces re-observed without change
    pub skipped: usize,

    /// Nodes that received a pose
    pub posed: usize,

    /// Tracked meshes removed by the eviction policy
    pub evicted: usize,

    /// Surfaces whose geometry could not be synced this tick
    pub failures: Vec<(SurfaceKey, GeometryError)>,
}

/// Nodes a surface made available for pose application this tick
///
/// `rewritten` is bound only on the create and update paths; `tracked` is
/// bound whenever the surface has a node at all. Keeping them apart lets the
/// pose policy choose without coupling it to the dirty check.
#[derive(Debug, Default, Clone, Copy)]
struct SurfaceSync {
    rewritten: Option<NodeHandle>,
    tracked: Option<NodeHandle>,
}

impl SurfaceSync {
    fn rewritten(node: NodeHandle) -> Self {
        Self {
            rewritten: Some(node),
            tracked: Some(node),
        }
    }

    fn unchanged(node: NodeHandle) -> Self {
        Self {
            rewritten: None,
            tracked: Some(node),
        }
    }
}

/// Incremental sensed-surface to scene-node synchronizer
///
/// Single writer: `step` must not be invoked re-entrantly or from several
/// threads on the same instance. Independent sensing sessions each need
/// their own engine.
#[derive(Debug, Default)]
pub struct SyncEngine {
    config: SyncConfig,
    registry: SurfaceRegistry,
    next_id: u64,
    tick: u64,
}

impl SyncEngine {
    /// Create an engine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom configuration
    pub fn with_config(config: SyncConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Active configuration
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Number of ticks processed with an active session
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Tracked mesh for a surface, if it was ever observed (and not evicted)
    pub fn tracked(&self, surface: SurfaceKey) -> Option<&TrackedMesh> {
        self.registry.lookup(surface)
    }

    /// Number of tracked surfaces
    pub fn tracked_count(&self) -> usize {
        self.registry.len()
    }

    /// Iterate over all tracked surfaces
    pub fn iter_tracked(&self) -> impl Iterator<Item = (SurfaceKey, &TrackedMesh)> {
        self.registry.iter()
    }

    /// Per-frame entry point for host loops
    ///
    /// `delta_time` only triggers the tick; synchronization does not depend
    /// on elapsed time. `frame` is `None` while no sensing session is active.
    pub fn update<F, S>(
        &mut self,
        delta_time: f32,
        frame: Option<&F>,
        scene: &mut S,
    ) -> Result<TickReport, SyncError>
    where
        F: SensingFrame,
        S: SceneGraph + ?Sized,
    {
        log::trace!("SyncEngine update: dt = {:.4}s", delta_time);
        self.step(frame, scene)
    }

    /// Synchronize one tick of detected surfaces into `scene`
    ///
    /// Without an active session (`frame` is `None`) this is a no-op. Per
    /// surface geometry failures are collected in the report and never stop
    /// the tick; scene graph failures abort it.
    pub fn step<F, S>(&mut self, frame: Option<&F>, scene: &mut S) -> Result<TickReport, SyncError>
    where
        F: SensingFrame,
        S: SceneGraph + ?Sized,
    {
        let Some(frame) = frame else {
            return Ok(TickReport::default());
        };

        self.tick += 1;
        let mut report = TickReport {
            tick: self.tick,
            ..TickReport::default()
        };

        for surface in frame.detected_surfaces() {
            let pose = frame.resolve_pose(surface);
            let synced = self.sync_surface(surface, scene, &mut report)?;

            let target = match self.config.pose_policy {
                PosePolicy::ChangedOnly => synced.rewritten,
                PosePolicy::EveryTick => synced.tracked,
            };
            if let (Some(pose), Some(node)) = (pose, target) {
                TransformApplier::apply(scene, node, &pose)?;
                report.posed += 1;
                log::trace!("Posed {} at {:?}", surface.key(), pose.position);
            }
        }

        self.evict_unseen(scene, &mut report)?;

        log::trace!(
            "Tick {}: {} created, {} updated, {} skipped, {} posed, {} evicted, {} failed",
            report.tick,
            report.created,
            report.updated,
            report.skipped,
            report.posed,
            report.evicted,
            report.failures.len()
        );
        Ok(report)
    }

    fn sync_surface<T, S>(
        &mut self,
        surface: &T,
        scene: &mut S,
        report: &mut TickReport,
    ) -> Result<SurfaceSync, SyncError>
    where
        T: DetectedSurface,
        S: SceneGraph + ?Sized,
    {
        let key = surface.key();
        let changed_at = surface.last_changed_time();

        if let Some(tracked) = self.registry.lookup_mut(key) {
            tracked.last_seen_tick = self.tick;
            let node = tracked.node;

            if !changed_at.is_newer_than(tracked.timestamp) {
                log::trace!("Skipping {}: unchanged since {:?}", key, tracked.timestamp);
                report.skipped += 1;
                return Ok(SurfaceSync::unchanged(node));
            }

            let geometry = scene.geometry_mut(node).ok_or(SceneError::NodeNotFound(node))?;
            return match GeometryBufferWriter::update(geometry, surface.vertices(), surface.indices()) {
                Ok(()) => {
                    log::debug!(
                        "Rewrote {} for {} ({:?} -> {:?})",
                        tracked.id,
                        key,
                        tracked.timestamp,
                        changed_at
                    );
                    tracked.timestamp = changed_at;
                    report.updated += 1;
                    Ok(SurfaceSync::rewritten(node))
                }
                Err(error) => {
                    log::warn!("Skipping rewrite of {} for {} this tick: {}", tracked.id, key, error);
                    report.failures.push((key, error));
                    Ok(SurfaceSync::unchanged(node))
                }
            };
        }

        let geometry = match GeometryBufferWriter::create(surface.vertices(), surface.indices()) {
            Ok(geometry) => geometry,
            Err(error) => {
                log::warn!("Cannot create geometry for {} this tick: {}", key, error);
                report.failures.push((key, error));
                return Ok(SurfaceSync::default());
            }
        };
        let vertex_count = geometry.vertex_count();
        let index_count = geometry.index_count();
        let node = scene.create_mesh_node(geometry, self.config.material)?;

        let id = MeshId(self.next_id);
        self.next_id += 1;
        self.registry.insert(
            key,
            TrackedMesh {
                id,
                timestamp: changed_at,
                node,
                last_seen_tick: self.tick,
            },
        );
        log::debug!(
            "Created {} for {} ({} vertices, {} indices)",
            id,
            key,
            vertex_count,
            index_count
        );
        report.created += 1;
        Ok(SurfaceSync::rewritten(node))
    }

    fn evict_unseen<S>(&mut self, scene: &mut S, report: &mut TickReport) -> Result<(), SyncError>
    where
        S: SceneGraph + ?Sized,
    {
        let EvictionPolicy::AfterMissedTicks(missed) = self.config.eviction else {
            return Ok(());
        };

        for key in self.registry.missed_at_least(self.tick, missed.max(1)) {
            let Some(tracked) = self.registry.remove(key) else {
                continue;
            };
            match scene.remove_node(tracked.node) {
                Ok(()) => {}
                Err(SceneError::NodeNotFound(node)) => {
                    log::warn!("Evicted {} for {} but its node {:?} was already gone", tracked.id, key, node);
                }
                Err(error) => return Err(error.into()),
            }
            log::info!("Evicted {} for {} after {} missed ticks", tracked.id, key, missed.max(1));
            report.evicted += 1;
        }
        Ok(())
    }
}
