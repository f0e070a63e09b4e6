//! Scenario tests driving `SyncEngine` against the in-memory collaborators

mod pose_policy;

use crate::config::SyncConfig;
use crate::foundation::time::TickClock;
use crate::scene::SimpleSceneGraph;
use crate::sensing::simulated::{SimulatedFrame, SimulatedSurface, SurfaceKeyIssuer};
use crate::sensing::{RigidTransform, Timestamp};
use crate::sync::{SyncEngine, TickReport};

/// One unit triangle in the XY plane
pub(super) const TRIANGLE: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];

/// Engine, scene and scripted source wired together
pub(super) struct Harness {
    pub engine: SyncEngine,
    pub scene: SimpleSceneGraph,
    pub keys: SurfaceKeyIssuer,
    pub clock: TickClock,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(SyncConfig::default())
    }

    pub fn with_config(config: SyncConfig) -> Self {
        crate::foundation::logging::try_init();
        Self {
            engine: SyncEngine::with_config(config),
            scene: SimpleSceneGraph::new(),
            keys: SurfaceKeyIssuer::new(),
            clock: TickClock::new(0.1),
        }
    }

    /// A fresh triangle surface stamped with the current clock time
    pub fn triangle(&mut self) -> SimulatedSurface {
        SimulatedSurface::new(self.keys.issue(), TRIANGLE.to_vec(), vec![0, 1, 2], self.clock.now())
    }

    /// Advance the clock and return the new time
    pub fn later(&mut self) -> Timestamp {
        self.clock.tick();
        self.clock.now()
    }

    pub fn step(&mut self, frame: &SimulatedFrame) -> TickReport {
        self.engine
            .step(Some(frame), &mut self.scene)
            .expect("in-memory scene never fails")
    }
}

pub(super) fn pose_at(x: f32, y: f32, z: f32) -> RigidTransform {
    RigidTransform::from_components([x, y, z], [0.0, 0.0, 0.0, 1.0])
}
