//! Scan Replay
//!
//! Drives the surface synchronization engine with a scripted room scan and
//! logs what changed each tick. Useful for eyeballing engine behavior and
//! trying configuration files without a headset.
//!
//! Usage: `scan_replay [config.toml|config.ron] [ticks]`

mod room_script;

use room_script::RoomScript;
use spatial_mesh::config::{Config, ConfigError, ConfigFormat, SyncConfig};
use spatial_mesh::foundation::logging;
use spatial_mesh::foundation::time::TickClock;
use spatial_mesh::scene::{SceneGraph, SimpleSceneGraph};
use spatial_mesh::sensing::simulated::SurfaceKeyIssuer;
use spatial_mesh::sync::{SyncEngine, SyncError};
use thiserror::Error;

const DEFAULT_TICKS: u64 = 120;

/// Replay errors
#[derive(Error, Debug)]
enum ReplayError {
    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Engine tick failed
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Bad command line
    #[error("Usage error: {0}")]
    Usage(String),
}

fn load_config(path: &str) -> Result<SyncConfig, ReplayError> {
    let format = ConfigFormat::from_path(path)?;
    let contents = std::fs::read_to_string(path)?;
    Ok(SyncConfig::from_str_as(&contents, format)?)
}

fn run() -> Result<(), ReplayError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match args.first() {
        Some(path) => load_config(path)?,
        None => SyncConfig::default(),
    };
    let ticks = match args.get(1) {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| ReplayError::Usage(format!("ticks '{}': {}", raw, e)))?,
        None => DEFAULT_TICKS,
    };
    log::info!("Replaying {} ticks with {:?}", ticks, config);

    let mut clock = TickClock::default();
    let mut keys = SurfaceKeyIssuer::new();
    let mut room = RoomScript::new(&mut keys, clock.now());
    let mut scene = SimpleSceneGraph::new();
    let mut engine = SyncEngine::with_config(config);

    for tick in 0..ticks {
        let frame = room.frame(tick, clock.now());
        let report = engine.update(clock.delta_time(), Some(&frame), &mut scene)?;

        if report.created + report.updated + report.evicted > 0 || !report.failures.is_empty() {
            log::info!(
                "Tick {}: +{} created, {} updated, {} skipped, {} posed, {} evicted",
                report.tick,
                report.created,
                report.updated,
                report.skipped,
                report.posed,
                report.evicted
            );
        }
        for (surface, error) in &report.failures {
            log::warn!("Tick {}: {} not synced: {}", report.tick, surface, error);
        }
        clock.tick();
    }

    log::info!(
        "Replay finished: {} tracked meshes, {} scene nodes",
        engine.tracked_count(),
        scene.node_count()
    );
    let mut tracked: Vec<_> = engine.iter_tracked().collect();
    tracked.sort_by_key(|(_, t)| t.id);
    for (surface, mesh) in tracked {
        let world = scene.world_transform(mesh.node);
        log::info!(
            "  {} <- {} last changed {:?}, world position {:?}",
            mesh.id,
            surface,
            mesh.timestamp,
            world.map(|w| w.position)
        );
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("info");

    log::info!("Starting scan replay");

    match run() {
        Ok(()) => {
            log::info!("Scan replay finished successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Scan replay error: {}", e);
            Err(e.into())
        }
    }
}
