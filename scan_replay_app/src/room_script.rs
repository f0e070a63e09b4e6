//! Scripted room scan
//!
//! A deterministic stand-in for a headset re-meshing a small room:
//! - the floor is re-scanned periodically with refined heights
//! - a table shows up early and drops out of view later
//! - a wall is discovered partway through

use spatial_mesh::foundation::math::{Quat, Vec3};
use spatial_mesh::sensing::simulated::{SimulatedFrame, SimulatedSurface, SurfaceKeyIssuer};
use spatial_mesh::sensing::{RigidTransform, Timestamp};

const FLOOR_CELLS: u32 = 3;
const FLOOR_RESCAN_INTERVAL: u64 = 20;
const TABLE_APPEARS: u64 = 10;
const TABLE_VANISHES: u64 = 60;
const WALL_APPEARS: u64 = 30;

/// Flat grid of `cells` x `cells` quads spanning `size` meters, with heights from `height`
fn grid(cells: u32, size: f32, height: impl Fn(u32, u32) -> f32) -> (Vec<f32>, Vec<u32>) {
    let side = cells + 1;
    let step = size / cells as f32;
    let mut vertices = Vec::with_capacity((side * side * 3) as usize);
    for row in 0..side {
        for col in 0..side {
            vertices.extend_from_slice(&[col as f32 * step, height(row, col), row as f32 * step]);
        }
    }

    let mut indices = Vec::with_capacity((cells * cells * 6) as usize);
    for row in 0..cells {
        for col in 0..cells {
            let i = row * side + col;
            indices.extend_from_slice(&[i, i + side, i + 1, i + 1, i + side, i + side + 1]);
        }
    }
    (vertices, indices)
}

/// Scripted room with three surfaces
pub struct RoomScript {
    floor: SimulatedSurface,
    table: SimulatedSurface,
    wall: SimulatedSurface,
    rescans: u32,
}

impl RoomScript {
    /// Build the room; every surface starts stamped at `now`
    pub fn new(keys: &mut SurfaceKeyIssuer, now: Timestamp) -> Self {
        let (floor_vertices, floor_indices) = grid(FLOOR_CELLS, 4.0, |_, _| 0.0);
        let (table_vertices, table_indices) = grid(1, 1.2, |_, _| 0.0);
        let (wall_vertices, wall_indices) = grid(2, 4.0, |_, _| 0.0);

        Self {
            floor: SimulatedSurface::new(keys.issue(), floor_vertices, floor_indices, now),
            table: SimulatedSurface::new(keys.issue(), table_vertices, table_indices, now),
            wall: SimulatedSurface::new(keys.issue(), wall_vertices, wall_indices, now),
            rescans: 0,
        }
    }

    /// Produce the frame for `tick`, re-meshing surfaces as the script dictates
    pub fn frame(&mut self, tick: u64, now: Timestamp) -> SimulatedFrame {
        if tick > 0 && tick % FLOOR_RESCAN_INTERVAL == 0 {
            self.rescans += 1;
            let phase = self.rescans as f32;
            let (vertices, indices) = grid(FLOOR_CELLS, 4.0, |row, col| {
                0.01 * ((row as f32 + phase) * 1.7).sin() * ((col as f32 - phase) * 0.9).cos()
            });
            self.floor.remesh(vertices, indices, now);
        }

        // Small headset drift keeps the reference space moving every tick
        let drift = Vec3::new(0.0005 * tick as f32, 0.0, 0.0);
        let mut frame = SimulatedFrame::new().with_posed_surface(
            self.floor.clone(),
            RigidTransform::new(Vec3::new(-2.0, 0.0, -2.0) + drift, Quat::identity()),
        );

        if (TABLE_APPEARS..TABLE_VANISHES).contains(&tick) {
            frame = frame.with_posed_surface(
                self.table.clone(),
                RigidTransform::new(Vec3::new(0.5, 0.75, -1.0) + drift, Quat::from_axis_angle(&Vec3::y_axis(), 0.3)),
            );
        }

        if tick >= WALL_APPEARS {
            // Upright: the grid's Z extent becomes the wall's height
            let upright = Quat::from_axis_angle(&Vec3::x_axis(), -std::f32::consts::FRAC_PI_2);
            if tick % 2 == 0 {
                frame = frame.with_posed_surface(
                    self.wall.clone(),
                    RigidTransform::new(Vec3::new(-2.0, 0.0, -2.0) + drift, upright),
                );
            } else {
                // Tracking loses the wall's pose every other tick
                frame = frame.with_surface(self.wall.clone());
            }
        }

        frame
    }
}
