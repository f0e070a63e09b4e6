//! Geometry buffer rewriting
//!
//! Converts the flat buffers a sensing source reports into the attribute
//! storage of a [`Geometry`]. Geometry is sized once at creation; every later
//! rewrite happens in place and must match the counts fixed at creation.

use crate::scene::Geometry;
use crate::sync::error::GeometryError;

/// Stateless flat-buffer to geometry writer
pub struct GeometryBufferWriter;

impl GeometryBufferWriter {
    /// Allocate geometry sized for `vertices` and `indices`, then fill it
    pub fn create(vertices: &[f32], indices: &[u32]) -> Result<Geometry, GeometryError> {
        let vertex_count = vertex_count(vertices)?;
        let mut geometry = Geometry::with_counts(vertex_count, indices.len());
        Self::update(&mut geometry, vertices, indices)?;
        Ok(geometry)
    }

    /// Rewrite `geometry` in place from flat buffers
    ///
    /// Indices are copied verbatim. Vertices are de-interleaved in stride-3
    /// triples, triple `i` becoming the position of vertex `i`. Both counts
    /// are checked before anything is written, so a rejected update leaves
    /// the geometry untouched.
    pub fn update(geometry: &mut Geometry, vertices: &[f32], indices: &[u32]) -> Result<(), GeometryError> {
        let vertex_count = vertex_count(vertices)?;
        if vertex_count != geometry.vertex_count() {
            return Err(GeometryError::VertexCountMismatch {
                expected: geometry.vertex_count(),
                actual: vertex_count,
            });
        }
        if indices.len() != geometry.index_count() {
            return Err(GeometryError::IndexCountMismatch {
                expected: geometry.index_count(),
                actual: indices.len(),
            });
        }

        geometry.indices_mut().copy_from_slice(indices);
        for (slot, xyz) in geometry.positions_mut().iter_mut().zip(vertices.chunks_exact(3)) {
            *slot = [xyz[0], xyz[1], xyz[2]];
        }
        Ok(())
    }
}

fn vertex_count(vertices: &[f32]) -> Result<usize, GeometryError> {
    if vertices.len() % 3 != 0 {
        return Err(GeometryError::VertexStride { len: vertices.len() });
    }
    Ok(vertices.len() / 3)
}
