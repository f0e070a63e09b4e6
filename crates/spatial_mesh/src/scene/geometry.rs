//! Fixed-size geometry storage
//!
//! A `Geometry` is allocated once with a vertex count and an index count and
//! never resized afterwards. Contents are rewritten in place, so handles held
//! by a renderer stay valid across rewrites.

/// Position attribute plus triangle indices with fixed capacity
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    positions: Box<[[f32; 3]]>,
    indices: Box<[u32]>,
}

impl Geometry {
    /// Allocate zeroed storage for `vertex_count` vertices and `index_count` indices
    pub fn with_counts(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: vec![[0.0; 3]; vertex_count].into_boxed_slice(),
            indices: vec![0; index_count].into_boxed_slice(),
        }
    }

    /// Number of vertices fixed at allocation
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of indices fixed at allocation
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Read the position attribute of vertex `index`
    pub fn position(&self, index: usize) -> Option<[f32; 3]> {
        self.positions.get(index).copied()
    }

    /// Write the position attribute of vertex `index`
    ///
    /// Returns `false` if `index` is out of range.
    pub fn set_position(&mut self, index: usize, position: [f32; 3]) -> bool {
        match self.positions.get_mut(index) {
            Some(slot) => {
                *slot = position;
                true
            }
            None => false,
        }
    }

    /// All vertex positions
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// All vertex positions, mutable in place
    pub fn positions_mut(&mut self) -> &mut [[f32; 3]] {
        &mut self.positions
    }

    /// Triangle indices
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Triangle indices, mutable in place
    pub fn indices_mut(&mut self) -> &mut [u32] {
        &mut self.indices
    }

    /// Position attribute as raw bytes, ready for a vertex buffer upload
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions[..])
    }

    /// Index storage as raw bytes, ready for an index buffer upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices[..])
    }
}
