/// Vertex and index buffer wrappers with an explicit create/update/destroy
/// lifecycle.
///
/// A wrapper owns at most one backend handle. `create` replaces any handle
/// it already holds, `update` is only legal on dynamic buffers, `destroy`
/// releases the handle early (dropping the wrapper does the same). Failed
/// operations on a destroyed or static buffer come back as errors, never
/// as panics.

use std::sync::Arc;
use bytemuck::{Pod, Zeroable};

use crate::error::Result;
use crate::engine_bail;
use crate::gpu::device::{BufferDesc, BufferHandle, BufferUsage, RenderDevice, VertexLayout};

// ===== MESH VERTEX =====

/// Interleaved vertex as uploaded by the dynamic mesh pipeline.
/// Matches [`VertexLayout::mesh`]: position, normal, uv, color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    /// RGBA, normalized u8
    pub color: [u8; 4],
}

impl MeshVertex {
    pub const STRIDE: u32 = std::mem::size_of::<MeshVertex>() as u32;
}

// ===== VERTEX BUFFER =====

/// Device vertex buffer wrapper
pub struct VertexBuffer {
    handle: Option<Arc<dyn BufferHandle>>,
    element_count: u32,
    dynamic: bool,
}

impl VertexBuffer {
    /// Create an empty wrapper holding no device buffer
    pub fn new() -> Self {
        Self {
            handle: None,
            element_count: 0,
            dynamic: false,
        }
    }

    /// Create the device buffer, replacing and releasing any previous one.
    /// The vertex data is copied into the device at creation time.
    pub fn create(
        &mut self,
        device: &mut dyn RenderDevice,
        layout: VertexLayout,
        vertices: &[MeshVertex],
        dynamic: bool,
    ) -> Result<()> {
        if vertices.is_empty() {
            engine_bail!("rampart3d::VertexBuffer", "cannot create an empty vertex buffer");
        }

        let data = bytemuck::cast_slice(vertices).to_vec();
        let handle = device.create_buffer(BufferDesc {
            usage: BufferUsage::Vertex(layout),
            element_size: MeshVertex::STRIDE,
            element_count: vertices.len() as u32,
            dynamic,
            data: Some(data),
        })?;

        self.handle = Some(handle);
        self.element_count = vertices.len() as u32;
        self.dynamic = dynamic;
        Ok(())
    }

    /// Overwrite vertices starting at `first_vertex`.
    ///
    /// # Errors
    ///
    /// Fails if the buffer was never created, was destroyed, is not dynamic,
    /// or the write runs past the end.
    pub fn update(&self, first_vertex: u32, vertices: &[MeshVertex]) -> Result<()> {
        let handle = match &self.handle {
            Some(h) if h.is_valid() => h,
            _ => engine_bail!("rampart3d::VertexBuffer", "update on a destroyed buffer"),
        };
        if !self.dynamic {
            engine_bail!("rampart3d::VertexBuffer", "update on a non-dynamic buffer");
        }
        if first_vertex + vertices.len() as u32 > self.element_count {
            engine_bail!(
                "rampart3d::VertexBuffer",
                "update of {} vertices at {} exceeds capacity {}",
                vertices.len(), first_vertex, self.element_count
            );
        }

        let offset = first_vertex as u64 * MeshVertex::STRIDE as u64;
        handle.update(offset, bytemuck::cast_slice(vertices))
    }

    /// Release the device buffer. Safe to call on an already-destroyed wrapper.
    pub fn destroy(&mut self) {
        self.handle = None;
        self.element_count = 0;
    }

    /// Whether a live device buffer is attached
    pub fn is_valid(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| h.is_valid())
    }

    /// Number of vertices the buffer was created with
    pub fn element_count(&self) -> u32 {
        self.element_count
    }

    /// The backend handle, if the buffer is alive
    pub fn handle(&self) -> Option<&Arc<dyn BufferHandle>> {
        self.handle.as_ref()
    }
}

impl Default for VertexBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ===== INDEX BUFFER =====

/// Device index buffer wrapper (16-bit indices)
pub struct IndexBuffer {
    handle: Option<Arc<dyn BufferHandle>>,
    element_count: u32,
    dynamic: bool,
}

impl IndexBuffer {
    pub fn new() -> Self {
        Self {
            handle: None,
            element_count: 0,
            dynamic: false,
        }
    }

    /// Create the device buffer, replacing and releasing any previous one
    pub fn create(
        &mut self,
        device: &mut dyn RenderDevice,
        indices: &[u16],
        dynamic: bool,
    ) -> Result<()> {
        if indices.is_empty() {
            engine_bail!("rampart3d::IndexBuffer", "cannot create an empty index buffer");
        }

        let data = bytemuck::cast_slice(indices).to_vec();
        let handle = device.create_buffer(BufferDesc {
            usage: BufferUsage::Index,
            element_size: 2,
            element_count: indices.len() as u32,
            dynamic,
            data: Some(data),
        })?;

        self.handle = Some(handle);
        self.element_count = indices.len() as u32;
        self.dynamic = dynamic;
        Ok(())
    }

    /// Overwrite indices starting at `first_index`.
    ///
    /// # Errors
    ///
    /// Fails if the buffer was never created, was destroyed, is not dynamic,
    /// or the write runs past the end.
    pub fn update(&self, first_index: u32, indices: &[u16]) -> Result<()> {
        let handle = match &self.handle {
            Some(h) if h.is_valid() => h,
            _ => engine_bail!("rampart3d::IndexBuffer", "update on a destroyed buffer"),
        };
        if !self.dynamic {
            engine_bail!("rampart3d::IndexBuffer", "update on a non-dynamic buffer");
        }
        if first_index + indices.len() as u32 > self.element_count {
            engine_bail!(
                "rampart3d::IndexBuffer",
                "update of {} indices at {} exceeds capacity {}",
                indices.len(), first_index, self.element_count
            );
        }

        handle.update(first_index as u64 * 2, bytemuck::cast_slice(indices))
    }

    /// Release the device buffer. Safe to call on an already-destroyed wrapper.
    pub fn destroy(&mut self) {
        self.handle = None;
        self.element_count = 0;
    }

    pub fn is_valid(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| h.is_valid())
    }

    pub fn element_count(&self) -> u32 {
        self.element_count
    }

    pub fn handle(&self) -> Option<&Arc<dyn BufferHandle>> {
        self.handle.as_ref()
    }
}

impl Default for IndexBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
