/// Render device trait - the backend seam of the engine.
///
/// Everything above this trait (views, display, dynamic meshes) is backend
/// agnostic. A concrete device owns the graphics API; the engine only ever
/// creates buffers, submits draw calls, clears, and presents through it.

use std::fmt;
use std::sync::Arc;
use bitflags::bitflags;

use crate::error::Result;

bitflags! {
    /// Frame buffer planes affected by a clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
    }
}

// ===== VERTEX LAYOUT =====

/// One attribute in an interleaved vertex stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexAttribute {
    /// Position, 3 x f32
    Position3,
    /// Normal, 3 x f32
    Normal3,
    /// Texture coordinates, 2 x f32
    TexCoord2,
    /// Color, 4 x u8 normalized
    ColorU8x4,
}

impl VertexAttribute {
    /// Size of the attribute in bytes
    pub fn size_bytes(&self) -> u32 {
        match self {
            VertexAttribute::Position3 => 12,
            VertexAttribute::Normal3 => 12,
            VertexAttribute::TexCoord2 => 8,
            VertexAttribute::ColorU8x4 => 4,
        }
    }
}

/// Interleaved vertex layout description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// The layout used by dynamic meshes: position, normal, uv, color
    pub fn mesh() -> Self {
        Self {
            attributes: vec![
                VertexAttribute::Position3,
                VertexAttribute::Normal3,
                VertexAttribute::TexCoord2,
                VertexAttribute::ColorU8x4,
            ],
        }
    }

    /// Stride of one vertex in bytes
    pub fn stride(&self) -> u32 {
        self.attributes.iter().map(|a| a.size_bytes()).sum()
    }
}

// ===== BUFFER DESC =====

/// What a buffer holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferUsage {
    /// Vertex data with the given interleaved layout
    Vertex(VertexLayout),
    /// 16-bit index data
    Index,
}

/// Descriptor for creating a device buffer
#[derive(Debug, Clone)]
pub struct BufferDesc {
    pub usage: BufferUsage,
    /// Size of one element in bytes (vertex stride, or 2 for indices)
    pub element_size: u32,
    /// Number of elements
    pub element_count: u32,
    /// Dynamic buffers accept update() after creation
    pub dynamic: bool,
    /// Optional initial contents, element_size * element_count bytes
    pub data: Option<Vec<u8>>,
}

impl BufferDesc {
    /// Total size of the buffer in bytes
    pub fn size_bytes(&self) -> u64 {
        self.element_size as u64 * self.element_count as u64
    }
}

// ===== DRAW CALL =====

/// One indexed draw submission
pub struct DrawCall {
    pub vertex_buffer: Arc<dyn BufferHandle>,
    pub index_buffer: Arc<dyn BufferHandle>,
    /// Number of indices to draw
    pub index_count: u32,
    /// First index to draw from
    pub first_index: u32,
}

impl fmt::Debug for DrawCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawCall")
            .field("index_count", &self.index_count)
            .field("first_index", &self.first_index)
            .finish()
    }
}

// ===== BUFFER HANDLE TRAIT =====

/// Backend buffer resource
///
/// Implemented by backend-specific buffer types. The backend storage is
/// released when the last handle is dropped.
pub trait BufferHandle: Send + Sync {
    /// Overwrite a byte range of the buffer
    ///
    /// # Errors
    ///
    /// Returns an error for non-dynamic buffers and for out-of-range writes.
    fn update(&self, offset: u64, data: &[u8]) -> Result<()>;

    /// Whether the backend resource is still alive
    fn is_valid(&self) -> bool;

    /// Total size in bytes
    fn size_bytes(&self) -> u64;
}

// ===== RENDER DEVICE TRAIT =====

/// Main render device trait
///
/// This is the factory and submission interface the engine drives each frame.
/// Implemented by backend-specific devices; [`NullDevice`](crate::gpu::NullDevice)
/// is a headless stand-in.
pub trait RenderDevice: Send + Sync {
    /// Create a buffer
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn BufferHandle>>;

    /// Submit one indexed draw call
    fn submit(&mut self, draw: DrawCall) -> Result<()>;

    /// Clear the given planes of the frame buffer. Color is packed RGBA8.
    fn clear(&mut self, flags: ClearFlags, color: u32);

    /// Finish and present the frame
    fn present(&mut self) -> Result<()>;
}
