/// Dynamic mesh builder - streaming triangle emission with capacity fixed
/// at construction.
///
/// Geometry is fed one vertex at a time between begin_vertex/end_vertex.
/// Every third and subsequent vertex emits a triangle, as a strip or a fan.
/// Material state (texture per pass, vertex material per pass, color per
/// channel) starts uniform and is promoted to per-element arrays the first
/// time a second distinct value appears. Promotion back-fills elements
/// emitted under the old value and is one-way until reset().
///
/// Rendering converts the accumulated geometry into fresh device buffers
/// sized to the current counts and issues a single submit. Buffers are
/// deliberately not cached across frames: the mesh is rebuilt every frame
/// and its size changes constantly.

use std::sync::{Arc, Mutex};

use glam::{Vec2, Vec3, Vec4};

use crate::error::Result;
use crate::gpu::{DrawCall, IndexBuffer, MeshVertex, RenderDevice, VertexBuffer, VertexLayout};
use crate::dynamesh::material::{MaterialKey, MaterialTable, TextureKey};

/// Render passes a mesh can carry material state for
pub const MESH_PASSES: usize = 2;

/// Independent vertex color channels (diffuse, emissive)
pub const COLOR_CHANNELS: usize = 2;

/// Triangle emission mode, chosen per primitive run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriMode {
    /// Each new vertex forms a triangle with the previous two
    Strips,
    /// Each new vertex forms a triangle with the run's first vertex and the previous one
    Fans,
}

// ===== MATERIAL STATE =====

/// Texture binding for one pass: uniform across the mesh, or per polygon
/// once a second distinct texture has been set.
#[derive(Debug, Clone, PartialEq)]
pub enum PassTexture {
    Uniform(Option<TextureKey>),
    PerPolygon {
        /// One entry per emitted polygon
        values: Vec<Option<TextureKey>>,
        /// Applied to polygons emitted from now on
        current: Option<TextureKey>,
    },
}

/// Vertex material binding for one pass: uniform, or per vertex
#[derive(Debug, Clone, PartialEq)]
pub enum PassMaterial {
    Uniform(Option<MaterialKey>),
    PerVertex {
        values: Vec<Option<MaterialKey>>,
        current: Option<MaterialKey>,
    },
}

/// One color channel: uniform, or per vertex
#[derive(Debug, Clone, PartialEq)]
pub enum ColorChannel {
    Uniform(Vec4),
    PerVertex(Vec<Vec4>),
}

#[derive(Debug, Clone, PartialEq)]
struct PassState {
    texture: PassTexture,
    material: PassMaterial,
}

impl PassState {
    fn new() -> Self {
        Self {
            texture: PassTexture::Uniform(None),
            material: PassMaterial::Uniform(None),
        }
    }
}

/// Vertex attributes staged between begin_vertex and end_vertex.
/// Values persist across vertices so callers only set what changes.
#[derive(Debug, Clone)]
struct StagedVertex {
    location: Vec3,
    normal: Vec3,
    uv: Vec2,
    colors: [Vec4; COLOR_CHANNELS],
}

impl StagedVertex {
    fn new() -> Self {
        Self {
            location: Vec3::ZERO,
            normal: Vec3::Z,
            uv: Vec2::ZERO,
            colors: [Vec4::ONE; COLOR_CHANNELS],
        }
    }
}

// ===== DYNAMIC MESH =====

/// Streaming triangle mesh rebuilt every frame
pub struct DynamicMesh {
    max_polys: usize,
    max_verts: usize,

    tri_mode: TriMode,
    /// First vertex of the current fan run
    fan_vertex: usize,
    /// Vertices accumulated since the current primitive run started
    tri_vert_count: usize,
    /// Swaps the emitted winding; screen meshes set this
    winding_flipped: bool,

    locations: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    indices: Vec<u16>,
    poly_count: usize,

    passes: [PassState; MESH_PASSES],
    colors: [ColorChannel; COLOR_CHANNELS],

    staged: StagedVertex,
    in_vertex: bool,

    materials: Arc<Mutex<MaterialTable>>,
}

impl DynamicMesh {
    /// Create a mesh with fixed capacity. Exceeding either capacity while
    /// streaming is a programming error and asserts.
    pub fn new(max_polys: usize, max_verts: usize) -> Self {
        Self {
            max_polys,
            max_verts,
            tri_mode: TriMode::Strips,
            fan_vertex: 0,
            tri_vert_count: 0,
            winding_flipped: false,
            locations: Vec::with_capacity(max_verts),
            normals: Vec::with_capacity(max_verts),
            uvs: Vec::with_capacity(max_verts),
            indices: Vec::with_capacity(max_polys * 3),
            poly_count: 0,
            passes: [PassState::new(), PassState::new()],
            colors: [ColorChannel::Uniform(Vec4::ONE), ColorChannel::Uniform(Vec4::ONE)],
            staged: StagedVertex::new(),
            in_vertex: false,
            materials: Arc::new(Mutex::new(MaterialTable::new())),
        }
    }

    // ===== ACCESSORS =====

    pub fn vertex_count(&self) -> usize {
        self.locations.len()
    }

    pub fn polygon_count(&self) -> usize {
        self.poly_count
    }

    pub fn max_polygons(&self) -> usize {
        self.max_polys
    }

    pub fn max_vertices(&self) -> usize {
        self.max_verts
    }

    pub fn tri_mode(&self) -> TriMode {
        self.tri_mode
    }

    pub fn vertex(&self, index: usize) -> Option<Vec3> {
        self.locations.get(index).copied()
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Shared material table, replaced wholesale by reset()
    pub fn materials(&self) -> Arc<Mutex<MaterialTable>> {
        Arc::clone(&self.materials)
    }

    pub(crate) fn set_winding_flipped(&mut self, flipped: bool) {
        self.winding_flipped = flipped;
    }

    /// Texture applied to a polygon in a pass
    pub fn texture_for_polygon(&self, pass: usize, poly: usize) -> Option<TextureKey> {
        match &self.passes[pass].texture {
            PassTexture::Uniform(key) => *key,
            PassTexture::PerPolygon { values, .. } => values.get(poly).copied().flatten(),
        }
    }

    /// Vertex material applied to a vertex in a pass
    pub fn material_for_vertex(&self, pass: usize, vertex: usize) -> Option<MaterialKey> {
        match &self.passes[pass].material {
            PassMaterial::Uniform(key) => *key,
            PassMaterial::PerVertex { values, .. } => values.get(vertex).copied().flatten(),
        }
    }

    /// Color of a vertex in a channel
    pub fn color_for_vertex(&self, channel: usize, vertex: usize) -> Vec4 {
        match &self.colors[channel] {
            ColorChannel::Uniform(color) => *color,
            ColorChannel::PerVertex(values) => values.get(vertex).copied().unwrap_or(Vec4::ONE),
        }
    }

    pub fn is_multi_texture(&self, pass: usize) -> bool {
        matches!(self.passes[pass].texture, PassTexture::PerPolygon { .. })
    }

    pub fn is_multi_material(&self, pass: usize) -> bool {
        matches!(self.passes[pass].material, PassMaterial::PerVertex { .. })
    }

    pub fn is_multi_color(&self, channel: usize) -> bool {
        matches!(self.colors[channel], ColorChannel::PerVertex(_))
    }

    // ===== PRIMITIVE RUNS =====

    /// Start a triangle strip run
    pub fn begin_tri_strip(&mut self) {
        self.tri_mode = TriMode::Strips;
        self.tri_vert_count = 0;
    }

    /// Start a triangle fan run pivoting on the next vertex
    pub fn begin_tri_fan(&mut self) {
        self.tri_mode = TriMode::Fans;
        self.tri_vert_count = 0;
        self.fan_vertex = self.vertex_count();
    }

    // ===== VERTEX STREAMING =====

    /// Start staging a vertex. Attributes not set again keep the values
    /// of the previous vertex.
    pub fn begin_vertex(&mut self) {
        debug_assert!(!self.in_vertex, "begin_vertex while a vertex is already open");
        self.in_vertex = true;
    }

    pub fn location(&mut self, position: Vec3) {
        self.staged.location = position;
    }

    pub fn normal(&mut self, normal: Vec3) {
        self.staged.normal = normal;
    }

    pub fn uv(&mut self, uv: Vec2) {
        self.staged.uv = uv;
    }

    /// Stage a color for one channel. Differs-from-uniform promotes the
    /// channel to per-vertex at commit time.
    pub fn color(&mut self, channel: usize, color: Vec4) {
        self.staged.colors[channel] = color;
    }

    /// Commit the staged vertex. Emits a triangle once three or more
    /// vertices have accumulated in the current run.
    pub fn end_vertex(&mut self) {
        debug_assert!(self.in_vertex, "end_vertex without begin_vertex");
        assert!(
            self.vertex_count() < self.max_verts,
            "vertex capacity {} exceeded",
            self.max_verts
        );
        self.in_vertex = false;

        let vert_index = self.vertex_count();
        self.locations.push(self.staged.location);
        self.normals.push(self.staged.normal);
        self.uvs.push(self.staged.uv);

        // Commit colors, promoting a channel on the first distinct value
        for channel in 0..COLOR_CHANNELS {
            let staged = self.staged.colors[channel];
            let slot = &mut self.colors[channel];
            match slot {
                ColorChannel::Uniform(uniform) => {
                    if staged != *uniform {
                        let mut values = vec![*uniform; vert_index];
                        values.push(staged);
                        *slot = ColorChannel::PerVertex(values);
                    }
                }
                ColorChannel::PerVertex(values) => values.push(staged),
            }
        }

        // Per-vertex materials record the current value for each new vertex
        for pass in &mut self.passes {
            if let PassMaterial::PerVertex { values, current } = &mut pass.material {
                values.push(*current);
            }
        }

        self.tri_vert_count += 1;
        if self.tri_vert_count >= 3 {
            self.emit_polygon();
        }
    }

    fn emit_polygon(&mut self) {
        assert!(
            self.poly_count < self.max_polys,
            "polygon capacity {} exceeded",
            self.max_polys
        );

        let n = self.vertex_count();
        let mut tri = match self.tri_mode {
            TriMode::Strips => [(n - 3) as u16, (n - 2) as u16, (n - 1) as u16],
            TriMode::Fans => [self.fan_vertex as u16, (n - 2) as u16, (n - 1) as u16],
        };

        // Strips alternate winding so adjacent triangles face the same way
        let tri_in_run = self.tri_vert_count - 3;
        let flip = match self.tri_mode {
            TriMode::Strips => (tri_in_run % 2 == 1) != self.winding_flipped,
            TriMode::Fans => self.winding_flipped,
        };
        if flip {
            tri.swap(1, 2);
        }

        self.indices.extend_from_slice(&tri);

        for pass in &mut self.passes {
            if let PassTexture::PerPolygon { values, current } = &mut pass.texture {
                values.push(*current);
            }
        }

        self.poly_count += 1;
    }

    // ===== MATERIAL STATE =====

    /// Set the texture for a pass. Setting the value already in effect is a
    /// no-op; setting a second distinct texture promotes the pass to
    /// per-polygon textures, back-filling polygons already emitted.
    pub fn set_texture(&mut self, pass: usize, key: TextureKey) {
        let poly_count = self.poly_count;
        let slot = &mut self.passes[pass].texture;
        match slot {
            PassTexture::Uniform(current) => match *current {
                Some(existing) if existing == key => {}
                Some(existing) => {
                    *slot = PassTexture::PerPolygon {
                        values: vec![Some(existing); poly_count],
                        current: Some(key),
                    };
                }
                None => *current = Some(key),
            },
            PassTexture::PerPolygon { current, .. } => *current = Some(key),
        }
    }

    /// Set the vertex material for a pass. Same promotion rules as
    /// set_texture, at vertex granularity.
    pub fn set_vertex_material(&mut self, pass: usize, key: MaterialKey) {
        let vert_count = self.locations.len();
        let slot = &mut self.passes[pass].material;
        match slot {
            PassMaterial::Uniform(current) => match *current {
                Some(existing) if existing == key => {}
                Some(existing) => {
                    *slot = PassMaterial::PerVertex {
                        values: vec![Some(existing); vert_count],
                        current: Some(key),
                    };
                }
                None => *current = Some(key),
            },
            PassMaterial::PerVertex { current, .. } => *current = Some(key),
        }
    }

    // ===== GEOMETRY EDITS =====

    /// Move every committed vertex by an offset
    pub fn translate_vertices(&mut self, offset: Vec3) {
        for location in &mut self.locations {
            *location += offset;
        }
    }

    /// Move one committed vertex
    pub fn move_vertex(&mut self, index: usize, position: Vec3) {
        if let Some(location) = self.locations.get_mut(index) {
            *location = position;
        }
    }

    // ===== RESET =====

    /// Drop all geometry and restore uniform material state. Capacity and
    /// allocations are retained; the material table is replaced with a
    /// fresh one. Idempotent.
    pub fn reset(&mut self) {
        self.locations.clear();
        self.normals.clear();
        self.uvs.clear();
        self.indices.clear();
        self.poly_count = 0;
        self.tri_vert_count = 0;
        self.fan_vertex = 0;
        self.tri_mode = TriMode::Strips;
        self.passes = [PassState::new(), PassState::new()];
        self.colors = [ColorChannel::Uniform(Vec4::ONE), ColorChannel::Uniform(Vec4::ONE)];
        self.staged = StagedVertex::new();
        self.in_vertex = false;
        self.materials = Arc::new(Mutex::new(MaterialTable::new()));
    }

    // ===== RENDER =====

    /// Upload the accumulated geometry and submit one draw call.
    ///
    /// Buffers are created fresh each call, sized to the current counts.
    pub fn render(&mut self, device: &mut dyn RenderDevice) -> Result<()> {
        if self.poly_count == 0 {
            return Ok(());
        }

        let vertices: Vec<MeshVertex> = (0..self.vertex_count())
            .map(|i| MeshVertex {
                position: self.locations[i].to_array(),
                normal: self.normals[i].to_array(),
                uv: self.uvs[i].to_array(),
                color: pack_color(self.color_for_vertex(0, i)),
            })
            .collect();

        let mut vertex_buffer = VertexBuffer::new();
        vertex_buffer.create(device, VertexLayout::mesh(), &vertices, false)?;

        let mut index_buffer = IndexBuffer::new();
        index_buffer.create(device, &self.indices, false)?;

        // Handles stay alive through the Arc clones in the draw call
        let (vb, ib) = match (vertex_buffer.handle(), index_buffer.handle()) {
            (Some(vb), Some(ib)) => (Arc::clone(vb), Arc::clone(ib)),
            _ => return Ok(()),
        };

        device.submit(DrawCall {
            vertex_buffer: vb,
            index_buffer: ib,
            index_count: (self.poly_count * 3) as u32,
            first_index: 0,
        })
    }
}

/// Pack a normalized float color into RGBA8
fn pack_color(color: Vec4) -> [u8; 4] {
    let to_byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
    [
        to_byte(color.x),
        to_byte(color.y),
        to_byte(color.z),
        to_byte(color.w),
    ]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
