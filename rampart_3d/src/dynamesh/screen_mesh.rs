/// Screen-space dynamic mesh.
///
/// Wraps a DynamicMesh and remaps vertex locations from normalized screen
/// coordinates (0..1, origin top-left, y down) into the device's clip-style
/// space (-1..1, y up, scaled by the aspect ratio). Winding is inverted
/// because the vertical flip mirrors every triangle.

use glam::{Vec2, Vec3, Vec4};

use crate::error::Result;
use crate::gpu::RenderDevice;
use crate::dynamesh::material::{MaterialKey, TextureKey};
use crate::dynamesh::mesh::DynamicMesh;

pub struct ScreenMesh {
    mesh: DynamicMesh,
    aspect: f32,
}

impl ScreenMesh {
    pub fn new(max_polys: usize, max_verts: usize) -> Self {
        let mut mesh = DynamicMesh::new(max_polys, max_verts);
        mesh.set_winding_flipped(true);
        Self { mesh, aspect: 1.0 }
    }

    /// Height over width of the target viewport
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Stage a location given in 0..1 screen space
    pub fn location(&mut self, x: f32, y: f32) {
        self.mesh.location(Vec3::new(
            (x * 2.0) - 1.0,
            self.aspect - y * 2.0 * self.aspect,
            0.0,
        ));
    }

    // ===== FORWARDED STREAMING API =====

    pub fn begin_tri_strip(&mut self) {
        self.mesh.begin_tri_strip();
    }

    pub fn begin_tri_fan(&mut self) {
        self.mesh.begin_tri_fan();
    }

    pub fn begin_vertex(&mut self) {
        self.mesh.begin_vertex();
    }

    pub fn end_vertex(&mut self) {
        self.mesh.end_vertex();
    }

    pub fn uv(&mut self, uv: Vec2) {
        self.mesh.uv(uv);
    }

    pub fn color(&mut self, channel: usize, color: Vec4) {
        self.mesh.color(channel, color);
    }

    pub fn set_texture(&mut self, pass: usize, key: TextureKey) {
        self.mesh.set_texture(pass, key);
    }

    pub fn set_vertex_material(&mut self, pass: usize, key: MaterialKey) {
        self.mesh.set_vertex_material(pass, key);
    }

    pub fn reset(&mut self) {
        self.mesh.reset();
    }

    pub fn render(&mut self, device: &mut dyn RenderDevice) -> Result<()> {
        self.mesh.render(device)
    }

    /// The wrapped mesh, for queries
    pub fn inner(&self) -> &DynamicMesh {
        &self.mesh
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "screen_mesh_tests.rs"]
mod tests;
