/// Material table shared by dynamic meshes.
///
/// Textures and vertex materials are interned once and referenced by key.
/// Add operations are add-or-find: registering the same name twice returns
/// the existing key, so meshes can set materials by name every frame
/// without growing the table.

use glam::Vec4;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable key into the texture table
    pub struct TextureKey;
    /// Stable key into the vertex material table
    pub struct MaterialKey;
}

/// A texture reference. The engine tracks identity and format only;
/// pixel data lives with the device backend.
#[derive(Debug, Clone)]
pub struct TextureRef {
    pub name: String,
    pub format: crate::gpu::SurfaceFormat,
}

/// Fixed-function vertex material
#[derive(Debug, Clone)]
pub struct VertexMaterial {
    pub name: String,
    pub diffuse: Vec4,
    pub emissive: Vec4,
    pub opacity: f32,
}

impl VertexMaterial {
    pub fn with_diffuse(name: &str, diffuse: Vec4) -> Self {
        Self {
            name: name.to_string(),
            diffuse,
            emissive: Vec4::ZERO,
            opacity: 1.0,
        }
    }
}

/// Interned textures and materials, keyed and name-indexed
pub struct MaterialTable {
    textures: SlotMap<TextureKey, TextureRef>,
    materials: SlotMap<MaterialKey, VertexMaterial>,
    texture_names: FxHashMap<String, TextureKey>,
    material_names: FxHashMap<String, MaterialKey>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self {
            textures: SlotMap::with_key(),
            materials: SlotMap::with_key(),
            texture_names: FxHashMap::default(),
            material_names: FxHashMap::default(),
        }
    }

    // ===== TEXTURES =====

    /// Intern a texture, returning the existing key when the name is known
    pub fn add_texture(&mut self, texture: TextureRef) -> TextureKey {
        if let Some(&key) = self.texture_names.get(&texture.name) {
            return key;
        }
        let name = texture.name.clone();
        let key = self.textures.insert(texture);
        self.texture_names.insert(name, key);
        key
    }

    pub fn texture(&self, key: TextureKey) -> Option<&TextureRef> {
        self.textures.get(key)
    }

    pub fn find_texture(&self, name: &str) -> Option<TextureKey> {
        self.texture_names.get(name).copied()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    // ===== MATERIALS =====

    /// Intern a vertex material, returning the existing key when the name is known
    pub fn add_material(&mut self, material: VertexMaterial) -> MaterialKey {
        if let Some(&key) = self.material_names.get(&material.name) {
            return key;
        }
        let name = material.name.clone();
        let key = self.materials.insert(material);
        self.material_names.insert(name, key);
        key
    }

    pub fn material(&self, key: MaterialKey) -> Option<&VertexMaterial> {
        self.materials.get(key)
    }

    pub fn find_material(&self, name: &str) -> Option<MaterialKey> {
        self.material_names.get(name).copied()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
