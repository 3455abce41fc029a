/// Terrain query collaborator.
///
/// The view layer never owns terrain data. It asks an injected TerrainQuery
/// for ground heights (camera ground-following) and for the map extent
/// (pan constraints). When no terrain is injected the view degrades
/// gracefully: constraints stay unavailable and the camera pans freely.

use glam::{Vec2, Vec3};

/// Axis-aligned map extent in world XY
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub lo: Vec2,
    pub hi: Vec2,
}

impl Region {
    pub fn new(lo: Vec2, hi: Vec2) -> Self {
        Self { lo, hi }
    }

    /// Shrink the region by a margin on all sides. A negative margin grows it.
    pub fn shrunk_by(&self, margin: f32) -> Region {
        Region {
            lo: Vec2::new(self.lo.x + margin, self.lo.y + margin),
            hi: Vec2::new(self.hi.x - margin, self.hi.y - margin),
        }
    }

    /// Clamp a point into the region
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.max(self.lo.x).min(self.hi.x),
            point.y.max(self.lo.y).min(self.hi.y),
        )
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.lo.x && point.x <= self.hi.x
            && point.y >= self.lo.y && point.y <= self.hi.y
    }
}

/// Read-only terrain queries used by the camera pipeline
pub trait TerrainQuery: Send + Sync {
    /// Ground height at a world XY position
    fn ground_height(&self, x: f32, y: f32) -> f32;

    /// Ground height and surface normal at a world XY position
    fn ground_height_and_normal(&self, x: f32, y: f32) -> (f32, Vec3) {
        (self.ground_height(x, y), Vec3::Z)
    }

    /// Playable map extent in world XY
    fn extent(&self) -> Region;
}

/// Flat terrain at a constant height. Used by the demo and by tests;
/// real games inject their heightmap-backed implementation.
pub struct FlatTerrain {
    height: f32,
    extent: Region,
}

impl FlatTerrain {
    pub fn new(height: f32, extent: Region) -> Self {
        Self { height, extent }
    }
}

impl TerrainQuery for FlatTerrain {
    fn ground_height(&self, _x: f32, _y: f32) -> f32 {
        self.height
    }

    fn extent(&self) -> Region {
        self.extent
    }
}

#[cfg(test)]
#[path = "terrain_tests.rs"]
mod tests;
