/// Perspective camera.
///
/// Holds a camera-to-world transform plus projection parameters, and
/// answers the geometric questions the tactical view asks: view and
/// projection matrices, un-projection of logical screen points into
/// world space, and projection of world points back onto the screen.
///
/// Logical screen coordinates run -1..1 on both axes, +Y up, with the
/// origin at the viewport center. The camera looks down its local -Z.

use glam::{Mat4, Vec2, Vec3};

// ===== CONSTANTS =====

/// Near-plane guard when classifying points as behind the camera
const BEHIND_EPSILON: f32 = 1.0e-6;

// ===== HELPERS =====

/// Camera-to-world transform placing the camera at `source`, looking at
/// `target`, with world +Z as up and zero roll.
pub fn look_at_transform(source: Vec3, target: Vec3) -> Mat4 {
    Mat4::look_at_rh(source, target, Vec3::Z).inverse()
}

// ===== CAMERA =====

#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera-to-world
    transform: Mat4,
    /// Horizontal field of view, radians
    hfov: f32,
    /// Width over height
    aspect: f32,
    near: f32,
    far: f32,
    /// Viewport placement in normalized display coordinates (0..1)
    viewport_min: Vec2,
    viewport_max: Vec2,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            transform: Mat4::IDENTITY,
            hfov: 50.0_f32.to_radians(),
            aspect: 4.0 / 3.0,
            near: 1.0,
            far: 1000.0,
            viewport_min: Vec2::ZERO,
            viewport_max: Vec2::ONE,
        }
    }

    // ===== TRANSFORM =====

    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    /// Camera position in world space
    pub fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    /// World-to-camera matrix
    pub fn view_matrix(&self) -> Mat4 {
        self.transform.inverse()
    }

    /// Place the camera at `source` looking at `target`, zero roll
    pub fn look_at(&mut self, source: Vec3, target: Vec3) {
        self.transform = look_at_transform(source, target);
    }

    /// Rotate about the camera's local X axis
    pub fn rotate_x(&mut self, angle: f32) {
        self.transform *= Mat4::from_rotation_x(angle);
    }

    /// Rotate about the camera's local Y axis
    pub fn rotate_y(&mut self, angle: f32) {
        self.transform *= Mat4::from_rotation_y(angle);
    }

    /// Rotate about the camera's local Z axis
    pub fn rotate_z(&mut self, angle: f32) {
        self.transform *= Mat4::from_rotation_z(angle);
    }

    // ===== PROJECTION =====

    pub fn horizontal_fov(&self) -> f32 {
        self.hfov
    }

    /// Set the horizontal field of view, radians
    pub fn set_view_plane(&mut self, hfov: f32) {
        self.hfov = hfov;
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect
    }

    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Vertical field of view derived from the horizontal one
    pub fn vertical_fov(&self) -> f32 {
        2.0 * ((self.hfov * 0.5).tan() / self.aspect).atan()
    }

    pub fn clip_planes(&self) -> (f32, f32) {
        (self.near, self.far)
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
    }

    /// Distance to the far clip plane
    pub fn depth(&self) -> f32 {
        self.far
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.vertical_fov(), self.aspect, self.near, self.far)
    }

    // ===== VIEWPORT =====

    pub fn viewport(&self) -> (Vec2, Vec2) {
        (self.viewport_min, self.viewport_max)
    }

    pub fn set_viewport(&mut self, min: Vec2, max: Vec2) {
        self.viewport_min = min;
        self.viewport_max = max;
    }

    // ===== PICKING =====

    /// Map a logical screen point onto the view plane at unit depth,
    /// returned in world space. The result together with `position()`
    /// defines the pick ray through that screen point.
    pub fn un_project(&self, logical: Vec2) -> Vec3 {
        let half_h = (self.hfov * 0.5).tan();
        let half_v = (self.vertical_fov() * 0.5).tan();
        let on_plane = Vec3::new(logical.x * half_h, logical.y * half_v, -1.0);
        self.transform.transform_point3(on_plane)
    }

    /// Project a world point to logical screen coordinates. Returns None
    /// for points at or behind the camera plane.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let cam = self.view_matrix().transform_point3(world);
        if cam.z >= -BEHIND_EPSILON {
            return None;
        }
        let half_h = (self.hfov * 0.5).tan();
        let half_v = (self.vertical_fov() * 0.5).tan();
        let depth = -cam.z;
        Some(Vec2::new(cam.x / (depth * half_h), cam.y / (depth * half_v)))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
