/// Tactical (RTS overhead) view.
///
/// Owns the camera pose (look-at position, zoom, angle, pitch) and turns
/// it into a camera transform every frame: ground-following height,
/// zoom-dependent field of view, rotational and translational shake,
/// height-compression via the FX pitch factor, and map-edge pan
/// constraints derived from back-projected pick rays. The view can also
/// be slaved to a named bone on a scene object, in which case the bone
/// transform replaces the computed one wholesale.

use std::sync::Arc;

use glam::{Mat3, Mat4, Vec2, Vec3};

use crate::config::ViewConfig;
use crate::error::Result;
use crate::gpu::RenderDevice;
use crate::scene::SceneLookup;
use crate::terrain::{Region, TerrainQuery};
use crate::view::camera::{look_at_transform, Camera};
use crate::view::shaker::CameraShaker;
use crate::view::view::{DiagnosticsRenderer, View, ViewportGeometry};

// ===== CONSTANTS =====

const LOG_SOURCE: &str = "rampart3d::TacticalView";

/// World units per logical map cell
const MAP_CELL_SIZE: f32 = 10.0;

/// Default look-at point in cells, scaled into world units
const DEFAULT_POSITION_CELLS: (f32, f32) = (87.0, 77.0);

/// Fixed step the rotational shaker advances by per built transform
const SHAKER_TIMESTEP: f32 = 1.0 / 30.0;

/// Translational shake decay per frame, and the cutoff below which the
/// shake snaps to rest
const SHAKE_DECAY: f32 = 0.75;
const SHAKE_CUTOFF: f32 = 0.01;

/// Attenuation radius for epicenter-based shake, world units
const SHAKE_RADIUS: f32 = 700.0;
const SHAKE_INTENSITY_MAX: f32 = 10.0;

/// Margin override that pushes the pan constraints well past the map
/// edges when off-map viewing is enabled
const VIEW_OUTSIDE_MAP_MARGIN: f32 = -1000.0;

/// Constraint overlay style
const CONSTRAINT_LINE_WIDTH: f32 = 1.0;
const CONSTRAINT_LINE_COLOR: u32 = 0xffff_00ff;

// ===== SLAVE BINDING =====

#[derive(Debug, Clone)]
struct SlaveBinding {
    object: String,
    bone: String,
}

// ===== TACTICAL VIEW =====

pub struct TacticalView {
    name: String,
    config: ViewConfig,
    camera: Camera,

    // Pose
    position: Vec3,
    zoom: f32,
    angle: f32,
    pitch: f32,

    // Derived state
    camera_offset: Vec3,
    fov: f32,
    fx_pitch: f32,
    ground_level: f32,

    // Viewport placement
    geometry: ViewportGeometry,
    display_width: f32,
    display_height: f32,
    world_scale: f32,

    // Shake
    shaker: CameraShaker,
    shake_offset: Vec2,
    shake_intensity: f32,
    frame_parity: bool,

    // Pan constraints, rebuilt lazily when invalidated
    constraint: Option<Region>,

    // Slaving
    slave: Option<SlaveBinding>,

    // Collaborators
    terrain: Option<Arc<dyn TerrainQuery>>,
    scene: Option<Arc<dyn SceneLookup>>,
    diagnostics: Option<Box<dyn DiagnosticsRenderer>>,
}

impl TacticalView {
    pub fn new(name: impl Into<String>, config: ViewConfig) -> Self {
        let camera_offset = Self::offset_from_config(&config);
        let fov = config.default_fov_deg.to_radians();
        let ground_level = config.ground_level;
        Self {
            name: name.into(),
            config,
            camera: Camera::new(),
            position: Self::default_position(),
            zoom: 1.0,
            angle: 0.0,
            pitch: 0.0,
            camera_offset,
            fov,
            fx_pitch: 1.0,
            ground_level,
            geometry: ViewportGeometry::new(800.0, 600.0, 0.0, 0.0),
            display_width: 800.0,
            display_height: 600.0,
            world_scale: 1.0,
            shaker: CameraShaker::new(),
            shake_offset: Vec2::ZERO,
            shake_intensity: 0.0,
            frame_parity: false,
            constraint: None,
            slave: None,
            terrain: None,
            scene: None,
            diagnostics: None,
        }
    }

    fn default_position() -> Vec3 {
        Vec3::new(
            DEFAULT_POSITION_CELLS.0 * MAP_CELL_SIZE,
            DEFAULT_POSITION_CELLS.1 * MAP_CELL_SIZE,
            0.0,
        )
    }

    /// Default camera offset from the look-at point, derived from the
    /// configured height, pitch and yaw
    fn offset_from_config(config: &ViewConfig) -> Vec3 {
        let z = config.camera_height;
        let y = -(z / config.camera_pitch_deg.to_radians().tan());
        let x = -(y * config.camera_yaw_deg.to_radians().tan());
        Vec3::new(x, y, z)
    }

    // ===== COLLABORATORS =====

    pub fn set_terrain(&mut self, terrain: Arc<dyn TerrainQuery>) {
        self.terrain = Some(terrain);
        self.constraint = None;
    }

    pub fn clear_terrain(&mut self) {
        self.terrain = None;
        self.constraint = None;
    }

    pub fn set_scene(&mut self, scene: Arc<dyn SceneLookup>) {
        self.scene = Some(scene);
    }

    /// Inject a debug overlay renderer. While one is present, the view
    /// draws its pan-constraint rectangle every frame.
    pub fn set_diagnostics(&mut self, diagnostics: Box<dyn DiagnosticsRenderer>) {
        self.diagnostics = Some(diagnostics);
    }

    pub fn clear_diagnostics(&mut self) {
        self.diagnostics = None;
    }

    // ===== POSE =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(self.config.min_zoom, self.config.max_zoom);
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    /// Set the whole pose in one call. Zoom is clamped to the configured
    /// range; the pan constraints are left untouched.
    pub fn set_pose(&mut self, position: Vec3, zoom: f32, angle: f32, pitch: f32) {
        self.position = position;
        self.set_zoom(zoom);
        self.angle = angle;
        self.pitch = pitch;
    }

    pub fn fx_pitch(&self) -> f32 {
        self.fx_pitch
    }

    /// Height-compression factor. 1.0 is neutral; values below 1 pull
    /// the look-at point up toward the camera, values above 1 pull the
    /// camera in over the target.
    pub fn set_fx_pitch(&mut self, fx_pitch: f32) {
        self.fx_pitch = fx_pitch;
    }

    pub fn ground_level(&self) -> f32 {
        self.ground_level
    }

    pub fn set_ground_level(&mut self, ground_level: f32) {
        self.ground_level = ground_level;
        self.constraint = None;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn pan_constraint(&self) -> Option<Region> {
        self.constraint
    }

    // ===== SHAKE =====

    /// Rotational shake: a damped oscillation layered onto the camera
    /// orientation for `duration` seconds
    pub fn add_shake(&mut self, amplitude: f32, duration: f32) {
        self.shaker.add_shake(amplitude, duration);
    }

    /// Translational shake from a world-space epicenter, attenuated by
    /// distance from the look-at point
    pub fn shake(&mut self, epicenter: Vec3, intensity: f32) {
        let distance = (epicenter.truncate() - self.position.truncate()).length();
        let attenuation = (1.0 - distance / SHAKE_RADIUS).clamp(0.0, 1.0);
        self.shake_intensity =
            (self.shake_intensity + intensity * attenuation).min(SHAKE_INTENSITY_MAX);
    }

    // ===== SLAVING =====

    /// Slave the camera to a named bone on a scene object. While bound,
    /// the bone transform replaces the tactical transform every frame.
    pub fn slave_to(&mut self, object: impl Into<String>, bone: impl Into<String>) {
        self.slave = Some(SlaveBinding {
            object: object.into(),
            bone: bone.into(),
        });
    }

    pub fn release_slave(&mut self) {
        self.slave = None;
    }

    pub fn is_camera_slaved(&self) -> bool {
        self.slave.is_some()
    }

    fn resolve_slave_transform(&self, binding: &SlaveBinding) -> Option<Mat4> {
        let scene = self.scene.as_ref()?;
        let object = scene.find_object_by_name(&binding.object)?;
        let drawable = object.drawable()?;
        for module in drawable.draw_modules() {
            if let Some(bones) = module.bone_query() {
                return bones.bone_transform(&binding.bone);
            }
        }
        None
    }

    // ===== TRANSFORM PIPELINE =====

    /// Build the camera-to-world transform for the current pose. Updates
    /// the field of view when real zoom is active, steps the rotational
    /// shaker, and silently releases a slave binding whose target has
    /// left the scene.
    pub fn build_transform(&mut self) -> Mat4 {
        let ground = self.ground_level;
        let zoom = self.zoom * self.world_scale;

        let mut pos = self.position;
        pos.x += self.shake_offset.x;
        pos.y += self.shake_offset.y;
        if let Some(bounds) = &self.constraint {
            let clamped = bounds.clamp_point(Vec2::new(pos.x, pos.y));
            pos.x = clamped.x;
            pos.y = clamped.y;
        }

        let mut source = if self.config.use_real_zoom {
            // Real zoom keeps the camera geometry fixed and narrows the
            // field of view with the square of the capped zoom
            let capped = zoom.clamp(self.config.min_capped_zoom, 1.0);
            self.fov = self.config.default_fov_deg.to_radians() * capped * capped;
            self.camera_offset
        } else {
            self.camera_offset * zoom
        };
        let mut target = Vec3::ZERO;

        // Shorten the boom so the camera stays a constant height above
        // the ground plane rather than above sea level
        let factor = 1.0 - ground / source.z;

        source = Mat3::from_axis_angle(Vec3::X, self.pitch) * source;
        source = Mat3::from_axis_angle(Vec3::Z, self.angle) * source;
        source *= factor;

        source += Vec3::new(pos.x, pos.y, ground);
        target += Vec3::new(pos.x, pos.y, ground);

        if self.config.use_real_zoom {
            let capped = zoom.clamp(self.config.min_capped_zoom, 1.0);
            source.z *= 0.5 + capped * 0.5;
            self.fx_pitch = 0.25 + capped * 0.75;
            source.x = target.x + (source.x - target.x) / self.fx_pitch;
            source.y = target.y + (source.y - target.y) / self.fx_pitch;
        } else if self.fx_pitch <= 1.0 {
            // Compress apparent height by raising the look-at point
            let height = (source.z - target.z) * self.fx_pitch;
            target.z = source.z - height;
        } else {
            // Steepen by pulling the camera in over the target
            source.x = target.x + (source.x - target.x) / self.fx_pitch;
            source.y = target.y + (source.y - target.y) / self.fx_pitch;
        }

        let mut transform = look_at_transform(source, target);

        self.shaker.timestep(SHAKER_TIMESTEP);
        let angles = self.shaker.angles();
        transform *= Mat4::from_rotation_x(angles.x);
        transform *= Mat4::from_rotation_y(angles.y);
        transform *= Mat4::from_rotation_z(angles.z);

        if let Some(binding) = self.slave.clone() {
            match self.resolve_slave_transform(&binding) {
                Some(bone_transform) => {
                    transform = bone_transform;
                    self.position = bone_transform.w_axis.truncate();
                }
                None => {
                    crate::engine_debug!(
                        LOG_SOURCE,
                        "Slave target '{}'/'{}' unavailable, releasing the camera",
                        binding.object,
                        binding.bone
                    );
                    self.slave = None;
                }
            }
        }

        transform
    }

    /// Rebuild the camera for this frame: clip planes, lazily
    /// recomputed pan constraints, pose clamping, and the transform
    pub fn update_transform(&mut self) {
        let near = self.config.near_plane;
        let mut far = self.config.far_plane;
        if self.config.use_real_zoom {
            if self.fx_pitch < 0.95 {
                far /= self.fx_pitch;
            }
        } else if self.config.draw_entire_terrain || self.fx_pitch < 0.95 || self.zoom > 1.05 {
            far *= MAP_CELL_SIZE;
        }
        self.camera.set_clip_planes(near, far);

        if self.constraint.is_none() {
            // Constraints depend on the projection, so settle the camera
            // on the unconstrained pose first
            let transform = self.build_transform();
            self.camera.set_transform(transform);
            self.recompute_constraints();
        }
        if let Some(bounds) = &self.constraint {
            let clamped = bounds.clamp_point(Vec2::new(self.position.x, self.position.y));
            self.position.x = clamped.x;
            self.position.y = clamped.y;
        }

        self.camera.set_view_plane(self.fov);
        let transform = self.build_transform();
        self.camera.set_transform(transform);
    }

    // ===== PAN CONSTRAINTS =====

    /// Recompute the map-edge pan constraints by back-projecting the
    /// viewport center and a point near its bottom edge onto the ground
    /// plane. The distance between the two hits becomes the margin the
    /// map extent is shrunk by.
    pub fn recompute_constraints(&mut self) {
        let Some(terrain) = self.terrain.clone() else {
            crate::engine_debug!(LOG_SOURCE, "No terrain set, pan constraints unavailable");
            return;
        };
        let extent = terrain.extent();

        let center_px = Vec2::new(
            self.geometry.origin_x + 0.5 * self.geometry.width,
            self.geometry.origin_y + 0.5 * self.geometry.height,
        );
        let bottom_px = Vec2::new(
            center_px.x,
            self.geometry.origin_y + 0.95 * self.geometry.height,
        );

        let center = self.pick_point_at_height(center_px, self.ground_level);
        let bottom = self.pick_point_at_height(bottom_px, self.ground_level);
        let (Some(center), Some(bottom)) = (center, bottom) else {
            crate::engine_warn!(LOG_SOURCE, "Pick rays missed the ground plane, keeping constraints invalid");
            return;
        };

        let margin = if self.config.view_outside_map {
            VIEW_OUTSIDE_MAP_MARGIN
        } else {
            (center - bottom).length()
        };
        self.constraint = Some(extent.shrunk_by(margin));
    }

    /// Intersect the pick ray through a screen point with the horizontal
    /// plane at `height`
    fn pick_point_at_height(&self, screen: Vec2, height: f32) -> Option<Vec2> {
        let (start, end) = self.screen_point_to_world_ray(screen);
        let dz = end.z - start.z;
        if dz.abs() < f32::EPSILON {
            return None;
        }
        let t = (height - start.z) / dz;
        let hit = start + (end - start) * t;
        Some(Vec2::new(hit.x, hit.y))
    }

    // ===== PICKING =====

    /// World-space pick ray through a display pixel, from the camera
    /// position out to the far plane
    pub fn screen_point_to_world_ray(&self, screen: Vec2) -> (Vec3, Vec3) {
        let logical = Vec2::new(
            2.0 * (screen.x - self.geometry.origin_x) / self.geometry.width - 1.0,
            1.0 - 2.0 * (screen.y - self.geometry.origin_y) / self.geometry.height,
        );
        let start = self.camera.position();
        let on_plane = self.camera.un_project(logical);
        let direction = (on_plane - start).normalize_or_zero();
        let end = start + direction * self.camera.depth();
        (start, end)
    }

    /// Project a world point to display pixels. None when the point is
    /// behind the camera.
    pub fn world_to_screen(&self, world: Vec3) -> Option<Vec2> {
        let logical = self.camera.project(world)?;
        Some(Vec2::new(
            self.geometry.origin_x + (logical.x + 1.0) * 0.5 * self.geometry.width,
            self.geometry.origin_y + (1.0 - logical.y) * 0.5 * self.geometry.height,
        ))
    }

    // ===== VIEWPORT =====

    /// Re-derive everything that depends on viewport placement: aspect
    /// ratio, normalized viewport bounds, the width-proportional field
    /// of view, and the (now invalid) pan constraints
    fn apply_viewport(&mut self) {
        self.camera
            .set_aspect_ratio((self.geometry.width / self.geometry.height) * self.world_scale);
        let v_min = Vec2::new(
            self.geometry.origin_x / self.display_width,
            self.geometry.origin_y / self.display_height,
        );
        let v_max = Vec2::new(
            (self.geometry.origin_x + self.geometry.width) / self.display_width,
            (self.geometry.origin_y + self.geometry.height) / self.display_height,
        );
        self.camera.set_viewport(v_min, v_max);
        self.fov = (self.geometry.width / self.display_width)
            * self.config.default_fov_deg.to_radians()
            * self.world_scale;
        self.camera.set_view_plane(self.fov);
        self.constraint = None;
    }

    // ===== DIAGNOSTICS =====

    fn draw_constraint_overlay(&mut self) {
        let Some(bounds) = self.constraint else {
            return;
        };
        if self.diagnostics.is_none() {
            return;
        }

        let corners = [
            Vec3::new(bounds.lo.x, bounds.lo.y, self.ground_level),
            Vec3::new(bounds.hi.x, bounds.lo.y, self.ground_level),
            Vec3::new(bounds.hi.x, bounds.hi.y, self.ground_level),
            Vec3::new(bounds.lo.x, bounds.hi.y, self.ground_level),
        ];
        let mut projected = [Vec2::ZERO; 4];
        for (slot, corner) in projected.iter_mut().zip(corners.iter()) {
            match self.world_to_screen(*corner) {
                Some(point) => *slot = point,
                None => return,
            }
        }

        if let Some(diagnostics) = self.diagnostics.as_mut() {
            for i in 0..4 {
                diagnostics.draw_line(
                    projected[i],
                    projected[(i + 1) % 4],
                    CONSTRAINT_LINE_WIDTH,
                    CONSTRAINT_LINE_COLOR,
                );
            }
        }
    }
}

// ===== VIEW IMPL =====

impl View for TacticalView {
    fn name(&self) -> &str {
        &self.name
    }

    fn viewport_geometry(&self) -> ViewportGeometry {
        self.geometry
    }

    fn set_viewport_geometry(&mut self, geometry: ViewportGeometry) {
        self.geometry = geometry;
        self.apply_viewport();
    }

    fn set_display_size(&mut self, width: f32, height: f32) {
        self.display_width = width;
        self.display_height = height;
        self.apply_viewport();
    }

    fn world_scale(&self) -> f32 {
        self.world_scale
    }

    fn set_world_scale(&mut self, scale: f32) {
        self.world_scale = scale;
        self.apply_viewport();
    }

    fn update(&mut self) {
        if self.shake_intensity > 0.0 {
            self.frame_parity = !self.frame_parity;
            let sign = if self.frame_parity { 1.0 } else { -1.0 };
            self.shake_offset = Vec2::new(sign, -sign) * self.shake_intensity;
            self.shake_intensity *= SHAKE_DECAY;
            if self.shake_intensity < SHAKE_CUTOFF {
                self.shake_intensity = 0.0;
                self.shake_offset = Vec2::ZERO;
            }
        }
    }

    fn draw(&mut self, _device: &mut dyn RenderDevice) -> Result<()> {
        self.update_transform();
        self.draw_constraint_overlay();
        Ok(())
    }

    fn reset(&mut self) {
        self.position = Self::default_position();
        self.zoom = 1.0;
        self.angle = 0.0;
        self.pitch = 0.0;
        self.fov = self.config.default_fov_deg.to_radians();
        self.fx_pitch = 1.0;
        self.ground_level = self.config.ground_level;
        self.shaker.clear();
        self.shake_offset = Vec2::ZERO;
        self.shake_intensity = 0.0;
        self.slave = None;
        self.constraint = None;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "tactical_view_tests.rs"]
mod tests;
