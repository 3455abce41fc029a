/// Engine configuration for views and the display surface.
///
/// These carry the tuned constants the camera pipeline and display manager
/// are built around. Applications construct them once at startup and pass
/// them down; nothing here is global.

/// Tactical view configuration
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Camera boom height above the look-at point (world units)
    pub camera_height: f32,
    /// Camera boom pitch, degrees above the horizon
    pub camera_pitch_deg: f32,
    /// Camera boom yaw, degrees off the map Y axis
    pub camera_yaw_deg: f32,
    /// Horizontal field of view at full display width, degrees
    pub default_fov_deg: f32,
    /// Zoom clamp applied by set_pose
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Lower cap on the zoom value feeding the real-zoom FOV curve
    pub min_capped_zoom: f32,
    /// Assumed terrain height at the map edges (world units)
    pub ground_level: f32,
    /// Near clip plane. Kept high to improve z-buffer resolution.
    pub near_plane: f32,
    /// Far clip plane before any fx-pitch / zoom extension
    pub far_plane: f32,
    /// Drive zoom through the FOV instead of the camera boom length
    pub use_real_zoom: bool,
    /// Extend the far plane so the entire terrain is visible
    pub draw_entire_terrain: bool,
    /// Debug: push the pan constraints far out so the camera can leave the map
    pub view_outside_map: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            camera_height: 310.0,
            camera_pitch_deg: 37.5,
            camera_yaw_deg: 0.0,
            default_fov_deg: 50.0,
            min_zoom: 0.3,
            max_zoom: 2.0,
            min_capped_zoom: 0.5,
            ground_level: 10.0,
            near_plane: 10.0,
            far_plane: 1200.0,
            use_real_zoom: false,
            draw_entire_terrain: false,
            view_outside_map: false,
        }
    }
}

/// Display surface configuration
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Initial display width in pixels
    pub width: u32,
    /// Initial display height in pixels
    pub height: u32,
    /// Initial color depth in bits per pixel
    pub bit_depth: u32,
    /// Start in windowed mode
    pub windowed: bool,
    /// Resolution at which the world scale factor is 1.0
    pub baseline_width: f32,
    pub baseline_height: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            bit_depth: 32,
            windowed: true,
            baseline_width: 1920.0,
            baseline_height: 1080.0,
        }
    }
}

impl DisplayConfig {
    /// World scale factor for a given resolution: the smaller of the two
    /// per-axis ratios against the baseline. Above-baseline modes scale up.
    pub fn world_scale_for(&self, width: u32, height: u32) -> f32 {
        (width as f32 / self.baseline_width).min(height as f32 / self.baseline_height)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
