/// View trait - a rectangular window into the world, owned by the display.
///
/// The display manager drives every attached view through this interface:
/// geometry reflow on resolution changes, a per-frame update, and a draw.

use glam::Vec2;

use crate::error::Result;
use crate::gpu::RenderDevice;

/// Viewport placement on the display, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGeometry {
    pub width: f32,
    pub height: f32,
    pub origin_x: f32,
    pub origin_y: f32,
}

impl ViewportGeometry {
    pub fn new(width: f32, height: f32, origin_x: f32, origin_y: f32) -> Self {
        Self { width, height, origin_x, origin_y }
    }
}

/// A view owned and driven by the display manager
pub trait View: Send {
    fn name(&self) -> &str;

    fn viewport_geometry(&self) -> ViewportGeometry;

    /// Place the viewport on the display, preserving apparent world scale
    fn set_viewport_geometry(&mut self, geometry: ViewportGeometry);

    /// Tell the view the full display resolution it is placed on
    fn set_display_size(&mut self, width: f32, height: f32);

    fn world_scale(&self) -> f32;

    /// World scale relative to the baseline resolution
    fn set_world_scale(&mut self, scale: f32);

    /// Per-frame logic update (shake decay, timers)
    fn update(&mut self);

    /// Render the view for this frame
    fn draw(&mut self, device: &mut dyn RenderDevice) -> Result<()>;

    /// Return to startup state
    fn reset(&mut self);
}

/// Debug overlay drawing, injected by the application when wanted.
/// Coordinates are display pixels.
pub trait DiagnosticsRenderer: Send {
    fn draw_line(&mut self, start: Vec2, end: Vec2, width: f32, color: u32);
}
