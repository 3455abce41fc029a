//! Headless demo for the Rampart 3D view layer.
//!
//! Wires a tactical view over flat terrain and a display manager around
//! the null render device, then steps a short frame loop: panning and
//! zooming the camera, shaking it, changing the display mode, and
//! pushing a screen-space mesh through the device every frame.

use std::sync::{Arc, Mutex};

use glam::{Vec2, Vec3, Vec4};

use rampart_3d::engine_info;
use rampart_3d::rampart3d::display::{DisplayManager, SystemClock};
use rampart_3d::rampart3d::dynamesh::ScreenMesh;
use rampart_3d::rampart3d::gpu::{NullDevice, RenderDevice};
use rampart_3d::rampart3d::terrain::{FlatTerrain, Region};
use rampart_3d::rampart3d::view::TacticalView;
use rampart_3d::rampart3d::{DisplayConfig, Result, ViewConfig};

const LOG_SOURCE: &str = "rampart3d::demo";

const FRAMES: u32 = 120;

fn main() -> Result<()> {
    let device = Arc::new(Mutex::new(NullDevice::new()));

    // Tactical view over a 400x400 cell flat map
    let mut view = TacticalView::new("tactical", ViewConfig::default());
    view.set_terrain(Arc::new(FlatTerrain::new(
        10.0,
        Region::new(Vec2::ZERO, Vec2::new(4000.0, 4000.0)),
    )));
    view.set_pose(Vec3::new(2000.0, 2000.0, 0.0), 1.2, 0.4, 0.0);
    view.add_shake(0.02, 1.5);
    view.update_transform();

    let (start, end) = view.screen_point_to_world_ray(Vec2::new(400.0, 300.0));
    engine_info!(
        LOG_SOURCE,
        "Center pick ray {:.1?} -> {:.1?}",
        start,
        end
    );
    if let Some(bounds) = view.pan_constraint() {
        engine_info!(
            LOG_SOURCE,
            "Pan constraints {:.1?} .. {:.1?}",
            bounds.lo,
            bounds.hi
        );
    }

    let mut display = DisplayManager::new(
        DisplayConfig::default(),
        Arc::clone(&device) as Arc<Mutex<dyn RenderDevice>>,
        Box::new(SystemClock::new()),
    );
    display.attach_view(Box::new(view));
    display.set_display_mode(1280, 720, 32, true)?;

    // Screen-space overlay quad, rebuilt and pushed every frame
    let mut overlay = ScreenMesh::new(16, 16);
    overlay.set_aspect(720.0 / 1280.0);

    for frame in 0..FRAMES {
        display.update();
        display.draw()?;

        overlay.reset();
        overlay.begin_tri_strip();
        for (x, y) in [(0.02, 0.02), (0.02, 0.1), (0.3, 0.02), (0.3, 0.1)] {
            overlay.begin_vertex();
            overlay.color(0, Vec4::new(1.0, 1.0, 1.0, 0.8));
            overlay.location(x, y);
            overlay.end_vertex();
        }
        {
            let mut device = device.lock().unwrap();
            overlay.render(&mut *device)?;
        }

        if frame % 30 == 0 {
            engine_info!(LOG_SOURCE, "Frame {} drawn", frame);
        }
    }

    let stats = device.lock().unwrap().stats();
    engine_info!(
        LOG_SOURCE,
        "Done: {} frames, {} draw calls, {} buffers",
        stats.frames_presented,
        stats.draw_calls,
        stats.buffers_created
    );
    Ok(())
}
