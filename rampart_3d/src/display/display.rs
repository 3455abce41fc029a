/// Display surface manager.
///
/// Owns the attached views and the render device, reflows view geometry
/// when the display mode changes, scales the world for sub-baseline
/// resolutions, and runs full-screen movie playback with the logo-movie
/// hold timers. One of these sits at the top of the frame loop: update()
/// advances timers and views, draw() renders everything and presents.

use std::sync::{Arc, Mutex};

use crate::config::DisplayConfig;
use crate::display::clock::Clock;
use crate::display::video::{VideoBuffer, VideoPlayer, VideoStream};
use crate::error::Result;
use crate::gpu::{ClearFlags, RenderDevice, SurfaceFormat};
use crate::view::{View, ViewportGeometry};

// ===== CONSTANTS =====

const LOG_SOURCE: &str = "rampart3d::Display";

/// Frame clear color, RGBA
const CLEAR_COLOR: u32 = 0x3030_30ff;

/// Pixel format movie frames are rendered into
const MOVIE_FORMAT: SurfaceFormat = SurfaceFormat::X8R8G8B8;

// ===== MOVIE PLAYBACK =====

/// Notified when a movie finishes or is stopped
pub trait MovieListener: Send {
    fn movie_finished(&mut self, name: &str);
}

struct ActiveMovie {
    name: String,
    stream: Box<dyn VideoStream>,
    buffer: VideoBuffer,
    /// When playback started
    started_ms: u64,
    /// Minimum time the movie stays up, 0 for none
    movie_hold_ms: u64,
    /// Minimum time the final (copyright) frame stays up, 0 for none
    copyright_hold_ms: u64,
    /// Set the first time the final frame is rendered
    copyright_started_ms: Option<u64>,
}

impl ActiveMovie {
    fn has_holds(&self) -> bool {
        self.movie_hold_ms > 0 || self.copyright_hold_ms > 0
    }
}

// ===== DISPLAY MANAGER =====

pub struct DisplayManager {
    config: DisplayConfig,
    device: Arc<Mutex<dyn RenderDevice>>,
    clock: Box<dyn Clock>,
    player: Option<Arc<dyn VideoPlayer>>,
    /// Draw order; new views are prepended so they render first
    views: Vec<Box<dyn View>>,
    width: u32,
    height: u32,
    bit_depth: u32,
    windowed: bool,
    movie: Option<ActiveMovie>,
    listener: Option<Box<dyn MovieListener>>,
}

impl DisplayManager {
    pub fn new(
        config: DisplayConfig,
        device: Arc<Mutex<dyn RenderDevice>>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let width = config.width;
        let height = config.height;
        let bit_depth = config.bit_depth;
        let windowed = config.windowed;
        Self {
            config,
            device,
            clock,
            player: None,
            views: Vec::new(),
            width,
            height,
            bit_depth,
            windowed,
            movie: None,
            listener: None,
        }
    }

    pub fn set_video_player(&mut self, player: Arc<dyn VideoPlayer>) {
        self.player = Some(player);
    }

    pub fn set_movie_listener(&mut self, listener: Box<dyn MovieListener>) {
        self.listener = Some(listener);
    }

    // ===== DISPLAY MODE =====

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bit_depth(&self) -> u32 {
        self.bit_depth
    }

    pub fn windowed(&self) -> bool {
        self.windowed
    }

    /// World scale for the current resolution
    pub fn world_scale(&self) -> f32 {
        self.config.world_scale_for(self.width, self.height)
    }

    /// Change the display mode and reflow every attached view so it
    /// keeps its proportional placement on the new surface.
    pub fn set_display_mode(
        &mut self,
        width: u32,
        height: u32,
        bit_depth: u32,
        windowed: bool,
    ) -> Result<()> {
        if width == 0 || height == 0 {
            crate::engine_bail!(LOG_SOURCE, "Display mode {}x{} is empty", width, height);
        }

        let ratio_x = width as f32 / self.width as f32;
        let ratio_y = height as f32 / self.height as f32;
        let world_scale = self.config.world_scale_for(width, height);

        for view in &mut self.views {
            let old = view.viewport_geometry();
            view.set_viewport_geometry(ViewportGeometry::new(
                old.width * ratio_x,
                old.height * ratio_y,
                old.origin_x * ratio_x,
                old.origin_y * ratio_y,
            ));
            view.set_display_size(width as f32, height as f32);
            view.set_world_scale(world_scale);
        }

        self.width = width;
        self.height = height;
        self.bit_depth = bit_depth;
        self.windowed = windowed;
        crate::engine_info!(
            LOG_SOURCE,
            "Display mode set to {}x{}x{} ({})",
            width,
            height,
            bit_depth,
            if windowed { "windowed" } else { "fullscreen" }
        );
        Ok(())
    }

    // ===== VIEWS =====

    /// Attach a view at the front of the draw order, pushing the current
    /// display size and world scale into it
    pub fn attach_view(&mut self, mut view: Box<dyn View>) {
        view.set_display_size(self.width as f32, self.height as f32);
        view.set_world_scale(self.world_scale());
        self.views.insert(0, view);
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    pub fn find_view(&mut self, name: &str) -> Option<&mut dyn View> {
        match self.views.iter_mut().find(|v| v.name() == name) {
            Some(view) => Some(view.as_mut()),
            None => None,
        }
    }

    // ===== MOVIES =====

    /// Play a movie to completion, no hold timers.
    ///
    /// A movie that cannot be opened (no player attached, unknown name)
    /// is not an error: the frame loop keeps running without playback
    /// and the failure is logged.
    pub fn play_movie(&mut self, name: &str) -> Result<()> {
        self.start_movie(name, 0, 0)
    }

    /// Play a logo movie: the movie stays up at least `movie_hold_ms`
    /// from its start, and the final frame at least `copyright_hold_ms`
    /// from when it is first shown
    pub fn play_logo_movie(
        &mut self,
        name: &str,
        movie_hold_ms: u64,
        copyright_hold_ms: u64,
    ) -> Result<()> {
        self.start_movie(name, movie_hold_ms, copyright_hold_ms)
    }

    fn start_movie(
        &mut self,
        name: &str,
        movie_hold_ms: u64,
        copyright_hold_ms: u64,
    ) -> Result<()> {
        self.stop_movie();

        // Unavailable playback degrades silently; the frame keeps drawing
        let Some(player) = &self.player else {
            crate::engine_warn!(
                LOG_SOURCE,
                "Movie '{}' skipped: no video player attached",
                name
            );
            return Ok(());
        };
        let Some(stream) = player.open(name) else {
            crate::engine_warn!(LOG_SOURCE, "Movie '{}' could not be opened", name);
            return Ok(());
        };

        let buffer = VideoBuffer::allocate(stream.width(), stream.height(), MOVIE_FORMAT)?;
        crate::engine_info!(LOG_SOURCE, "Movie '{}' started", name);
        self.movie = Some(ActiveMovie {
            name: name.to_string(),
            stream,
            buffer,
            started_ms: self.clock.now_ms(),
            movie_hold_ms,
            copyright_hold_ms,
            copyright_started_ms: None,
        });
        Ok(())
    }

    pub fn is_movie_playing(&self) -> bool {
        self.movie.is_some()
    }

    pub fn current_movie_name(&self) -> Option<&str> {
        self.movie.as_ref().map(|m| m.name.as_str())
    }

    /// The most recently rendered movie frame, while a movie is playing
    pub fn movie_frame(&self) -> Option<&VideoBuffer> {
        self.movie.as_ref().map(|m| &m.buffer)
    }

    /// Stop the current movie, if any, and notify the listener
    pub fn stop_movie(&mut self) {
        let Some(movie) = self.movie.take() else {
            return;
        };
        crate::engine_info!(LOG_SOURCE, "Movie '{}' stopped", movie.name);
        if let Some(listener) = self.listener.as_mut() {
            listener.movie_finished(&movie.name);
        }
    }

    // ===== FRAME LOOP =====

    /// Advance per-view logic and movie playback for this frame
    pub fn update(&mut self) {
        for view in &mut self.views {
            view.update();
        }

        let now = self.clock.now_ms();
        let mut finished = false;

        if let Some(movie) = self.movie.as_mut() {
            if movie.stream.is_frame_ready() {
                movie.stream.decode_frame();
                if let Err(err) = movie.stream.render_frame(&mut movie.buffer) {
                    crate::engine_error!(LOG_SOURCE, "Movie frame render failed: {}", err);
                    finished = true;
                } else if movie.stream.frame_index() + 1 < movie.stream.frame_count() {
                    movie.stream.next_frame();
                } else if movie.has_holds() {
                    // Final frame: start the copyright clock the first
                    // time we land here
                    if movie.copyright_started_ms.is_none() {
                        movie.copyright_started_ms = Some(now);
                    }
                } else {
                    finished = true;
                }
            }

            if let Some(copyright_started) = movie.copyright_started_ms {
                let movie_held = now >= movie.started_ms + movie.movie_hold_ms;
                let copyright_held = now >= copyright_started + movie.copyright_hold_ms;
                if movie_held && copyright_held {
                    finished = true;
                }
            }
        }
        if finished {
            self.stop_movie();
        }
    }

    /// Draw every view front to back, then clear and present the frame
    pub fn draw(&mut self) -> Result<()> {
        let mut device = self.device.lock().unwrap();
        for view in &mut self.views {
            view.draw(&mut *device)?;
        }
        device.clear(ClearFlags::COLOR | ClearFlags::DEPTH, CLEAR_COLOR);
        device.present()?;
        Ok(())
    }

    /// Stop playback and return every view to its startup state
    pub fn reset(&mut self) {
        self.stop_movie();
        for view in &mut self.views {
            view.reset();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
