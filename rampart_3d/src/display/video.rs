/// Video playback abstraction.
///
/// The display manager drives movie playback through these traits; the
/// application supplies the codec. A stream hands out frames one at a
/// time: the manager waits for a frame to be ready, decodes it, renders
/// it into a pixel buffer, and advances.

use crate::error::Result;
use crate::gpu::format::SurfaceFormat;

// ===== PLAYER =====

/// Factory for video streams, injected into the display manager
pub trait VideoPlayer: Send + Sync {
    /// Open a named movie. None when the movie cannot be found or the
    /// codec rejects it.
    fn open(&self, name: &str) -> Option<Box<dyn VideoStream>>;
}

// ===== STREAM =====

/// One playing movie
pub trait VideoStream: Send {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Zero-based index of the frame the stream is positioned on
    fn frame_index(&self) -> u32;

    fn frame_count(&self) -> u32;

    /// Whether the current frame has arrived and can be decoded
    fn is_frame_ready(&self) -> bool;

    fn decode_frame(&mut self);

    /// Render the decoded frame into a pixel buffer
    fn render_frame(&mut self, buffer: &mut VideoBuffer) -> Result<()>;

    fn next_frame(&mut self);
}

// ===== FRAME BUFFER =====

/// CPU-side pixel buffer video frames are rendered into
pub struct VideoBuffer {
    width: u32,
    height: u32,
    format: SurfaceFormat,
    pitch: u32,
    data: Vec<u8>,
}

impl VideoBuffer {
    /// Allocate a buffer for the given dimensions and format. Compressed
    /// and palette formats have no per-pixel byte size and are rejected.
    pub fn allocate(width: u32, height: u32, format: SurfaceFormat) -> Result<Self> {
        let bpp = format.bytes_per_pixel();
        if bpp == 0 {
            crate::engine_bail!(
                "rampart3d::VideoBuffer",
                "Video buffers cannot use format {:?}",
                format
            );
        }
        if width == 0 || height == 0 {
            crate::engine_bail!(
                "rampart3d::VideoBuffer",
                "Video buffer dimensions {}x{} are empty",
                width,
                height
            );
        }
        let pitch = width * bpp;
        Ok(Self {
            width,
            height,
            format,
            pitch,
            data: vec![0; (pitch * height) as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> SurfaceFormat {
        self.format
    }

    /// Bytes per row
    pub fn pitch(&self) -> u32 {
        self.pitch
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "video_tests.rs"]
mod tests;
