/// Headless render device.
///
/// Stores buffer contents in memory and counts submissions instead of
/// talking to a graphics API. Used by the demo binary and by integration
/// tests; also a template for writing a real backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::engine_bail;
use crate::gpu::device::{
    BufferDesc, BufferHandle, ClearFlags, DrawCall, RenderDevice,
};

// ===== NULL BUFFER =====

pub struct NullBuffer {
    data: Mutex<Vec<u8>>,
    dynamic: bool,
    valid: AtomicBool,
}

impl NullBuffer {
    fn new(desc: &BufferDesc) -> Self {
        let size = desc.size_bytes() as usize;
        let mut data = vec![0u8; size];
        if let Some(initial) = &desc.data {
            data[..initial.len()].copy_from_slice(initial);
        }
        Self {
            data: Mutex::new(data),
            dynamic: desc.dynamic,
            valid: AtomicBool::new(true),
        }
    }

    /// Snapshot of the buffer contents, for inspection in tests
    pub fn contents(&self) -> Vec<u8> {
        self.data.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

impl BufferHandle for NullBuffer {
    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        if !self.valid.load(Ordering::Acquire) {
            engine_bail!("rampart3d::NullDevice", "update on a released buffer");
        }
        if !self.dynamic {
            engine_bail!("rampart3d::NullDevice", "update on a non-dynamic buffer");
        }
        let mut stored = match self.data.lock() {
            Ok(guard) => guard,
            Err(_) => engine_bail!("rampart3d::NullDevice", "buffer lock poisoned"),
        };
        let end = offset as usize + data.len();
        if end > stored.len() {
            engine_bail!(
                "rampart3d::NullDevice",
                "update range {}..{} exceeds buffer size {}",
                offset, end, stored.len()
            );
        }
        stored[offset as usize..end].copy_from_slice(data);
        Ok(())
    }

    fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }

    fn size_bytes(&self) -> u64 {
        self.data.lock().map(|d| d.len() as u64).unwrap_or(0)
    }
}

// ===== NULL DEVICE =====

/// Per-frame and lifetime counters for the null device
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDeviceStats {
    pub buffers_created: u32,
    pub draw_calls: u32,
    pub clears: u32,
    pub frames_presented: u32,
}

pub struct NullDevice {
    stats: NullDeviceStats,
    last_clear_color: u32,
}

impl NullDevice {
    pub fn new() -> Self {
        Self {
            stats: NullDeviceStats::default(),
            last_clear_color: 0,
        }
    }

    pub fn stats(&self) -> NullDeviceStats {
        self.stats
    }

    pub fn last_clear_color(&self) -> u32 {
        self.last_clear_color
    }
}

impl Default for NullDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderDevice for NullDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn BufferHandle>> {
        if desc.element_count == 0 {
            engine_bail!("rampart3d::NullDevice", "buffer must have at least one element");
        }
        if let Some(data) = &desc.data {
            if data.len() as u64 > desc.size_bytes() {
                engine_bail!(
                    "rampart3d::NullDevice",
                    "initial data of {} bytes exceeds buffer size {}",
                    data.len(), desc.size_bytes()
                );
            }
        }
        self.stats.buffers_created += 1;
        Ok(Arc::new(NullBuffer::new(&desc)))
    }

    fn submit(&mut self, draw: DrawCall) -> Result<()> {
        if !draw.vertex_buffer.is_valid() || !draw.index_buffer.is_valid() {
            engine_bail!("rampart3d::NullDevice", "submit with a released buffer");
        }
        self.stats.draw_calls += 1;
        Ok(())
    }

    fn clear(&mut self, _flags: ClearFlags, color: u32) {
        self.stats.clears += 1;
        self.last_clear_color = color;
    }

    fn present(&mut self) -> Result<()> {
        self.stats.frames_presented += 1;
        Ok(())
    }
}
