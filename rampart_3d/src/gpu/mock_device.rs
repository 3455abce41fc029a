/// Mock render device for unit tests (no GPU required)
///
/// Records every command as a string so tests can assert on exactly what
/// the engine asked the device to do, and can be armed to fail the next
/// buffer creation.

#[cfg(test)]
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(test)]
use std::sync::{Arc, Mutex};

#[cfg(test)]
use crate::error::{Error, Result};
#[cfg(test)]
use crate::gpu::device::{
    BufferDesc, BufferHandle, BufferUsage, ClearFlags, DrawCall, RenderDevice,
};

// ============================================================================
// Mock Buffer
// ============================================================================

#[cfg(test)]
pub struct MockBuffer {
    pub size: u64,
    pub dynamic: bool,
    pub valid: AtomicBool,
}

#[cfg(test)]
impl MockBuffer {
    pub fn new(size: u64, dynamic: bool) -> Self {
        Self {
            size,
            dynamic,
            valid: AtomicBool::new(true),
        }
    }
}

#[cfg(test)]
impl BufferHandle for MockBuffer {
    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        if !self.valid.load(Ordering::Acquire) {
            return Err(Error::InvalidResource("update on released buffer".to_string()));
        }
        if !self.dynamic {
            return Err(Error::InvalidResource("update on non-dynamic buffer".to_string()));
        }
        if offset + data.len() as u64 > self.size {
            return Err(Error::InvalidResource("update out of range".to_string()));
        }
        Ok(())
    }

    fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }

    fn size_bytes(&self) -> u64 {
        self.size
    }
}

// ============================================================================
// Mock Device
// ============================================================================

/// Mock device that records commands without a GPU
#[cfg(test)]
pub struct MockDevice {
    /// Recorded commands, shared so tests keep a handle after moving the device
    pub commands: Arc<Mutex<Vec<String>>>,
    /// When set, the next create_buffer fails
    pub fail_next_create: bool,
}

#[cfg(test)]
impl MockDevice {
    pub fn new() -> Self {
        Self {
            commands: Arc::new(Mutex::new(Vec::new())),
            fail_next_create: false,
        }
    }

    pub fn recorded_commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    fn record(&self, command: String) {
        self.commands.lock().unwrap().push(command);
    }
}

#[cfg(test)]
impl RenderDevice for MockDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn BufferHandle>> {
        if self.fail_next_create {
            self.fail_next_create = false;
            self.record("create_buffer FAILED".to_string());
            return Err(Error::BackendError("mock creation failure".to_string()));
        }
        let kind = match desc.usage {
            BufferUsage::Vertex(_) => "vtx",
            BufferUsage::Index => "idx",
        };
        self.record(format!("create_buffer {} {}x{}", kind, desc.element_count, desc.element_size));
        Ok(Arc::new(MockBuffer::new(desc.size_bytes(), desc.dynamic)))
    }

    fn submit(&mut self, draw: DrawCall) -> Result<()> {
        self.record(format!("submit {}", draw.index_count));
        Ok(())
    }

    fn clear(&mut self, flags: ClearFlags, color: u32) {
        self.record(format!("clear {:?} {:#010x}", flags, color));
    }

    fn present(&mut self) -> Result<()> {
        self.record("present".to_string());
        Ok(())
    }
}
