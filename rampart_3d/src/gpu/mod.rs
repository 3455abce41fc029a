/// GPU module - device abstraction, buffer wrappers, and format mapping

// Module declarations
pub mod device;
pub mod format;
pub mod buffer;
pub mod null_device;

#[cfg(test)]
pub mod mock_device;

// Re-export everything from device.rs
pub use device::*;

// Re-export from other modules
pub use format::*;
pub use buffer::*;
pub use null_device::*;
