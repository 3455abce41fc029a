/// Display module - surface management, view reflow, and movie playback

// Module declarations
pub mod clock;
pub mod video;
pub mod display;

// Re-export everything from display.rs
pub use display::*;

// Re-export from other modules
pub use clock::*;
pub use video::*;
