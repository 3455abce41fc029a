/// View module - camera math, shake generation, and the tactical view

// Module declarations
pub mod view;
pub mod camera;
pub mod shaker;
pub mod tactical_view;

// Re-export everything from view.rs
pub use view::*;

// Re-export from other modules
pub use camera::*;
pub use shaker::*;
pub use tactical_view::*;
