/// Dynamic mesh module - per-frame triangle emission and material state

// Module declarations
pub mod material;
pub mod mesh;
pub mod screen_mesh;

// Re-export everything from mesh.rs
pub use mesh::*;

// Re-export from other modules
pub use material::*;
pub use screen_mesh::*;
