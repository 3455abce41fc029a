/// Scene module - object lookup traits and the name-keyed registry

// Module declarations
pub mod lookup;
pub mod registry;

// Re-export everything from lookup.rs
pub use lookup::*;

// Re-export from other modules
pub use registry::*;
