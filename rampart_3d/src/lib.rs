/*!
# Rampart 3D

Tactical view and display layer for RTS-style games.

This crate provides the camera and surface plumbing that sits between a
game's logic and its render backend: an overhead tactical camera with
zoom, rotation, shake, and map-edge pan constraints; a display manager
that owns views, reflows them across resolution changes, and runs movie
playback; and an immediate-mode dynamic mesh builder on top of abstract
GPU buffer traits. Backends implement the `RenderDevice` trait; the game
implements the terrain and scene lookup traits.

## Architecture

- **TacticalView**: overhead camera with the full transform pipeline
- **DisplayManager**: view ownership, resolution reflow, movie playback
- **DynamicMesh** / **ScreenMesh**: immediate-mode triangle emission
- **RenderDevice** / **BufferHandle**: backend seam for GPU resources
- **TerrainQuery** / **SceneLookup**: game-side collaborator seams

Everything is dependency-injected; nothing here is a global.
*/

// Internal modules
mod error;
pub mod log;
pub mod config;
pub mod terrain;
pub mod gpu;
pub mod dynamesh;
pub mod scene;
pub mod view;
pub mod display;

// Main rampart3d namespace module
pub mod rampart3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Configuration
    pub use crate::config::{DisplayConfig, ViewConfig};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // GPU sub-module with the backend seam
    pub mod gpu {
        pub use crate::gpu::*;
    }

    // Dynamic mesh sub-module
    pub mod dynamesh {
        pub use crate::dynamesh::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Terrain sub-module
    pub mod terrain {
        pub use crate::terrain::*;
    }

    // View sub-module
    pub mod view {
        pub use crate::view::*;
    }

    // Display sub-module
    pub mod display {
        pub use crate::display::*;
    }
}

// Re-export math library at crate root
pub use glam;
