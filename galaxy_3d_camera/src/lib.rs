/*!
# Galaxy 3D Camera

Camera and view-frustum culling for the Galaxy 3D rendering engine.

This crate turns a camera position and orientation into view and
view-projection matrices, extracts the six frustum planes from a combined
matrix, and classifies bounding volumes against them so the scene layer can
skip what is not visible.

## Architecture

- **Camera**: Position and Euler angles, lazily composed into a view matrix
- **FrustumPlanes**: Six inward-facing planes extracted from a view-projection matrix
- **Frustum**: Signed-distance capability shared by `Camera` and `FrustumPlanes`
- **Bounds**: Sphere, circle, ellipse and ellipsoid classification

Matrices and vectors are `glam` types, re-exported at the crate root.
*/

// Internal modules
mod error;
pub mod log;
pub mod camera;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging sub-module (types and dispatch, macros are exported at the crate root)
    pub mod log {
        pub use crate::log::{
            Logger, LogEntry, LogSeverity, DefaultLogger,
            set_logger, reset_logger, set_min_severity, min_severity,
        };
    }

    // Camera sub-module with all camera and culling types
    pub mod camera {
        pub use crate::camera::*;
    }
}

// Re-export math library at crate root
pub use glam;
