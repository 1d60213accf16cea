// src/math/geometry/mod.rs

pub mod torus;

// Re-Exporte für einen schnellen Zugriff auf die Kern-Geometrietypen
pub use self::torus::{
    GridResolution, HeightField, SurfaceFrame, SurfaceMesh, SurfaceVertex, ToroidalSurface,
    orthonormal_frame_at,
};
