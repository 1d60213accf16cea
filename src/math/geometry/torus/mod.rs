// src/math/geometry/torus/mod.rs

// Höhenverschobener Torus: Gitter, Höhenfeld, Oberfläche, Netz, lokaler Rahmen
pub mod frame;
pub mod grid;
pub mod height_field;
pub mod mesh;
pub mod surface;

pub use self::frame::{SurfaceFrame, orthonormal_frame_at};
pub use self::grid::GridResolution;
pub use self::height_field::HeightField;
pub use self::mesh::{SurfaceMesh, SurfaceVertex};
pub use self::surface::{ToroidalSurface, torus_point};
