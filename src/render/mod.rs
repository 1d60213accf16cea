// src/render/mod.rs
pub mod shading;
pub mod surface_mesh;

pub use shading::{SurfaceShading, SurfaceShadingInput, refresh_surface_shading_system};
pub use surface_mesh::{mesh_bounds, to_bevy_mesh};
