// src/render/surface_mesh.rs
use crate::math::{geometry::torus::SurfaceMesh, types::*};
use bevy::prelude::*;
use bevy::render::{
    mesh::{Indices, VertexAttributeValues},
    render_asset::RenderAssetUsages,
    render_resource::PrimitiveTopology,
};

/// Überträgt das GPU-freie Oberflächennetz in ein Bevy-`Mesh`.
///
/// Neben Position und Normale werden UVs (u, v) und die vorab berechneten
/// Vertexfarben (siehe `SurfaceShading`) geschrieben.
pub fn to_bevy_mesh(surface_mesh: &SurfaceMesh, colors: Vec<[f32; 4]>) -> Mesh {
    let vertices = &surface_mesh.vertices;

    let positions: Vec<[f32; 3]> = vertices.iter().map(|v| v.position.to_array()).collect();
    let normals: Vec<[f32; 3]> = vertices.iter().map(|v| v.normal.to_array()).collect();
    let uvs: Vec<[f32; 2]> = vertices
        .iter()
        .map(|v| [v.tex_coord.x, v.tex_coord.y])
        .collect();

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
        .with_inserted_indices(Indices::U32(surface_mesh.indices.clone()))
}

/// Achsenparallele Box eines Meshes aus seinem Positions-Attribut
pub fn mesh_bounds(mesh: &Mesh) -> Option<Bounds3D> {
    match mesh.attribute(Mesh::ATTRIBUTE_POSITION)? {
        VertexAttributeValues::Float32x3(positions) => {
            Bounds3D::from_points_iter(positions.iter().map(|p| Point3D::from(*p)))
        }
        _ => None,
    }
}
