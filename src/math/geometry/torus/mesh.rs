// src/math/geometry/torus/mesh.rs

use super::{grid::GridResolution, surface::ToroidalSurface};
use crate::math::types::*;

/// Ein Vertex des Oberflächennetzes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceVertex {
    pub position: Point3D,
    pub normal: Point3D,
    /// (u, v, Höhe): u entlang der Spalten, v entlang der Zeilen, dritte
    /// Komponente ist die abgetastete Höhe für das Einfärben im Renderer.
    pub tex_coord: Point3D,
}

/// GPU-freie Vertex-/Index-Puffer des gesamten Torus.
///
/// Die letzte Zeile und Spalte duplizieren die erste geometrisch (eigene
/// Texturkoordinaten), deshalb gibt es `(rows-1) * (cols-1)` Zellen mit je
/// zwei Dreiecken und keine entarteten Dreiecke an der Naht.
#[derive(Debug, Clone)]
pub struct SurfaceMesh {
    pub grid: GridResolution,
    pub vertices: Vec<SurfaceVertex>,
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    pub fn generate(surface: &ToroidalSurface) -> Self {
        let grid = surface.grid();
        Self {
            grid,
            vertices: generate_vertices(surface),
            indices: generate_indices(grid),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| [tri[0], tri[1], tri[2]])
    }
}

fn generate_vertices(surface: &ToroidalSurface) -> Vec<SurfaceVertex> {
    let grid = surface.grid();
    let mut vertices = Vec::with_capacity(grid.vertex_count());

    for i in 0..grid.rows {
        for j in 0..grid.cols {
            let (row, col) = (i as f32, j as f32);
            vertices.push(SurfaceVertex {
                position: surface.vertex_at(row, col),
                normal: surface.normal_at(row, col, true),
                tex_coord: Point3D::new(
                    col / grid.col_period(),
                    row / grid.row_period(),
                    surface.height_at(row, col),
                ),
            });
        }
    }
    vertices
}

/// Zwei Dreiecke pro Zelle, nach außen gewickelt (gegen den Uhrzeigersinn
/// von außen betrachtet).
fn generate_indices(grid: GridResolution) -> Vec<u32> {
    let mut indices = Vec::with_capacity(grid.cell_count() * 6);

    for i in 0..grid.rows - 1 {
        for j in 0..grid.cols - 1 {
            let (next_i, next_j) = (i + 1, j + 1);

            let a = grid.index(i, j) as u32;
            let b = grid.index(i, next_j) as u32;
            let c = grid.index(next_i, j) as u32;
            let d = grid.index(next_i, next_j) as u32;

            indices.extend_from_slice(&[a, c, b]);
            indices.extend_from_slice(&[b, c, d]);
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::torus::height_field::HeightField;
    use std::collections::HashMap;

    fn surface(rows: usize, cols: usize) -> ToroidalSurface {
        let grid = GridResolution::new(rows, cols).unwrap();
        let red: Vec<u8> = (0..16 * 16).map(|i| ((i % 16) * 10) as u8).collect();
        let field = HeightField::from_samples(16, 16, &red, grid, 1.0).unwrap();
        ToroidalSurface::new(10.0, 2.0, field).unwrap()
    }

    #[test]
    fn test_buffer_sizes() {
        let mesh = surface(12, 8).build_mesh();
        assert_eq!(mesh.vertices.len(), 12 * 8);
        assert_eq!(mesh.indices.len(), 6 * 11 * 7);
        assert_eq!(mesh.triangle_count(), 2 * 11 * 7);
        assert!(mesh.indices.iter().all(|&idx| (idx as usize) < mesh.vertices.len()));
    }

    #[test]
    fn test_no_degenerate_triangles() {
        let mesh = surface(12, 8).build_mesh();
        for [a, b, c] in mesh.triangles() {
            let pa = mesh.vertices[a as usize].position;
            let pb = mesh.vertices[b as usize].position;
            let pc = mesh.vertices[c as usize].position;
            let area = (pb - pa).cross(pc - pa).length() * 0.5;
            assert!(area > 1e-4, "degenerate triangle {a} {b} {c}");
        }
    }

    #[test]
    fn test_closed_after_welding_seam() {
        let grid = GridResolution::new(9, 6).unwrap();
        let mesh = surface(9, 6).build_mesh();

        // Nahtvertices auf ihre geometrischen Zwillinge abbilden
        let weld = |idx: u32| {
            let (row, col) = (idx as usize / grid.cols, idx as usize % grid.cols);
            grid.index(row % (grid.rows - 1), col % (grid.cols - 1))
        };

        let mut edge_use: HashMap<(usize, usize), usize> = HashMap::new();
        for [a, b, c] in mesh.triangles() {
            for (p, q) in [(a, b), (b, c), (c, a)] {
                let (p, q) = (weld(p), weld(q));
                *edge_use.entry((p.min(q), p.max(q))).or_default() += 1;
            }
        }
        assert!(edge_use.values().all(|&count| count == 2));
    }

    #[test]
    fn test_winding_faces_outward() {
        let mesh = surface(20, 12).build_mesh();
        for [a, b, c] in mesh.triangles() {
            let pa = mesh.vertices[a as usize].position;
            let pb = mesh.vertices[b as usize].position;
            let pc = mesh.vertices[c as usize].position;
            let face_normal = (pb - pa).cross(pc - pa);
            let vertex_normal = mesh.vertices[a as usize].normal;
            assert!(face_normal.dot(vertex_normal) > 0.0);
        }
    }

    #[test]
    fn test_tex_coords_span_unit_square() {
        let mesh = surface(5, 4).build_mesh();
        let first = mesh.vertices.first().unwrap().tex_coord;
        let last = mesh.vertices.last().unwrap().tex_coord;
        assert_eq!((first.x, first.y), (0.0, 0.0));
        assert_eq!((last.x, last.y), (1.0, 1.0));
        assert!(mesh.vertices.iter().all(|v| v.tex_coord.z >= 0.0 && v.tex_coord.z <= 2.0));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = surface(10, 10).build_mesh();
        let b = surface(10, 10).build_mesh();
        assert_eq!(a.indices, b.indices);
        assert_eq!(a.vertices, b.vertices);
    }
}
